//! Evaluation metrics: Precision@K, Recall@K, F1, and the per-rank PR curve.

use crate::data::PrPoint;
use std::collections::HashSet;

/// Precision at K: proportion of top-K results that are relevant.
/// Returns (relevant count in top-K) / K. If k is 0, returns 0.0.
///
/// When fewer than K results were retrieved the missing ranks count as non-relevant.
pub fn precision_at_k(retrieved: &[String], relevant: &[String], k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    let relevant: HashSet<&str> = relevant.iter().map(String::as_str).collect();
    let relevant_count = retrieved
        .iter()
        .take(k)
        .filter(|id| relevant.contains(id.as_str()))
        .count();
    relevant_count as f64 / k as f64
}

/// Recall at K: proportion of all relevant documents that appear in top-K.
/// If there are no relevant documents (denominator 0), returns 0.0.
pub fn recall_at_k(retrieved: &[String], relevant: &[String], k: usize) -> f64 {
    let relevant: HashSet<&str> = relevant.iter().map(String::as_str).collect();
    if relevant.is_empty() {
        return 0.0;
    }
    let retrieved_relevant = retrieved
        .iter()
        .take(k)
        .filter(|id| relevant.contains(id.as_str()))
        .count();
    retrieved_relevant as f64 / relevant.len() as f64
}

/// Harmonic mean of precision and recall; 0.0 when both are 0.
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// One (precision, recall) point per rank: after the i-th retrieved document,
/// precision = hits / i and recall = hits / |relevant|.
pub fn pr_points(retrieved: &[String], relevant: &[String]) -> Vec<PrPoint> {
    let relevant: HashSet<&str> = relevant.iter().map(String::as_str).collect();
    let mut hits = 0usize;
    retrieved
        .iter()
        .enumerate()
        .map(|(index, id)| {
            if relevant.contains(id.as_str()) {
                hits += 1;
            }
            let precision = hits as f64 / (index + 1) as f64;
            let recall = if relevant.is_empty() {
                0.0
            } else {
                hits as f64 / relevant.len() as f64
            };
            PrPoint::new(precision, recall)
        })
        .collect()
}
