use prcurve::config::{LegendPosition, PlotConfig};
use prcurve::data::load_inputs;
use prcurve::eval::RankedRun;
use prcurve::plot::{build_figure, render_svg, write_svg};
use prcurve::{analyze, ComparisonMode, CurveOptions, Report};
use std::fs;
use tempfile::TempDir;

/// PR data for a query with 4 relevant documents, in the three-column format.
const NON_STEMMED: &str = "\
0 1.0 0.25
1 0.5 0.25
2 0.33333334 0.25
3 0.5 0.5
4 0.4 0.5
5 0.5 0.75
";

const STEMMED: &str = "\
0 1.0 0.25
1 1.0 0.5
2 0.6666667 0.5
3 0.75 0.75
4 0.8 1.0
";

fn write_inputs(dir: &std::path::Path, queries: usize) {
    for q in 0..queries {
        fs::write(dir.join(format!("q{}.txt", q)), NON_STEMMED).unwrap();
        fs::write(dir.join(format!("q{}_stemmed.txt", q)), STEMMED).unwrap();
    }
}

#[test]
fn paired_directory_to_svg_and_report() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    write_inputs(&data_dir, 3);

    let series = load_inputs(&[data_dir.clone()]).unwrap();
    assert_eq!(series.len(), 6);
    // Each query is followed by its stemmed variant: q0, q0_stemmed, q1, ...
    assert_eq!(series[0].label, "q0");
    assert_eq!(series[1].label, "q0_stemmed");

    let analysis = analyze(
        "Stemming comparison",
        series,
        ComparisonMode::Paired,
        CurveOptions::default(),
    )
    .unwrap();
    assert_eq!(analysis.averages.len(), 2);

    let stemmed = &analysis.series[1];
    // Levels below 0.5 still reach the 1.0 precision at recall 0.5; from 0.5 on the
    // best remaining precision is 0.8.
    assert_eq!(stemmed.interpolated.precision[0], 1.0);
    assert_eq!(stemmed.interpolated.precision[4], 1.0);
    assert_eq!(stemmed.interpolated.precision[5], 0.8);
    assert_eq!(stemmed.interpolated.precision[10], 0.8);

    let non_stemmed = &analysis.series[0];
    // No recall above 0.75: the last levels fall back to the last precision.
    assert_eq!(non_stemmed.interpolated.precision[8], 0.5);
    assert_eq!(non_stemmed.interpolated.precision[10], 0.5);

    let figure = build_figure(&analysis);
    assert_eq!(figure.panels.len(), 4);

    let output = temp_dir.path().join("stemming.svg");
    write_svg(&figure, &PlotConfig::default(), &output).unwrap();
    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("Stemming comparison"));
    assert!(svg.contains("Average precision (non stemmed | stemmed)"));
    assert_eq!(svg.matches("class=\"panel\"").count(), 4);

    let report = Report::from_analysis(&analysis);
    assert_eq!(report.pairs.len(), 3);
    assert!(report.pairs.iter().all(|p| p.delta > 0.0));
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["averages"].as_array().unwrap().len(), 2);
}

#[test]
fn double_digit_queries_stay_paired() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(temp_dir.path(), 12);

    let series = load_inputs(&[temp_dir.path().to_path_buf()]).unwrap();
    let analysis = analyze(
        "Twelve queries",
        series,
        ComparisonMode::Paired,
        CurveOptions::default(),
    )
    .unwrap();

    let captions: Vec<String> = analysis
        .groups()
        .map(|pair| format!("{} | {}", pair[0].series.label, pair[1].series.label))
        .collect();
    assert_eq!(captions.len(), 12);
    for (q, caption) in captions.iter().enumerate() {
        assert_eq!(caption, &format!("q{} | q{}_stemmed", q, q));
    }
}

#[test]
fn single_file_has_one_panel() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("query.txt");
    fs::write(&path, NON_STEMMED).unwrap();

    let series = load_inputs(&[path]).unwrap();
    let analysis =
        analyze("One query", series, ComparisonMode::Single, CurveOptions::default()).unwrap();
    let figure = build_figure(&analysis);
    assert_eq!(figure.panels.len(), 1);

    let config = PlotConfig {
        legend: LegendPosition::LowerLeft,
        ..PlotConfig::default()
    };
    let svg = render_svg(&figure, &config).unwrap();
    assert!(svg.contains("11-step Interpolated Precision-Recall curve"));
}

#[test]
fn ranked_runs_feed_the_plotter() {
    let temp_dir = TempDir::new().unwrap();
    let runs = vec![
        RankedRun {
            query: "motion control".to_string(),
            variant: None,
            retrieved: vec!["4".into(), "9".into(), "2".into(), "7".into()],
            relevant: vec!["2".into(), "4".into()],
        },
        RankedRun {
            query: "motion control".to_string(),
            variant: Some("stemmed".to_string()),
            retrieved: vec!["4".into(), "2".into(), "9".into(), "7".into()],
            relevant: vec!["2".into(), "4".into()],
        },
    ];
    let paths: Vec<_> = runs
        .iter()
        .map(|run| run.write_pr_file(temp_dir.path()).unwrap())
        .collect();

    let series = load_inputs(&paths).unwrap();
    let analysis =
        analyze("Runs", series, ComparisonMode::Paired, CurveOptions::default()).unwrap();
    let report = Report::from_analysis(&analysis);

    // Stemmed run ranks both relevant docs first. Nothing has recall above 1.0, so the
    // last level takes the precision of the final rank.
    let stemmed = &report.series[1].interpolated.precision;
    assert!(stemmed[..10].iter().all(|&p| p == 1.0));
    assert_eq!(stemmed[10], 0.5);
    let pair = &report.pairs[0];
    assert!(pair.stemmed_average_precision > pair.non_stemmed_average_precision);
}

#[test]
fn odd_file_count_in_paired_mode_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(temp_dir.path(), 1);
    fs::write(temp_dir.path().join("z_extra.txt"), NON_STEMMED).unwrap();

    let series = load_inputs(&[temp_dir.path().to_path_buf()]).unwrap();
    assert!(analyze("odd", series, ComparisonMode::Paired, CurveOptions::default()).is_err());
}
