use super::{Dash, Figure, Marker, Panel, Series};
use crate::config::{LegendPosition, PlotConfig};
use crate::error::{PrcurveError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use std::path::Path;

const FIGURE_TITLE_HEIGHT: f64 = 40.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 44.0;
const LEGEND_ROW: f64 = 18.0;
const LEGEND_SAMPLE: f64 = 28.0;
const TICK_STEP: f64 = 0.2;
const FONT: &str = "sans-serif";

/// Maps data coordinates of one panel to SVG pixels.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_limits: [f64; 2],
    y_limits: [f64; 2],
}

impl Frame {
    fn x(&self, value: f64) -> f64 {
        self.left
            + (value - self.x_limits[0]) / (self.x_limits[1] - self.x_limits[0]) * self.width
    }

    fn y(&self, value: f64) -> f64 {
        self.top + self.height
            - (value - self.y_limits[0]) / (self.y_limits[1] - self.y_limits[0]) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Thin wrapper over the quick-xml writer for attribute-heavy SVG output.
/// Writer failures surface as [`PrcurveError::Render`].
struct SvgWriter<W: Write = Vec<u8>> {
    writer: Writer<W>,
}

impl SvgWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn finish(self) -> Result<String> {
        let bytes = self.writer.into_inner();
        String::from_utf8(bytes).map_err(|e| PrcurveError::Render(e.to_string()))
    }
}

impl<W: Write> SvgWriter<W> {
    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| PrcurveError::Render(e.to_string()))
    }

    fn declaration(&mut self) -> Result<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn element(name: &str, attrs: &[(&str, String)]) -> BytesStart<'static> {
        let mut element = BytesStart::new(name.to_string());
        for (key, value) in attrs {
            element.push_attribute((*key, value.as_str()));
        }
        element
    }

    fn start(&mut self, name: &str, attrs: &[(&str, String)]) -> Result<()> {
        self.write(Event::Start(Self::element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, String)]) -> Result<()> {
        self.write(Event::Empty(Self::element(name, attrs)))
    }

    fn text(&mut self, name: &str, attrs: &[(&str, String)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }
}

fn px(value: f64) -> String {
    format!("{:.2}", value)
}

fn legend_rows(panel: &Panel, legend: LegendPosition) -> f64 {
    match legend {
        LegendPosition::Below => panel.series.len() as f64 * LEGEND_ROW + 8.0,
        LegendPosition::UpperRight | LegendPosition::LowerLeft => 0.0,
    }
}

/// Render a figure as a standalone SVG document, panels stacked top to bottom.
pub fn render_svg(figure: &Figure, config: &PlotConfig) -> Result<String> {
    let width = config.width as f64;
    let panel_heights: Vec<f64> = figure
        .panels
        .iter()
        .map(|p| config.panel_height as f64 + legend_rows(p, config.legend))
        .collect();
    let height = FIGURE_TITLE_HEIGHT + panel_heights.iter().sum::<f64>();

    let mut svg = SvgWriter::new();
    svg.declaration()?;
    svg.start(
        "svg",
        &[
            ("xmlns", "http://www.w3.org/2000/svg".to_string()),
            ("version", "1.1".to_string()),
            ("width", px(width)),
            ("height", px(height)),
            ("viewBox", format!("0 0 {} {}", px(width), px(height))),
            ("font-family", FONT.to_string()),
        ],
    )?;
    svg.text("title", &[], &figure.title)?;
    svg.empty(
        "rect",
        &[
            ("width", "100%".to_string()),
            ("height", "100%".to_string()),
            ("fill", "white".to_string()),
        ],
    )?;
    svg.text(
        "text",
        &[
            ("x", px(width / 2.0)),
            ("y", px(FIGURE_TITLE_HEIGHT * 0.65)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "16".to_string()),
            ("font-weight", "bold".to_string()),
        ],
        &figure.title,
    )?;

    let mut offset = FIGURE_TITLE_HEIGHT;
    let panels = figure.panels.iter().zip(&panel_heights);
    for (index, (panel, panel_height)) in panels.enumerate() {
        let frame = Frame {
            left: MARGIN_LEFT,
            top: offset + MARGIN_TOP,
            width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (config.panel_height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            x_limits: config.x_limits,
            y_limits: config.y_limits,
        };
        render_panel(&mut svg, index, panel, &frame, config)?;
        offset += panel_height;
    }

    svg.end("svg")?;
    svg.finish()
}

/// Render and write the figure to `path`.
pub fn write_svg(figure: &Figure, config: &PlotConfig, path: &Path) -> Result<()> {
    let document = render_svg(figure, config)?;
    std::fs::write(path, document)?;
    log::info!("Wrote {} panel(s) to {}", figure.panels.len(), path.display());
    Ok(())
}

fn render_panel(
    svg: &mut SvgWriter,
    index: usize,
    panel: &Panel,
    frame: &Frame,
    config: &PlotConfig,
) -> Result<()> {
    let clip_id = format!("plot-area-{}", index);
    svg.start("g", &[("class", "panel".to_string())])?;

    svg.start("defs", &[])?;
    svg.start("clipPath", &[("id", clip_id.clone())])?;
    svg.empty(
        "rect",
        &[
            ("x", px(frame.left)),
            ("y", px(frame.top)),
            ("width", px(frame.width)),
            ("height", px(frame.height)),
        ],
    )?;
    svg.end("clipPath")?;
    svg.end("defs")?;

    svg.text(
        "text",
        &[
            ("x", px(frame.left + frame.width / 2.0)),
            ("y", px(frame.top - 26.0)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "13".to_string()),
        ],
        &panel.title,
    )?;
    svg.text(
        "text",
        &[
            ("x", px(frame.left + frame.width / 2.0)),
            ("y", px(frame.top - 10.0)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "10".to_string()),
            ("fill", "#555555".to_string()),
        ],
        &panel.caption,
    )?;

    render_axes(svg, frame, config.grid)?;

    svg.start("g", &[("clip-path", format!("url(#{})", clip_id))])?;
    for series in &panel.series {
        render_series(svg, series, frame)?;
    }
    svg.end("g")?;

    render_legend(svg, panel, frame, config.legend)?;

    svg.end("g")
}

fn ticks(limits: [f64; 2]) -> Vec<f64> {
    let first = (limits[0] / TICK_STEP - 1e-9).ceil() as i64;
    let last = (limits[1] / TICK_STEP + 1e-9).floor() as i64;
    (first..=last).map(|i| i as f64 * TICK_STEP).collect()
}

fn render_axes(svg: &mut SvgWriter, frame: &Frame, grid: bool) -> Result<()> {
    let x_ticks = ticks(frame.x_limits);
    let y_ticks = ticks(frame.y_limits);

    if grid {
        svg.start(
            "g",
            &[
                ("stroke", "#cccccc".to_string()),
                ("stroke-dasharray", "2,2".to_string()),
                ("stroke-width", "0.8".to_string()),
            ],
        )?;
        for &t in &x_ticks {
            let x = px(frame.x(t));
            svg.empty(
                "line",
                &[("x1", x.clone()), ("y1", px(frame.top)), ("x2", x), ("y2", px(frame.bottom()))],
            )?;
        }
        for &t in &y_ticks {
            let y = px(frame.y(t));
            svg.empty(
                "line",
                &[("x1", px(frame.left)), ("y1", y.clone()), ("x2", px(frame.right())), ("y2", y)],
            )?;
        }
        svg.end("g")?;
    }

    svg.empty(
        "rect",
        &[
            ("x", px(frame.left)),
            ("y", px(frame.top)),
            ("width", px(frame.width)),
            ("height", px(frame.height)),
            ("fill", "none".to_string()),
            ("stroke", "black".to_string()),
        ],
    )?;

    svg.start("g", &[("font-size", "10".to_string())])?;
    for &t in &x_ticks {
        let x = frame.x(t);
        svg.empty(
            "line",
            &[
                ("x1", px(x)),
                ("y1", px(frame.bottom())),
                ("x2", px(x)),
                ("y2", px(frame.bottom() + 4.0)),
                ("stroke", "black".to_string()),
            ],
        )?;
        svg.text(
            "text",
            &[
                ("x", px(x)),
                ("y", px(frame.bottom() + 15.0)),
                ("text-anchor", "middle".to_string()),
            ],
            &format!("{:.1}", t),
        )?;
    }
    for &t in &y_ticks {
        let y = frame.y(t);
        svg.empty(
            "line",
            &[
                ("x1", px(frame.left - 4.0)),
                ("y1", px(y)),
                ("x2", px(frame.left)),
                ("y2", px(y)),
                ("stroke", "black".to_string()),
            ],
        )?;
        svg.text(
            "text",
            &[
                ("x", px(frame.left - 7.0)),
                ("y", px(y + 3.5)),
                ("text-anchor", "end".to_string()),
            ],
            &format!("{:.1}", t),
        )?;
    }
    svg.end("g")?;

    svg.text(
        "text",
        &[
            ("x", px(frame.left + frame.width / 2.0)),
            ("y", px(frame.bottom() + 32.0)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "12".to_string()),
        ],
        "Recall",
    )?;
    let label_x = frame.left - 40.0;
    let label_y = frame.top + frame.height / 2.0;
    svg.text(
        "text",
        &[
            ("x", px(label_x)),
            ("y", px(label_y)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "12".to_string()),
            ("transform", format!("rotate(-90 {} {})", px(label_x), px(label_y))),
        ],
        "Precision",
    )
}

fn stroke_attrs(series: &Series) -> Vec<(&'static str, String)> {
    let mut attrs = vec![
        ("fill", "none".to_string()),
        ("stroke", series.style.color.to_string()),
        ("stroke-width", format!("{}", series.style.width)),
    ];
    if series.style.dash == Dash::DashDot {
        attrs.push(("stroke-dasharray", "8,3,2,3".to_string()));
    }
    attrs
}

fn render_series(svg: &mut SvgWriter, series: &Series, frame: &Frame) -> Result<()> {
    let points: Vec<String> = series
        .points
        .iter()
        .map(|&(x, y)| format!("{},{}", px(frame.x(x)), px(frame.y(y))))
        .collect();

    let mut attrs = stroke_attrs(series);
    attrs.push(("points", points.join(" ")));
    svg.empty("polyline", &attrs)?;

    for &(x, y) in &series.points {
        render_marker(svg, series, frame.x(x), frame.y(y))?;
    }
    Ok(())
}

fn render_marker(svg: &mut SvgWriter, series: &Series, cx: f64, cy: f64) -> Result<()> {
    match series.style.marker {
        Marker::None => Ok(()),
        Marker::Circle => svg.empty(
            "circle",
            &[
                ("cx", px(cx)),
                ("cy", px(cy)),
                ("r", "4".to_string()),
                ("fill", series.style.color.to_string()),
            ],
        ),
        Marker::Square => svg.empty(
            "rect",
            &[
                ("x", px(cx - 3.5)),
                ("y", px(cy - 3.5)),
                ("width", "7".to_string()),
                ("height", "7".to_string()),
                ("fill", series.style.color.to_string()),
            ],
        ),
    }
}

fn render_legend(
    svg: &mut SvgWriter,
    panel: &Panel,
    frame: &Frame,
    position: LegendPosition,
) -> Result<()> {
    let rows = panel.series.len() as f64;
    let box_width = 330.0_f64.min(frame.width);
    let box_height = rows * LEGEND_ROW + 6.0;
    let (left, top) = match position {
        LegendPosition::Below => (frame.left, frame.bottom() + MARGIN_BOTTOM),
        LegendPosition::UpperRight => (frame.right() - box_width - 6.0, frame.top + 6.0),
        LegendPosition::LowerLeft => (frame.left + 6.0, frame.bottom() - box_height - 6.0),
    };

    svg.start("g", &[("class", "legend".to_string()), ("font-size", "10".to_string())])?;
    svg.empty(
        "rect",
        &[
            ("x", px(left)),
            ("y", px(top)),
            ("width", px(box_width)),
            ("height", px(box_height)),
            ("fill", "white".to_string()),
            ("fill-opacity", "0.85".to_string()),
            ("stroke", "#999999".to_string()),
        ],
    )?;

    for (row, series) in panel.series.iter().enumerate() {
        let y = top + 3.0 + LEGEND_ROW * (row as f64 + 0.5);
        let x1 = left + 6.0;
        let x2 = x1 + LEGEND_SAMPLE;

        let mut attrs = stroke_attrs(series);
        attrs.extend([
            ("x1", px(x1)),
            ("y1", px(y)),
            ("x2", px(x2)),
            ("y2", px(y)),
        ]);
        svg.empty("line", &attrs)?;
        render_marker(svg, series, (x1 + x2) / 2.0, y)?;
        svg.text(
            "text",
            &[("x", px(x2 + 6.0)), ("y", px(y + 3.5))],
            &series.label,
        )?;
    }

    svg.end("g")
}
