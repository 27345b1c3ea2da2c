use std::path::PathBuf;

use anyhow::Context;
use svg::node::element::{path::Data, Circle, Path, Text};
use svg::Document;

use crate::geom::Point;

const MARGIN: f64 = 0.25;
const MARKER_RADIUS: f64 = 0.03;
const FONT_SIZE: f64 = 0.12;
const ARROW_HEAD: f64 = 0.06;
const ARROW_SHRINK: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Black,
    Red,
    Blue,
}

impl Color {
    fn as_str(self) -> &'static str {
        return match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Blue => "blue",
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Style {
    pub(crate) color: Color,
    pub(crate) dashed: bool,
    pub(crate) width: f64,
}

impl Style {
    pub(crate) fn solid(color: Color) -> Self {
        return Style {
            color,
            dashed: false,
            width: 1.0,
        };
    }

    pub(crate) fn dashed(color: Color) -> Self {
        return Style {
            color,
            dashed: true,
            width: 1.0,
        };
    }

    pub(crate) fn with_width(self, width: f64) -> Self {
        return Style { width, ..self };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Primitive {
    Line { from: Point, to: Point, style: Style },
    Marker { at: Point },
    Polyline { points: Vec<Point>, style: Style },
    Label { at: Point, text: String, style: Style },
    Callout { text: String, target: Point, text_at: Point },
}

impl Primitive {
    fn points(&self) -> Vec<Point> {
        return match self {
            Primitive::Line { from, to, .. } => vec![*from, *to],
            Primitive::Marker { at } => vec![*at],
            Primitive::Polyline { points, .. } => points.clone(),
            Primitive::Label { at, .. } => vec![*at],
            Primitive::Callout {
                target, text_at, ..
            } => vec![*target, *text_at],
        };
    }
}

/// Anything the diagrams can be drawn onto.
pub(crate) trait Surface {
    fn draw(&mut self, primitive: Primitive);

    /// Finish the current figure. The surface starts empty afterwards.
    fn show(&mut self) -> anyhow::Result<()>;
}

/// Keeps every figure in memory, one frame per `show`.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    current: Vec<Primitive>,
    frames: Vec<Vec<Primitive>>,
}

impl Recorder {
    pub(crate) fn frames(&self) -> &[Vec<Primitive>] {
        return &self.frames;
    }
}

impl Surface for Recorder {
    fn draw(&mut self, primitive: Primitive) {
        self.current.push(primitive);
    }

    fn show(&mut self) -> anyhow::Result<()> {
        log::debug!("Recorded frame with {} primitives", self.current.len());
        self.frames.push(std::mem::take(&mut self.current));
        return Ok(());
    }
}

/// Writes each shown figure as an SVG file, y axis up, equal aspect.
pub(crate) struct SvgSurface {
    target: PathBuf,
    primitives: Vec<Primitive>,
}

impl SvgSurface {
    pub(crate) fn new(target: PathBuf) -> Self {
        return SvgSurface {
            target,
            primitives: vec![],
        };
    }

    pub(crate) fn document(&self) -> Document {
        let all: Vec<Point> = self.primitives.iter().flat_map(|p| p.points()).collect();
        let (x, y, w, h) = view_box(&all);
        let stroke = 0.01 * w.max(h);

        let mut document = Document::new()
            .set("viewBox", (x, y, w, h))
            .set("width", "600")
            .set("height", (600.0 * h / w).round());

        for primitive in &self.primitives {
            document = match primitive {
                Primitive::Line { from, to, style } => {
                    let data = Data::new().move_to(flip(*from)).line_to(flip(*to));
                    document.add(stroked(data, style, stroke))
                }
                Primitive::Marker { at } => {
                    let (cx, cy) = flip(*at);
                    document.add(
                        Circle::new()
                            .set("cx", cx)
                            .set("cy", cy)
                            .set("r", MARKER_RADIUS)
                            .set("fill", "black"),
                    )
                }
                Primitive::Polyline { points, style } => match polyline(points) {
                    Some(data) => document.add(stroked(data, style, stroke)),
                    None => document,
                },
                Primitive::Label { at, text, style } => {
                    document.add(label(*at, text, style.color))
                }
                Primitive::Callout {
                    text,
                    target,
                    text_at,
                } => {
                    let (shaft, head) = arrow(*text_at, *target);
                    document
                        .add(label(*text_at, text, Color::Black))
                        .add(stroked(shaft, &Style::solid(Color::Black), stroke))
                        .add(Path::new().set("fill", "black").set("d", head))
                }
            };
        }

        return document;
    }
}

impl Surface for SvgSurface {
    fn draw(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    fn show(&mut self) -> anyhow::Result<()> {
        let document = self.document();
        svg::save(&self.target, &document)
            .with_context(|| format!("failed to write {}", self.target.display()))?;

        log::info!(
            "Wrote {} primitives to {}",
            self.primitives.len(),
            self.target.display()
        );
        self.primitives.clear();

        return Ok(());
    }
}

fn flip(p: Point) -> Point {
    return (p.0, -p.1);
}

/// Bounding box of `points` in flipped SVG coordinates, padded by a margin.
pub(crate) fn view_box(points: &[Point]) -> (f64, f64, f64, f64) {
    let finite: Vec<Point> = points
        .iter()
        .map(|p| flip(*p))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    if finite.is_empty() {
        return (-1.0, -1.0, 2.0, 2.0);
    }

    let mut min = finite[0];
    let mut max = finite[0];
    for (x, y) in &finite {
        min = (min.0.min(*x), min.1.min(*y));
        max = (max.0.max(*x), max.1.max(*y));
    }

    return (
        min.0 - MARGIN,
        min.1 - MARGIN,
        max.0 - min.0 + 2.0 * MARGIN,
        max.1 - min.1 + 2.0 * MARGIN,
    );
}

fn polyline(points: &[Point]) -> Option<Data> {
    let (first, rest) = points.split_first()?;
    let mut data = Data::new().move_to(flip(*first));
    for p in rest {
        data = data.line_to(flip(*p));
    }
    return Some(data);
}

fn stroked(data: Data, style: &Style, stroke: f64) -> Path {
    let path = Path::new()
        .set("fill", "none")
        .set("stroke", style.color.as_str())
        .set("stroke-width", stroke * style.width)
        .set("d", data);

    if style.dashed {
        return path.set("stroke-dasharray", format!("{} {}", 4.0 * stroke, 2.0 * stroke));
    }
    return path;
}

fn label(at: Point, text: &str, color: Color) -> Text {
    let (x, y) = flip(at);
    return Text::new(text)
        .set("x", x)
        .set("y", y)
        .set("font-size", FONT_SIZE)
        .set("fill", color.as_str());
}

/// Shaft and head of an arrow pointing from `from` to `to`, shortened at both ends.
fn arrow(from: Point, to: Point) -> (Data, Data) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let start = (from.0 + ARROW_SHRINK * dx, from.1 + ARROW_SHRINK * dy);
    let tip = (to.0 - ARROW_SHRINK * dx, to.1 - ARROW_SHRINK * dy);

    let len = dx.hypot(dy);
    let (ux, uy) = if len > 0.0 { (dx / len, dy / len) } else { (0.0, 0.0) };
    let base = (tip.0 - ARROW_HEAD * ux, tip.1 - ARROW_HEAD * uy);
    let half = 0.5 * ARROW_HEAD;

    let shaft = Data::new().move_to(flip(start)).line_to(flip(base));
    let head = Data::new()
        .move_to(flip(tip))
        .line_to(flip((base.0 - half * uy, base.1 + half * ux)))
        .line_to(flip((base.0 + half * uy, base.1 - half * ux)))
        .close();

    return (shaft, head);
}
