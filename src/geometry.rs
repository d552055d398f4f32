use iced::{Point, Rectangle, Size};

/// Horizontal control-point offset is capped at this distance.
pub const MAX_CURVE_OFFSET: f32 = 80.0;

/// Nodes keep this gap to every canvas edge.
pub const CANVAS_MARGIN: f32 = 10.0;

/// A cubic Bézier between two anchors with horizontally extended control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePath {
    pub start: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub end: Point,
}

/// Build the link curve from `p1` to `p2`.
///
/// The control points leave each endpoint horizontally by
/// `min(|dx| * 0.5, 80)`, giving the left-to-right "S"/"C" shape
/// regardless of the vertical delta. Vertically stacked endpoints
/// produce a straight degenerate curve.
pub fn curve_path(p1: Point, p2: Point) -> CurvePath {
    let offset = ((p2.x - p1.x).abs() * 0.5).min(MAX_CURVE_OFFSET);
    CurvePath {
        start: p1,
        ctrl1: Point::new(p1.x + offset, p1.y),
        ctrl2: Point::new(p2.x - offset, p2.y),
        end: p2,
    }
}

impl CurvePath {
    /// SVG-style path descriptor (`M x y C ...`).
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.ctrl1.x,
            self.ctrl1.y,
            self.ctrl2.x,
            self.ctrl2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// Anchor of a port: the centre of its bounding rectangle.
pub fn anchor(rect: Rectangle) -> Point {
    rect.center()
}

/// Clamp a node's top-left so the whole node stays inside the canvas margins.
pub fn clamp_to_canvas(top_left: Point, node: Size, canvas: Size) -> Point {
    Point::new(
        clamp_axis(top_left.x, node.width, canvas.width),
        clamp_axis(top_left.y, node.height, canvas.height),
    )
}

fn clamp_axis(value: f32, extent: f32, bound: f32) -> f32 {
    // Lower bound wins when the canvas is too small to fit the node.
    value.min(bound - extent - CANVAS_MARGIN).max(CANVAS_MARGIN)
}
