// engine/src/engine/geometry.rs
#![forbid(unsafe_code)]

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("polygon needs at least three distinct points, got {0}")]
    TooFewPoints(usize),
    #[error("degenerate shape: {0}")]
    DegenerateShape(&'static str),
    #[error("unparsable point pair {0:?}")]
    BadPoint(String),
}

/// Closed planar polygon. Immutable once constructed; the rasterizer is the
/// only consumer.
#[derive(Clone, Debug)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from an ordered point list.
    ///
    /// The last point may duplicate the first (an explicit closing point);
    /// it is dropped. Degenerate shapes (fewer than three points, zero
    /// area, zero width or height) fail fast here, before any grid exists.
    pub fn from_points(mut points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(GeometryError::TooFewPoints(points.len()));
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::DegenerateShape("non-finite coordinate"));
        }

        let polygon = Polygon { points };
        let (min_x, min_y, max_x, max_y) = polygon.bounds();
        if max_x - min_x <= 0.0 {
            return Err(GeometryError::DegenerateShape("zero width"));
        }
        if max_y - min_y <= 0.0 {
            return Err(GeometryError::DegenerateShape("zero height"));
        }
        if polygon.area() <= 0.0 {
            return Err(GeometryError::DegenerateShape("zero area"));
        }
        Ok(polygon)
    }

    /// Parse a whitespace-separated `x,y` pair list (the format the external
    /// vector-extraction service emits).
    pub fn parse_points(text: &str) -> Result<Self, GeometryError> {
        let mut points = Vec::new();
        for token in text.split_whitespace() {
            let mut parts = token.split(',');
            let (x, y) = match (parts.next(), parts.next(), parts.next()) {
                (Some(x), Some(y), None) => (x, y),
                _ => return Err(GeometryError::BadPoint(token.to_string())),
            };
            let x: f64 = x
                .parse()
                .map_err(|_| GeometryError::BadPoint(token.to_string()))?;
            let y: f64 = y
                .parse()
                .map_err(|_| GeometryError::BadPoint(token.to_string()))?;
            points.push(Point { x, y });
        }
        Self::from_points(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (min_x, min_y, max_x, max_y)
    }

    pub fn width(&self) -> f64 {
        let (min_x, _, max_x, _) = self.bounds();
        max_x - min_x
    }

    pub fn height(&self) -> f64 {
        let (_, min_y, _, max_y) = self.bounds();
        max_y - min_y
    }

    /// Unsigned shoelace area.
    pub fn area(&self) -> f64 {
        shoelace(&self.points).abs()
    }

    /// Area of the polygon clipped to an axis-aligned cell rectangle
    /// (Sutherland-Hodgman against the four half-planes, then shoelace).
    pub fn clip_area(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> f64 {
        let mut clipped = clip_halfplane(&self.points, |p| p.x >= min_x, |a, b| {
            intersect_x(a, b, min_x)
        });
        clipped = clip_halfplane(&clipped, |p| p.x <= max_x, |a, b| intersect_x(a, b, max_x));
        clipped = clip_halfplane(&clipped, |p| p.y >= min_y, |a, b| intersect_y(a, b, min_y));
        clipped = clip_halfplane(&clipped, |p| p.y <= max_y, |a, b| intersect_y(a, b, max_y));
        shoelace(&clipped).abs()
    }
}

/// Signed area * 1 (already halved).
fn shoelace(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    let mut prev = points[points.len() - 1];
    for &cur in points {
        twice_area += prev.x * cur.y - cur.x * prev.y;
        prev = cur;
    }
    twice_area / 2.0
}

fn clip_halfplane<I, X>(points: &[Point], inside: I, intersect: X) -> Vec<Point>
where
    I: Fn(Point) -> bool,
    X: Fn(Point, Point) -> Point,
{
    let mut out = Vec::with_capacity(points.len() + 4);
    if points.is_empty() {
        return out;
    }
    let mut prev = points[points.len() - 1];
    let mut prev_inside = inside(prev);
    for &cur in points {
        let cur_inside = inside(cur);
        if cur_inside {
            if !prev_inside {
                out.push(intersect(prev, cur));
            }
            out.push(cur);
        } else if prev_inside {
            out.push(intersect(prev, cur));
        }
        prev = cur;
        prev_inside = cur_inside;
    }
    out
}

/// Intersection of segment a-b with the vertical line x = k.
/// Callers only invoke this when a and b straddle the line, so a.x != b.x.
fn intersect_x(a: Point, b: Point, k: f64) -> Point {
    let t = (k - a.x) / (b.x - a.x);
    Point {
        x: k,
        y: a.y + t * (b.y - a.y),
    }
}

fn intersect_y(a: Point, b: Point, k: f64) -> Point {
    let t = (k - a.y) / (b.y - a.y);
    Point {
        x: a.x + t * (b.x - a.x),
        y: k,
    }
}
