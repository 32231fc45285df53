/// An axis-aligned rectangle in page coordinates, as returned by a
/// bounding-box query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Smallest rectangle containing all given points.
    pub fn bounding(points: &[(f32, f32)]) -> Self {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if points.is_empty() {
            return Self::default();
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// The four corners, clockwise from top-left.
    pub fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.left(), self.top()),
            (self.right(), self.top()),
            (self.right(), self.bottom()),
            (self.left(), self.bottom()),
        ]
    }

    /// Whether any part of this rect lies inside a viewport of the given size
    /// anchored at the origin.
    pub fn intersects_viewport(&self, viewport_width: f32, viewport_height: f32) -> bool {
        self.bottom() > 0.0
            && self.top() < viewport_height
            && self.right() > 0.0
            && self.left() < viewport_width
    }

    /// Exact equality of position and size. Used for the no-op fast path, so
    /// no tolerance is applied.
    pub fn same_box(&self, other: &Rect) -> bool {
        self.left() == other.left()
            && self.top() == other.top()
            && self.width == other.width
            && self.height == other.height
    }
}
