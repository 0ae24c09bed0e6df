/// Axis-aligned rectangle used for every on-screen entity.
///
/// Edge and center accessors follow the usual raster conventions:
/// `right = x + width`, `centerx = x + width / 2` (integer division).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.height / 2
    }

    /// AABB overlap test.  Rects that merely share an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}
