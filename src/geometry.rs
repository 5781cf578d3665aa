use serde::Serialize;

/// Length in device-independent units.
pub type Dp = f32;

/// Size measured in device-independent units (already scaled when it comes
/// out of the projector).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: Dp,
    pub height: Dp,
}

impl Size {
    pub const fn new(width: Dp, height: Dp) -> Self {
        Self { width, height }
    }
}

/// Point on the canvas, origin at the top-left corner of the device frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: Dp,
    pub y: Dp,
}

impl Point {
    pub const fn new(x: Dp, y: Dp) -> Self {
        Self { x, y }
    }
}

/// Rectangle anchored within the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: Dp,
    pub y: Dp,
    pub width: Dp,
    pub height: Dp,
}

impl Rect {
    pub const fn new(x: Dp, y: Dp, width: Dp, height: Dp) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> Dp {
        self.y + self.height
    }

    pub fn right(&self) -> Dp {
        self.x + self.width
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}
