//! Geometry for overlay placement.

/// Bounding box of an element, in CSS pixels from the viewport origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left, px.
    pub x: f32,
    /// Top, px.
    pub y: f32,
    /// Box width, px.
    pub width: f32,
    /// Box height, px.
    pub height: f32,
}

impl Rect {
    /// Box at (`x`, `y`) of the given size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// `x + width`.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// `y + height`.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the horizontal center.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// Hit test, half-open on the right and bottom edges.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Top-left corner for a box of `size` centered above this rect,
    /// leaving `gap` pixels between the two.
    ///
    /// Not clamped: a tooltip over an element at the top of the viewport
    /// may start at a negative y.
    #[must_use]
    pub fn place_above(&self, size: (f32, f32), gap: f32) -> (f32, f32) {
        (self.center_x() - size.0 * 0.5, self.y - size.1 - gap)
    }
}
