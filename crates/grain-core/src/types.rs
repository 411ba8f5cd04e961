//! Grid and color types

use std::fmt;

/// An integer grid coordinate.
///
/// `y` grows downward, matching screen space: the cell "below" `(x, y)` is
/// `(x, y + 1)`. A cell holds at most one particle, so a `Cell` doubles as the
/// particle's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The cell directly underneath
    pub const fn below(self) -> Self {
        self.offset(0, 1)
    }

    pub const fn below_left(self) -> Self {
        self.offset(-1, 1)
    }

    pub const fn below_right(self) -> Self {
        self.offset(1, 1)
    }

    /// Row-major ordering key (top to bottom, then left to right)
    pub fn row_major(&self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const GREEN: Self = Self {
        r: 0.0,
        g: 1.0,
        b: 0.0,
        a: 1.0,
    };
    pub const BLUE: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 1.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Quantize to 8-bit RGBA (components clamped to [0, 1])
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_neighbors() {
        let c = Cell::new(200, 299);
        assert_eq!(c.below(), Cell::new(200, 300));
        assert_eq!(c.below_left(), Cell::new(199, 300));
        assert_eq!(c.below_right(), Cell::new(201, 300));
    }

    #[test]
    fn test_cell_row_major_order() {
        let mut cells = vec![Cell::new(5, 2), Cell::new(1, 3), Cell::new(0, 2)];
        cells.sort_by_key(|c| c.row_major());
        assert_eq!(cells, vec![Cell::new(0, 2), Cell::new(5, 2), Cell::new(1, 3)]);
    }

    #[test]
    fn test_color_to_rgba8() {
        assert_eq!(Color::GREEN.to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }
}
