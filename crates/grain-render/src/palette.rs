//! Colors used by the framebuffer

use grain_core::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub particle: Color,
    /// Floor guide line
    pub floor: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            particle: Color::GREEN,
            floor: Color::BLUE,
        }
    }
}
