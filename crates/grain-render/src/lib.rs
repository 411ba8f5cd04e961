//! Grain Render - headless framebuffer for the sand simulation
//!
//! Consumes `FrameDelta`s through the `PixelSink` port and can export the
//! result as PNG or as an ASCII preview.

mod framebuffer;
mod palette;

pub use framebuffer::Framebuffer;
pub use palette::Palette;
