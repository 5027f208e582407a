//! Rendering and input collaborators consumed by the run loops
//!
//! The core never owns a window or event queue; it draws through these
//! traits and lets the frontend decide what they mean.

use crate::Rgba;
use anyhow::Result;

/// A filled rectangle in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Input events the loops react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    MouseMove { x: i32, y: i32 },
    /// Left button press at a pixel position.
    MouseDown { x: i32, y: i32 },
    /// A non-repeating press of a digit key, 1..=9.
    Digit(u8),
}

/// Draw surface. Color state is set once and consumed by the draw calls
/// that follow, mirroring the underlying renderer model.
pub trait Canvas {
    fn set_color(&mut self, color: Rgba);
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect);
    /// Draw grid lines every `cell_size` pixels in the current color.
    fn draw_grid(&mut self, cell_size: u32);
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
    /// Flip the finished frame to the screen.
    fn present(&mut self) -> Result<()>;
}

/// Pending-input queue.
pub trait EventSource {
    /// Drain one pending event; `None` once the queue is empty.
    fn poll(&mut self) -> Result<Option<InputEvent>>;
}
