//! Rendering module
//!
//! The simulation draws through the [`Surface`] trait, a 2D drawing context
//! with clear / fill / stroke / text primitives. The browser build backs it
//! with a canvas 2D context; headless runs and tests record the commands.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Colors used on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Black,
    /// Player
    Yellow,
    /// Stronger than the player
    Red,
    /// Weaker than the player
    Green,
}

impl Color {
    /// CSS color name for canvas fill/stroke styles
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Green => "green",
        }
    }
}

/// 2D drawing context consumed by the board and actors
pub trait Surface {
    /// Clear the whole drawing area
    fn clear(&mut self);

    /// Circle actors are filled only, never outlined
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Fill an axis-aligned rectangle with its top-left corner at `origin`
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    /// Draw text with its baseline starting at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color);
}
