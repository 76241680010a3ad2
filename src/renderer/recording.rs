//! Surface that records draw commands instead of rasterizing them

use glam::Vec2;
use serde::Serialize;

use super::{Color, Surface};

/// One recorded drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: Color,
    },
    StrokeRect {
        origin: Vec2,
        size: Vec2,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        color: Color,
    },
}

/// Headless surface, keeps every command since the last [`Surface::clear`]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    /// Number of clears since creation (one per redraw)
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands drawn since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All text drawn since the last clear
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            origin,
            size,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_drops_previous_frame() {
        let mut surface = RecordingSurface::new();
        surface.fill_text("hello", Vec2::ZERO, Color::Black);
        assert!(surface.contains_text("hell"));

        surface.clear();
        assert!(surface.commands().is_empty());
        assert_eq!(surface.frames, 1);
    }
}
