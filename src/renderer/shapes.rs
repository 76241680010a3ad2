//! Shape routines for board elements

use glam::Vec2;

use super::{Color, Surface};
use crate::consts::{STATUS_LABEL_POS, STATUS_VALUE_POS};

/// Filled disc for circle actors (no outline)
pub fn circle(surface: &mut dyn Surface, center: Vec2, radius: f32, color: Color) {
    surface.fill_circle(center, radius, color);
}

/// Filled rectangle with a black outline
pub fn rectangle(surface: &mut dyn Surface, origin: Vec2, size: Vec2, color: Color) {
    surface.fill_rect(origin, size, color);
    surface.stroke_rect(origin, size, Color::Black);
}

/// Board outline anchored at the origin
pub fn border(surface: &mut dyn Surface, board_size: Vec2) {
    surface.stroke_rect(Vec2::ZERO, board_size, Color::Black);
}

/// Banner text at the board center
pub fn banner(surface: &mut dyn Surface, text: &str, board_size: Vec2) {
    surface.fill_text(text, board_size / 2.0, Color::Black);
}

/// Status readout beside the board: a label and the player's energy
pub fn status(surface: &mut dyn Surface, energy: f32) {
    surface.fill_text(
        "Status",
        Vec2::new(STATUS_LABEL_POS.0, STATUS_LABEL_POS.1),
        Color::Black,
    );
    surface.fill_text(
        &format!("{energy:.1}"),
        Vec2::new(STATUS_VALUE_POS.0, STATUS_VALUE_POS.1),
        Color::Black,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};

    #[test]
    fn test_rectangle_fills_then_strokes() {
        let mut surface = RecordingSurface::new();
        rectangle(&mut surface, Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Color::Red);

        let cmds = surface.commands();
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[0], DrawCommand::FillRect { color: Color::Red, .. }));
        assert!(matches!(cmds[1], DrawCommand::StrokeRect { .. }));
    }

    #[test]
    fn test_status_formats_energy() {
        let mut surface = RecordingSurface::new();
        status(&mut surface, 79.8);
        assert_eq!(surface.texts(), vec!["Status", "79.8"]);
    }
}
