//! Idle/demo mode: pick the player's direction each tick
//!
//! Flee the nearest stronger ball when it gets close, otherwise chase the
//! nearest weaker one. The result is ordinary [`TickInput`], so it goes
//! through the same control checks as keyboard input.

use glam::Vec2;

use super::actor::{Direction, DirectionFlags};
use super::state::Session;
use super::tick::TickInput;

/// Gap between circle edges under which a stronger ball is fled
pub const FLEE_MARGIN: f32 = 60.0;

/// sin(22.5°): an axis counts when the vector leans at least this far into it
const AXIS_THRESHOLD: f32 = 0.382_683_4;

/// Input the autopilot would give this tick
pub fn steer(session: &Session) -> TickInput {
    let player = session.player();
    let Some(player_radius) = player.radius() else {
        return TickInput::default();
    };

    let mut nearest_threat: Option<(f32, Vec2)> = None;
    let mut nearest_prey: Option<(f32, Vec2)> = None;

    for (idx, other) in session.board.actors().iter().enumerate() {
        if idx == session.player || !other.is_active() {
            continue;
        }
        let Some(other_radius) = other.radius() else {
            continue;
        };
        let offset = other.pos - player.pos;
        let gap = offset.length() - player_radius - other_radius;

        let slot = if other.energy < player.energy {
            &mut nearest_prey
        } else {
            &mut nearest_threat
        };
        if slot.is_none_or(|(best, _)| gap < best) {
            *slot = Some((gap, offset));
        }
    }

    let heading = match (nearest_threat, nearest_prey) {
        (Some((gap, offset)), _) if gap < FLEE_MARGIN => -offset,
        (_, Some((_, offset))) => offset,
        _ => return TickInput::default(),
    };

    match direction_toward(heading) {
        Some(direction) => TickInput {
            flags: DirectionFlags::only(direction),
            direction: Some(direction),
            idle_mode: true,
        },
        None => TickInput::default(),
    }
}

/// Closest of the eight directions to `v`, `None` for a zero vector
pub fn direction_toward(v: Vec2) -> Option<Direction> {
    let len = v.length();
    if len <= f32::EPSILON {
        return None;
    }
    let axis = |component: f32| {
        if component.abs() >= len * AXIS_THRESHOLD {
            component.signum()
        } else {
            0.0
        }
    };
    let step = Vec2::new(axis(v.x), axis(v.y));

    Direction::ALL.into_iter().find(|d| d.delta() == step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Color;
    use crate::settings::Settings;
    use crate::sim::actor::{Actor, ControlScheme};

    fn lone_player() -> Session {
        let settings = Settings {
            enemy_count: 0,
            ..Default::default()
        };
        Session::new(settings, 9).unwrap()
    }

    fn add_ball(session: &mut Session, x: f32, y: f32, energy: f32) {
        let mut ball = Actor::circle(
            Vec2::new(x, y),
            8.0,
            true,
            Color::Green,
            ControlScheme::Computer,
            true,
        );
        ball.energy = energy;
        session.board.add_actor(ball);
    }

    #[test]
    fn test_direction_toward_sectors() {
        assert_eq!(direction_toward(Vec2::new(1.0, 0.0)), Some(Direction::Right));
        assert_eq!(direction_toward(Vec2::new(0.0, -3.0)), Some(Direction::Up));
        assert_eq!(direction_toward(Vec2::new(2.0, 2.0)), Some(Direction::SouthEast));
        assert_eq!(direction_toward(Vec2::new(-5.0, -4.0)), Some(Direction::NorthWest));
        assert_eq!(direction_toward(Vec2::new(10.0, 1.0)), Some(Direction::Right));
        assert_eq!(direction_toward(Vec2::ZERO), None);
    }

    #[test]
    fn test_chases_weaker_ball() {
        let mut session = lone_player();
        add_ball(&mut session, 300.0, 100.0, 20.0);

        let input = steer(&session);
        assert_eq!(input.direction, Some(Direction::Right));
        assert!(input.flags.right);
    }

    #[test]
    fn test_flees_close_stronger_ball() {
        let mut session = lone_player();
        add_ball(&mut session, 300.0, 100.0, 20.0);
        add_ball(&mut session, 100.0, 160.0, 150.0);

        let input = steer(&session);
        assert_eq!(input.direction, Some(Direction::Up));
    }

    #[test]
    fn test_ignores_distant_threat() {
        let mut session = lone_player();
        add_ball(&mut session, 100.0, 450.0, 150.0);
        add_ball(&mut session, 100.0, 300.0, 10.0);

        let input = steer(&session);
        assert_eq!(input.direction, Some(Direction::Down));
    }

    #[test]
    fn test_nothing_to_do() {
        let session = lone_player();
        assert_eq!(steer(&session), TickInput::default());
    }
}
