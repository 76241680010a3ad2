//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the session by one tick, draws the
//! frame and resolves collisions.

use super::actor::{Direction, DirectionFlags};
use super::autopilot;
use super::state::{GameEvent, GamePhase, Session};
use crate::renderer::{Color, Surface, shapes};
use crate::{energy_decay, radius_for_energy};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held direction keys
    pub flags: DirectionFlags,
    /// Most recently pressed direction
    pub direction: Option<Direction>,
    /// Idle/demo mode - autopilot drives the player
    pub idle_mode: bool,
}

/// Advance the session by one tick and draw the result
///
/// Returns the phase after the tick. Terminal phases are absorbing: once the
/// level is cleared or the game is over, further calls change nothing and
/// record no events.
pub fn tick(session: &mut Session, input: &TickInput, surface: &mut dyn Surface) -> GamePhase {
    session.events.clear();
    if session.phase.is_terminal() {
        return session.phase;
    }

    session.time_ticks += 1;

    let input = if input.idle_mode {
        autopilot::steer(session)
    } else {
        *input
    };

    advance_actors(session);

    // Player input
    let bounds = session.board.size();
    if let Some(player) = session.board.actor_mut(session.player) {
        player.enable_controls(input.flags);
        player.manual_move(input.direction, bounds);
    }

    // Termination, otherwise a fresh frame
    if session.board.is_game_over(session.player()) {
        session.board.draw_game_over(surface);
        session.phase = GamePhase::GameOver;
        session.events.push(GameEvent::GameOver);
        log::info!(
            "Game over after {} ticks ({} kills)",
            session.time_ticks,
            session.board.kill_count()
        );
    } else if session.board.kill_count() == session.settings.enemy_count {
        session.board.draw_level_cleared(surface);
        session.phase = GamePhase::LevelCleared;
        session.events.push(GameEvent::LevelCleared);
        log::info!(
            "Level cleared after {} ticks, player energy {:.1}",
            session.time_ticks,
            session.baseline_energy
        );
    } else {
        session.board.redraw(surface);
        shapes::status(surface, session.baseline_energy);
    }

    // Collisions run even on the terminal tick
    for absorption in session.board.collisions() {
        log::debug!(
            "Actor {} absorbed actor {} (+{:.1})",
            absorption.survivor,
            absorption.victim,
            absorption.energy
        );
        session.events.push(GameEvent::Absorbed {
            survivor: absorption.survivor,
            victim: absorption.victim,
            energy: absorption.energy,
        });
    }

    session.phase
}

/// Move, decay, resize and recolor every active actor in board order
fn advance_actors(session: &mut Session) {
    let bounds = session.board.size();

    for idx in 0..session.board.actors().len() {
        let (starved, class) = match session.board.actor_mut(idx) {
            Some(actor) if actor.is_active() => {
                actor.act(bounds);
                actor.energy -= energy_decay(actor.energy);
                if actor.energy > 0.0 {
                    actor.set_radius(radius_for_energy(actor.energy));
                }
                (actor.energy <= 0.0, actor.class)
            }
            _ => continue,
        };

        if starved && session.board.kill(idx) {
            log::debug!("{} {idx} ran out of energy", class.as_str());
            session.events.push(GameEvent::Starved { index: idx });
        }

        let Some(actor) = session.board.actor_mut(idx) else {
            continue;
        };
        if idx == session.player {
            session.baseline_energy = actor.energy;
        }
        if actor.is_active() {
            if actor.energy > session.baseline_energy {
                actor.color = Color::Red;
            } else if actor.energy < session.baseline_energy {
                actor.color = Color::Green;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::settings::Settings;
    use crate::sim::actor::{Actor, ControlScheme};
    use crate::sim::collision::WallBounce;
    use glam::Vec2;

    /// Session with the player only, plus hand-placed enemies
    fn session_with(enemies: &[(f32, f32, f32)], enemy_count: usize) -> Session {
        let settings = Settings {
            enemy_count: 0,
            ..Default::default()
        };
        let mut session = Session::new(settings, 1).unwrap();
        for &(x, y, energy) in enemies {
            let mut enemy = Actor::circle(
                Vec2::new(x, y),
                radius_for_energy(energy),
                true,
                Color::Green,
                ControlScheme::Computer,
                true,
            );
            enemy.energy = energy;
            enemy.set_bounce(WallBounce::ALL);
            session.board.add_actor(enemy);
        }
        session.settings.enemy_count = enemy_count;
        session
    }

    #[test]
    fn test_tick_decays_and_resizes() {
        let mut session = session_with(&[(400.0, 400.0, 120.0), (300.0, 400.0, 30.0)], 2);
        let mut surface = RecordingSurface::new();

        let phase = tick(&mut session, &TickInput::default(), &mut surface);
        assert_eq!(phase, GamePhase::Running);

        let actors = session.board.actors();
        // Player 80 -> 79.8, radius 79.8 / 6
        assert!((actors[0].energy - 79.8).abs() < 1e-4);
        assert_eq!(actors[0].radius(), Some(13.0));
        assert!((actors[1].energy - 119.6).abs() < 1e-4);
        assert_eq!(actors[1].radius(), Some(14.0));
        assert!((actors[2].energy - 29.9).abs() < 1e-4);
        assert_eq!(actors[2].radius(), Some(4.0));
    }

    #[test]
    fn test_tick_colors_relative_to_player() {
        let mut session = session_with(&[(400.0, 400.0, 120.0), (300.0, 400.0, 30.0)], 2);
        let mut surface = RecordingSurface::new();
        tick(&mut session, &TickInput::default(), &mut surface);

        let actors = session.board.actors();
        assert_eq!(actors[0].color, Color::Yellow);
        assert_eq!(actors[1].color, Color::Red);
        assert_eq!(actors[2].color, Color::Green);
        assert_eq!(session.baseline_energy, actors[0].energy);
    }

    #[test]
    fn test_starved_actor_is_killed() {
        let mut session = session_with(&[(400.0, 400.0, 0.05), (300.0, 300.0, 40.0)], 2);
        let mut surface = RecordingSurface::new();
        tick(&mut session, &TickInput::default(), &mut surface);

        assert!(!session.board.actors()[1].is_active());
        assert_eq!(session.board.kill_count(), 1);
        assert!(session.events.contains(&GameEvent::Starved { index: 1 }));
    }

    #[test]
    fn test_player_input_moves_player() {
        let mut session = session_with(&[(400.0, 400.0, 40.0)], 1);
        let mut surface = RecordingSurface::new();
        let input = TickInput {
            flags: DirectionFlags::only(Direction::Right),
            direction: Some(Direction::Right),
            idle_mode: false,
        };
        tick(&mut session, &input, &mut surface);
        assert_eq!(session.player().pos, Vec2::new(105.0, 100.0));

        // Released key keeps the direction but clears the flag
        let released = TickInput {
            flags: DirectionFlags::default(),
            ..input
        };
        tick(&mut session, &released, &mut surface);
        assert_eq!(session.player().pos, Vec2::new(105.0, 100.0));
    }

    #[test]
    fn test_running_frame_has_status() {
        let mut session = session_with(&[(400.0, 400.0, 40.0)], 1);
        let mut surface = RecordingSurface::new();
        tick(&mut session, &TickInput::default(), &mut surface);
        assert_eq!(surface.frames, 1);
        assert_eq!(surface.texts(), vec!["Status", "79.8"]);
    }

    #[test]
    fn test_equal_energy_tie_during_tick() {
        // Two equal enemies overlapping, far from the player; decay keeps
        // them equal (49.9 each) so the earlier one is absorbed
        let mut session = session_with(&[(300.0, 300.0, 50.1), (305.0, 300.0, 50.1)], 3);
        let mut surface = RecordingSurface::new();
        tick(&mut session, &TickInput::default(), &mut surface);

        let actors = session.board.actors();
        assert!(!actors[1].is_active());
        assert!(actors[2].is_active());
        assert!((actors[2].energy - 99.8).abs() < 1e-3);
        assert!(matches!(
            session.events.last(),
            Some(GameEvent::Absorbed { survivor: 2, victim: 1, .. })
        ));
    }

    #[test]
    fn test_level_cleared_before_game_over() {
        let mut session = session_with(&[(400.0, 400.0, 40.0)], 1);
        session.board.kill(1);
        let mut surface = RecordingSurface::new();

        let phase = tick(&mut session, &TickInput::default(), &mut surface);
        assert_eq!(phase, GamePhase::LevelCleared);
        assert!(surface.contains_text("Level cleared!!"));
        assert!(!surface.contains_text("Game Over!!"));
        assert!(session.player().visible);
    }

    #[test]
    fn test_player_off_board_is_game_over() {
        let mut session = session_with(&[(400.0, 400.0, 40.0)], 1);
        if let Some(player) = session.board.actor_mut(0) {
            player.pos.x = 501.0;
        }
        let mut surface = RecordingSurface::new();

        let phase = tick(&mut session, &TickInput::default(), &mut surface);
        assert_eq!(phase, GamePhase::GameOver);
        assert!(surface.contains_text("Game Over!!"));
        assert!(session.events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_player_absorbed_ends_game_next_tick() {
        // Stronger enemy overlapping the player
        let mut session = session_with(&[(110.0, 100.0, 95.0)], 1);
        let mut surface = RecordingSurface::new();

        assert_eq!(
            tick(&mut session, &TickInput::default(), &mut surface),
            GamePhase::Running
        );
        assert!(!session.player().visible);

        assert_eq!(
            tick(&mut session, &TickInput::default(), &mut surface),
            GamePhase::GameOver
        );
    }

    #[test]
    fn test_terminal_phase_is_absorbing() {
        let mut session = session_with(&[(400.0, 400.0, 40.0)], 1);
        session.board.kill(1);
        let mut surface = RecordingSurface::new();
        tick(&mut session, &TickInput::default(), &mut surface);
        let ticks = session.time_ticks;
        let energy = session.player().energy;

        assert_eq!(
            tick(&mut session, &TickInput::default(), &mut surface),
            GamePhase::LevelCleared
        );
        assert_eq!(session.time_ticks, ticks);
        assert_eq!(session.player().energy, energy);
    }

    #[test]
    fn test_collisions_resolve_on_terminal_tick() {
        // Overlapping pair away from the player; the level clears this tick
        let mut session = session_with(&[(300.0, 300.0, 40.0), (305.0, 300.0, 30.0)], 0);
        let mut surface = RecordingSurface::new();

        let phase = tick(&mut session, &TickInput::default(), &mut surface);
        assert_eq!(phase, GamePhase::LevelCleared);

        let actors = session.board.actors();
        assert!(actors[1].is_active());
        assert!(!actors[2].is_active());
        assert!((actors[1].energy - 69.8).abs() < 1e-3);
        assert!(session.events.contains(&GameEvent::LevelCleared));
        assert!(matches!(
            session.events.last(),
            Some(GameEvent::Absorbed {
                survivor: 1,
                victim: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_tick_after_terminal_records_nothing() {
        let mut session = session_with(&[(300.0, 300.0, 40.0), (305.0, 300.0, 30.0)], 0);
        let mut surface = RecordingSurface::new();
        tick(&mut session, &TickInput::default(), &mut surface);
        assert!(!session.events.is_empty());

        tick(&mut session, &TickInput::default(), &mut surface);
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_zero_enemies_clears_immediately() {
        let mut session = session_with(&[], 0);
        let mut surface = RecordingSurface::new();
        assert_eq!(
            tick(&mut session, &TickInput::default(), &mut surface),
            GamePhase::LevelCleared
        );
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(Settings::default(), 777).unwrap();
        let mut b = Session::new(Settings::default(), 777).unwrap();
        let mut surface_a = RecordingSurface::new();
        let mut surface_b = RecordingSurface::new();
        let input = TickInput {
            flags: DirectionFlags::only(Direction::SouthEast),
            direction: Some(Direction::SouthEast),
            idle_mode: false,
        };

        for _ in 0..200 {
            tick(&mut a, &input, &mut surface_a);
            tick(&mut b, &input, &mut surface_b);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.board.kill_count(), b.board.kill_count());
        for (x, y) in a.board.actors().iter().zip(b.board.actors()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.energy, y.energy);
        }
    }
}
