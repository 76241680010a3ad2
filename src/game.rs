//! Game instance: session, keyboard state and drawing surface
//!
//! Both entry points drive one of these from their repeating tick: the
//! browser from `setInterval`, the native runner from [`Interval`].
//!
//! [`Interval`]: crate::platform::Interval

use serde::Serialize;

use crate::platform::{InputState, TickFlow};
use crate::renderer::Surface;
use crate::sim::{GameEvent, GamePhase, Session, tick};

/// Running totals over a whole session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub absorbed: u32,
    pub starved: u32,
    /// Enemies absorbed by the player
    pub eaten_by_player: u32,
}

/// End-of-run report
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub phase: GamePhase,
    pub ticks: u64,
    pub kills: usize,
    pub enemies_remaining: usize,
    pub player_energy: f32,
    pub tally: Tally,
}

pub struct Game<S: Surface> {
    pub session: Session,
    pub input: InputState,
    surface: S,
    tally: Tally,
}

impl<S: Surface> Game<S> {
    pub fn new(session: Session, surface: S) -> Self {
        Self {
            session,
            input: InputState::new(),
            surface,
            tally: Tally::default(),
        }
    }

    /// Run one tick with the current input snapshot
    pub fn step(&mut self) -> TickFlow {
        let input = self.input.snapshot();
        let phase = tick(&mut self.session, &input, &mut self.surface);

        for event in &self.session.events {
            match *event {
                GameEvent::Absorbed { survivor, .. } => {
                    self.tally.absorbed += 1;
                    if survivor == self.session.player {
                        self.tally.eaten_by_player += 1;
                    }
                }
                GameEvent::Starved { .. } => self.tally.starved += 1,
                GameEvent::LevelCleared | GameEvent::GameOver => {}
            }
        }

        if phase.is_terminal() {
            TickFlow::Stop
        } else {
            TickFlow::Continue
        }
    }

    /// Draw the board without advancing the session
    pub fn draw(&mut self) {
        self.session.board.redraw(&mut self.surface);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn summary(&self) -> Summary {
        Summary {
            seed: self.session.seed,
            phase: self.session.phase,
            ticks: self.session.time_ticks,
            kills: self.session.board.kill_count(),
            enemies_remaining: self.session.enemies_remaining(),
            player_energy: self.session.player().energy,
            tally: self.tally,
        }
    }
}
