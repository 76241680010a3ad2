//! Session state and setup
//!
//! Everything one run of the simulation owns: the board, the player's index,
//! the colour-trend baseline and the current phase.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorClass, ControlScheme};
use super::board::Board;
use super::collision::WallBounce;
use crate::renderer::Color;
use crate::settings::{Settings, SettingsError};

/// Spawn attempts per enemy before giving up
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Nudge attempts from one random spot before re-rolling it
const NUDGES_PER_ROLL: u32 = 64;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking
    Running,
    /// Every enemy is gone
    LevelCleared,
    /// Player left the board or died
    GameOver,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// `victim` collided with `survivor` and gave it `energy`
    Absorbed {
        survivor: usize,
        victim: usize,
        energy: f32,
    },
    /// Actor ran out of energy
    Starved { index: usize },
    LevelCleared,
    GameOver,
}

/// Why a session could not be set up
#[derive(Debug)]
pub enum SessionError {
    Settings(SettingsError),
    /// No free spot found for an enemy
    NoRoom { enemy: usize, attempts: u32 },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings(err) => write!(f, "{err}"),
            Self::NoRoom { enemy, attempts } => write!(
                f,
                "no free spot for enemy {enemy} after {attempts} attempts"
            ),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Settings(err) => Some(err),
            Self::NoRoom { .. } => None,
        }
    }
}

impl From<SettingsError> for SessionError {
    fn from(err: SettingsError) -> Self {
        Self::Settings(err)
    }
}

/// One simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub settings: Settings,
    /// Seed actually used for setup
    pub seed: u64,
    pub board: Board,
    /// Index of the player actor on the board
    pub player: usize,
    /// Player energy this tick, the reference for red/green colouring
    pub baseline_energy: f32,
    pub phase: GamePhase,
    pub time_ticks: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Build a board with the player and `enemy_count` enemies
    ///
    /// Enemies are placed at random non-overlapping spots. A candidate that
    /// overlaps anything already placed is nudged diagonally (wrapping at the
    /// board edges) and occasionally re-rolled until it fits.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SessionError> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut board = Board::new(settings.board_width, settings.board_height);

        let player = board.add_actor(Self::make_player(&settings));

        for enemy in 0..settings.enemy_count {
            let actor = Self::place_enemy(&board, &settings, &mut rng)
                .ok_or(SessionError::NoRoom {
                    enemy,
                    attempts: MAX_PLACEMENT_ATTEMPTS,
                })?;
            board.add_actor(actor);
        }

        log::info!(
            "Session ready: seed {seed}, {} enemies on {}x{}",
            settings.enemy_count,
            settings.board_width,
            settings.board_height
        );

        Ok(Self {
            baseline_energy: settings.player_energy,
            settings,
            seed,
            board,
            player,
            phase: GamePhase::Running,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    fn make_player(settings: &Settings) -> Actor {
        let energy = settings.player_energy;
        let (x, y) = settings.player_start;
        let mut player = Actor::circle(
            Vec2::new(x, y),
            (energy / 4.0).floor(),
            true,
            Color::Yellow,
            ControlScheme::Human,
            true,
        );
        player.energy = energy;
        player.step = settings.player_step;
        player.class = ActorClass::Player;
        player
    }

    fn place_enemy(board: &Board, settings: &Settings, rng: &mut Pcg32) -> Option<Actor> {
        let bounds = settings.board_size();
        let energy = (rng.random::<f32>() * settings.max_enemy_energy
            + settings.min_enemy_energy)
            .floor();
        let radius = (energy / 6.0).floor();
        let speed = (energy / 12.0).floor();
        let angle = (rng.random::<f32>() * 360.0).floor();

        let color = if settings.player_energy < energy {
            Color::Red
        } else {
            Color::Green
        };

        let mut enemy = Actor::circle(
            random_spot(rng, bounds),
            radius,
            true,
            color,
            ControlScheme::Computer,
            true,
        );
        enemy.energy = energy;
        enemy.angle = angle;
        enemy.speed = speed;
        enemy.set_bounce(WallBounce::ALL);
        enemy.class = ActorClass::Ball;

        Self::settle(board, enemy, rng)
    }

    /// Move `candidate` until it overlaps nothing on the board
    fn settle(board: &Board, mut candidate: Actor, rng: &mut Pcg32) -> Option<Actor> {
        let bounds = board.size();
        let radius = candidate.radius().unwrap_or(1.0);
        let nudge = Vec2::new(2.0 * radius, 1.5 * radius).max(Vec2::ONE);

        for attempt in 0..MAX_PLACEMENT_ATTEMPTS {
            if board.new_actor_place(&candidate) {
                return Some(candidate);
            }
            let next = if attempt % NUDGES_PER_ROLL == NUDGES_PER_ROLL - 1 {
                random_spot(rng, bounds)
            } else {
                (candidate.pos + nudge).rem_euclid(bounds)
            };
            candidate.move_to(next);
        }
        None
    }

    pub fn player(&self) -> &Actor {
        &self.board.actors()[self.player]
    }

    /// Enemies still on the board
    pub fn enemies_remaining(&self) -> usize {
        self.board
            .actors()
            .iter()
            .enumerate()
            .filter(|(i, a)| *i != self.player && a.is_active())
            .count()
    }
}

/// Whole-number position anywhere on the board
fn random_spot(rng: &mut Pcg32, bounds: Vec2) -> Vec2 {
    Vec2::new(
        (rng.random::<f32>() * bounds.x).floor(),
        (rng.random::<f32>() * bounds.y).floor(),
    )
}
