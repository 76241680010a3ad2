//! Ball Bounce - energy-absorbing balls on a bounded board
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (actors, board, collisions, game state)
//! - `renderer`: Drawing surface abstraction and shape routines
//! - `platform`: Input mapping and the repeating tick scheduler
//! - `settings`: Session configuration
//! - `game`: Session plus input and surface, driven by either entry point

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed tick period in milliseconds
    pub const TICK_MS: u64 = 30;

    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 500.0;
    pub const BOARD_HEIGHT: f32 = 500.0;

    /// Enemy roster defaults
    pub const ENEMY_COUNT: usize = 10;
    pub const MIN_ENEMY_ENERGY: f32 = 20.0;
    pub const MAX_ENEMY_ENERGY: f32 = 80.0;

    /// Player defaults
    pub const PLAYER_ENERGY: f32 = 80.0;
    pub const PLAYER_START: (f32, f32) = (100.0, 100.0);
    pub const PLAYER_STEP: f32 = 5.0;

    /// Energy lost per tick, by band (inclusive upper bounds)
    pub const LOW_ENERGY_BAND: f32 = 50.0;
    pub const MID_ENERGY_BAND: f32 = 100.0;
    pub const LOW_ENERGY_DECAY: f32 = 0.1;
    pub const MID_ENERGY_DECAY: f32 = 0.2;
    pub const HIGH_ENERGY_DECAY: f32 = 0.4;

    /// Radius tiers (inclusive lower bounds)
    pub const LARGE_RADIUS_ENERGY: f32 = 96.0;
    pub const MEDIUM_RADIUS_ENERGY: f32 = 24.0;
    pub const MIN_RADIUS: f32 = 4.0;

    /// Smallest energies whose spawn radius (`floor(e/6)` for enemies,
    /// `floor(e/4)` for the player) is at least one
    pub const MIN_SPAWN_ENEMY_ENERGY: f32 = 6.0;
    pub const MIN_SPAWN_PLAYER_ENERGY: f32 = 4.0;

    /// Status readout position (right of the board)
    pub const STATUS_LABEL_POS: (f32, f32) = (600.0, 100.0);
    pub const STATUS_VALUE_POS: (f32, f32) = (600.0, 180.0);
}

/// Convert degrees to radians
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Velocity for a heading in degrees and a speed
#[inline]
pub fn heading_to_velocity(angle_deg: f32, speed: f32) -> Vec2 {
    let theta = degrees_to_radians(angle_deg);
    Vec2::new(theta.cos() * speed, theta.sin() * speed)
}

/// Energy lost in one tick for the given energy level
#[inline]
pub fn energy_decay(energy: f32) -> f32 {
    use consts::*;
    if energy <= LOW_ENERGY_BAND {
        LOW_ENERGY_DECAY
    } else if energy <= MID_ENERGY_BAND {
        MID_ENERGY_DECAY
    } else {
        HIGH_ENERGY_DECAY
    }
}

/// Radius an actor takes on for the given (positive) energy level
#[inline]
pub fn radius_for_energy(energy: f32) -> f32 {
    use consts::*;
    if energy >= LARGE_RADIUS_ENERGY {
        (energy / 8.0).floor()
    } else if energy >= MEDIUM_RADIUS_ENERGY {
        (energy / 6.0).floor()
    } else {
        MIN_RADIUS
    }
}
