//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only (setup), the tick itself draws no randomness
//! - Stable iteration order (board insertion order)
//! - Drawing goes through the `Surface` trait, no platform dependencies

pub mod actor;
pub mod autopilot;
pub mod board;
pub mod collision;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorClass, CircleBody, ControlScheme, Direction, DirectionFlags, Shape};
pub use board::{Absorption, Board};
pub use collision::{Wall, WallBounce, bounce, hit_circle};
pub use state::{GameEvent, GamePhase, Session, SessionError};
pub use tick::{TickInput, tick};
