//! Collision detection and response on a rectangular board
//!
//! Circle-circle overlap for absorption, and wall contact with the
//! quadrant-based heading adjustment balls use to bounce.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four board walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// Per-wall bounce enables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallBounce {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallBounce {
    /// Bounce off every wall
    pub const ALL: Self = Self {
        left: true,
        right: true,
        top: true,
        bottom: true,
    };

    pub const NONE: Self = Self {
        left: false,
        right: false,
        top: false,
        bottom: false,
    };
}

/// Walls touched this tick: at most one horizontal and one vertical
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContacts {
    pub horizontal: Option<Wall>,
    pub vertical: Option<Wall>,
}

/// True if two circles overlap
///
/// Compares squared distance against the squared radius sum; touching
/// circles (distance exactly equal) do not count.
#[inline]
pub fn hit_circle(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let center_distance = a_pos.distance_squared(b_pos);
    let radii_sum = a_radius + b_radius;
    center_distance < radii_sum * radii_sum
}

/// Which enabled walls a circle is touching or crossing
///
/// Left wins over right and top over bottom; a corner yields both axes.
pub fn wall_contacts(pos: Vec2, radius: f32, bounds: Vec2, bounce: WallBounce) -> WallContacts {
    let horizontal = if pos.x - radius <= 0.0 && bounce.left {
        Some(Wall::Left)
    } else if pos.x + radius >= bounds.x && bounce.right {
        Some(Wall::Right)
    } else {
        None
    };

    let vertical = if pos.y - radius <= 0.0 && bounce.top {
        Some(Wall::Top)
    } else if pos.y + radius >= bounds.y && bounce.bottom {
        Some(Wall::Bottom)
    } else {
        None
    };

    WallContacts { horizontal, vertical }
}

/// Adjust a heading (degrees) after touching a wall
///
/// Not a true reflection: left/right rotate by a quarter turn depending on
/// the half the heading lies in, top/bottom mirror to `360 - angle`.
/// Headings outside a wall's ranges (including the exact axis angles) are
/// returned unchanged.
pub fn bounce(angle: f32, wall: Wall) -> f32 {
    let mut angle = angle;
    match wall {
        Wall::Left => {
            if angle > 90.0 && angle < 180.0 {
                angle -= 90.0;
            }
            if angle < 270.0 && angle > 180.0 {
                angle += 90.0;
            }
        }
        Wall::Right => {
            if angle > 270.0 {
                angle -= 90.0;
            }
            if angle < 90.0 {
                angle += 90.0;
            }
        }
        Wall::Top => {
            if angle > 180.0 {
                angle = 360.0 - angle;
            }
        }
        Wall::Bottom => {
            if angle < 180.0 {
                angle = 360.0 - angle;
            }
        }
    }
    angle
}
