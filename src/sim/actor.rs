//! Actors: every entity on the board
//!
//! An [`Actor`] carries the shared attributes (position, energy, visibility,
//! controls) and a [`Shape`] variant. Circles bounce off walls and propel
//! themselves along their heading; rectangles are static footprints.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{WallBounce, bounce, wall_contacts};
use crate::heading_to_velocity;
use crate::renderer::{Color, Surface, shapes};

/// Who drives an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    Human,
    Computer,
}

/// Classification tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActorClass {
    Player,
    Ball,
    #[default]
    Actor,
}

impl ActorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorClass::Player => "player",
            ActorClass::Ball => "ball",
            ActorClass::Actor => "actor",
        }
    }
}

/// Discrete movement direction for manual control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit step on each axis (y grows downward)
    pub fn delta(&self) -> Vec2 {
        match self {
            Direction::NorthEast => Vec2::new(1.0, -1.0),
            Direction::SouthEast => Vec2::new(1.0, 1.0),
            Direction::SouthWest => Vec2::new(-1.0, 1.0),
            Direction::NorthWest => Vec2::new(-1.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Per-direction movement enables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub north_east: bool,
    pub south_east: bool,
    pub south_west: bool,
    pub north_west: bool,
}

impl DirectionFlags {
    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::NorthEast => self.north_east,
            Direction::SouthEast => self.south_east,
            Direction::SouthWest => self.south_west,
            Direction::NorthWest => self.north_west,
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    pub fn set(&mut self, direction: Direction, value: bool) {
        let flag = match direction {
            Direction::NorthEast => &mut self.north_east,
            Direction::SouthEast => &mut self.south_east,
            Direction::SouthWest => &mut self.south_west,
            Direction::NorthWest => &mut self.north_west,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        *flag = value;
    }

    /// Flags with only `direction` enabled
    pub fn only(direction: Direction) -> Self {
        let mut flags = Self::default();
        flags.set(direction, true);
        flags
    }
}

/// Circle-specific body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleBody {
    pub radius: f32,
    pub bounce: WallBounce,
}

/// Shape variant of an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(CircleBody),
    /// Axis-aligned rectangle using the actor's `width`/`height`
    Rect,
}

/// An entity on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    /// Rectangle footprint (unused by circles)
    pub height: f32,
    pub width: f32,
    /// Heading in degrees
    pub angle: f32,
    pub speed: f32,
    pub energy: f32,
    pub visible: bool,
    active: bool,
    pub color: Color,
    pub control: ControlScheme,
    pub movable: bool,
    pub controls: DirectionFlags,
    /// Distance covered by one manual move
    pub step: f32,
    pub class: ActorClass,
    pub shape: Shape,
}

impl Actor {
    fn base(
        pos: Vec2,
        shape: Shape,
        visible: bool,
        color: Color,
        control: ControlScheme,
        movable: bool,
    ) -> Self {
        Self {
            pos,
            height: 0.0,
            width: 0.0,
            angle: 0.0,
            speed: 0.0,
            energy: 0.0,
            visible,
            active: true,
            color,
            control,
            movable,
            controls: DirectionFlags::default(),
            step: 0.0,
            class: ActorClass::Actor,
            shape,
        }
    }

    /// A circle that does not bounce off any wall until enabled
    pub fn circle(
        pos: Vec2,
        radius: f32,
        visible: bool,
        color: Color,
        control: ControlScheme,
        movable: bool,
    ) -> Self {
        let body = CircleBody {
            radius,
            bounce: WallBounce::NONE,
        };
        Self::base(pos, Shape::Circle(body), visible, color, control, movable)
    }

    pub fn rect(
        pos: Vec2,
        height: f32,
        width: f32,
        visible: bool,
        color: Color,
        control: ControlScheme,
        movable: bool,
    ) -> Self {
        let mut actor = Self::base(pos, Shape::Rect, visible, color, control, movable);
        actor.height = height;
        actor.width = width;
        actor
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Circle radius, `None` for rectangles
    pub fn radius(&self) -> Option<f32> {
        match &self.shape {
            Shape::Circle(body) => Some(body.radius),
            Shape::Rect => None,
        }
    }

    /// Set the radius of a circle; rectangles are left alone
    pub fn set_radius(&mut self, radius: f32) {
        if let Shape::Circle(body) = &mut self.shape {
            body.radius = radius;
        }
    }

    /// Set wall bounce flags of a circle; rectangles are left alone
    pub fn set_bounce(&mut self, flags: WallBounce) {
        if let Shape::Circle(body) = &mut self.shape {
            body.bounce = flags;
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Deactivate and hide
    ///
    /// Returns true only on the transition, so the board counts each actor
    /// once no matter how often this is called.
    pub(crate) fn kill(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.hide();
        true
    }

    /// Move to a new position if the actor is movable
    pub fn move_to(&mut self, pos: Vec2) {
        if self.movable {
            self.pos = pos;
        }
    }

    /// Accept player input flags (human-controlled movable actors only)
    pub fn enable_controls(&mut self, flags: DirectionFlags) {
        if self.movable && self.control == ControlScheme::Human {
            self.controls = flags;
        }
    }

    /// Step one `step` in `direction` if that direction is enabled and the
    /// actor's circle is still strictly inside the board on the axes it
    /// moves along
    pub fn manual_move(&mut self, direction: Option<Direction>, bounds: Vec2) {
        let Some(direction) = direction else {
            return;
        };
        let Some(radius) = self.radius() else {
            return;
        };
        if !self.controls.get(direction) {
            return;
        }

        let delta = direction.delta();
        let x_ok = match delta.x {
            dx if dx > 0.0 => self.pos.x + radius < bounds.x,
            dx if dx < 0.0 => self.pos.x - radius > 0.0,
            _ => true,
        };
        let y_ok = match delta.y {
            dy if dy > 0.0 => self.pos.y + radius < bounds.y,
            dy if dy < 0.0 => self.pos.y - radius > 0.0,
            _ => true,
        };

        if x_ok && y_ok {
            self.move_to(self.pos + delta * self.step);
        }
    }

    /// Self-propulsion for one tick
    ///
    /// Circles resolve wall contact against the current position first, then
    /// advance along their (possibly adjusted) heading. Rectangles do nothing.
    pub fn act(&mut self, bounds: Vec2) {
        let Shape::Circle(body) = self.shape else {
            return;
        };

        let contacts = wall_contacts(self.pos, body.radius, bounds, body.bounce);
        if let Some(wall) = contacts.horizontal {
            self.angle = bounce(self.angle, wall);
        }
        if let Some(wall) = contacts.vertical {
            self.angle = bounce(self.angle, wall);
        }

        let velocity = heading_to_velocity(self.angle, self.speed);
        self.move_to(self.pos + velocity);
    }

    /// Draw the actor's shape if it is visible and active
    pub fn draw(&self, surface: &mut dyn Surface) {
        if !(self.visible && self.active) {
            return;
        }
        match &self.shape {
            Shape::Circle(body) => shapes::circle(surface, self.pos, body.radius, self.color),
            Shape::Rect => shapes::rectangle(
                surface,
                self.pos,
                Vec2::new(self.width, self.height),
                self.color,
            ),
        }
    }
}
