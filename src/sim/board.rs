//! The board: actor collection, bounds, collisions and the render cycle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::hit_circle;
use crate::renderer::{Surface, shapes};

/// Outcome of one absorption during a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Absorption {
    pub survivor: usize,
    pub victim: usize,
    /// Energy moved from the victim to the survivor
    pub energy: f32,
}

/// Playing field that owns every actor
///
/// Actors are only ever appended, so an index stays valid for the whole
/// session. Insertion order is both the draw order (later actors paint over
/// earlier ones) and the collision iteration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    actors: Vec<Actor>,
    pub width: f32,
    pub height: f32,
    /// Actors deactivated through [`Board::kill`]
    count: usize,
}

impl Board {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            actors: Vec::new(),
            width,
            height,
            count: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Append an actor, returning its index
    pub fn add_actor(&mut self, actor: Actor) -> usize {
        self.actors.push(actor);
        self.actors.len() - 1
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, index: usize) -> Option<&Actor> {
        self.actors.get(index)
    }

    pub fn actor_mut(&mut self, index: usize) -> Option<&mut Actor> {
        self.actors.get_mut(index)
    }

    /// Number of actors killed so far
    #[inline]
    pub fn kill_count(&self) -> usize {
        self.count
    }

    /// Kill the actor at `index`, counting it the first time only
    pub fn kill(&mut self, index: usize) -> bool {
        let killed = self
            .actors
            .get_mut(index)
            .map(|actor| actor.kill())
            .unwrap_or(false);
        if killed {
            self.count += 1;
        }
        killed
    }

    /// Circle overlap between two actors; rectangles never collide
    pub fn hit_circle(a: &Actor, b: &Actor) -> bool {
        match (a.radius(), b.radius()) {
            (Some(ra), Some(rb)) => hit_circle(a.pos, ra, b.pos, rb),
            _ => false,
        }
    }

    /// True if `candidate` overlaps no actor already on the board
    ///
    /// Dead actors still occupy their spot for this check.
    pub fn new_actor_place(&self, candidate: &Actor) -> bool {
        !self
            .actors
            .iter()
            .any(|actor| Self::hit_circle(actor, candidate))
    }

    /// Resolve every overlapping pair of active actors
    ///
    /// The lower-energy actor is killed and its energy added to the other.
    /// On equal energy the earlier-inserted actor dies. An actor killed in
    /// this pass takes no part in later pairs.
    pub fn collisions(&mut self) -> Vec<Absorption> {
        let mut absorptions = Vec::new();

        for i in 0..self.actors.len() {
            for j in 0..i {
                let later = &self.actors[i];
                let earlier = &self.actors[j];
                if !(later.is_active() && earlier.is_active()) {
                    continue;
                }
                if !Self::hit_circle(later, earlier) {
                    continue;
                }

                let (survivor, victim) = if later.energy < earlier.energy {
                    (j, i)
                } else {
                    (i, j)
                };
                let energy = self.actors[victim].energy;
                self.kill(victim);
                self.actors[survivor].energy += energy;
                absorptions.push(Absorption {
                    survivor,
                    victim,
                    energy,
                });
            }
        }

        absorptions
    }

    /// Player has fallen off the far edges or is no longer visible
    pub fn is_game_over(&self, actor: &Actor) -> bool {
        actor.pos.x > self.width || actor.pos.y > self.height || !actor.visible
    }

    pub fn clean(&self, surface: &mut dyn Surface) {
        surface.clear();
    }

    /// Border, then every actor in insertion order
    pub fn draw(&self, surface: &mut dyn Surface) {
        shapes::border(surface, self.size());
        for actor in &self.actors {
            actor.draw(surface);
        }
    }

    pub fn redraw(&self, surface: &mut dyn Surface) {
        self.clean(surface);
        self.draw(surface);
    }

    pub fn draw_game_over(&self, surface: &mut dyn Surface) {
        shapes::banner(surface, "Game Over!!", self.size());
    }

    pub fn draw_level_cleared(&self, surface: &mut dyn Surface) {
        shapes::banner(surface, "Level cleared!!", self.size());
    }
}
