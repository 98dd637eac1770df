//! Actors: every simulated entity except the racer
//!
//! An actor is a shared `ActorBody` plus a closed `ActorKind`. All kinds run
//! the same per-tick protocol:
//!
//! 1. pre-move hook (react to the world)
//! 2. move by (x speed, own y speed - racer y speed)
//! 3. die if the new position left the view (no post-move hook)
//! 4. post-move hook
//!
//! The spray projectile is the one kind with its own update (it travels along
//! its heading instead of scrolling).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::context::{Effects, Neighbors};
use super::geometry::{Body, overlaps};
use super::npc::{Npc, NpcAgent, NpcRole};
use super::pickup::PickupKind;
use super::racer::Racer;
use crate::consts::*;
use crate::heading_vector;

/// Stable identity of an actor within a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// State every actor (and the racer) carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorBody {
    pub pos: DVec2,
    /// Orientation in degrees (0 = right, 90 = up)
    pub direction: i32,
    /// Visual size; collision radius scales with it
    pub size: f64,
    /// Own vertical speed (pixels per tick, up is positive)
    pub y_speed: f64,
    alive: bool,
}

impl ActorBody {
    pub fn new(pos: DVec2, direction: i32, size: f64, y_speed: f64) -> Self {
        Self {
            pos,
            direction,
            size,
            y_speed,
            alive: true,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark dead. There is no way back.
    #[inline]
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

impl Body for ActorBody {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.size * RADIUS_PER_SIZE
    }
}

/// Road marker colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerColor {
    /// Road edge
    Yellow,
    /// Lane divider
    White,
}

/// Spray projectile state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spray {
    /// Distance left before the spray evaporates
    pub travel_left: f64,
}

/// What an actor is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    Marker(MarkerColor),
    Npc(Npc),
    Spray(Spray),
    Pickup(PickupKind),
}

impl ActorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActorKind::Marker(_) => "marker",
            ActorKind::Npc(npc) => npc.role.name(),
            ActorKind::Spray(_) => "spray",
            ActorKind::Pickup(kind) => kind.name(),
        }
    }
}

/// A simulated entity owned by the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub body: ActorBody,
    pub kind: ActorKind,
}

impl Body for Actor {
    fn position(&self) -> DVec2 {
        self.body.pos
    }

    fn radius(&self) -> f64 {
        self.body.radius()
    }
}

impl Actor {
    pub fn marker(id: ActorId, pos: DVec2, color: MarkerColor) -> Self {
        Self {
            id,
            body: ActorBody::new(pos, FACING_RIGHT, 2.0, MARKER_SPEED),
            kind: ActorKind::Marker(color),
        }
    }

    pub fn human_pedestrian(id: ActorId, pos: DVec2) -> Self {
        Self {
            id,
            body: ActorBody::new(pos, FACING_RIGHT, HUMAN_SIZE, DEFAULT_Y_SPEED),
            kind: ActorKind::Npc(Npc::new(PEDESTRIAN_HEALTH, NpcRole::Human)),
        }
    }

    pub fn zombie_pedestrian(id: ActorId, pos: DVec2) -> Self {
        Self {
            id,
            body: ActorBody::new(pos, FACING_RIGHT, ZOMBIE_SIZE, DEFAULT_Y_SPEED),
            kind: ActorKind::Npc(Npc::new(
                PEDESTRIAN_HEALTH,
                NpcRole::Zombie { grunt_ticks: 0 },
            )),
        }
    }

    pub fn zombie_cab(id: ActorId, pos: DVec2, y_speed: f64) -> Self {
        Self {
            id,
            body: ActorBody::new(pos, FACING_UP, CAB_SIZE, y_speed),
            kind: ActorKind::Npc(Npc::new(
                CAB_HEALTH,
                NpcRole::Cab {
                    has_hit_racer: false,
                },
            )),
        }
    }

    pub fn spray(id: ActorId, pos: DVec2, direction: i32) -> Self {
        Self {
            id,
            body: ActorBody::new(pos, direction, SPRAY_SIZE, DEFAULT_Y_SPEED),
            kind: ActorKind::Spray(Spray {
                travel_left: SPRAY_TRAVEL,
            }),
        }
    }

    pub fn oil_slick(id: ActorId, pos: DVec2, size: f64) -> Self {
        Self::pickup(id, pos, size, FACING_RIGHT, PickupKind::OilSlick)
    }

    pub fn healing(id: ActorId, pos: DVec2) -> Self {
        Self::pickup(id, pos, HEALING_SIZE, FACING_RIGHT, PickupKind::Healing)
    }

    pub fn spray_refill(id: ActorId, pos: DVec2) -> Self {
        Self::pickup(id, pos, REFILL_SIZE, FACING_UP, PickupKind::SprayRefill)
    }

    pub fn soul(id: ActorId, pos: DVec2) -> Self {
        Self::pickup(id, pos, SOUL_SIZE, FACING_RIGHT, PickupKind::Soul)
    }

    fn pickup(id: ActorId, pos: DVec2, size: f64, direction: i32, kind: PickupKind) -> Self {
        Self {
            id,
            body: ActorBody::new(pos, direction, size, DEFAULT_Y_SPEED),
            kind: ActorKind::Pickup(kind),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        !self.body.is_alive()
    }

    /// Horizontal speed; zero for everything but NPCs
    pub fn x_speed(&self) -> f64 {
        match &self.kind {
            ActorKind::Npc(npc) => npc.x_speed,
            _ => 0.0,
        }
    }

    /// Health for agents, `None` for everything else
    pub fn health(&self) -> Option<i32> {
        match &self.kind {
            ActorKind::Npc(npc) => Some(npc.health),
            _ => None,
        }
    }

    /// Does this actor matter for traffic placement and cab headway?
    pub fn is_collision_worthy(&self) -> bool {
        matches!(self.kind, ActorKind::Npc(_))
    }

    /// Does this actor have a reaction to the spray?
    pub fn is_spray_reactive(&self) -> bool {
        match &self.kind {
            ActorKind::Npc(_) => true,
            ActorKind::Pickup(kind) => kind.is_spray_reactive(),
            ActorKind::Marker(_) | ActorKind::Spray(_) => false,
        }
    }

    /// Agent view of this actor, if it has health
    pub fn agent_mut(&mut self) -> Option<NpcAgent<'_>> {
        match &mut self.kind {
            ActorKind::Npc(npc) => Some(NpcAgent::new(&mut self.body, npc)),
            _ => None,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, neighbors: &mut Neighbors<'_>, racer: &mut Racer, fx: &mut Effects<'_>) {
        if self.is_dead() {
            return;
        }
        if matches!(self.kind, ActorKind::Spray(_)) {
            self.update_spray(neighbors, fx);
            return;
        }

        self.before_move(racer, fx);
        if self.is_dead() {
            return;
        }
        if !self.move_relative(racer.body.y_speed, fx) {
            return;
        }
        self.after_move(neighbors, racer, fx);
    }

    fn before_move(&mut self, racer: &mut Racer, fx: &mut Effects<'_>) {
        if let Some(mut npc) = self.agent_mut() {
            npc.before_move(racer, fx);
        }
    }

    fn after_move(&mut self, neighbors: &Neighbors<'_>, racer: &mut Racer, fx: &mut Effects<'_>) {
        match &mut self.kind {
            ActorKind::Npc(npc) => NpcAgent::new(&mut self.body, npc).after_move(neighbors, racer, fx),
            ActorKind::Pickup(kind) => kind.after_move(&mut self.body, racer, fx),
            ActorKind::Marker(_) | ActorKind::Spray(_) => {}
        }
    }

    /// Scroll relative to the racer. Returns false (and dies) when the actor
    /// leaves the view.
    fn move_relative(&mut self, racer_y_speed: f64, fx: &Effects<'_>) -> bool {
        let delta = DVec2::new(self.x_speed(), self.body.y_speed - racer_y_speed);
        self.body.pos += delta;
        if !fx.view.contains(self.body.pos) {
            log::trace!("{} #{} left the view", self.kind.name(), self.id.0);
            self.body.kill();
            return false;
        }
        true
    }

    fn update_spray(&mut self, neighbors: &mut Neighbors<'_>, fx: &mut Effects<'_>) {
        let ActorKind::Spray(spray) = &mut self.kind else {
            return;
        };

        // First live, reactive, overlapping actor absorbs the spray
        for other in neighbors.iter_mut() {
            if other.is_alive() && overlaps(&self.body, &*other) && other.be_sprayed(fx) {
                log::debug!("spray #{} hit {} #{}", self.id.0, other.kind.name(), other.id.0);
                self.body.kill();
                return;
            }
        }

        let step = fx.view.sprite_height();
        self.body.pos += heading_vector(self.body.direction) * step;
        spray.travel_left -= step;

        if !fx.view.contains(self.body.pos) || spray.travel_left <= 0.0 {
            self.body.kill();
        }
    }

    /// Apply the spray if this actor reacts to it
    ///
    /// Returns true when the spray is absorbed.
    pub fn be_sprayed(&mut self, fx: &mut Effects<'_>) -> bool {
        if self.is_dead() {
            return false;
        }
        match &mut self.kind {
            ActorKind::Npc(npc) => {
                NpcAgent::new(&mut self.body, npc).be_sprayed(fx);
                true
            }
            ActorKind::Pickup(kind) if kind.is_spray_reactive() => {
                self.body.kill();
                true
            }
            _ => false,
        }
    }
}
