//! Non-player agents: human pedestrians, zombie pedestrians and zombie cabs
//!
//! NPCs share a health pool, a horizontal speed and a move-plan countdown.
//! When the countdown runs out they pick a new random plan. Behaviour that
//! differs per role is dispatched on `NpcRole`.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorBody};
use super::agent::Agent;
use super::context::{Effects, Neighbors};
use super::geometry::overlaps;
use super::query::{closest_above, closest_below};
use super::racer::Racer;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Role-specific NPC state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpcRole {
    /// Must not be run over; reversed by the spray
    Human,
    /// Hunts the racer, grunting while it closes in
    Zombie { grunt_ticks: i32 },
    /// Traffic; rams the racer at most once
    Cab { has_hit_racer: bool },
}

impl NpcRole {
    pub fn name(&self) -> &'static str {
        match self {
            NpcRole::Human => "human",
            NpcRole::Zombie { .. } => "zombie",
            NpcRole::Cab { .. } => "cab",
        }
    }
}

/// Agent state for non-player actors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub health: i32,
    pub x_speed: f64,
    /// Ticks left before a new move plan is picked
    pub plan_ticks: i32,
    pub role: NpcRole,
}

impl Npc {
    pub fn new(health: i32, role: NpcRole) -> Self {
        Self {
            health,
            x_speed: 0.0,
            plan_ticks: 0,
            role,
        }
    }
}

/// Mutable view of an NPC actor's body and agent state
pub struct NpcAgent<'a> {
    pub body: &'a mut ActorBody,
    pub npc: &'a mut Npc,
}

impl<'a> NpcAgent<'a> {
    pub fn new(body: &'a mut ActorBody, npc: &'a mut Npc) -> Self {
        Self { body, npc }
    }

    /// React to the racer before moving
    pub fn before_move(&mut self, racer: &mut Racer, fx: &mut Effects<'_>) {
        match self.npc.role {
            NpcRole::Human => {
                if overlaps(&*self.body, &*racer) {
                    log::debug!("pedestrian run over");
                    self.body.kill();
                    racer.body.kill();
                }
            }
            NpcRole::Zombie { .. } => self.zombie_before_move(racer, fx),
            NpcRole::Cab { .. } => self.cab_before_move(racer, fx),
        }
    }

    fn zombie_before_move(&mut self, racer: &mut Racer, fx: &mut Effects<'_>) {
        if overlaps(&*self.body, &*racer) {
            racer.apply_damage(ZOMBIE_HIT_RACER, fx);
            self.apply_damage(ZOMBIE_HIT_SELF, fx);
            return;
        }

        let dx = self.body.pos.x - racer.body.pos.x;
        if dx.abs() > ZOMBIE_LUNGE_RANGE || self.body.pos.y <= racer.body.pos.y {
            return;
        }

        self.body.direction = FACING_DOWN;
        self.npc.x_speed = if dx == 0.0 {
            0.0
        } else if dx < 0.0 {
            1.0
        } else {
            -1.0
        };

        if let NpcRole::Zombie { grunt_ticks } = &mut self.npc.role {
            *grunt_ticks -= 1;
            if *grunt_ticks <= 0 {
                fx.play(SoundEffect::ZombieAttack);
                *grunt_ticks = ZOMBIE_GRUNT_TICKS;
            }
        }
    }

    fn cab_before_move(&mut self, racer: &mut Racer, fx: &mut Effects<'_>) {
        let NpcRole::Cab { has_hit_racer } = self.npc.role else {
            return;
        };
        if has_hit_racer || !overlaps(&*self.body, &*racer) {
            return;
        }

        fx.play(self.hurt_sound());
        racer.apply_damage(CAB_HIT_RACER, fx);

        // Veer away from the racer
        let jitter = fx.rand_int(0, CAB_VEER_JITTER);
        if self.body.pos.x <= racer.body.pos.x {
            self.npc.x_speed = -CAB_VEER_SPEED;
            self.body.direction = CAB_VEER_LEFT + jitter;
        } else {
            self.npc.x_speed = CAB_VEER_SPEED;
            self.body.direction = CAB_VEER_RIGHT + jitter;
        }
        self.npc.role = NpcRole::Cab {
            has_hit_racer: true,
        };
    }

    /// Replan (and for cabs, keep headway) after moving
    pub fn after_move(&mut self, neighbors: &Neighbors<'_>, racer: &Racer, fx: &mut Effects<'_>) {
        match self.npc.role {
            NpcRole::Human => {
                self.npc.plan_ticks -= 1;
                if self.npc.plan_ticks <= 0 {
                    self.pick_pedestrian_plan(fx);
                }
            }
            NpcRole::Zombie { .. } => {
                if self.npc.plan_ticks > 0 {
                    self.npc.plan_ticks -= 1;
                } else {
                    self.pick_pedestrian_plan(fx);
                }
            }
            NpcRole::Cab { .. } => self.cab_after_move(neighbors, racer, fx),
        }
    }

    fn cab_after_move(&mut self, neighbors: &Neighbors<'_>, racer: &Racer, fx: &mut Effects<'_>) {
        let pos = self.body.pos;
        if self.body.y_speed > racer.body.y_speed {
            // Closing on whatever is ahead, the racer included
            let ahead = closest_above(&fx.view, Some(racer), neighbors.iter(), pos.x, pos.y);
            if ahead.is_some_and(|n| n.y - pos.y < CAB_HEADWAY) {
                self.body.y_speed -= CAB_SPEED_ADJUST;
                return;
            }
        } else {
            let behind = closest_below(&fx.view, neighbors.iter(), pos.x, pos.y);
            if behind.is_some_and(|n| pos.y - n.y < CAB_HEADWAY) {
                self.body.y_speed += CAB_SPEED_ADJUST;
                return;
            }
        }

        self.npc.plan_ticks -= 1;
        if self.npc.plan_ticks > 0 {
            return;
        }
        self.npc.plan_ticks = fx.rand_int(MOVE_PLAN_MIN, MOVE_PLAN_MAX);
        self.body.y_speed += fx.rand_int(-CAB_REPLAN_SPEED, CAB_REPLAN_SPEED) as f64;
    }

    fn pick_pedestrian_plan(&mut self, fx: &mut Effects<'_>) {
        let last = PEDESTRIAN_X_SPEEDS.len() as i32 - 1;
        self.npc.x_speed = PEDESTRIAN_X_SPEEDS[fx.rand_int(0, last) as usize];
        self.npc.plan_ticks = fx.rand_int(MOVE_PLAN_MIN, MOVE_PLAN_MAX);
        self.body.direction = if self.npc.x_speed < 0.0 {
            FACING_LEFT
        } else {
            FACING_RIGHT
        };
    }

    /// React to a spray hit
    pub fn be_sprayed(&mut self, fx: &mut Effects<'_>) {
        match self.npc.role {
            NpcRole::Human => {
                self.npc.x_speed = -self.npc.x_speed;
                self.body.direction = if self.body.direction == FACING_LEFT {
                    FACING_RIGHT
                } else {
                    FACING_LEFT
                };
                fx.play(self.hurt_sound());
            }
            NpcRole::Zombie { .. } | NpcRole::Cab { .. } => {
                self.apply_damage(SPRAY_DAMAGE, fx);
            }
        }
    }
}

impl Agent for NpcAgent<'_> {
    fn health(&self) -> i32 {
        self.npc.health
    }

    fn set_health(&mut self, health: i32) {
        self.npc.health = health;
    }

    fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    fn mark_dead(&mut self) {
        self.body.kill();
    }

    fn death_sound(&self) -> SoundEffect {
        match self.npc.role {
            NpcRole::Cab { .. } => SoundEffect::VehicleDie,
            _ => SoundEffect::PedestrianDie,
        }
    }

    fn hurt_sound(&self) -> SoundEffect {
        match self.npc.role {
            NpcRole::Cab { .. } => SoundEffect::VehicleCrash,
            _ => SoundEffect::PedestrianHurt,
        }
    }

    fn on_death(&mut self, fx: &mut Effects<'_>) {
        let pos = self.body.pos;
        log::debug!("{} destroyed at {:?}", self.npc.role.name(), pos);
        match self.npc.role {
            NpcRole::Zombie { .. } => {
                // No drop when the racer ran it down
                if !overlaps(&*self.body, &fx.racer_body) && fx.rand_int(1, DROP_CHANCE) == 1 {
                    fx.spawn(|id| Actor::healing(id, pos));
                }
                fx.add_score(SCORE_ZOMBIE);
            }
            NpcRole::Cab { .. } => {
                if fx.rand_int(1, DROP_CHANCE) == 1 {
                    let size = fx.rand_int(OIL_SIZE_MIN, OIL_SIZE_MAX) as f64;
                    fx.spawn(|id| Actor::oil_slick(id, pos, size));
                }
                fx.add_score(SCORE_CAB);
            }
            NpcRole::Human => {}
        }
    }
}
