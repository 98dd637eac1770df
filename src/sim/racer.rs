//! The player-controlled racer

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorBody};
use super::agent::Agent;
use super::context::Effects;
use super::geometry::{Body, Viewport};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::heading_vector;

/// One key press for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    SteerLeft,
    SteerRight,
    Accelerate,
    Brake,
    Fire,
}

/// The player's vehicle
///
/// Unlike other actors the racer does not scroll. It drifts sideways along
/// its heading while its vertical speed sets how fast everything else
/// scrolls past.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Racer {
    pub body: ActorBody,
    pub health: i32,
    pub sprays: u32,
}

impl Racer {
    pub fn new(view: &Viewport) -> Self {
        let pos = DVec2::new(view.road_center(), view.height / 8.0);
        Self {
            body: ActorBody::new(pos, FACING_UP, RACER_SIZE, 0.0),
            health: RACER_MAX_HEALTH,
            sprays: RACER_START_SPRAYS,
        }
    }

    /// Advance one tick
    ///
    /// A road-edge bump takes priority over the key for this tick.
    pub fn update(&mut self, key: Option<Key>, fx: &mut Effects<'_>) {
        if !self.body.is_alive() {
            return;
        }

        let x = self.body.pos.x;
        if x <= fx.view.road_left() {
            if self.body.direction > FACING_UP {
                self.bump_edge(FACING_UP - RACER_STEER_STEP, fx);
            }
        } else if x >= fx.view.road_right() {
            if self.body.direction < FACING_UP {
                self.bump_edge(FACING_UP + RACER_STEER_STEP, fx);
            }
        } else if let Some(key) = key {
            self.handle_key(key, fx);
        }

        self.body.pos.x += heading_vector(self.body.direction).x * RACER_STEP;
    }

    fn bump_edge(&mut self, bounce: i32, fx: &mut Effects<'_>) {
        log::debug!("racer hit the road edge at x={:.1}", self.body.pos.x);
        self.apply_damage(RACER_EDGE_DAMAGE, fx);
        self.body.direction = bounce;
        fx.play(self.hurt_sound());
    }

    fn handle_key(&mut self, key: Key, fx: &mut Effects<'_>) {
        let max_dir = FACING_UP + RACER_STEER_LIMIT * RACER_STEER_STEP;
        let min_dir = FACING_UP - RACER_STEER_LIMIT * RACER_STEER_STEP;
        match key {
            Key::Fire => self.fire(fx),
            Key::SteerLeft if self.body.direction < max_dir => {
                self.body.direction += RACER_STEER_STEP;
            }
            Key::SteerRight if self.body.direction > min_dir => {
                self.body.direction -= RACER_STEER_STEP;
            }
            Key::Accelerate if self.body.y_speed < RACER_MAX_Y_SPEED => {
                self.body.y_speed += 1.0;
            }
            Key::Brake if self.body.y_speed > RACER_MIN_Y_SPEED => {
                self.body.y_speed -= 1.0;
            }
            _ => {}
        }
    }

    fn fire(&mut self, fx: &mut Effects<'_>) {
        if self.sprays == 0 {
            return;
        }
        let direction = self.body.direction;
        let pos = self.body.pos + heading_vector(direction) * fx.view.sprite_height();
        fx.spawn(|id| Actor::spray(id, pos, direction));
        fx.play(SoundEffect::PlayerSpray);
        self.sprays -= 1;
    }

    /// Knock the heading by a random amount either way (oil slick)
    pub fn spin(&mut self, fx: &mut Effects<'_>) {
        let change = fx.rand_int(SPIN_MIN, SPIN_MAX);
        let sign = if fx.rand_int(-1, 0) == -1 { -1 } else { 1 };
        self.body.direction =
            (self.body.direction + change * sign).clamp(SPIN_HEADING_MIN, SPIN_HEADING_MAX);
    }

    pub fn add_sprays(&mut self, amount: u32) {
        self.sprays = self.sprays.saturating_add(amount);
    }

    pub fn kill(&mut self) {
        self.body.kill();
    }
}

impl Body for Racer {
    fn position(&self) -> DVec2 {
        self.body.pos
    }

    fn radius(&self) -> f64 {
        self.body.radius()
    }
}

impl Agent for Racer {
    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health.min(RACER_MAX_HEALTH);
    }

    fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    fn mark_dead(&mut self) {
        self.body.kill();
    }

    fn death_sound(&self) -> SoundEffect {
        SoundEffect::PlayerDie
    }

    fn hurt_sound(&self) -> SoundEffect {
        SoundEffect::VehicleCrash
    }

    // Whoever hurt the racer plays the sound
    fn on_survive(&mut self, _fx: &mut Effects<'_>) {}

    fn on_death(&mut self, _fx: &mut Effects<'_>) {
        log::info!("racer destroyed at {:?}", self.body.pos);
    }
}
