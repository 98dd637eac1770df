//! The world: owns the racer and every other actor for one level
//!
//! Lives and score carry over between levels; everything else is rebuilt by
//! `init` and dropped by `teardown`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, MarkerColor};
use super::context::{GameEvent, Progress};
use super::geometry::Viewport;
use super::query::{Nearest, closest_above, closest_below};
use super::racer::Racer;
use super::rng::{RandomSource, SimRng};
use super::tick::TickOutcome;
use crate::consts::*;
use crate::settings::Settings;

/// Where the world is in a level's life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No level loaded
    Idle,
    Running,
    /// The level ended; only `init` or `teardown` are valid now
    Ended(TickOutcome),
}

/// Last y at which each marker colour was placed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct MarkerTrack {
    pub yellow_y: f64,
    pub white_y: f64,
}

pub struct World {
    pub(crate) view: Viewport,
    pub(crate) level: u32,
    pub(crate) lives: u32,
    pub(crate) progress: Progress,
    pub(crate) bonus: u64,
    pub(crate) racer: Option<Racer>,
    /// Non-racer actors in insertion order
    pub(crate) actors: Vec<Actor>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) next_id: u32,
    pub(crate) phase: Phase,
    pub(crate) markers: MarkerTrack,
    pub(crate) status: String,
    /// Ticks since the level started
    pub(crate) ticks: u64,
}

impl World {
    /// Create an idle world using a seeded generator
    pub fn new(seed: u64, view: Viewport) -> Self {
        Self::with_random_source(Box::new(SimRng::new(seed)), view)
    }

    pub fn with_random_source(rng: Box<dyn RandomSource>, view: Viewport) -> Self {
        Self {
            view,
            level: START_LEVEL,
            lives: START_LIVES,
            progress: Progress::default(),
            bonus: 0,
            racer: None,
            actors: Vec::new(),
            events: Vec::new(),
            rng,
            next_id: 1,
            phase: Phase::Idle,
            markers: MarkerTrack::default(),
            status: String::new(),
            ticks: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut world = Self::new(settings.seed, settings.viewport());
        world.lives = settings.lives;
        world
    }

    /// Start `level`: fresh racer, seeded road markers, full bonus
    pub fn init(&mut self, level: u32) {
        if self.phase != Phase::Idle {
            self.teardown();
        }

        self.level = level;
        self.racer = Some(Racer::new(&self.view));
        self.bonus = LEVEL_BONUS;
        self.progress.souls_to_save = 2 * level + 5;
        self.ticks = 0;
        self.seed_markers();
        self.phase = Phase::Running;
        self.refresh_status();

        log::info!(
            "level {} started: {} souls to save, {} lives",
            level,
            self.progress.souls_to_save,
            self.lives
        );
    }

    /// Drop the racer and every actor
    pub fn teardown(&mut self) {
        log::info!("level {} torn down after {} ticks", self.level, self.ticks);
        self.racer = None;
        self.actors.clear();
        self.phase = Phase::Idle;
    }

    fn seed_markers(&mut self) {
        let sh = self.view.sprite_height();
        let (left, right) = (self.view.road_left(), self.view.road_right());
        let lane = self.view.lane_width();

        let yellow = (self.view.height / sh) as u32;
        for j in 0..yellow {
            let y = j as f64 * sh;
            self.add_actor(|id| Actor::marker(id, DVec2::new(left, y), MarkerColor::Yellow));
            self.add_actor(|id| Actor::marker(id, DVec2::new(right, y), MarkerColor::Yellow));
        }

        let white = (self.view.height / (4.0 * sh)) as u32;
        for j in 0..white {
            let y = j as f64 * 4.0 * sh;
            self.add_actor(|id| Actor::marker(id, DVec2::new(left + lane, y), MarkerColor::White));
            self.add_actor(|id| Actor::marker(id, DVec2::new(right - lane, y), MarkerColor::White));
        }

        self.markers = MarkerTrack {
            yellow_y: yellow.saturating_sub(1) as f64 * sh,
            white_y: white.saturating_sub(1) as f64 * 4.0 * sh,
        };
    }

    /// Add an actor immediately (only valid between update passes)
    pub fn add_actor(&mut self, build: impl FnOnce(ActorId) -> Actor) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.push(build(id));
        id
    }

    pub(crate) fn refresh_status(&mut self) {
        let (health, sprays) = self
            .racer
            .as_ref()
            .map_or((0, 0), |r| (r.health, r.sprays));
        self.status = format!(
            "Score: {}  Lvl: {}  Souls2Save: {}  Lives: {}  Health: {}  Sprays: {}  Bonus: {}",
            self.progress.score,
            self.level,
            self.progress.souls_to_save,
            self.lives,
            health,
            sprays,
            self.bonus
        );
    }

    /// Status line as of the end of the last tick
    pub fn status_text(&self) -> &str {
        &self.status
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn view(&self) -> &Viewport {
        &self.view
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.progress.score
    }

    pub fn souls_to_save(&self) -> u32 {
        self.progress.souls_to_save
    }

    pub fn bonus(&self) -> u64 {
        self.bonus
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    pub fn racer(&self) -> Option<&Racer> {
        self.racer.as_ref()
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Closest live worthy occupant above `y` in the lane of `x`, racer included
    pub fn closest_above(&self, x: f64, y: f64) -> Option<Nearest> {
        closest_above(&self.view, self.racer.as_ref(), self.actors.iter(), x, y)
    }

    /// Closest live worthy actor below `y` in the lane of `x`, racer excluded
    pub fn closest_below(&self, x: f64, y: f64) -> Option<Nearest> {
        closest_below(&self.view, self.actors.iter(), x, y)
    }
}
