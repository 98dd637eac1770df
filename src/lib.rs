//! Haunted Road - a three-lane scrolling arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, damage, overlap, spawning, world tick)
//! - `audio`: Sound effect identifiers and the sink the shell plays them through
//! - `settings`: Run configuration loaded from JSON

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, SoundEffect};
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 20;

    /// Default visible area (pixels)
    pub const VIEW_WIDTH: f64 = 256.0;
    pub const VIEW_HEIGHT: f64 = 256.0;
    /// Sprites are laid out on a 16x16 grid of the view
    pub const SPRITES_PER_VIEW: f64 = 16.0;
    /// Collision radius per unit of actor size
    pub const RADIUS_PER_SIZE: f64 = 8.0;

    /// Number of lanes on the road
    pub const LANE_COUNT: usize = 3;
    /// Scroll speed of road markers (own vertical speed)
    pub const MARKER_SPEED: f64 = -4.0;
    /// Default own vertical speed of roadside actors
    pub const DEFAULT_Y_SPEED: f64 = -4.0;

    /// Orientations (degrees)
    pub const FACING_RIGHT: i32 = 0;
    pub const FACING_UP: i32 = 90;
    pub const FACING_LEFT: i32 = 180;
    pub const FACING_DOWN: i32 = 270;

    /// Racer defaults
    pub const RACER_SIZE: f64 = 4.0;
    pub const RACER_MAX_HEALTH: i32 = 100;
    pub const RACER_START_SPRAYS: u32 = 10;
    pub const RACER_STEER_STEP: i32 = 8;
    /// Steering is limited to FACING_UP +/- this many steps
    pub const RACER_STEER_LIMIT: i32 = 3;
    pub const RACER_MIN_Y_SPEED: f64 = -1.0;
    pub const RACER_MAX_Y_SPEED: f64 = 5.0;
    /// Forward travel per tick along the heading
    pub const RACER_STEP: f64 = 4.0;
    pub const RACER_EDGE_DAMAGE: i32 = -10;
    /// Oil slick spin range (degrees) and heading clamp
    pub const SPIN_MIN: i32 = 5;
    pub const SPIN_MAX: i32 = 20;
    pub const SPIN_HEADING_MIN: i32 = 60;
    pub const SPIN_HEADING_MAX: i32 = 120;

    /// Pedestrians
    pub const HUMAN_SIZE: f64 = 2.0;
    pub const ZOMBIE_SIZE: f64 = 3.0;
    pub const PEDESTRIAN_HEALTH: i32 = 2;
    pub const PEDESTRIAN_X_SPEEDS: [f64; 6] = [-3.0, -2.0, -1.0, 1.0, 2.0, 3.0];
    pub const MOVE_PLAN_MIN: i32 = 4;
    pub const MOVE_PLAN_MAX: i32 = 32;
    pub const ZOMBIE_HIT_RACER: i32 = -5;
    pub const ZOMBIE_HIT_SELF: i32 = -2;
    /// Horizontal distance at which a zombie homes in on the racer
    pub const ZOMBIE_LUNGE_RANGE: f64 = 30.0;
    pub const ZOMBIE_GRUNT_TICKS: i32 = 20;

    /// Zombie cabs
    pub const CAB_SIZE: f64 = 4.0;
    pub const CAB_HEALTH: i32 = 3;
    pub const CAB_HIT_RACER: i32 = -20;
    pub const CAB_VEER_SPEED: f64 = 5.0;
    pub const CAB_VEER_LEFT: i32 = 120;
    pub const CAB_VEER_RIGHT: i32 = 60;
    pub const CAB_VEER_JITTER: i32 = 19;
    /// Headway below which a cab adjusts speed to avoid traffic
    pub const CAB_HEADWAY: f64 = 96.0;
    pub const CAB_SPEED_ADJUST: f64 = 0.5;
    pub const CAB_SPAWN_SPEED_MIN: i32 = 2;
    pub const CAB_SPAWN_SPEED_MAX: i32 = 4;
    pub const CAB_REPLAN_SPEED: i32 = 2;

    /// Spray projectile
    pub const SPRAY_SIZE: f64 = 1.0;
    pub const SPRAY_TRAVEL: f64 = 160.0;
    pub const SPRAY_DAMAGE: i32 = -1;

    /// Pickups
    pub const OIL_SIZE_MIN: i32 = 2;
    pub const OIL_SIZE_MAX: i32 = 5;
    pub const HEALING_SIZE: f64 = 1.0;
    pub const REFILL_SIZE: f64 = 2.0;
    pub const SOUL_SIZE: f64 = 4.0;
    pub const HEALING_AMOUNT: i32 = 10;
    pub const REFILL_AMOUNT: u32 = 10;
    pub const SOUL_SPIN: i32 = -10;
    /// 1 in DROP_CHANCE dying zombies/cabs leave something behind
    pub const DROP_CHANCE: i32 = 5;

    /// Scoring
    pub const SCORE_ZOMBIE: u64 = 150;
    pub const SCORE_CAB: u64 = 200;
    pub const SCORE_HEALING: u64 = 250;
    pub const SCORE_REFILL: u64 = 50;
    pub const SCORE_SOUL: u64 = 100;
    pub const LEVEL_BONUS: u64 = 5000;

    /// Run defaults
    pub const START_LIVES: u32 = 3;
    pub const START_LEVEL: u32 = 1;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Unit vector for a heading in degrees (0 = right, 90 = up)
#[inline]
pub fn heading_vector(degrees: i32) -> DVec2 {
    let rad = deg_to_rad(degrees as f64);
    DVec2::new(rad.cos(), rad.sin())
}

/// Wrap an orientation into [0, 360)
#[inline]
pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}
