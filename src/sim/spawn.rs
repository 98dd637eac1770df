//! End-of-tick spawners: road markers, the chance table and cab placement

use glam::DVec2;

use super::actor::{Actor, MarkerColor};
use super::geometry::{Lane, Viewport};
use super::query::{closest_above, closest_below};
use super::racer::Racer;
use super::rng::RandomSource;
use super::world::World;
use crate::consts::*;

/// Per-tick spawn odds of 1 in max(base + per_level * level, floor)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnOdds {
    pub base: i32,
    pub per_level: i32,
    pub floor: i32,
}

impl SpawnOdds {
    pub const HUMAN: SpawnOdds = SpawnOdds::new(200, -10, 30);
    pub const ZOMBIE: SpawnOdds = SpawnOdds::new(100, -10, 20);
    pub const CAB: SpawnOdds = SpawnOdds::new(100, -10, 20);
    pub const OIL_SLICK: SpawnOdds = SpawnOdds::new(150, -10, 40);
    pub const SPRAY_REFILL: SpawnOdds = SpawnOdds::new(100, 10, 0);
    pub const SOUL: SpawnOdds = SpawnOdds::new(100, 0, 0);

    pub const fn new(base: i32, per_level: i32, floor: i32) -> Self {
        Self {
            base,
            per_level,
            floor,
        }
    }

    /// The "1 in N" denominator at `level`
    pub fn odds(&self, level: u32) -> i32 {
        (self.base + self.per_level * level as i32).max(self.floor)
    }

    pub fn roll(&self, level: u32, rng: &mut dyn RandomSource) -> bool {
        rng.chance_of(self.odds(level), 1)
    }
}

/// Where a new cab goes and how fast it starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CabPlacement {
    pub lane: Lane,
    pub pos: DVec2,
    pub y_speed: f64,
}

/// Find a safe lane for a new cab
///
/// Starting from a random lane and cycling through all three: a lane whose
/// lowest occupant is absent or above a third of the view takes a cab at the
/// bottom, faster than the racer. Failing that, a lane whose highest actor is
/// absent or below two thirds takes one at the top, slower than the racer.
/// `None` when every lane is blocked.
pub fn place_cab(
    view: &Viewport,
    racer: &Racer,
    actors: &[Actor],
    rng: &mut dyn RandomSource,
) -> Option<CabPlacement> {
    let half_sprite = view.sprite_height() / 2.0;
    let mut lane = Lane::from_index(rng.rand_int(0, LANE_COUNT as i32 - 1) as usize);

    for _ in 0..LANE_COUNT {
        let x = view.lane_center(lane);

        let lowest = closest_above(view, Some(racer), actors.iter(), x, f64::NEG_INFINITY);
        if lowest.is_none_or(|n| n.y > view.height / 3.0) {
            let margin = rng.rand_int(CAB_SPAWN_SPEED_MIN, CAB_SPAWN_SPEED_MAX) as f64;
            return Some(CabPlacement {
                lane,
                pos: DVec2::new(x, half_sprite),
                y_speed: racer.body.y_speed + margin,
            });
        }

        // The racer is left out of the top-of-lane check
        let highest = closest_below(view, actors.iter(), x, f64::INFINITY);
        if highest.is_none_or(|n| n.y < view.height * 2.0 / 3.0) {
            let margin = rng.rand_int(CAB_SPAWN_SPEED_MIN, CAB_SPAWN_SPEED_MAX) as f64;
            return Some(CabPlacement {
                lane,
                pos: DVec2::new(x, view.height - half_sprite),
                y_speed: racer.body.y_speed - margin,
            });
        }

        log::debug!("{:?} lane too crowded for a cab", lane);
        lane = lane.next();
    }
    None
}

impl World {
    pub(crate) fn run_spawners(&mut self) {
        let Some(racer_speed) = self.racer.as_ref().map(|r| r.body.y_speed) else {
            return;
        };
        self.spawn_markers(racer_speed);

        let level = self.level;
        let (width, height) = (self.view.width, self.view.height);
        let (left, right) = (self.view.road_left() as i32, self.view.road_right() as i32);

        if SpawnOdds::HUMAN.roll(level, self.rng.as_mut()) {
            let x = self.rng.rand_int(0, width as i32) as f64;
            self.add_actor(|id| Actor::human_pedestrian(id, DVec2::new(x, height)));
        }
        if SpawnOdds::ZOMBIE.roll(level, self.rng.as_mut()) {
            let x = self.rng.rand_int(0, width as i32) as f64;
            self.add_actor(|id| Actor::zombie_pedestrian(id, DVec2::new(x, height)));
        }
        if SpawnOdds::CAB.roll(level, self.rng.as_mut()) {
            self.spawn_cab();
        }
        if SpawnOdds::OIL_SLICK.roll(level, self.rng.as_mut()) {
            let x = self.rng.rand_int(left, right) as f64;
            let size = self.rng.rand_int(OIL_SIZE_MIN, OIL_SIZE_MAX) as f64;
            self.add_actor(|id| Actor::oil_slick(id, DVec2::new(x, height), size));
        }
        if SpawnOdds::SPRAY_REFILL.roll(level, self.rng.as_mut()) {
            let x = self.rng.rand_int(left, right) as f64;
            self.add_actor(|id| Actor::spray_refill(id, DVec2::new(x, height)));
        }
        if SpawnOdds::SOUL.roll(level, self.rng.as_mut()) {
            let x = self.rng.rand_int(left, right) as f64;
            self.add_actor(|id| Actor::soul(id, DVec2::new(x, height)));
        }
    }

    fn spawn_cab(&mut self) {
        let Some(racer) = self.racer.as_ref() else {
            return;
        };
        match place_cab(&self.view, racer, &self.actors, self.rng.as_mut()) {
            Some(placement) => {
                log::debug!(
                    "cab placed in {:?} lane at y={} speed {}",
                    placement.lane,
                    placement.pos.y,
                    placement.y_speed
                );
                self.add_actor(|id| Actor::zombie_cab(id, placement.pos, placement.y_speed));
            }
            None => log::debug!("no safe lane for a cab this tick"),
        }
    }

    /// Keep edge lines one sprite apart and lane dividers four apart
    fn spawn_markers(&mut self, racer_speed: f64) {
        let sh = self.view.sprite_height();
        let shift = MARKER_SPEED - racer_speed;
        self.markers.yellow_y += shift;
        self.markers.white_y += shift;

        let top = self.view.height - sh;
        let (left, right) = (self.view.road_left(), self.view.road_right());
        let lane = self.view.lane_width();

        if top - self.markers.yellow_y >= sh {
            self.add_actor(|id| Actor::marker(id, DVec2::new(left, top), MarkerColor::Yellow));
            self.add_actor(|id| Actor::marker(id, DVec2::new(right, top), MarkerColor::Yellow));
            self.markers.yellow_y = top;
        }
        if top - self.markers.white_y >= 4.0 * sh {
            self.add_actor(|id| Actor::marker(id, DVec2::new(left + lane, top), MarkerColor::White));
            self.add_actor(|id| Actor::marker(id, DVec2::new(right - lane, top), MarkerColor::White));
            self.markers.white_y = top;
        }
    }
}
