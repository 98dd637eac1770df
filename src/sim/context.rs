//! What an actor can reach while it updates
//!
//! Actors never hold a pointer back to the world. Each update receives the
//! other actors as `Neighbors` (the current actor is split out of the
//! collection) and an `Effects` handle for everything else: random draws,
//! sounds, score, rescues and deferred spawns. Spawned actors are staged and
//! only join the population after the sweep.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};
use super::geometry::{Body, Viewport};
use super::rng::RandomSource;
use crate::audio::SoundEffect;

/// Something the shell should hear about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    Scored(u64),
    SoulSaved,
}

/// Score and rescue counters for the running level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub score: u64,
    pub souls_to_save: u32,
}

/// Position and radius frozen at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub pos: DVec2,
    pub radius: f64,
}

impl BodySnapshot {
    pub fn of<B: Body + ?Sized>(body: &B) -> Self {
        Self {
            pos: body.position(),
            radius: body.radius(),
        }
    }
}

impl Body for BodySnapshot {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Side effects available to actors during a tick
pub struct Effects<'a> {
    pub view: Viewport,
    /// The racer's body for this pass (it does not move while other actors update)
    pub racer_body: BodySnapshot,
    rng: &'a mut dyn RandomSource,
    events: &'a mut Vec<GameEvent>,
    spawned: &'a mut Vec<Actor>,
    next_id: &'a mut u32,
    progress: &'a mut Progress,
}

impl<'a> Effects<'a> {
    pub fn new(
        view: Viewport,
        racer_body: BodySnapshot,
        rng: &'a mut dyn RandomSource,
        events: &'a mut Vec<GameEvent>,
        spawned: &'a mut Vec<Actor>,
        next_id: &'a mut u32,
        progress: &'a mut Progress,
    ) -> Self {
        Self {
            view,
            racer_body,
            rng,
            events,
            spawned,
            next_id,
            progress,
        }
    }

    pub fn rand_int(&mut self, low: i32, high: i32) -> i32 {
        self.rng.rand_int(low, high)
    }

    pub fn play(&mut self, sound: SoundEffect) {
        self.events.push(GameEvent::Sound(sound));
    }

    pub fn add_score(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.progress.score += points;
        self.events.push(GameEvent::Scored(points));
    }

    pub fn progress(&self) -> Progress {
        *self.progress
    }

    pub fn record_rescue(&mut self) {
        self.progress.souls_to_save = self.progress.souls_to_save.saturating_sub(1);
        self.events.push(GameEvent::SoulSaved);
    }

    /// Stage a new actor; it joins the world after this tick's sweep
    pub fn spawn(&mut self, build: impl FnOnce(ActorId) -> Actor) -> ActorId {
        let id = ActorId(*self.next_id);
        *self.next_id += 1;
        let actor = build(id);
        log::debug!("staged {:?} #{} at {:?}", actor.kind.name(), id.0, actor.body.pos);
        self.spawned.push(actor);
        id
    }
}

/// Every other actor in the world, in stable collection order
pub struct Neighbors<'a> {
    before: &'a mut [Actor],
    after: &'a mut [Actor],
}

impl<'a> Neighbors<'a> {
    pub fn new(before: &'a mut [Actor], after: &'a mut [Actor]) -> Self {
        Self { before, after }
    }

    pub fn empty() -> Neighbors<'static> {
        Neighbors {
            before: &mut [],
            after: &mut [],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.before.iter().chain(self.after.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.before.iter_mut().chain(self.after.iter_mut())
    }
}

/// Owned backing storage for an `Effects` handle in tests
#[cfg(test)]
pub struct TestBed {
    pub view: Viewport,
    pub racer_body: BodySnapshot,
    pub rng: super::rng::ScriptedRandom,
    pub events: Vec<GameEvent>,
    pub spawned: Vec<Actor>,
    pub next_id: u32,
    pub progress: Progress,
}

#[cfg(test)]
impl TestBed {
    pub fn new(draws: &[i32]) -> Self {
        let view = Viewport::default();
        Self {
            view,
            racer_body: BodySnapshot {
                pos: DVec2::new(view.road_center(), view.height / 8.0),
                radius: crate::consts::RACER_SIZE * crate::consts::RADIUS_PER_SIZE,
            },
            rng: super::rng::ScriptedRandom::new(draws),
            events: Vec::new(),
            spawned: Vec::new(),
            next_id: 1000,
            progress: Progress {
                score: 0,
                souls_to_save: 7,
            },
        }
    }

    pub fn fx(&mut self) -> Effects<'_> {
        Effects::new(
            self.view,
            self.racer_body,
            &mut self.rng,
            &mut self.events,
            &mut self.spawned,
            &mut self.next_id,
            &mut self.progress,
        )
    }

    pub fn sounds(&self) -> Vec<SoundEffect> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Sound(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_stage_spawns_with_fresh_ids() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        let a = fx.spawn(|id| Actor::healing(id, DVec2::new(100.0, 100.0)));
        let b = fx.spawn(|id| Actor::healing(id, DVec2::new(120.0, 100.0)));
        assert_ne!(a, b);
        assert_eq!(bed.spawned.len(), 2);
        assert_eq!(bed.next_id, 1002);
    }

    #[test]
    fn test_rescue_never_underflows() {
        let mut bed = TestBed::new(&[]);
        bed.progress.souls_to_save = 1;
        let mut fx = bed.fx();
        fx.record_rescue();
        fx.record_rescue();
        assert_eq!(bed.progress.souls_to_save, 0);
        assert_eq!(
            bed.events,
            vec![GameEvent::SoulSaved, GameEvent::SoulSaved]
        );
    }

    #[test]
    fn test_zero_score_is_not_reported() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        fx.add_score(0);
        fx.add_score(50);
        assert_eq!(bed.progress.score, 50);
        assert_eq!(bed.events, vec![GameEvent::Scored(50)]);
    }
}
