//! Fixed timestep simulation tick
//!
//! Core game loop that advances one level deterministically.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind};
use super::context::{BodySnapshot, Effects, Neighbors, Progress};
use super::error::SimError;
use super::geometry::{Body, Lane, Viewport};
use super::npc::NpcRole;
use super::pickup::PickupKind;
use super::query::closest_above;
use super::racer::{Key, Racer};
use super::world::{Phase, World};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Key pressed this tick, if any
    pub key: Option<Key>,
    /// Autopilot - ignore `key` and let the AI drive
    pub autopilot: bool,
}

impl TickInput {
    pub fn key(key: Key) -> Self {
        Self {
            key: Some(key),
            autopilot: false,
        }
    }
}

/// What a tick means for the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Continue,
    PlayerDied,
    LevelComplete,
}

impl TickOutcome {
    pub fn is_terminal(self) -> bool {
        self != TickOutcome::Continue
    }
}

/// Racer death wins over a finished rescue quota
fn level_outcome(racer: &Racer, progress: &Progress) -> Option<TickOutcome> {
    if !racer.body.is_alive() || racer.health <= 0 {
        Some(TickOutcome::PlayerDied)
    } else if progress.souls_to_save == 0 {
        Some(TickOutcome::LevelComplete)
    } else {
        None
    }
}

impl World {
    /// Advance the level by one fixed timestep
    ///
    /// Order: bonus countdown, racer, every other actor (the level may end
    /// after any of them), sweep of the dead, staged spawns, spawners, status.
    pub fn tick(&mut self, input: &TickInput) -> Result<TickOutcome, SimError> {
        match self.phase {
            Phase::Idle => {
                log::warn!("tick called with no level running");
                return Err(SimError::NotInitialized);
            }
            Phase::Ended(outcome) => {
                log::warn!("tick called after the level ended ({:?})", outcome);
                return Err(SimError::LevelOver { outcome });
            }
            Phase::Running => {}
        }
        let Some(racer) = self.racer.as_mut() else {
            return Err(SimError::NotInitialized);
        };

        self.ticks += 1;
        self.bonus = self.bonus.saturating_sub(1);

        let key = if input.autopilot {
            autopilot_key(&self.view, racer, &self.actors)
        } else {
            input.key
        };

        let mut pending = Vec::new();
        let mut fx = Effects::new(
            self.view,
            BodySnapshot::of(&*racer),
            self.rng.as_mut(),
            &mut self.events,
            &mut pending,
            &mut self.next_id,
            &mut self.progress,
        );

        racer.update(key, &mut fx);
        fx.racer_body = BodySnapshot::of(&*racer);

        let mut outcome = level_outcome(racer, &fx.progress());
        if outcome.is_none() {
            for i in 0..self.actors.len() {
                let (before, rest) = self.actors.split_at_mut(i);
                let Some((actor, after)) = rest.split_first_mut() else {
                    break;
                };
                actor.update(&mut Neighbors::new(before, after), racer, &mut fx);

                outcome = level_outcome(racer, &fx.progress());
                if outcome.is_some() {
                    break;
                }
            }
        }

        if let Some(outcome) = outcome {
            return Ok(self.finish(outcome));
        }

        self.actors.retain(Actor::is_alive);
        self.actors.append(&mut pending);
        self.run_spawners();
        self.refresh_status();

        Ok(TickOutcome::Continue)
    }

    fn finish(&mut self, outcome: TickOutcome) -> TickOutcome {
        match outcome {
            TickOutcome::PlayerDied => {
                self.lives = self.lives.saturating_sub(1);
                log::info!(
                    "racer lost on level {} after {} ticks; {} lives left",
                    self.level,
                    self.ticks,
                    self.lives
                );
            }
            TickOutcome::LevelComplete => {
                self.progress.score += self.bonus;
                log::info!(
                    "level {} complete after {} ticks; bonus {}",
                    self.level,
                    self.ticks,
                    self.bonus
                );
            }
            TickOutcome::Continue => {}
        }
        self.phase = Phase::Ended(outcome);
        self.refresh_status();
        outcome
    }
}

/// Pick a key for the AI driver
///
/// Sprays anything hostile straight ahead, steers toward the nearest soul
/// (or else the lane with the most room) and keeps a modest speed.
fn autopilot_key(view: &Viewport, racer: &Racer, actors: &[Actor]) -> Option<Key> {
    let pos = racer.body.pos;
    let reach = 4.0 * view.sprite_height();

    let hostile_ahead = actors.iter().any(|a| {
        let hostile = matches!(&a.kind, ActorKind::Npc(npc) if npc.role != NpcRole::Human);
        let dy = a.body.pos.y - pos.y;
        hostile
            && a.is_alive()
            && (a.body.pos.x - pos.x).abs() < racer.radius() * 0.5
            && dy > 0.0
            && dy < reach
    });
    if hostile_ahead && racer.sprays > 0 && racer.body.direction == FACING_UP {
        return Some(Key::Fire);
    }

    let soul = actors
        .iter()
        .filter(|a| a.is_alive() && a.kind == ActorKind::Pickup(PickupKind::Soul))
        .filter(|a| a.body.pos.y > pos.y)
        .min_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y));
    let target_x = match soul {
        Some(soul) => soul.body.pos.x,
        None => {
            let room = |lane: &Lane| {
                closest_above(view, None, actors.iter(), view.lane_center(*lane), pos.y)
                    .map_or(view.height, |n| n.y - pos.y)
            };
            Lane::ALL
                .iter()
                .max_by(|a, b| room(*a).total_cmp(&room(*b)))
                .map_or(view.road_center(), |lane| view.lane_center(*lane))
        }
    };

    let dx = target_x - pos.x;
    let heading = if dx > RACER_STEP {
        FACING_UP - RACER_STEER_STEP
    } else if dx < -RACER_STEP {
        FACING_UP + RACER_STEER_STEP
    } else {
        FACING_UP
    };

    if racer.body.direction > heading {
        Some(Key::SteerRight)
    } else if racer.body.direction < heading {
        Some(Key::SteerLeft)
    } else if racer.body.y_speed < 2.0 {
        Some(Key::Accelerate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{ActorId, MarkerColor};
    use crate::sim::context::GameEvent;
    use crate::sim::rng::RandomSource;
    use glam::DVec2;

    /// Always draws the top of the range, so no chance roll ever succeeds
    struct Quiet;

    impl RandomSource for Quiet {
        fn rand_int(&mut self, low: i32, high: i32) -> i32 {
            high.max(low)
        }
    }

    fn quiet_world() -> World {
        let mut world = World::with_random_source(Box::new(Quiet), Viewport::default());
        world.init(1);
        world
    }

    fn racer_pos(world: &World) -> DVec2 {
        world.racer().map(|r| r.body.pos).unwrap_or_default()
    }

    #[test]
    fn test_tick_before_init() {
        let mut world = World::new(1, Viewport::default());
        assert_eq!(
            world.tick(&TickInput::default()),
            Err(SimError::NotInitialized)
        );
    }

    #[test]
    fn test_tick_counts_down_bonus() {
        let mut world = quiet_world();
        for _ in 0..3 {
            assert_eq!(world.tick(&TickInput::default()), Ok(TickOutcome::Continue));
        }
        assert_eq!(world.bonus(), LEVEL_BONUS - 3);
        assert!(world.status_text().ends_with("Bonus: 4997"));
    }

    #[test]
    fn test_running_over_pedestrian_costs_a_life() {
        let mut world = quiet_world();
        let pos = racer_pos(&world);
        world.add_actor(|id| Actor::human_pedestrian(id, pos));

        assert_eq!(world.tick(&TickInput::default()), Ok(TickOutcome::PlayerDied));
        assert_eq!(world.lives(), START_LIVES - 1);
        assert_eq!(
            world.tick(&TickInput::default()),
            Err(SimError::LevelOver {
                outcome: TickOutcome::PlayerDied
            })
        );
    }

    #[test]
    fn test_last_soul_completes_level_with_bonus() {
        let mut world = quiet_world();
        world.progress.souls_to_save = 1;
        let pos = racer_pos(&world);
        world.add_actor(|id| Actor::soul(id, pos - DVec2::new(0.0, DEFAULT_Y_SPEED)));
        // Appended after the soul; must not move once the level ends
        let marker_pos = DVec2::new(64.0, 150.0);
        let marker = world.add_actor(|id| Actor::marker(id, marker_pos, MarkerColor::Yellow));

        assert_eq!(
            world.tick(&TickInput::default()),
            Ok(TickOutcome::LevelComplete)
        );
        assert_eq!(world.score(), SCORE_SOUL + LEVEL_BONUS - 1);
        assert_eq!(world.actor(marker).map(|a| a.body.pos), Some(marker_pos));
        assert!(world.drain_events().contains(&GameEvent::SoulSaved));
    }

    #[test]
    fn test_dead_actors_swept_and_spray_staged() {
        let mut world = quiet_world();
        let doomed = world.add_actor(|id| Actor::healing(id, DVec2::new(200.0, 1.0)));

        world.tick(&TickInput::key(Key::Fire)).ok();
        assert!(world.actor(doomed).is_none());

        let spray: Vec<_> = world
            .actors()
            .iter()
            .filter(|a| matches!(a.kind, ActorKind::Spray(_)))
            .collect();
        assert_eq!(spray.len(), 1);
        // Not updated on the tick it was fired
        assert!((spray[0].body.pos.y - (32.0 + 16.0)).abs() < 1e-9);
        assert_eq!(world.racer().map(|r| r.sprays), Some(RACER_START_SPRAYS - 1));
    }

    #[test]
    fn test_markers_keep_spacing() {
        let mut world = quiet_world();
        let top = |world: &World, color| {
            world
                .actors()
                .iter()
                .filter(|a| a.kind == ActorKind::Marker(color) && a.body.pos.y == 240.0)
                .count()
        };
        for _ in 0..3 {
            world.tick(&TickInput::default()).ok();
        }
        assert_eq!(top(&world, MarkerColor::Yellow), 0);
        world.tick(&TickInput::default()).ok();
        assert_eq!(top(&world, MarkerColor::Yellow), 2);
        assert_eq!(top(&world, MarkerColor::White), 2);
    }

    #[test]
    fn test_init_after_death_restarts() {
        let mut world = quiet_world();
        let pos = racer_pos(&world);
        world.add_actor(|id| Actor::human_pedestrian(id, pos));
        world.tick(&TickInput::default()).ok();

        world.init(1);
        assert_eq!(world.tick(&TickInput::default()), Ok(TickOutcome::Continue));
        assert_eq!(world.lives(), START_LIVES - 1);
    }

    #[test]
    fn test_autopilot_fires_at_cab_ahead() {
        let view = Viewport::default();
        let racer = Racer::new(&view);
        let actors = vec![Actor::zombie_cab(
            ActorId(1),
            racer.body.pos + DVec2::new(0.0, 40.0),
            0.0,
        )];
        assert_eq!(autopilot_key(&view, &racer, &actors), Some(Key::Fire));
    }

    #[test]
    fn test_autopilot_steers_toward_soul() {
        let view = Viewport::default();
        let racer = Racer::new(&view);
        let actors = vec![Actor::soul(ActorId(1), DVec2::new(80.0, 200.0))];
        assert_eq!(autopilot_key(&view, &racer, &actors), Some(Key::SteerLeft));
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed and inputs must stay identical
        let mut world1 = World::new(99999, Viewport::default());
        let mut world2 = World::new(99999, Viewport::default());
        world1.init(1);
        world2.init(1);

        let input = TickInput {
            key: None,
            autopilot: true,
        };
        for _ in 0..500 {
            let a = world1.tick(&input);
            let b = world2.tick(&input);
            assert_eq!(a, b);
            assert_eq!(world1.status_text(), world2.status_text());
            if a != Ok(TickOutcome::Continue) {
                break;
            }
        }
        assert_eq!(world1.actors(), world2.actors());
        assert_eq!(world1.drain_events(), world2.drain_events());
    }
}
