//! Hazards and goodies the racer can drive over

use serde::{Deserialize, Serialize};

use super::actor::ActorBody;
use super::agent::Agent;
use super::context::Effects;
use super::geometry::overlaps;
use super::racer::Racer;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::normalize_degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    OilSlick,
    Healing,
    SprayRefill,
    Soul,
}

impl PickupKind {
    pub fn name(&self) -> &'static str {
        match self {
            PickupKind::OilSlick => "oil slick",
            PickupKind::Healing => "healing",
            PickupKind::SprayRefill => "spray refill",
            PickupKind::Soul => "soul",
        }
    }

    /// Goodies are destroyed by the spray; hazards and souls let it pass
    pub fn is_spray_reactive(&self) -> bool {
        matches!(self, PickupKind::Healing | PickupKind::SprayRefill)
    }

    pub fn sound(&self) -> SoundEffect {
        match self {
            PickupKind::OilSlick => SoundEffect::OilSlick,
            PickupKind::Soul => SoundEffect::GotSoul,
            PickupKind::Healing | PickupKind::SprayRefill => SoundEffect::GotGoodie,
        }
    }

    pub fn score(&self) -> u64 {
        match self {
            PickupKind::OilSlick => 0,
            PickupKind::Healing => SCORE_HEALING,
            PickupKind::SprayRefill => SCORE_REFILL,
            PickupKind::Soul => SCORE_SOUL,
        }
    }

    /// Fire on the first racer overlap, then rotate souls
    pub fn after_move(&self, body: &mut ActorBody, racer: &mut Racer, fx: &mut Effects<'_>) {
        if racer.body.is_alive() && overlaps(&*body, &*racer) {
            self.activate(racer, fx);
            body.kill();
            fx.play(self.sound());
            fx.add_score(self.score());
        }
        if *self == PickupKind::Soul {
            body.direction = normalize_degrees(body.direction + SOUL_SPIN);
        }
    }

    fn activate(&self, racer: &mut Racer, fx: &mut Effects<'_>) {
        log::debug!("racer picked up {}", self.name());
        match self {
            PickupKind::OilSlick => racer.spin(fx),
            PickupKind::Healing => {
                racer.apply_damage(HEALING_AMOUNT, fx);
            }
            PickupKind::SprayRefill => racer.add_sprays(REFILL_AMOUNT),
            PickupKind::Soul => fx.record_rescue(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{Actor, ActorId};
    use crate::sim::context::{GameEvent, Neighbors, TestBed};
    use crate::sim::geometry::Viewport;
    use glam::DVec2;

    /// Place a pickup so that it lands on the racer after scrolling
    fn on_racer(build: fn(ActorId, DVec2) -> Actor, racer: &Racer) -> Actor {
        build(ActorId(1), racer.body.pos - DVec2::new(0.0, DEFAULT_Y_SPEED))
    }

    #[test]
    fn test_healing_tops_up_to_cap() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        let mut racer = Racer::new(&Viewport::default());
        racer.health = 95;
        let mut goodie = on_racer(Actor::healing, &racer);
        goodie.update(&mut Neighbors::empty(), &mut racer, &mut fx);
        assert!(goodie.is_dead());
        assert_eq!(racer.health, RACER_MAX_HEALTH);
        drop(fx);
        assert_eq!(bed.progress.score, SCORE_HEALING);
        assert_eq!(bed.sounds(), vec![SoundEffect::GotGoodie]);
    }

    #[test]
    fn test_refill_adds_sprays() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        let mut racer = Racer::new(&Viewport::default());
        let mut goodie = on_racer(Actor::spray_refill, &racer);
        goodie.update(&mut Neighbors::empty(), &mut racer, &mut fx);
        assert_eq!(racer.sprays, RACER_START_SPRAYS + REFILL_AMOUNT);
        drop(fx);
        assert_eq!(bed.progress.score, SCORE_REFILL);
    }

    #[test]
    fn test_soul_records_rescue_once() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        let mut racer = Racer::new(&Viewport::default());
        let mut soul = on_racer(Actor::soul, &racer);
        soul.update(&mut Neighbors::empty(), &mut racer, &mut fx);
        soul.update(&mut Neighbors::empty(), &mut racer, &mut fx);
        drop(fx);
        assert_eq!(bed.progress.souls_to_save, 6);
        assert_eq!(
            bed.events,
            vec![
                GameEvent::SoulSaved,
                GameEvent::Sound(SoundEffect::GotSoul),
                GameEvent::Scored(SCORE_SOUL),
            ]
        );
    }

    #[test]
    fn test_soul_rotates_while_waiting() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        let mut racer = Racer::new(&Viewport::default());
        let mut soul = Actor::soul(ActorId(1), DVec2::new(40.0, 200.0));
        soul.update(&mut Neighbors::empty(), &mut racer, &mut fx);
        soul.update(&mut Neighbors::empty(), &mut racer, &mut fx);
        assert!(soul.is_alive());
        assert_eq!(soul.body.direction, 340);
    }

    #[test]
    fn test_oil_slick_spins_and_scores_nothing() {
        let mut bed = TestBed::new(&[10, 0]);
        let mut fx = bed.fx();
        let mut racer = Racer::new(&Viewport::default());
        let mut oil = Actor::oil_slick(
            ActorId(1),
            racer.body.pos - DVec2::new(0.0, DEFAULT_Y_SPEED),
            3.0,
        );
        oil.update(&mut Neighbors::empty(), &mut racer, &mut fx);
        assert!(oil.is_dead());
        assert_eq!(racer.body.direction, FACING_UP + 10);
        drop(fx);
        assert_eq!(bed.progress.score, 0);
        assert_eq!(bed.sounds(), vec![SoundEffect::OilSlick]);
    }

    #[test]
    fn test_dead_racer_collects_nothing() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        let mut racer = Racer::new(&Viewport::default());
        racer.kill();
        let mut goodie = on_racer(Actor::healing, &racer);
        goodie.update(&mut Neighbors::empty(), &mut racer, &mut fx);
        assert!(goodie.is_alive());
    }
}
