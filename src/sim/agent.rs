//! Health and the damage protocol shared by the racer and NPCs
//!
//! `apply_damage` is the only way health changes. Implementors customise the
//! two outcomes through `on_death` and `on_survive` rather than overriding
//! the protocol itself.

use super::context::Effects;
use crate::audio::SoundEffect;

/// What happened to an agent after `apply_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Died,
    Survived,
}

/// An actor with health
pub trait Agent {
    fn health(&self) -> i32;

    /// Store a new health value, clamped to this agent's cap
    fn set_health(&mut self, health: i32);

    fn is_alive(&self) -> bool;

    fn mark_dead(&mut self);

    fn death_sound(&self) -> SoundEffect;

    fn hurt_sound(&self) -> SoundEffect;

    /// Runs once, right after the agent is marked dead
    fn on_death(&mut self, _fx: &mut Effects<'_>) {}

    /// Runs when damage (or healing) leaves the agent alive
    fn on_survive(&mut self, fx: &mut Effects<'_>) {
        fx.play(self.hurt_sound());
    }

    /// Add `delta` to health (negative harms, positive heals)
    ///
    /// Health at or below zero kills the agent: it is marked dead, the death
    /// sound plays and `on_death` runs. Otherwise `on_survive` runs. Damage to
    /// an agent that is already dead is ignored so the death hook fires once.
    fn apply_damage(&mut self, delta: i32, fx: &mut Effects<'_>) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Died;
        }

        let health = self.health().saturating_add(delta);
        self.set_health(health);
        if self.health() <= 0 {
            self.mark_dead();
            fx.play(self.death_sound());
            self.on_death(fx);
            DamageOutcome::Died
        } else {
            self.on_survive(fx);
            DamageOutcome::Survived
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::context::TestBed;
    use proptest::prelude::*;

    /// Minimal agent that counts hook calls
    struct Dummy {
        health: i32,
        cap: Option<i32>,
        alive: bool,
        deaths: u32,
        survivals: u32,
    }

    impl Dummy {
        fn new(health: i32) -> Self {
            Self {
                health,
                cap: None,
                alive: true,
                deaths: 0,
                survivals: 0,
            }
        }
    }

    impl Agent for Dummy {
        fn health(&self) -> i32 {
            self.health
        }

        fn set_health(&mut self, health: i32) {
            self.health = match self.cap {
                Some(cap) => health.min(cap),
                None => health,
            };
        }

        fn is_alive(&self) -> bool {
            self.alive
        }

        fn mark_dead(&mut self) {
            self.alive = false;
        }

        fn death_sound(&self) -> SoundEffect {
            SoundEffect::PedestrianDie
        }

        fn hurt_sound(&self) -> SoundEffect {
            SoundEffect::PedestrianHurt
        }

        fn on_death(&mut self, _fx: &mut Effects<'_>) {
            self.deaths += 1;
        }

        fn on_survive(&mut self, fx: &mut Effects<'_>) {
            self.survivals += 1;
            fx.play(self.hurt_sound());
        }
    }

    #[test]
    fn test_lethal_damage_kills_once() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        let mut agent = Dummy::new(3);
        assert_eq!(agent.apply_damage(-3, &mut fx), DamageOutcome::Died);
        assert!(!agent.is_alive());
        assert_eq!(agent.apply_damage(-3, &mut fx), DamageOutcome::Died);
        assert_eq!(agent.deaths, 1);
        drop(fx);
        assert_eq!(bed.sounds(), vec![SoundEffect::PedestrianDie]);
    }

    #[test]
    fn test_survivable_damage_plays_hurt() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        let mut agent = Dummy::new(3);
        assert_eq!(agent.apply_damage(-1, &mut fx), DamageOutcome::Survived);
        assert_eq!(agent.health, 2);
        assert_eq!(agent.survivals, 1);
        drop(fx);
        assert_eq!(bed.sounds(), vec![SoundEffect::PedestrianHurt]);
    }

    #[test]
    fn test_healing_clamps_at_cap() {
        let mut bed = TestBed::new(&[]);
        let mut fx = bed.fx();
        let mut agent = Dummy::new(90);
        agent.cap = Some(100);
        agent.apply_damage(1000, &mut fx);
        assert_eq!(agent.health, 100);
        assert!(agent.is_alive());
    }

    proptest! {
        #[test]
        fn prop_damage_at_or_beyond_health_kills(health in 1i32..500, extra in 0i32..500) {
            let mut bed = TestBed::new(&[]);
            let mut fx = bed.fx();
            let mut agent = Dummy::new(health);
            let outcome = agent.apply_damage(-(health + extra), &mut fx);
            prop_assert_eq!(outcome, DamageOutcome::Died);
            prop_assert!(!agent.is_alive());
            prop_assert_eq!(agent.deaths, 1);
            prop_assert_eq!(agent.survivals, 0);
        }

        #[test]
        fn prop_healing_never_hurts(health in 1i32..500, delta in 1i32..5000) {
            let mut bed = TestBed::new(&[]);
            let mut fx = bed.fx();
            let mut agent = Dummy::new(health);
            let outcome = agent.apply_damage(delta, &mut fx);
            prop_assert_eq!(outcome, DamageOutcome::Survived);
            prop_assert!(agent.health >= health);
            prop_assert!(agent.is_alive());
            prop_assert_eq!(agent.deaths, 0);
        }
    }
}
