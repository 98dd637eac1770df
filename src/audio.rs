//! Sound effects emitted by the simulation
//!
//! The simulation never plays audio itself. It records `SoundEffect`s as
//! events and the shell forwards them to whatever `AudioSink` it owns.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Racer fired a spray
    PlayerSpray,
    /// Racer ran out of health
    PlayerDie,
    /// Vehicle hit something (racer edge bump, cab collision, cab hurt)
    VehicleCrash,
    /// Cab destroyed
    VehicleDie,
    /// Pedestrian hurt or sprayed
    PedestrianHurt,
    /// Pedestrian killed
    PedestrianDie,
    /// Zombie pedestrian closing in on the racer
    ZombieAttack,
    /// Racer drove over an oil slick
    OilSlick,
    /// Healing or refill picked up
    GotGoodie,
    /// Soul rescued
    GotSoul,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::PlayerSpray => "player_spray",
            SoundEffect::PlayerDie => "player_die",
            SoundEffect::VehicleCrash => "vehicle_crash",
            SoundEffect::VehicleDie => "vehicle_die",
            SoundEffect::PedestrianHurt => "ped_hurt",
            SoundEffect::PedestrianDie => "ped_die",
            SoundEffect::ZombieAttack => "zombie_attack",
            SoundEffect::OilSlick => "oil_slick",
            SoundEffect::GotGoodie => "got_goodie",
            SoundEffect::GotSoul => "got_soul",
        }
    }
}

/// Fire-and-forget sound playback
pub trait AudioSink {
    fn play(&mut self, sound: SoundEffect);
}

/// Sink that reports sounds to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
    played: u64,
}

impl LogAudio {
    pub fn new(muted: bool) -> Self {
        Self { muted, played: 0 }
    }

    /// Number of sounds received so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, sound: SoundEffect) {
        self.played += 1;
        if !self.muted {
            log::trace!("sound: {}", sound.as_str());
        }
    }
}
