//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (through `RandomSource`)
//! - Stable iteration order (insertion order of the actor list)
//! - No rendering, audio or platform dependencies; sounds leave as events

pub mod actor;
pub mod agent;
pub mod context;
pub mod error;
pub mod geometry;
pub mod npc;
pub mod pickup;
pub mod query;
pub mod racer;
pub mod rng;
pub mod spawn;
pub mod tick;
pub mod world;

pub use actor::{Actor, ActorBody, ActorId, ActorKind, MarkerColor, Spray};
pub use agent::{Agent, DamageOutcome};
pub use context::{GameEvent, Progress};
pub use error::SimError;
pub use geometry::{Body, Lane, Viewport, overlaps};
pub use npc::{Npc, NpcRole};
pub use pickup::PickupKind;
pub use query::{Nearest, Occupant};
pub use racer::{Key, Racer};
pub use rng::{RandomSource, SimRng};
pub use spawn::{CabPlacement, SpawnOdds, place_cab};
pub use tick::{TickInput, TickOutcome};
pub use world::{Phase, World};
