//! Lane proximity queries used by cab headway and cab placement
//!
//! Only live, collision-worthy actors count. The racer is a candidate when
//! looking above a point but never when looking below one.

use super::actor::{Actor, ActorId};
use super::geometry::Viewport;
use super::racer::Racer;

/// Who occupies the nearest spot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Racer,
    Actor(ActorId),
}

/// Nearest occupant in a lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub y: f64,
    pub occupant: Occupant,
}

fn lane_candidates<'a>(
    view: &Viewport,
    actors: impl Iterator<Item = &'a Actor>,
    x: f64,
) -> Option<impl Iterator<Item = Nearest>> {
    let lane = view.lane_of(x)?;
    let view = *view;
    Some(
        actors
            .filter(|a| a.is_alive() && a.is_collision_worthy())
            .filter(move |a| view.lane_of(a.body.pos.x) == Some(lane))
            .map(|a| Nearest {
                y: a.body.pos.y,
                occupant: Occupant::Actor(a.id),
            }),
    )
}

/// Closest occupant strictly above `y` in the lane containing `x`
pub fn closest_above<'a>(
    view: &Viewport,
    racer: Option<&Racer>,
    actors: impl Iterator<Item = &'a Actor>,
    x: f64,
    y: f64,
) -> Option<Nearest> {
    let lane = view.lane_of(x)?;
    let racer = racer
        .filter(|r| r.body.is_alive() && view.lane_of(r.body.pos.x) == Some(lane))
        .map(|r| Nearest {
            y: r.body.pos.y,
            occupant: Occupant::Racer,
        });

    lane_candidates(view, actors, x)?
        .chain(racer)
        .filter(|n| n.y > y)
        .min_by(|a, b| a.y.total_cmp(&b.y))
}

/// Closest actor strictly below `y` in the lane containing `x` (racer excluded)
pub fn closest_below<'a>(
    view: &Viewport,
    actors: impl Iterator<Item = &'a Actor>,
    x: f64,
    y: f64,
) -> Option<Nearest> {
    lane_candidates(view, actors, x)?
        .filter(|n| n.y < y)
        .max_by(|a, b| a.y.total_cmp(&b.y))
}
