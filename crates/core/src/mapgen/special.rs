//! Boss and item room selection over a freshly walked graph.

use rand_chacha::ChaCha8Rng;

use crate::rng::pick_index;
use crate::types::{GridCoord, RoomType};

use super::graph::RoomGraph;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecialRooms {
    pub boss: Option<GridCoord>,
    pub items: Vec<GridCoord>,
}

/// Re-types rooms in place: one boss room as far from the start as possible,
/// then `floor(len * item_room_fraction)` item rooms drawn from what is left.
/// Graphs with at most one room are left untouched.
pub fn assign_special_rooms(
    graph: &mut RoomGraph,
    rng: &mut ChaCha8Rng,
    item_room_fraction: f32,
) -> SpecialRooms {
    if graph.len() <= 1 {
        return SpecialRooms::default();
    }

    let boss = pick_boss_room(graph);
    if let Some(coord) = boss {
        graph.set_type(coord, RoomType::Boss);
    }

    let fraction = item_room_fraction.clamp(0.0, 1.0);
    let wanted = (graph.len() as f32 * fraction).floor() as usize;
    let mut pool: Vec<GridCoord> =
        graph.iter().filter(|(_, ty)| *ty == RoomType::Normal).map(|(coord, _)| coord).collect();

    let mut items = Vec::with_capacity(wanted.min(pool.len()));
    while items.len() < wanted && !pool.is_empty() {
        let coord = pool.remove(pick_index(rng, pool.len()));
        graph.set_type(coord, RoomType::Item);
        items.push(coord);
    }

    SpecialRooms { boss, items }
}

/// Farthest Normal room from the origin, first in insertion order on ties.
/// Without any Normal room, the first non-start room stands in.
fn pick_boss_room(graph: &RoomGraph) -> Option<GridCoord> {
    let mut best: Option<(GridCoord, i64)> = None;
    for (coord, room_type) in graph.iter() {
        if room_type != RoomType::Normal {
            continue;
        }
        let distance = coord.distance_squared(GridCoord::ORIGIN);
        if best.is_none_or(|(_, best_distance)| distance > best_distance) {
            best = Some((coord, distance));
        }
    }

    best.map(|(coord, _)| coord).or_else(|| {
        graph.iter().find(|(_, room_type)| *room_type != RoomType::Start).map(|(coord, _)| coord)
    })
}
