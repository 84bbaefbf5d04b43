//! Random-walk room placement.

use rand_chacha::ChaCha8Rng;

use crate::rng::pick_index;
use crate::types::{Direction, RoomType};

use super::graph::RoomGraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shortfall {
    pub built: usize,
    pub target: usize,
    pub attempts: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutOutcome {
    pub graph: RoomGraph,
    pub attempts: usize,
    pub shortfall: Option<Shortfall>,
}

/// Grows a graph from the start room by repeatedly stepping off a random
/// existing room. A candidate is accepted only when it touches exactly the
/// room it grew from, which keeps the adjacency graph a tree.
///
/// The room count is a soft target: running out of attempts returns the
/// partial graph together with a [`Shortfall`].
pub fn generate_layout(
    rng: &mut ChaCha8Rng,
    target_room_count: usize,
    max_attempt_factor: usize,
) -> LayoutOutcome {
    let target = target_room_count.max(1);
    let max_attempts = target.saturating_mul(max_attempt_factor);
    let mut graph = RoomGraph::with_start();

    let mut attempts = 0;
    while graph.len() < target && attempts < max_attempts {
        attempts += 1;
        let origin = graph.coords()[pick_index(rng, graph.len())];
        let direction = Direction::ALL[pick_index(rng, Direction::ALL.len())];
        let candidate = origin.step(direction);

        if graph.contains(candidate) || graph.neighbor_count(candidate) > 1 {
            continue;
        }
        graph.insert(candidate, RoomType::Normal);
    }

    let shortfall = (graph.len() < target).then_some(Shortfall {
        built: graph.len(),
        target,
        attempts,
    });
    LayoutOutcome { graph, attempts, shortfall }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;
    use crate::types::GridCoord;

    #[test]
    fn target_of_one_yields_only_the_start_room() {
        let outcome = generate_layout(&mut seeded(5), 1, 5);
        assert_eq!(outcome.graph.len(), 1);
        assert_eq!(outcome.graph.get(GridCoord::ORIGIN), Some(RoomType::Start));
        assert_eq!(outcome.attempts, 0);
        assert!(outcome.shortfall.is_none());
    }

    #[test]
    fn zero_target_still_places_the_start_room() {
        let outcome = generate_layout(&mut seeded(5), 0, 5);
        assert_eq!(outcome.graph.len(), 1);
    }

    #[test]
    fn five_room_walk_respects_the_neighbor_rule_at_insertion() {
        for seed in 0..50 {
            let outcome = generate_layout(&mut seeded(seed), 5, 5);
            let graph = &outcome.graph;
            assert!(graph.len() <= 5);
            assert_eq!(graph.get(GridCoord::ORIGIN), Some(RoomType::Start));
            assert!(graph.is_connected(), "seed {seed} produced a disconnected graph");

            let mut replay = RoomGraph::with_start();
            for &coord in &graph.coords()[1..] {
                assert!(
                    replay.neighbor_count(coord) <= 1,
                    "seed {seed}: {coord:?} had more than one neighbour when inserted"
                );
                replay.insert(coord, RoomType::Normal);
            }
        }
    }

    #[test]
    fn zero_attempt_budget_reports_a_shortfall() {
        let outcome = generate_layout(&mut seeded(9), 4, 0);
        assert_eq!(outcome.graph.len(), 1);
        assert_eq!(outcome.shortfall, Some(Shortfall { built: 1, target: 4, attempts: 0 }));
    }

    #[test]
    fn stops_as_soon_as_the_target_is_reached() {
        let outcome = generate_layout(&mut seeded(11), 12, 50);
        assert_eq!(outcome.graph.len(), 12);
        assert!(outcome.shortfall.is_none());
        assert_eq!(outcome.graph.count_of(RoomType::Normal), 11);
    }
}
