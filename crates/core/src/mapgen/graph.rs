//! Insertion-ordered room graph keyed by grid coordinate.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::{GridCoord, RoomType};

/// Rooms keyed by coordinate. Adjacency is implied by 4-neighbour positions.
///
/// Iteration follows insertion order, which is what makes "first encountered"
/// tie-breaks reproducible for a given seed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomGraph {
    order: Vec<GridCoord>,
    types: HashMap<GridCoord, RoomType>,
}

impl RoomGraph {
    pub fn with_start() -> Self {
        let mut graph = Self::default();
        graph.insert(GridCoord::ORIGIN, RoomType::Start);
        graph
    }

    /// Adds a room; returns `false` and leaves the graph untouched if the
    /// coordinate is already occupied.
    pub fn insert(&mut self, coord: GridCoord, room_type: RoomType) -> bool {
        if self.types.contains_key(&coord) {
            return false;
        }
        self.types.insert(coord, room_type);
        self.order.push(coord);
        true
    }

    /// Re-types an existing room. Unknown coordinates are ignored.
    pub fn set_type(&mut self, coord: GridCoord, room_type: RoomType) -> bool {
        match self.types.get_mut(&coord) {
            Some(slot) => {
                *slot = room_type;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, coord: GridCoord) -> Option<RoomType> {
        self.types.get(&coord).copied()
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.types.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn coords(&self) -> &[GridCoord] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, RoomType)> + '_ {
        self.order.iter().map(|coord| (*coord, self.types[coord]))
    }

    pub fn count_of(&self, room_type: RoomType) -> usize {
        self.types.values().filter(|ty| **ty == room_type).count()
    }

    pub fn first_of(&self, room_type: RoomType) -> Option<GridCoord> {
        self.iter().find(|(_, ty)| *ty == room_type).map(|(coord, _)| coord)
    }

    pub fn neighbor_count(&self, coord: GridCoord) -> usize {
        coord.neighbors().iter().filter(|neighbor| self.contains(**neighbor)).count()
    }

    /// Number of undirected adjacent pairs.
    pub fn edge_count(&self) -> usize {
        self.order.iter().map(|coord| self.neighbor_count(*coord)).sum::<usize>() / 2
    }

    /// Every room reachable from the origin through 4-adjacent rooms.
    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        if !self.contains(GridCoord::ORIGIN) {
            return false;
        }
        let mut seen = HashSet::from([GridCoord::ORIGIN]);
        let mut queue = VecDeque::from([GridCoord::ORIGIN]);
        while let Some(coord) = queue.pop_front() {
            for neighbor in coord.neighbors() {
                if self.contains(neighbor) && seen.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        seen.len() == self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_insert_is_rejected_and_keeps_first_type() {
        let mut graph = RoomGraph::with_start();
        assert!(!graph.insert(GridCoord::ORIGIN, RoomType::Normal));
        assert_eq!(graph.get(GridCoord::ORIGIN), Some(RoomType::Start));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut graph = RoomGraph::with_start();
        graph.insert(GridCoord::new(0, -1), RoomType::Normal);
        graph.insert(GridCoord::new(1, -1), RoomType::Normal);
        let coords: Vec<GridCoord> = graph.iter().map(|(coord, _)| coord).collect();
        assert_eq!(
            coords,
            vec![GridCoord::ORIGIN, GridCoord::new(0, -1), GridCoord::new(1, -1)]
        );
    }

    #[test]
    fn detached_room_breaks_connectivity() {
        let mut graph = RoomGraph::with_start();
        graph.insert(GridCoord::new(1, 0), RoomType::Normal);
        assert!(graph.is_connected());
        graph.insert(GridCoord::new(5, 5), RoomType::Normal);
        assert!(!graph.is_connected());
    }

    #[test]
    fn edge_count_counts_each_pair_once() {
        let mut graph = RoomGraph::with_start();
        graph.insert(GridCoord::new(1, 0), RoomType::Normal);
        graph.insert(GridCoord::new(1, 1), RoomType::Normal);
        graph.insert(GridCoord::new(0, 1), RoomType::Normal);
        assert_eq!(graph.edge_count(), 4);
    }
}
