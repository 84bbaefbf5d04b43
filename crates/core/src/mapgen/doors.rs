//! Door derivation from room adjacency.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Direction, GridCoord};

use super::graph::RoomGraph;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorConfiguration {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl DoorConfiguration {
    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|direction| self.has(*direction))
    }

    pub fn count(&self) -> usize {
        self.open_directions().count()
    }
}

pub fn doors_for(graph: &RoomGraph, coord: GridCoord) -> DoorConfiguration {
    let open = |direction| graph.contains(coord.step(direction));
    DoorConfiguration {
        north: open(Direction::North),
        south: open(Direction::South),
        east: open(Direction::East),
        west: open(Direction::West),
    }
}

pub fn wire_doors(graph: &RoomGraph) -> BTreeMap<GridCoord, DoorConfiguration> {
    graph.coords().iter().map(|coord| (*coord, doors_for(graph, *coord))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomType;

    fn t_shape() -> RoomGraph {
        let mut graph = RoomGraph::with_start();
        graph.insert(GridCoord::new(1, 0), RoomType::Normal);
        graph.insert(GridCoord::new(-1, 0), RoomType::Normal);
        graph.insert(GridCoord::new(0, 1), RoomType::Normal);
        graph
    }

    #[test]
    fn doors_open_toward_existing_neighbors_only() {
        let doors = wire_doors(&t_shape());
        assert_eq!(
            doors[&GridCoord::ORIGIN],
            DoorConfiguration { north: true, south: false, east: true, west: true }
        );
        assert_eq!(
            doors[&GridCoord::new(0, 1)],
            DoorConfiguration { north: false, south: true, east: false, west: false }
        );
    }

    #[test]
    fn wiring_twice_gives_identical_output() {
        let graph = t_shape();
        assert_eq!(wire_doors(&graph), wire_doors(&graph));
    }

    #[test]
    fn open_doors_are_mirrored_by_the_neighbor() {
        let graph = t_shape();
        let doors = wire_doors(&graph);
        for (coord, config) in &doors {
            for direction in config.open_directions() {
                let neighbor = coord.step(direction);
                assert!(doors[&neighbor].has(direction.opposite()));
            }
        }
    }
}
