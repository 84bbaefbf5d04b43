//! Procedural room-graph generation split into coherent submodules.

pub mod doors;
pub mod graph;
pub mod layout;
pub mod model;
pub mod special;

pub use doors::{DoorConfiguration, wire_doors};
pub use graph::RoomGraph;
pub use layout::{LayoutOutcome, Shortfall, generate_layout};
pub use model::GeneratedMap;
pub use special::{SpecialRooms, assign_special_rooms};

use crate::config::LayoutConfig;
use crate::rng::seeded;

pub struct MapGenerator<'a> {
    seed: u64,
    layout: &'a LayoutConfig,
}

impl<'a> MapGenerator<'a> {
    pub fn new(seed: u64, layout: &'a LayoutConfig) -> Self {
        Self { seed, layout }
    }

    /// Walk, assign special rooms, then wire doors over the final graph.
    pub fn generate(&self) -> GeneratedMap {
        let mut rng = seeded(self.seed);
        let LayoutOutcome { mut graph, shortfall, .. } = generate_layout(
            &mut rng,
            self.layout.target_room_count,
            self.layout.max_attempt_factor,
        );
        let special = assign_special_rooms(&mut graph, &mut rng, self.layout.item_room_fraction);
        let doors = wire_doors(&graph);
        GeneratedMap { seed: self.seed, graph, doors, special, shortfall }
    }
}

pub fn generate_map(seed: u64, layout: &LayoutConfig) -> GeneratedMap {
    MapGenerator::new(seed, layout).generate()
}
