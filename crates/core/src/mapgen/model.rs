//! Generated map bundle: graph, doors, and generation warnings.

use std::collections::BTreeMap;

use crate::types::{GridCoord, RoomType};

use super::doors::DoorConfiguration;
use super::graph::RoomGraph;
use super::layout::Shortfall;
use super::special::SpecialRooms;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMap {
    pub seed: u64,
    pub graph: RoomGraph,
    pub doors: BTreeMap<GridCoord, DoorConfiguration>,
    pub special: SpecialRooms,
    pub shortfall: Option<Shortfall>,
}

impl GeneratedMap {
    pub fn start(&self) -> GridCoord {
        GridCoord::ORIGIN
    }

    pub fn boss_room(&self) -> Option<GridCoord> {
        self.special.boss
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.graph.len() as u32).to_le_bytes());
        for (coord, room_type) in self.graph.iter() {
            bytes.extend(coord.x.to_le_bytes());
            bytes.extend(coord.y.to_le_bytes());
            bytes.push(match room_type {
                RoomType::Start => 0,
                RoomType::Normal => 1,
                RoomType::Boss => 2,
                RoomType::Item => 3,
                RoomType::Empty => 4,
            });
        }
        for (coord, doors) in &self.doors {
            bytes.extend(coord.x.to_le_bytes());
            bytes.extend(coord.y.to_le_bytes());
            bytes.push(
                u8::from(doors.north)
                    | (u8::from(doors.south) << 1)
                    | (u8::from(doors.east) << 2)
                    | (u8::from(doors.west) << 3),
            );
        }
        bytes
    }
}
