pub mod boss;
pub mod config;
pub mod elements;
pub mod health;
pub mod host;
pub mod journal;
pub mod journal_file;
pub mod mapgen;
pub mod replay;
pub mod rng;
pub mod room;
pub mod score;
pub mod types;
pub mod world;

#[cfg(test)]
mod test_support;

pub use boss::{BossCommand, BossHealth, BossRoutine};
pub use config::{ConfigError, DungeonConfig};
pub use elements::{ElementInventory, Pickup};
pub use journal::{EventJournal, EventRecord, RecordedRun};
pub use mapgen::{DoorConfiguration, GeneratedMap, RoomGraph, generate_map};
pub use replay::*;
pub use room::{RoomController, RoomState};
pub use score::ScoreBoard;
pub use types::*;
pub use world::{World, WorldEvent};
