//! In-memory event journal and a recorder that fills it while playing.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::DungeonConfig;
use crate::world::{World, WorldEvent};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventJournal {
    pub format_version: u16,
    pub build_id: String,
    pub config_hash: u64,
    pub seed: u64,
    pub records: Vec<EventRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub seq: u64,
    /// World tick at which the event was handled.
    pub tick: u64,
    pub event: WorldEvent,
}

impl EventJournal {
    pub fn new(seed: u64, config: &DungeonConfig) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: "dev".to_string(),
            config_hash: config_hash(config),
            seed,
            records: Vec::new(),
        }
    }

    pub fn append(&mut self, tick: u64, event: WorldEvent) -> u64 {
        let seq = self.records.len() as u64;
        self.records.push(EventRecord { seq, tick, event });
        seq
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Fingerprint of a configuration, stored in journals so a replay can tell
/// it is running against different content.
pub fn config_hash(config: &DungeonConfig) -> u64 {
    serde_json::to_vec(config).map(|bytes| xxh3_64(&bytes)).unwrap_or_default()
}

/// A world plus the journal of every event it has handled.
pub struct RecordedRun {
    world: World,
    journal: EventJournal,
}

impl RecordedRun {
    pub fn new(seed: u64, config: DungeonConfig) -> Self {
        let journal = EventJournal::new(seed, &config);
        Self { world: World::new(seed, config), journal }
    }

    pub fn handle(&mut self, event: WorldEvent) {
        self.journal.append(self.world.current_tick(), event.clone());
        self.world.handle(event);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    pub fn into_parts(self) -> (World, EventJournal) {
        (self.world, self.journal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridCoord;

    #[test]
    fn recorder_numbers_events_and_stamps_ticks() {
        let mut run = RecordedRun::new(4, DungeonConfig::default());
        run.handle(WorldEvent::Tick { dt: 0.1 });
        run.handle(WorldEvent::Tick { dt: 0.1 });
        run.handle(WorldEvent::PlayerEnteredRoom { room: GridCoord::ORIGIN });

        let records = &run.journal().records;
        assert_eq!(records.iter().map(|record| record.seq).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(records.iter().map(|record| record.tick).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(run.world().current_tick(), 2);
    }

    #[test]
    fn json_round_trip_keeps_every_record() {
        let mut journal = EventJournal::new(9, &DungeonConfig::default());
        journal.append(0, WorldEvent::DamagePlayer { amount: 2 });
        journal.append(0, WorldEvent::Tick { dt: 0.25 });
        let text = journal.to_json().unwrap();
        assert_eq!(EventJournal::from_json(&text).unwrap(), journal);
    }

    #[test]
    fn config_hash_tracks_content_changes() {
        let base = DungeonConfig::default();
        let mut changed = base.clone();
        changed.boss.max_health = 600;
        assert_eq!(config_hash(&base), config_hash(&base.clone()));
        assert_ne!(config_hash(&base), config_hash(&changed));
    }
}
