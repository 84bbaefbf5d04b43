use crate::config::DungeonConfig;
use crate::journal::{EventJournal, JOURNAL_FORMAT_VERSION, config_hash};
use crate::types::RunOutcome;
use crate::world::World;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    UnsupportedFormat { found: u16 },
    ConfigMismatch { expected: u64, found: u64 },
    OutOfOrder { expected: u64, found: u64 },
    TickMismatch { seq: u64, expected: u64, found: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_tick: u64,
    pub final_snapshot_hash: u64,
    pub outcome: Option<RunOutcome>,
    pub score: u32,
    pub rooms_cleared: usize,
}

impl ReplayResult {
    pub fn of(world: &World) -> Self {
        Self {
            final_tick: world.current_tick(),
            final_snapshot_hash: world.snapshot_hash(),
            outcome: world.outcome(),
            score: world.score(),
            rooms_cleared: world.rooms_cleared(),
        }
    }
}

/// Rebuilds the world from the journal seed and feeds every record back in.
/// Records are checked against the tick they were captured at.
pub fn replay_journal(
    config: &DungeonConfig,
    journal: &EventJournal,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormat { found: journal.format_version });
    }
    let expected_config = config_hash(config);
    if journal.config_hash != expected_config {
        return Err(ReplayError::ConfigMismatch { expected: expected_config, found: journal.config_hash });
    }

    let mut world = World::new(journal.seed, config.clone());
    for (expected_seq, record) in (0_u64..).zip(&journal.records) {
        if record.seq != expected_seq {
            return Err(ReplayError::OutOfOrder { expected: expected_seq, found: record.seq });
        }
        if record.tick != world.current_tick() {
            return Err(ReplayError::TickMismatch {
                seq: record.seq,
                expected: world.current_tick(),
                found: record.tick,
            });
        }
        world.handle(record.event.clone());
    }
    Ok(ReplayResult::of(&world))
}
