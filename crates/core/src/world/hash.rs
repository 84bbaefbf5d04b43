//! Stable snapshot hashing for deterministic verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl World {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.generation);
        hasher.write_u64(self.tick);
        hasher.write_u64(self.arena.now.to_bits());
        hasher.write(&self.map.canonical_bytes());

        for (coord, room) in &self.rooms {
            hasher.write_i32(coord.x);
            hasher.write_i32(coord.y);
            hasher.write_u8(match room.state() {
                RoomState::Idle => 0,
                RoomState::Active => 1,
                RoomState::Cleared => 2,
            });
            hasher.write_u8(u8::from(room.doors_locked()));
            hasher.write_u8(u8::from(room.player_entered()));
            hasher.write_usize(room.active_enemies().len());
        }

        hasher.write_usize(self.arena.entities.len());
        for entity in self.arena.entities.values() {
            hasher.write(entity.prefab.as_bytes());
            hasher.write_u32(entity.pos.x.to_bits());
            hasher.write_u32(entity.pos.y.to_bits());
            match &entity.kind {
                EntityKind::Enemy { health, .. } => {
                    hasher.write_u8(0);
                    hasher.write_i32(health.current());
                }
                EntityKind::Boss { brain, .. } => {
                    hasher.write_u8(1);
                    hasher.write_i32(brain.health.health().current());
                    hasher.write_u8(match brain.health.phase() {
                        BossPhase::Phase1 => 0,
                        BossPhase::Phase2 => 1,
                        BossPhase::Defeated => 2,
                    });
                }
                EntityKind::Projectile { .. } => hasher.write_u8(2),
                EntityKind::Loot { .. } => hasher.write_u8(3),
            }
        }

        hasher.write_u32(self.player.pos.x.to_bits());
        hasher.write_u32(self.player.pos.y.to_bits());
        hasher.write_i32(self.player.health.health().current());
        hasher.write_usize(self.player.elements.elements().len());
        for element in self.player.elements.elements() {
            hasher.write_u8(*element as u8);
        }
        hasher.write_u32(self.score.score());
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(RunOutcome::Victory) => 1,
            Some(RunOutcome::Defeat) => 2,
        });
        hasher.finish()
    }
}
