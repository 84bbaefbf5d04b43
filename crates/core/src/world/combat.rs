//! Damage, kills and score for enemies, bosses and the player.

use super::*;

/// Short grace period so a defeated enemy stays visible for a moment.
const ENEMY_DESPAWN_DELAY: f32 = 0.1;

impl World {
    /// Damage to unknown, dead, or non-hostile entities is ignored.
    pub(super) fn damage_entity(&mut self, id: EntityId, amount: i32) {
        let Some(entity) = self.arena.entities.get_mut(id) else {
            return;
        };
        let killed = match &mut entity.kind {
            EntityKind::Enemy { health, .. } => health.take_damage(amount) == DamageResult::Killed,
            EntityKind::Boss { brain, .. } => {
                let report = brain.health.take_damage(amount);
                if report.entered_phase2 {
                    self.arena.log.push(LogEvent::BossPhaseChanged { boss: id, phase: BossPhase::Phase2 });
                }
                if report.defeated {
                    brain.routine.cancel();
                    self.arena.log.push(LogEvent::BossPhaseChanged { boss: id, phase: BossPhase::Defeated });
                }
                report.defeated
            }
            EntityKind::Projectile { .. } | EntityKind::Loot { .. } => false,
        };
        if killed {
            self.on_killed(id);
        }
    }

    fn on_killed(&mut self, id: EntityId) {
        let Some(entity) = self.arena.entities.get(id) else {
            return;
        };
        let (points, delay) = match entity.kind {
            EntityKind::Enemy { score, .. } => (score, ENEMY_DESPAWN_DELAY),
            EntityKind::Boss { score, .. } => (score, self.config.boss.death_despawn_delay),
            EntityKind::Projectile { .. } | EntityKind::Loot { .. } => return,
        };
        let room = entity.room;

        self.arena.report(LogEvent::EnemyDefeated { enemy: id, room });
        let total = self.score.add_points(points);
        self.arena.report(LogEvent::PointsAwarded { points, total });
        self.arena.despawn(id, delay);

        if let Some(coord) = room
            && let Some(controller) = self.rooms.get_mut(&coord)
        {
            controller.on_enemy_defeated(id, &mut self.arena, &mut self.rng);
            self.check_victory(coord);
        }
    }

    pub(super) fn damage_player(&mut self, amount: i32) {
        match self.player.health.take_damage(amount, self.arena.now) {
            DamageResult::Ignored => {}
            DamageResult::Wounded { remaining } => {
                self.arena.report(LogEvent::PlayerDamaged { amount, remaining });
            }
            DamageResult::Killed => {
                self.arena.report(LogEvent::PlayerDamaged { amount, remaining: 0 });
                self.arena.report(LogEvent::PlayerDied);
                self.outcome = Some(RunOutcome::Defeat);
            }
        }
    }
}
