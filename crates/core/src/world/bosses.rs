//! Drives every bound boss routine and applies the commands it yields.

use super::*;

impl World {
    pub(super) fn advance_bosses(&mut self, dt: f32) {
        let boss_ids: Vec<EntityId> = self
            .arena
            .entities
            .iter()
            .filter(|(_, entity)| entity.boss().is_some())
            .map(|(id, _)| id)
            .collect();

        for id in boss_ids {
            let Some(entity) = self.arena.entities.get_mut(id) else {
                continue;
            };
            // Unbound bosses have no room to fight in.
            let Some(room) = entity.room else {
                continue;
            };
            let EntityKind::Boss { brain, .. } = &mut entity.kind else {
                continue;
            };
            let ctx = RoutineContext {
                boss: id,
                room,
                phase: brain.health.phase(),
                boss_pos: entity.pos,
                player_pos: self.player.pos,
                teleport_points: &brain.teleport_points,
                minion_spawn_points: &brain.minion_spawn_points,
                config: &self.arena.boss_config,
            };
            let commands = brain.routine.advance(dt, &ctx, &mut self.rng);
            for command in commands {
                self.apply_boss_command(id, command, dt);
            }
        }
    }

    fn apply_boss_command(&mut self, boss: EntityId, command: BossCommand, dt: f32) {
        match command {
            BossCommand::Teleport { to } => {
                if let Some(entity) = self.arena.entities.get_mut(boss) {
                    entity.pos = to;
                }
                self.arena.report(LogEvent::BossTeleported { boss, to });
            }
            BossCommand::Fire { origin, rotation_deg, age, .. } => {
                let Some(prefab) = self.config.boss.projectile_prefab.as_deref() else {
                    return;
                };
                if let Some(projectile) = self.arena.spawn(prefab, origin, rotation_deg) {
                    // The projectile pass later this tick moves every bolt by `dt`.
                    self.arena.backdate_projectile(projectile, age, dt);
                    self.arena.report(LogEvent::ProjectileFired { boss, projectile, rotation_deg });
                }
            }
            BossCommand::Summon { at } => {
                let Some(prefab) = self.config.boss.minion_prefab.as_deref() else {
                    return;
                };
                let count = at.iter().filter_map(|point| self.arena.spawn(prefab, *point, 0.0)).count();
                self.arena.report(LogEvent::MinionsSummoned { boss, count });
            }
            BossCommand::Gap(gap) => self.arena.report(LogEvent::ConfigGap(gap)),
        }
    }
}
