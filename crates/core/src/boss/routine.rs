//! Resumable attack cycle: vanish, reappear somewhere else, pick an attack,
//! carry it out, cool down, repeat.
//!
//! The routine stores the next step plus the time left before it may run.
//! `advance` drains that wait by `dt` and executes as many steps as have come
//! due, so a large tick replays the same sequence several small ticks would.
//! The routine remembers where it last reappeared and fires from there, so
//! its output does not depend on when the host applies a `Teleport`.

use rand_chacha::ChaCha8Rng;

use crate::config::BossConfig;
use crate::rng::{choose, unit_f32};
use crate::types::{BossPhase, ConfigGap, EntityId, GridCoord, Vec2};

/// Upper bound on steps run by one `advance`, so zero-length waits cannot spin.
pub const MAX_STEPS_PER_ADVANCE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutineStep {
    Vanish,
    Reappear,
    ChooseAttack,
    Volley { fired: u32 },
    Summon,
    Cooldown,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BossCommand {
    Teleport { to: Vec2 },
    /// `age` is how long before the end of the tick the shot came due.
    Fire { origin: Vec2, direction: Vec2, rotation_deg: f32, age: f32 },
    Summon { at: Vec<Vec2> },
    Gap(ConfigGap),
}

pub struct RoutineContext<'a> {
    pub boss: EntityId,
    pub room: GridCoord,
    pub phase: BossPhase,
    pub boss_pos: Vec2,
    pub player_pos: Vec2,
    pub teleport_points: &'a [Vec2],
    pub minion_spawn_points: &'a [Vec2],
    pub config: &'a BossConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BossRoutine {
    next: RoutineStep,
    wait: f32,
    cancelled: bool,
    /// Last teleport destination; the host position stands in until then.
    position: Option<Vec2>,
}

impl Default for BossRoutine {
    fn default() -> Self {
        Self::new()
    }
}

impl BossRoutine {
    pub fn new() -> Self {
        Self { next: RoutineStep::Vanish, wait: 0.0, cancelled: false, position: None }
    }

    pub fn next_step(&self) -> RoutineStep {
        self.next
    }

    pub fn remaining_wait(&self) -> f32 {
        self.wait.max(0.0)
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn advance(
        &mut self,
        dt: f32,
        ctx: &RoutineContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<BossCommand> {
        let mut commands = Vec::new();
        if ctx.phase == BossPhase::Defeated {
            self.cancelled = true;
        }
        if self.cancelled {
            return commands;
        }

        self.wait -= dt.max(0.0);
        let mut steps = 0;
        while self.wait <= 0.0 && steps < MAX_STEPS_PER_ADVANCE {
            steps += 1;
            let overdue = -self.wait;
            match self.next {
                RoutineStep::Vanish => {
                    self.next = RoutineStep::Reappear;
                    self.wait += ctx.config.teleport_pause;
                }
                RoutineStep::Reappear => {
                    match choose(rng, ctx.teleport_points) {
                        Some(point) => {
                            self.position = Some(*point);
                            commands.push(BossCommand::Teleport { to: *point });
                        }
                        None => commands.push(BossCommand::Gap(ConfigGap::NoTeleportPoints { room: ctx.room })),
                    }
                    self.next = RoutineStep::ChooseAttack;
                    self.wait += ctx.config.teleport_pause;
                }
                RoutineStep::ChooseAttack => {
                    let volley = match ctx.phase {
                        BossPhase::Phase1 => true,
                        BossPhase::Phase2 => unit_f32(rng) < ctx.config.phase2_volley_probability,
                        BossPhase::Defeated => false,
                    };
                    self.next = if volley { RoutineStep::Volley { fired: 0 } } else { RoutineStep::Summon };
                }
                RoutineStep::Volley { fired } => {
                    if ctx.config.projectile_prefab.is_none() {
                        commands.push(BossCommand::Gap(ConfigGap::NoProjectilePrefab { boss: ctx.boss }));
                        self.next = RoutineStep::Cooldown;
                        continue;
                    }
                    if fired >= ctx.config.projectiles_per_volley {
                        self.next = RoutineStep::Cooldown;
                        continue;
                    }
                    let origin = self.position.unwrap_or(ctx.boss_pos);
                    let direction = (ctx.player_pos - origin).normalized();
                    commands.push(BossCommand::Fire {
                        origin,
                        direction,
                        rotation_deg: direction.angle_degrees(),
                        age: overdue,
                    });
                    self.next = RoutineStep::Volley { fired: fired + 1 };
                    self.wait += ctx.config.time_between_projectiles;
                }
                RoutineStep::Summon => {
                    self.next = RoutineStep::Cooldown;
                    if ctx.config.minion_prefab.is_none() {
                        commands.push(BossCommand::Gap(ConfigGap::NoMinionPrefab { boss: ctx.boss }));
                        continue;
                    }
                    if ctx.minion_spawn_points.is_empty() {
                        commands.push(BossCommand::Gap(ConfigGap::NoMinionSpawnPoints { boss: ctx.boss }));
                        continue;
                    }
                    let at = (0..ctx.config.minions_to_spawn)
                        .filter_map(|_| choose(rng, ctx.minion_spawn_points).copied())
                        .collect();
                    commands.push(BossCommand::Summon { at });
                    self.wait += ctx.config.summon_recovery;
                }
                RoutineStep::Cooldown => {
                    self.next = RoutineStep::Vanish;
                    self.wait += ctx.config.attack_cycle_cooldown;
                }
            }
        }
        commands
    }
}
