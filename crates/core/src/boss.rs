//! Boss combat: a phase-tracking health pool plus a cooperative attack routine.
//! The routine never touches the world directly. It returns commands that the
//! arena applies, so cancelling it is enough to stop every side effect.

mod health;
mod routine;

pub use health::{BossDamageReport, BossHealth};
pub use routine::{BossCommand, BossRoutine, MAX_STEPS_PER_ADVANCE, RoutineContext, RoutineStep};
