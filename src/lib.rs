#![warn(clippy::all)]

//! Construction scheduling for a Terran bot.
//!
//! Every tick a [`BuildPlan`] picks the first goal the world has not reached
//! yet and hands its target to the matching builder. The
//! [`ConstructionSupervisor`] then runs every builder in dependency order;
//! each one reconciles its pending orders against what it can observe and
//! issues at most one new command.

pub mod buildinfo;
pub mod buildqueue;
pub mod config;
pub mod construction;
pub mod logging;
pub mod simulation;
pub mod unittype;
pub mod world;

pub use buildinfo::BuildInfo;
pub use buildqueue::{BuildGoal, BuildPlan, PlanStep};
pub use config::{ConfigError, ForemanConfig};
pub use construction::builder::{BuildResult, StructureBuilder};
pub use construction::constructionsystem::{ConstructionReport, ConstructionSupervisor};
pub use construction::tracker::BuildTracker;
pub use unittype::{AbilityId, UnitType};
pub use world::{CommandSink, Game, IssueError, Point2, Unit, UnitTag, WorldQuery};

/// Runs one full construction step: plan activation, then every builder.
pub fn tick(plan: &BuildPlan, supervisor: &mut ConstructionSupervisor, game: &mut dyn Game) -> ConstructionReport {
    plan.run(&*game, supervisor);

    supervisor.tick(game)
}
