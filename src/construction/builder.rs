use super::tracker::*;
use crate::config::*;
use crate::unittype::*;
use crate::world::*;
use log::*;
use serde::{Deserialize, Serialize};

pub struct BuilderExecutionData<'a> {
    pub game: &'a mut dyn Game,
    pub config: &'a ForemanConfig,
    pub iteration: u64,
}

impl<'a> BuilderExecutionData<'a> {
    pub fn world(&self) -> &dyn Game {
        &*self.game
    }
}

/// Estimate plus quota owned by every builder.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderState {
    pub(crate) tracker: BuildTracker,
    pub(crate) target: u32,
}

impl BuilderState {
    pub fn with_target(target: u32) -> BuilderState {
        BuilderState {
            tracker: BuildTracker::new(),
            target,
        }
    }

    pub fn quota_unmet(&self) -> bool {
        self.target > self.tracker.estimated_total()
    }
}

pub(crate) mod private {
    use super::BuilderState;

    /// Mutable access to a builder's counters, reachable only inside the crate.
    pub trait BuilderStateAccess {
        fn state(&self) -> &BuilderState;

        fn state_mut(&mut self) -> &mut BuilderState;
    }
}

pub(crate) use private::BuilderStateAccess;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildResult {
    Idle,
    Built,
    Failed(IssueError),
}

/// Per-kind construction policy. The reconcile-then-issue step in
/// `run_builder` is shared; kinds only decide eligibility and what a single
/// build means.
///
/// Counters are read through the accessors; only the crate can change them.
///
/// ```compile_fail
/// use terran_foreman::*;
///
/// fn reset(builder: &mut dyn StructureBuilder) {
///     builder.state_mut();
/// }
/// ```
pub trait StructureBuilder: private::BuilderStateAccess {
    fn unit_type(&self) -> UnitType;

    fn target(&self) -> u32 {
        self.state().target
    }

    fn set_target(&mut self, target: u32) {
        self.state_mut().target = target;
    }

    fn known_total(&self) -> u32 {
        self.state().tracker.known_total()
    }

    fn pending_total(&self) -> u32 {
        self.state().tracker.pending_total()
    }

    fn estimated_total(&self) -> u32 {
        self.state().tracker.estimated_total()
    }

    fn calculate_known_total(&self, game: &dyn Game) -> u32 {
        game.count_of(self.unit_type().counted_as())
    }

    /// Called when nothing of this kind is outstanding and the estimate is
    /// about to be replaced by the observed count.
    fn on_resync(&mut self) {}

    fn should_build(&self, system_data: &BuilderExecutionData) -> bool {
        system_data.world().can_afford(self.unit_type()) && self.state().quota_unmet()
    }

    fn build_single(&mut self, system_data: &mut BuilderExecutionData) -> Result<(), IssueError>;

    fn describe_state(&self) -> String {
        format!(
            "{} - Known: {} Pending: {} Target: {}",
            self.unit_type(),
            self.known_total(),
            self.pending_total(),
            self.target()
        )
    }

    /// Reconciles the estimate against the world, then issues at most one
    /// command.
    fn run_builder(&mut self, system_data: &mut BuilderExecutionData) -> BuildResult {
        let observed = self.calculate_known_total(system_data.world());
        let outstanding = system_data.world().already_pending(self.unit_type());

        if outstanding == 0 {
            self.on_resync();
        }

        self.state_mut().tracker.reconcile(observed, outstanding);

        if !self.should_build(system_data) {
            return BuildResult::Idle;
        }

        match self.build_single(system_data) {
            Ok(()) => {
                self.state_mut().tracker.mark_pending();

                info!(
                    "[Construction] {} {}/{} {}({})",
                    system_data.iteration,
                    system_data.world().supply_used(),
                    system_data.world().supply_cap(),
                    self.unit_type(),
                    self.estimated_total()
                );

                BuildResult::Built
            }
            Err(err) => {
                debug!(
                    "[Construction] {} {}/{} Failed to build {}: {}",
                    system_data.iteration,
                    system_data.world().supply_used(),
                    system_data.world().supply_cap(),
                    self.unit_type(),
                    err
                );

                BuildResult::Failed(err)
            }
        }
    }
}
