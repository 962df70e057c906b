use crate::config::*;
use crate::construction::refinery::RefineryBuilder;
use crate::unittype::*;
use crate::world::*;

/// Workers kept back for construction on top of the harvesters.
const CONSTRUCTION_WORKERS: u32 = 1;
/// Workers budgeted for a command center still being built.
const WORKERS_PER_PENDING_BASE: u32 = 8;
const WORKERS_PER_REFINERY: u32 = 3;
/// Supply consumed before each extra depot may be queued at once.
const SUPPLY_PER_DEPOT_CAPACITY: u32 = 100;
/// Depots (built or pending) wanted before supply pressure is considered.
const WALL_DEPOTS: u32 = 2;

/// Quota heuristics derived from the current world state.
pub struct BuildInfo<'a, W: WorldQuery + ?Sized> {
    game: &'a W,
    config: &'a ForemanConfig,
}

impl<'a, W: WorldQuery + ?Sized> BuildInfo<'a, W> {
    pub fn new(game: &'a W, config: &'a ForemanConfig) -> BuildInfo<'a, W> {
        BuildInfo { game, config }
    }

    pub fn target_workers(&self) -> u32 {
        let harvesters: u32 = self
            .game
            .units_of(UnitType::command_centers())
            .iter()
            .map(|base| base.ideal_harvesters)
            .sum();

        CONSTRUCTION_WORKERS
            + harvesters
            + self.game.already_pending(UnitType::CommandCenter) * WORKERS_PER_PENDING_BASE
            + self.game.count_of(&[UnitType::Refinery]) * WORKERS_PER_REFINERY
    }

    pub fn workers_wanted(&self) -> u32 {
        let existing = self.game.count_of(&[UnitType::Scv]) + self.game.already_pending(UnitType::Scv);

        self.target_workers().saturating_sub(existing)
    }

    /// Number of depots that should be started now.
    pub fn supply_wanted(&self) -> u32 {
        let game = self.game;
        let capacity = game.supply_used() / SUPPLY_PER_DEPOT_CAPACITY + 1;
        let pending_depots = game.already_pending(UnitType::SupplyDepot);

        if game.ready_of(UnitType::command_centers()).is_empty() || game.supply_cap() == game.supply_used() {
            // Save up for a command center instead.
            0
        } else if game.count_of(UnitType::supply_depots()) + pending_depots < WALL_DEPOTS {
            1
        } else if game.supply_left() < self.config.supply_pressure * capacity {
            capacity.saturating_sub(pending_depots)
        } else {
            0
        }
    }

    pub fn refinery_target(&self) -> u32 {
        RefineryBuilder::reachable_geysers(self.game, self.config.geyser_range).len() as u32
    }
}
