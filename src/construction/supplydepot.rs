use super::builder::*;
use crate::unittype::*;
use crate::world::*;
use serde::{Deserialize, Serialize};

/// Supply depots.
///
/// Unlike the other kinds the quota is a floor, not the only trigger: depots
/// are also built whenever supply runs short. The ramp wall spots are filled
/// first, then depots go next to a base.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SupplyDepotBuilder {
    state: BuilderState,
    ramp_positions: Option<Vec<Point2>>,
    issued_positions: Vec<Point2>,
}

impl SupplyDepotBuilder {
    pub fn new() -> SupplyDepotBuilder {
        SupplyDepotBuilder::default()
    }

    fn ramp_positions(&mut self, game: &dyn Game) -> &[Point2] {
        self.ramp_positions.get_or_insert_with(|| game.ramp_depot_positions())
    }

    /// Depot spots on the ramp not yet covered by a depot or an in-flight order.
    pub fn urgent_positions(&mut self, game: &dyn Game, clearance: f32) -> Vec<Point2> {
        let depots = game.units_of(UnitType::supply_depots());
        let issued = self.issued_positions.clone();

        self.ramp_positions(game)
            .iter()
            .copied()
            .filter(|spot| closest_distance(&depots, *spot).map(|distance| distance > clearance).unwrap_or(true))
            .filter(|spot| issued.iter().all(|position| position.distance_to(*spot) > clearance))
            .collect()
    }

    pub fn next_location(&mut self, system_data: &BuilderExecutionData) -> Option<Point2> {
        let game = system_data.world();
        let config = system_data.config;

        if let Some(spot) = self.urgent_positions(game, config.depot_clearance).into_iter().next() {
            return Some(spot);
        }

        let bases = game.units_of(UnitType::command_centers());

        if bases.is_empty() {
            return None;
        }

        let base = &bases[self.state.tracker.estimated_total() as usize % bases.len()];

        Some(base.position.towards(game.map_center(), config.depot_offset))
    }

    fn supply_pressure(&self, system_data: &BuilderExecutionData) -> bool {
        let game = system_data.world();
        let config = system_data.config;

        game.supply_left() < config.supply_pressure
            || self.state.tracker.known_total() == 0
            || game.supply_cap() > config.eager_depot_supply_cap
    }
}

impl BuilderStateAccess for SupplyDepotBuilder {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }
}

impl StructureBuilder for SupplyDepotBuilder {
    fn unit_type(&self) -> UnitType {
        UnitType::SupplyDepot
    }

    fn on_resync(&mut self) {
        self.issued_positions.clear();
    }

    /// Unlike other kinds, an unmet quota is not required: supply pressure
    /// alone starts a depot, so one may be issued with a target of zero. The
    /// in-progress threshold and the supply ceiling still apply either way.
    fn should_build(&self, system_data: &BuilderExecutionData) -> bool {
        let game = system_data.world();
        let config = system_data.config;
        let supply_cap = game.supply_cap();

        game.can_afford(UnitType::SupplyDepot)
            && (self.state.quota_unmet() || self.supply_pressure(system_data))
            && game.already_pending(UnitType::SupplyDepot) < config.depot_threshold(supply_cap)
            && supply_cap < config.max_supply
    }

    fn build_single(&mut self, system_data: &mut BuilderExecutionData) -> Result<(), IssueError> {
        let location = self.next_location(system_data).ok_or(IssueError::NoPlacement(UnitType::SupplyDepot))?;

        system_data.game.build(UnitType::SupplyDepot, location)?;

        self.issued_positions.push(location);

        Ok(())
    }
}
