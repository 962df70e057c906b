use super::builder::*;
use crate::unittype::*;
use crate::world::*;
use serde::{Deserialize, Serialize};

/// Builds one production kind next to the newest structure of the kind it
/// depends on. Factories grow off barracks, starports off factories.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnchoredProductionBuilder {
    unit_type: UnitType,
    anchor: UnitType,
    state: BuilderState,
}

impl AnchoredProductionBuilder {
    pub fn factory() -> AnchoredProductionBuilder {
        AnchoredProductionBuilder::new(UnitType::Factory, UnitType::Barracks)
    }

    pub fn starport() -> AnchoredProductionBuilder {
        AnchoredProductionBuilder::new(UnitType::Starport, UnitType::Factory)
    }

    fn new(unit_type: UnitType, anchor: UnitType) -> AnchoredProductionBuilder {
        AnchoredProductionBuilder {
            unit_type,
            anchor,
            state: BuilderState::default(),
        }
    }

    pub fn next_location(&self, game: &dyn Game) -> Option<Point2> {
        game.units(self.anchor).last().map(|unit| unit.position)
    }
}

impl BuilderStateAccess for AnchoredProductionBuilder {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }
}

impl StructureBuilder for AnchoredProductionBuilder {
    fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    fn should_build(&self, system_data: &BuilderExecutionData) -> bool {
        let game = system_data.world();

        game.can_afford(self.unit_type) && self.state.quota_unmet() && game.count_of(&[self.anchor]) > 0
    }

    fn build_single(&mut self, system_data: &mut BuilderExecutionData) -> Result<(), IssueError> {
        let location = self
            .next_location(system_data.world())
            .ok_or(IssueError::NoPlacement(self.unit_type))?;

        system_data.game.build(self.unit_type, location)
    }
}
