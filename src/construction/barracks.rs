use super::builder::*;
use crate::unittype::*;
use crate::world::*;
use serde::{Deserialize, Serialize};

/// Basic production. The first one walls the main ramp, later ones cluster
/// around it. Needs a finished depot first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BarracksBuilder {
    state: BuilderState,
}

impl BarracksBuilder {
    pub fn new() -> BarracksBuilder {
        BarracksBuilder::default()
    }

    pub fn next_location(&self, game: &dyn Game) -> Point2 {
        if self.state.tracker.known_total() > 0 {
            if let Some(barracks) = game.units(UnitType::Barracks).first() {
                return barracks.position;
            }
        }

        game.ramp_barracks_position()
    }
}

impl BuilderStateAccess for BarracksBuilder {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }
}

impl StructureBuilder for BarracksBuilder {
    fn unit_type(&self) -> UnitType {
        UnitType::Barracks
    }

    fn should_build(&self, system_data: &BuilderExecutionData) -> bool {
        let game = system_data.world();

        game.can_afford(self.unit_type()) && self.state.quota_unmet() && !game.ready_of(UnitType::supply_depots()).is_empty()
    }

    fn build_single(&mut self, system_data: &mut BuilderExecutionData) -> Result<(), IssueError> {
        let location = self.next_location(system_data.world());

        system_data.game.build(UnitType::Barracks, location)
    }
}
