use super::builder::*;
use crate::unittype::*;
use crate::world::*;
use serde::{Deserialize, Serialize};

/// Upgrades idle, finished command centers in place once a barracks is up.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OrbitalCommandBuilder {
    state: BuilderState,
}

impl OrbitalCommandBuilder {
    pub fn new() -> OrbitalCommandBuilder {
        OrbitalCommandBuilder::default()
    }

    fn idle_command_centers(game: &dyn Game) -> Vec<Unit> {
        game.units(UnitType::CommandCenter)
            .into_iter()
            .filter(|unit| unit.is_ready && unit.is_idle)
            .collect()
    }
}

impl BuilderStateAccess for OrbitalCommandBuilder {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }
}

impl StructureBuilder for OrbitalCommandBuilder {
    fn unit_type(&self) -> UnitType {
        UnitType::OrbitalCommand
    }

    fn should_build(&self, system_data: &BuilderExecutionData) -> bool {
        let game = system_data.world();

        game.can_afford(self.unit_type())
            && self.state.quota_unmet()
            && game.can_afford_ability(AbilityId::UpgradeToOrbital)
            && !Self::idle_command_centers(game).is_empty()
            && !game.ready_of(&[UnitType::Barracks]).is_empty()
    }

    fn build_single(&mut self, system_data: &mut BuilderExecutionData) -> Result<(), IssueError> {
        let command_center = Self::idle_command_centers(system_data.world())
            .into_iter()
            .next()
            .ok_or(IssueError::NoTarget(UnitType::CommandCenter))?;

        system_data.game.use_ability(command_center.tag, AbilityId::UpgradeToOrbital)
    }
}
