use super::builder::*;
use crate::unittype::*;
use crate::world::*;
use serde::{Deserialize, Serialize};

/// Primary base. Orbital commands still count, and building one means
/// founding a new base at the next free expansion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandCenterBuilder {
    state: BuilderState,
}

impl CommandCenterBuilder {
    pub fn new(target: u32) -> CommandCenterBuilder {
        CommandCenterBuilder {
            state: BuilderState::with_target(target),
        }
    }
}

impl BuilderStateAccess for CommandCenterBuilder {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }
}

impl StructureBuilder for CommandCenterBuilder {
    fn unit_type(&self) -> UnitType {
        UnitType::CommandCenter
    }

    fn build_single(&mut self, system_data: &mut BuilderExecutionData) -> Result<(), IssueError> {
        let location = system_data
            .world()
            .next_expansion()
            .ok_or(IssueError::NoPlacement(UnitType::CommandCenter))?;

        system_data.game.found_base(location)
    }
}
