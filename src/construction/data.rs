use super::barracks::*;
use super::builder::*;
use super::commandcenter::*;
use super::factory::*;
use super::orbitalcommand::*;
use super::refinery::*;
use super::supplydepot::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BuilderData {
    CommandCenter(CommandCenterBuilder),
    SupplyDepot(SupplyDepotBuilder),
    Barracks(BarracksBuilder),
    Factory(AnchoredProductionBuilder),
    Starport(AnchoredProductionBuilder),
    Refinery(RefineryBuilder),
    OrbitalCommand(OrbitalCommandBuilder),
}

impl BuilderData {
    pub fn as_builder(&self) -> &dyn StructureBuilder {
        match self {
            BuilderData::CommandCenter(data) => data,
            BuilderData::SupplyDepot(data) => data,
            BuilderData::Barracks(data) => data,
            BuilderData::Factory(data) => data,
            BuilderData::Starport(data) => data,
            BuilderData::Refinery(data) => data,
            BuilderData::OrbitalCommand(data) => data,
        }
    }

    pub fn as_builder_mut(&mut self) -> &mut dyn StructureBuilder {
        match self {
            BuilderData::CommandCenter(data) => data,
            BuilderData::SupplyDepot(data) => data,
            BuilderData::Barracks(data) => data,
            BuilderData::Factory(data) => data,
            BuilderData::Starport(data) => data,
            BuilderData::Refinery(data) => data,
            BuilderData::OrbitalCommand(data) => data,
        }
    }
}
