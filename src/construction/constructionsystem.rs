use super::barracks::*;
use super::builder::*;
use super::commandcenter::*;
use super::data::*;
use super::factory::*;
use super::orbitalcommand::*;
use super::refinery::*;
use super::supplydepot::*;
use crate::config::*;
use crate::unittype::*;
use crate::world::*;
use log::*;

/// What happened during one construction tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstructionReport {
    pub iteration: u64,
    /// No command center existed, so only the rebuild was attempted.
    pub recovery: bool,
    /// Unit types whose command was accepted this tick, in issue order.
    pub built: Vec<UnitType>,
    /// Rejected commands, absorbed and retried next tick.
    pub failures: Vec<(UnitType, IssueError)>,
}

impl ConstructionReport {
    fn new(iteration: u64) -> ConstructionReport {
        ConstructionReport {
            iteration,
            ..Default::default()
        }
    }

    pub fn issued(&self) -> usize {
        self.built.len()
    }
}

/// Owns one builder per structure kind and drives them every tick.
pub struct ConstructionSupervisor {
    config: ForemanConfig,
    builders: Vec<BuilderData>,
    iteration: u64,
}

impl ConstructionSupervisor {
    pub fn new(config: ForemanConfig) -> ConstructionSupervisor {
        //
        // Order matters: later kinds depend on earlier ones existing, and
        // earlier kinds get first claim on resources within a tick.
        //

        let builders = vec![
            BuilderData::CommandCenter(CommandCenterBuilder::new(config.command_center_target)),
            BuilderData::SupplyDepot(SupplyDepotBuilder::new()),
            BuilderData::Barracks(BarracksBuilder::new()),
            BuilderData::Factory(AnchoredProductionBuilder::factory()),
            BuilderData::Starport(AnchoredProductionBuilder::starport()),
            BuilderData::Refinery(RefineryBuilder::new()),
            BuilderData::OrbitalCommand(OrbitalCommandBuilder::new()),
        ];

        ConstructionSupervisor {
            config,
            builders,
            iteration: 0,
        }
    }

    /// Builders in tick order.
    pub fn builders(&self) -> impl Iterator<Item = &dyn StructureBuilder> + '_ {
        self.builders.iter().map(|data| data.as_builder())
    }

    pub fn builder(&self, unit_type: UnitType) -> Option<&dyn StructureBuilder> {
        self.builders().find(|builder| builder.unit_type() == unit_type)
    }

    pub fn builder_mut(&mut self, unit_type: UnitType) -> Option<&mut dyn StructureBuilder> {
        self.builders
            .iter_mut()
            .map(|data| data.as_builder_mut())
            .find(|builder| builder.unit_type() == unit_type)
    }

    pub fn set_build_target(&mut self, unit_type: UnitType, target: u32) -> Result<(), String> {
        let builder = self
            .builder_mut(unit_type)
            .ok_or_else(|| format!("No builder for {}", unit_type))?;

        builder.set_target(target);

        Ok(())
    }

    /// Advances construction by one simulation step.
    pub fn tick(&mut self, game: &mut dyn Game) -> ConstructionReport {
        self.iteration += 1;

        let mut report = ConstructionReport::new(self.iteration);

        if game.count_of(UnitType::command_centers()) == 0 {
            report.recovery = true;

            Self::rebuild_command_center(game, &mut report);

            return report;
        }

        let mut system_data = BuilderExecutionData {
            game,
            config: &self.config,
            iteration: self.iteration,
        };

        for data in self.builders.iter_mut() {
            let builder = data.as_builder_mut();

            match builder.run_builder(&mut system_data) {
                BuildResult::Idle => {}
                BuildResult::Built => report.built.push(builder.unit_type()),
                BuildResult::Failed(err) => report.failures.push((builder.unit_type(), err)),
            }

            trace!("[Construction] {}", builder.describe_state());
        }

        report
    }

    fn rebuild_command_center(game: &mut dyn Game, report: &mut ConstructionReport) {
        if game.already_pending(UnitType::CommandCenter) > 0 || !game.can_afford(UnitType::CommandCenter) {
            return;
        }

        let location = game.start_location();

        match game.found_base(location) {
            Ok(()) => {
                warn!("[Recovery] {} No command centers left, rebuilding at start location", report.iteration);

                report.built.push(UnitType::CommandCenter);
            }
            Err(err) => {
                debug!("[Recovery] {} Failed to rebuild command center: {}", report.iteration, err);

                report.failures.push((UnitType::CommandCenter, err));
            }
        }
    }
}
