use super::builder::*;
use crate::unittype::*;
use crate::world::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Refineries on the geysers around finished bases.
///
/// The quota is capped by how many geysers the bases can actually reach, so
/// a plan asking for more refineries than there are geysers simply stops.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RefineryBuilder {
    state: BuilderState,
    claimed_geysers: Vec<UnitTag>,
}

impl RefineryBuilder {
    pub fn new() -> RefineryBuilder {
        RefineryBuilder::default()
    }

    /// Geysers within `range` of any ready base, each counted once.
    pub fn reachable_geysers<W: WorldQuery + ?Sized>(game: &W, range: f32) -> Vec<Unit> {
        let bases = game.ready_of(UnitType::command_centers());

        game.vespene_geysers()
            .into_iter()
            .filter(|geyser| bases.iter().any(|base| base.position.distance_to(geyser.position) < range))
            .unique_by(|geyser| geyser.tag)
            .collect()
    }

    fn effective_target(&self, game: &dyn Game, range: f32) -> u32 {
        self.state.target.min(Self::reachable_geysers(game, range).len() as u32)
    }

    fn is_claimed(&self, geyser: &Unit, refineries: &[Unit], radius: f32) -> bool {
        self.claimed_geysers.contains(&geyser.tag)
            || closest_distance(refineries, geyser.position)
                .map(|distance| distance < radius)
                .unwrap_or(false)
    }
}

impl BuilderStateAccess for RefineryBuilder {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }
}

impl StructureBuilder for RefineryBuilder {
    fn unit_type(&self) -> UnitType {
        UnitType::Refinery
    }

    fn on_resync(&mut self) {
        self.claimed_geysers.clear();
    }

    fn should_build(&self, system_data: &BuilderExecutionData) -> bool {
        let game = system_data.world();

        let target = self.effective_target(game, system_data.config.geyser_range);

        game.can_afford(UnitType::Refinery) && target > self.state.tracker.estimated_total()
    }

    fn build_single(&mut self, system_data: &mut BuilderExecutionData) -> Result<(), IssueError> {
        let config = system_data.config;
        let game = system_data.world();

        let bases = game.ready_of(UnitType::command_centers());
        let geysers = game.vespene_geysers();
        let refineries = game.units(UnitType::Refinery);

        let mut missing_worker = false;
        let mut order = None;

        'bases: for base in bases.iter() {
            for geyser in geysers.iter().filter(|geyser| geyser.position.distance_to(base.position) < config.geyser_range) {
                if self.is_claimed(geyser, &refineries, config.refinery_claim_radius) {
                    continue;
                }

                match game.select_build_worker(geyser.position) {
                    Some(worker) => {
                        order = Some((worker, geyser.tag));
                        break 'bases;
                    }
                    None => {
                        missing_worker = true;
                        break;
                    }
                }
            }
        }

        match order {
            Some((worker, geyser)) => {
                system_data.game.build_on(worker, UnitType::Refinery, geyser)?;
                self.claimed_geysers.push(geyser);

                Ok(())
            }
            None if missing_worker => Err(IssueError::NoWorker),
            None => Err(IssueError::NoTarget(UnitType::Refinery)),
        }
    }
}
