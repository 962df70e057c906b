#![allow(dead_code)]

use terran_foreman::simulation::*;
use terran_foreman::*;

pub const DEPOT_SPOT: Point2 = Point2::new(45.0, 45.0);
pub const BARRACKS_SPOT: Point2 = Point2::new(34.0, 26.0);
pub const FACTORY_SPOT: Point2 = Point2::new(26.0, 34.0);

pub fn supervisor() -> ConstructionSupervisor {
    ConstructionSupervisor::new(ForemanConfig::default())
}

/// Standard start with plenty of money and one finished depot, so nothing is
/// built unless a quota asks for it.
pub fn settled_world() -> SimWorldBuilder {
    SimWorldBuilder::standard()
        .resources(5000, 5000)
        .with_unit(UnitType::SupplyDepot, DEPOT_SPOT, true)
}

pub fn step_world(world: &mut SimWorld, ticks: u32) {
    for _ in 0..ticks {
        world.step();
    }
}

/// Ticks construction and then the world, `ticks` times.
pub fn run(plan: &BuildPlan, supervisor: &mut ConstructionSupervisor, world: &mut SimWorld, ticks: u32) -> Vec<ConstructionReport> {
    let mut reports = Vec::new();

    for _ in 0..ticks {
        reports.push(terran_foreman::tick(plan, supervisor, world));
        world.step();
    }

    reports
}

pub fn counts(supervisor: &ConstructionSupervisor, unit_type: UnitType) -> (u32, u32) {
    let builder = supervisor.builder(unit_type).expect("builder registered");

    (builder.known_total(), builder.pending_total())
}
