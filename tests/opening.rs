mod common;

use common::*;
use itertools::Itertools;
use terran_foreman::simulation::*;
use terran_foreman::*;

const OPENING_TICKS: u32 = 3000;

#[test]
fn standard_opening_completes_without_overbuilding() {
    let mut world = SimWorldBuilder::standard().build();
    let mut supervisor = supervisor();
    let plan = BuildPlan::standard_opening();

    let reports = run(&plan, &mut supervisor, &mut world, OPENING_TICKS);

    assert_eq!(plan.active_goal(&world), None, "opening stalled at tick {}", world.tick());
    assert!(reports.iter().all(|report| !report.recovery));

    for report in reports.iter() {
        assert!(report.built.iter().all_unique(), "more than one command for a kind in tick {}: {:?}", report.iteration, report.built);
    }

    assert_eq!(world.count_of(UnitType::command_centers()), 2);
    assert_eq!(world.count_of(&[UnitType::OrbitalCommand]), 2);
    assert_eq!(world.count_of(&[UnitType::Barracks]), 5);
    assert_eq!(world.count_of(&[UnitType::Factory]), 3);
    assert_eq!(world.count_of(&[UnitType::Starport]), 1);
    assert_eq!(world.count_of(&[UnitType::Refinery]), 4);
}

#[test]
fn estimates_settle_on_observed_counts() {
    let mut world = SimWorldBuilder::standard().build();
    let mut supervisor = supervisor();
    let plan = BuildPlan::standard_opening();

    run(&plan, &mut supervisor, &mut world, OPENING_TICKS);

    // One more pass so every builder sees the finished world.
    terran_foreman::tick(&plan, &mut supervisor, &mut world);

    for builder in supervisor.builders() {
        let unit_type = builder.unit_type();

        if world.already_pending(unit_type) > 0 {
            continue;
        }

        assert_eq!(builder.pending_total(), 0, "{}", builder.describe_state());
        assert_eq!(builder.known_total(), world.count_of(unit_type.counted_as()), "{}", builder.describe_state());
    }
}

#[test]
fn opening_recovers_from_losing_the_main() {
    let mut world = SimWorldBuilder::standard().build();
    let mut supervisor = supervisor();
    let plan = BuildPlan::standard_opening();

    run(&plan, &mut supervisor, &mut world, 200);

    world.cancel_orders();
    world.destroy_all(UnitType::command_centers());
    world.set_resources(400, 0);

    let report = terran_foreman::tick(&plan, &mut supervisor, &mut world);

    assert!(report.recovery);
    assert_eq!(report.built, vec![UnitType::CommandCenter]);
    assert_eq!(
        world.commands().last(),
        Some(&SimCommand::FoundBase {
            position: world.start_location()
        })
    );

    world.step();
    run(&plan, &mut supervisor, &mut world, OPENING_TICKS);

    assert!(world.count_of(UnitType::command_centers()) >= 1);
    assert_eq!(plan.active_goal(&world), None);
}
