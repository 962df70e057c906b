use crate::config::ConfigError;
use crate::construction::constructionsystem::*;
use crate::unittype::*;
use crate::world::*;
use log::*;
use serde::{Deserialize, Serialize};

/// Desired running total of one unit type at a point in the plan.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildGoal {
    unit_type: UnitType,
    cumulative_target: u32,
}

impl BuildGoal {
    pub fn new(unit_type: UnitType, cumulative_target: u32) -> BuildGoal {
        BuildGoal {
            unit_type,
            cumulative_target,
        }
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn cumulative_target(&self) -> u32 {
        self.cumulative_target
    }

    pub fn is_complete<W: WorldQuery + ?Sized>(&self, game: &W) -> bool {
        game.count_of(self.unit_type.counted_as()) >= self.cumulative_target
    }
}

/// Authored form of a plan entry: how many more of a unit type to add.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub unit_type: UnitType,
    pub increment: u32,
}

/// Ordered build goals, highest priority first. Only the first unmet goal is
/// pushed to the builders each tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildPlan {
    goals: Vec<BuildGoal>,
}

impl BuildPlan {
    pub fn new() -> BuildPlan {
        BuildPlan::default()
    }

    /// Appends a goal for `increment` more of `unit_type` on top of the
    /// highest target any earlier goal of that type asked for. Returns the
    /// new cumulative target.
    ///
    /// Only types with a builder are accepted; a goal nothing can build
    /// would block every goal after it.
    pub fn add_goal(&mut self, unit_type: UnitType, increment: u32) -> Result<u32, ConfigError> {
        if !unit_type.is_constructible() {
            return Err(ConfigError::NotConstructible(unit_type));
        }

        Ok(self.push_goal(unit_type, increment))
    }

    fn push_goal(&mut self, unit_type: UnitType, increment: u32) -> u32 {
        let cumulative_target = self.final_target(unit_type) + increment;

        self.goals.push(BuildGoal::new(unit_type, cumulative_target));

        cumulative_target
    }

    pub fn from_steps<I: IntoIterator<Item = PlanStep>>(steps: I) -> Result<BuildPlan, ConfigError> {
        let mut plan = BuildPlan::new();

        for step in steps {
            plan.add_goal(step.unit_type, step.increment)?;
        }

        Ok(plan)
    }

    pub fn goals(&self) -> &[BuildGoal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Highest target the plan ever asks for this unit type.
    pub fn final_target(&self, unit_type: UnitType) -> u32 {
        self.goals
            .iter()
            .filter(|goal| goal.unit_type == unit_type)
            .map(|goal| goal.cumulative_target)
            .max()
            .unwrap_or(0)
    }

    pub fn active_goal<W: WorldQuery + ?Sized>(&self, game: &W) -> Option<&BuildGoal> {
        self.goals.iter().find(|goal| !goal.is_complete(game))
    }

    /// Pushes the first unmet goal into its builder. When every goal is met
    /// the builders keep whatever targets they already had.
    pub fn run<W: WorldQuery + ?Sized>(&self, game: &W, supervisor: &mut ConstructionSupervisor) -> Option<BuildGoal> {
        let goal = *self.active_goal(game)?;

        match supervisor.set_build_target(goal.unit_type, goal.cumulative_target) {
            Ok(()) => trace!("[BuildPlan] Active goal: {}({})", goal.unit_type, goal.cumulative_target),
            Err(err) => warn!("[BuildPlan] Unable to activate goal: {}", err),
        }

        Some(goal)
    }

    pub fn from_json_str(data: &str) -> Result<BuildPlan, ConfigError> {
        let steps: Vec<PlanStep> = serde_json::from_str(data)?;

        BuildPlan::from_steps(steps)
    }

    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<BuildPlan, ConfigError> {
        let data = std::fs::read_to_string(path)?;

        BuildPlan::from_json_str(&data)
    }

    /// Reaper expand into a factory/starport opening, followed by a
    /// barracks-heavy follow-up.
    pub fn standard_opening() -> BuildPlan {
        let steps = [
            (UnitType::CommandCenter, 1),
            (UnitType::Barracks, 1),
            (UnitType::Refinery, 1),
            (UnitType::OrbitalCommand, 1),
            (UnitType::CommandCenter, 1),
            (UnitType::Factory, 1),
            (UnitType::Refinery, 1),
            (UnitType::Starport, 1),
            (UnitType::OrbitalCommand, 1),
            (UnitType::Factory, 1),
            (UnitType::Barracks, 2),
            (UnitType::Refinery, 2),
            (UnitType::Factory, 1),
            (UnitType::Barracks, 2),
        ];

        let mut plan = BuildPlan::new();

        for &(unit_type, increment) in steps.iter() {
            plan.push_goal(unit_type, increment);
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn goals_accumulate_per_unit_type() {
        let mut plan = BuildPlan::new();

        assert_eq!(plan.add_goal(UnitType::Barracks, 1).unwrap(), 1);
        assert_eq!(plan.add_goal(UnitType::Factory, 1).unwrap(), 1);
        assert_eq!(plan.add_goal(UnitType::Barracks, 2).unwrap(), 3);
        assert_eq!(plan.add_goal(UnitType::Barracks, 2).unwrap(), 5);

        assert_eq!(plan.len(), 4);
        assert_eq!(plan.final_target(UnitType::Barracks), 5);
        assert_eq!(plan.final_target(UnitType::Starport), 0);
    }

    #[test]
    fn merged_target_never_regresses() {
        let mut plan = BuildPlan::new();

        plan.add_goal(UnitType::Refinery, 3).unwrap();
        let merged = plan.add_goal(UnitType::Refinery, 2).unwrap();

        assert_eq!(merged, 5);
        assert_eq!(plan.goals()[1], BuildGoal::new(UnitType::Refinery, 5));
    }

    #[test]
    fn standard_opening_targets() {
        let plan = BuildPlan::standard_opening();

        assert_eq!(plan.len(), 14);
        assert_eq!(plan.goals()[0], BuildGoal::new(UnitType::CommandCenter, 1));
        assert_eq!(plan.goals()[4], BuildGoal::new(UnitType::CommandCenter, 2));
        assert_eq!(plan.final_target(UnitType::Barracks), 5);
        assert_eq!(plan.final_target(UnitType::Refinery), 4);
        assert_eq!(plan.final_target(UnitType::Factory), 3);
        assert_eq!(plan.final_target(UnitType::OrbitalCommand), 2);
    }

    #[test]
    fn plan_from_json_steps() {
        let plan = BuildPlan::from_json_str(
            r#"[
                { "unit_type": "CommandCenter", "increment": 1 },
                { "unit_type": "Barracks", "increment": 2 },
                { "unit_type": "CommandCenter", "increment": 1 }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            plan.goals(),
            &[
                BuildGoal::new(UnitType::CommandCenter, 1),
                BuildGoal::new(UnitType::Barracks, 2),
                BuildGoal::new(UnitType::CommandCenter, 2),
            ]
        );
    }

    #[test]
    fn goal_without_builder_is_rejected() {
        let mut plan = BuildPlan::new();

        assert!(matches!(
            plan.add_goal(UnitType::SupplyDepotLowered, 1),
            Err(ConfigError::NotConstructible(UnitType::SupplyDepotLowered))
        ));
        assert!(plan.is_empty());
    }

    #[test]
    fn standard_opening_only_uses_constructible_types() {
        assert!(BuildPlan::standard_opening().goals().iter().all(|goal| goal.unit_type().is_constructible()));
    }

    #[test]
    fn plan_with_unknown_unit_type_fails() {
        assert!(BuildPlan::from_json_str(r#"[{ "unit_type": "Hatchery", "increment": 1 }]"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_targets_are_monotonic_per_unit_type(
            steps in proptest::collection::vec((0..4usize, 0..5u32), 0..40)
        ) {
            let unit_types = [UnitType::Barracks, UnitType::Factory, UnitType::Refinery, UnitType::CommandCenter];
            let mut plan = BuildPlan::new();

            for (index, increment) in steps {
                let unit_type = unit_types[index];
                let before = plan.final_target(unit_type);
                let after = plan.add_goal(unit_type, increment).unwrap();

                prop_assert_eq!(after, before + increment);
                prop_assert_eq!(plan.final_target(unit_type), after);
            }
        }
    }
}
