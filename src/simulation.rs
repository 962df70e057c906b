//! Deterministic in-memory world used to exercise the construction layer
//! without a game engine.
//!
//! Commands are validated and paid for when issued. A structure order first
//! spends `travel_ticks` with its worker walking to the site, then appears as
//! an unfinished unit for its build time, then becomes ready. Until it is
//! ready it counts as pending.

use crate::unittype::*;
use crate::world::*;
use log::*;
use serde::{Deserialize, Serialize};

const MAX_SUPPLY: u32 = 200;
/// A command center closer than this to an expansion occupies it.
const EXPANSION_RADIUS: f32 = 5.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnitStats {
    pub minerals: u32,
    pub vespene: u32,
    pub build_time: u32,
    pub supply_provided: u32,
    pub supply_cost: u32,
}

impl UnitStats {
    const fn new(minerals: u32, vespene: u32, build_time: u32, supply_provided: u32, supply_cost: u32) -> UnitStats {
        UnitStats {
            minerals,
            vespene,
            build_time,
            supply_provided,
            supply_cost,
        }
    }
}

pub fn unit_stats(unit_type: UnitType) -> UnitStats {
    match unit_type {
        UnitType::Scv => UnitStats::new(50, 0, 12, 0, 1),
        UnitType::CommandCenter => UnitStats::new(400, 0, 71, 15, 0),
        UnitType::OrbitalCommand => UnitStats::new(150, 0, 25, 15, 0),
        UnitType::SupplyDepot | UnitType::SupplyDepotLowered | UnitType::SupplyDepotDrop => UnitStats::new(100, 0, 21, 8, 0),
        UnitType::Barracks => UnitStats::new(150, 0, 46, 0, 0),
        UnitType::Factory => UnitStats::new(150, 100, 43, 0, 0),
        UnitType::Starport => UnitStats::new(150, 100, 36, 0, 0),
        UnitType::Refinery => UnitStats::new(75, 0, 21, 0, 0),
        UnitType::VespeneGeyser => UnitStats::new(0, 0, 0, 0, 0),
    }
}

pub fn ability_stats(ability: AbilityId) -> UnitStats {
    match ability {
        AbilityId::UpgradeToOrbital => unit_stats(UnitType::OrbitalCommand),
    }
}

/// Commands the simulation accepted, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimCommand {
    Build { unit_type: UnitType, position: Point2 },
    BuildOn { worker: UnitTag, unit_type: UnitType, target: UnitTag },
    Ability { unit: UnitTag, ability: AbilityId },
    FoundBase { position: Point2 },
}

impl SimCommand {
    pub fn unit_type(&self) -> UnitType {
        match self {
            SimCommand::Build { unit_type, .. } => *unit_type,
            SimCommand::BuildOn { unit_type, .. } => *unit_type,
            SimCommand::Ability { ability, .. } => ability.morphs_into(),
            SimCommand::FoundBase { .. } => UnitType::CommandCenter,
        }
    }
}

#[derive(Clone, Debug)]
struct SimUnit {
    unit: Unit,
    build_remaining: u32,
    morph: Option<(UnitType, u32)>,
}

#[derive(Clone, Debug)]
struct SimOrder {
    unit_type: UnitType,
    position: Point2,
    worker: UnitTag,
    geyser: Option<UnitTag>,
    travel_remaining: u32,
}

pub struct SimWorld {
    tick: u64,
    minerals: u32,
    vespene: u32,
    mineral_income: u32,
    vespene_income: u32,
    travel_ticks: u32,
    next_tag: u64,
    units: Vec<SimUnit>,
    geysers: Vec<Unit>,
    orders: Vec<SimOrder>,
    start_location: Point2,
    map_center: Point2,
    ramp_depots: Vec<Point2>,
    ramp_barracks: Point2,
    expansions: Vec<Point2>,
    blocked_placement: bool,
    commands: Vec<SimCommand>,
}

impl SimWorld {
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn minerals(&self) -> u32 {
        self.minerals
    }

    pub fn vespene(&self) -> u32 {
        self.vespene
    }

    pub fn set_resources(&mut self, minerals: u32, vespene: u32) {
        self.minerals = minerals;
        self.vespene = vespene;
    }

    /// Makes every generic placement fail, as if the map were full.
    pub fn set_blocked_placement(&mut self, blocked: bool) {
        self.blocked_placement = blocked;
    }

    pub fn commands(&self) -> &[SimCommand] {
        &self.commands
    }

    fn allocate_tag(&mut self) -> UnitTag {
        self.next_tag += 1;

        UnitTag(self.next_tag)
    }

    pub fn spawn_unit(&mut self, unit_type: UnitType, position: Point2, ready: bool) -> UnitTag {
        let tag = self.allocate_tag();
        let ideal_harvesters = if UnitType::command_centers().contains(&unit_type) { 16 } else { 0 };

        self.units.push(SimUnit {
            unit: Unit {
                tag,
                unit_type,
                position,
                is_ready: ready,
                is_idle: true,
                ideal_harvesters,
            },
            build_remaining: if ready { 0 } else { unit_stats(unit_type).build_time },
            morph: None,
        });

        tag
    }

    pub fn spawn_geyser(&mut self, position: Point2) -> UnitTag {
        let tag = self.allocate_tag();

        self.geysers.push(Unit {
            tag,
            unit_type: UnitType::VespeneGeyser,
            position,
            is_ready: true,
            is_idle: true,
            ideal_harvesters: 0,
        });

        tag
    }

    pub fn destroy(&mut self, tag: UnitTag) -> bool {
        let before = self.units.len();

        self.units.retain(|unit| unit.unit.tag != tag);
        self.orders.retain(|order| order.worker != tag);

        self.units.len() != before
    }

    /// Removes every unit of the given types, finished or not.
    pub fn destroy_all(&mut self, unit_types: &[UnitType]) -> usize {
        let tags: Vec<UnitTag> = self
            .units
            .iter()
            .filter(|unit| unit_types.contains(&unit.unit.unit_type))
            .map(|unit| unit.unit.tag)
            .collect();

        tags.iter().filter(|tag| self.destroy(**tag)).count()
    }

    /// Drops every order still walking to its site, as if the workers died.
    pub fn cancel_orders(&mut self) -> usize {
        let count = self.orders.len();

        self.orders.clear();

        count
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) {
        self.tick += 1;

        let refineries = self.units.iter().filter(|unit| unit.unit.unit_type == UnitType::Refinery && unit.unit.is_ready).count() as u32;

        self.minerals += self.mineral_income;
        self.vespene += self.vespene_income * refineries;

        for unit in self.units.iter_mut() {
            if unit.build_remaining > 0 {
                unit.build_remaining -= 1;

                if unit.build_remaining == 0 {
                    unit.unit.is_ready = true;
                    unit.unit.is_idle = true;
                }
            }

            if let Some((into, remaining)) = unit.morph {
                if remaining <= 1 {
                    unit.unit.unit_type = into;
                    unit.unit.is_idle = true;
                    unit.morph = None;
                } else {
                    unit.morph = Some((into, remaining - 1));
                }
            }
        }

        let mut arrived = Vec::new();

        self.orders.retain_mut(|order| {
            order.travel_remaining = order.travel_remaining.saturating_sub(1);

            if order.travel_remaining == 0 {
                arrived.push(order.clone());
                false
            } else {
                true
            }
        });

        for order in arrived {
            trace!("[Simulation] {} placed {}", self.tick, order.unit_type);

            self.spawn_unit(order.unit_type, order.position, false);
        }
    }

    fn is_busy(&self, worker: UnitTag) -> bool {
        self.orders.iter().any(|order| order.worker == worker)
    }

    fn cost_check(&self, stats: UnitStats, unit_type: UnitType) -> Result<(), IssueError> {
        if self.minerals >= stats.minerals && self.vespene >= stats.vespene {
            Ok(())
        } else {
            Err(IssueError::CannotAfford(unit_type))
        }
    }

    fn spend(&mut self, stats: UnitStats) {
        self.minerals -= stats.minerals;
        self.vespene -= stats.vespene;
    }

    fn place_order(&mut self, unit_type: UnitType, position: Point2, worker: UnitTag, geyser: Option<UnitTag>) {
        self.spend(unit_stats(unit_type));

        self.orders.push(SimOrder {
            unit_type,
            position,
            worker,
            geyser,
            travel_remaining: self.travel_ticks.max(1),
        });
    }

    fn geyser_claimed(&self, geyser: &Unit) -> bool {
        self.orders.iter().any(|order| order.geyser == Some(geyser.tag))
            || self
                .units
                .iter()
                .any(|unit| unit.unit.unit_type == UnitType::Refinery && unit.unit.position == geyser.position)
    }
}

impl WorldQuery for SimWorld {
    fn units(&self, unit_type: UnitType) -> Vec<Unit> {
        self.units.iter().filter(|unit| unit.unit.unit_type == unit_type).map(|unit| unit.unit.clone()).collect()
    }

    fn already_pending(&self, unit_type: UnitType) -> u32 {
        let ordered = self.orders.iter().filter(|order| order.unit_type == unit_type).count();
        let constructing = self
            .units
            .iter()
            .filter(|unit| unit.unit.unit_type == unit_type && unit.build_remaining > 0)
            .count();
        let morphing = self
            .units
            .iter()
            .filter(|unit| unit.morph.map(|(into, _)| into == unit_type).unwrap_or(false))
            .count();

        (ordered + constructing + morphing) as u32
    }

    fn can_afford(&self, unit_type: UnitType) -> bool {
        self.cost_check(unit_stats(unit_type), unit_type).is_ok()
    }

    fn can_afford_ability(&self, ability: AbilityId) -> bool {
        self.cost_check(ability_stats(ability), ability.morphs_into()).is_ok()
    }

    fn supply_used(&self) -> u32 {
        self.units.iter().map(|unit| unit_stats(unit.unit.unit_type).supply_cost).sum()
    }

    fn supply_cap(&self) -> u32 {
        let provided: u32 = self
            .units
            .iter()
            .filter(|unit| unit.unit.is_ready)
            .map(|unit| unit_stats(unit.unit.unit_type).supply_provided)
            .sum();

        provided.min(MAX_SUPPLY)
    }

    fn start_location(&self) -> Point2 {
        self.start_location
    }

    fn map_center(&self) -> Point2 {
        self.map_center
    }

    fn ramp_depot_positions(&self) -> Vec<Point2> {
        self.ramp_depots.clone()
    }

    fn ramp_barracks_position(&self) -> Point2 {
        self.ramp_barracks
    }

    fn vespene_geysers(&self) -> Vec<Unit> {
        self.geysers.clone()
    }

    fn select_build_worker(&self, near: Point2) -> Option<UnitTag> {
        self.units
            .iter()
            .filter(|unit| unit.unit.unit_type == UnitType::Scv && !self.is_busy(unit.unit.tag))
            .min_by(|a, b| {
                a.unit
                    .position
                    .distance_to(near)
                    .partial_cmp(&b.unit.position.distance_to(near))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|unit| unit.unit.tag)
    }

    fn next_expansion(&self) -> Option<Point2> {
        let bases = self.units_of(UnitType::command_centers());

        self.expansions
            .iter()
            .copied()
            .filter(|expansion| bases.iter().all(|base| base.position.distance_to(*expansion) > EXPANSION_RADIUS))
            .find(|expansion| {
                !self
                    .orders
                    .iter()
                    .any(|order| order.unit_type == UnitType::CommandCenter && order.position.distance_to(*expansion) <= EXPANSION_RADIUS)
            })
    }
}

impl CommandSink for SimWorld {
    fn build(&mut self, unit_type: UnitType, near: Point2) -> Result<(), IssueError> {
        self.cost_check(unit_stats(unit_type), unit_type)?;

        if self.blocked_placement {
            return Err(IssueError::NoPlacement(unit_type));
        }

        let worker = self.select_build_worker(near).ok_or(IssueError::NoWorker)?;

        self.place_order(unit_type, near, worker, None);
        self.commands.push(SimCommand::Build { unit_type, position: near });

        Ok(())
    }

    fn build_on(&mut self, worker: UnitTag, unit_type: UnitType, target: UnitTag) -> Result<(), IssueError> {
        let geyser = self
            .geysers
            .iter()
            .find(|geyser| geyser.tag == target)
            .cloned()
            .ok_or_else(|| IssueError::Rejected(format!("unknown geyser {:?}", target)))?;

        if self.geyser_claimed(&geyser) {
            return Err(IssueError::Rejected(format!("geyser {:?} already taken", target)));
        }

        let worker_known = self.units.iter().any(|unit| unit.unit.tag == worker && unit.unit.unit_type == UnitType::Scv);

        if !worker_known || self.is_busy(worker) {
            return Err(IssueError::NoWorker);
        }

        self.cost_check(unit_stats(unit_type), unit_type)?;

        self.place_order(unit_type, geyser.position, worker, Some(target));
        self.commands.push(SimCommand::BuildOn { worker, unit_type, target });

        Ok(())
    }

    fn use_ability(&mut self, unit: UnitTag, ability: AbilityId) -> Result<(), IssueError> {
        let stats = ability_stats(ability);

        self.cost_check(stats, ability.morphs_into())?;

        let target = self
            .units
            .iter_mut()
            .find(|candidate| candidate.unit.tag == unit)
            .ok_or_else(|| IssueError::Rejected(format!("unknown unit {:?}", unit)))?;

        if target.unit.unit_type != UnitType::CommandCenter || !target.unit.is_ready || !target.unit.is_idle {
            return Err(IssueError::NoTarget(target.unit.unit_type));
        }

        target.unit.is_idle = false;
        target.morph = Some((ability.morphs_into(), stats.build_time.max(1)));

        self.spend(stats);
        self.commands.push(SimCommand::Ability { unit, ability });

        Ok(())
    }

    fn found_base(&mut self, location: Point2) -> Result<(), IssueError> {
        self.cost_check(unit_stats(UnitType::CommandCenter), UnitType::CommandCenter)?;

        let worker = self.select_build_worker(location).ok_or(IssueError::NoWorker)?;

        self.place_order(UnitType::CommandCenter, location, worker, None);
        self.commands.push(SimCommand::FoundBase { position: location });

        Ok(())
    }
}

/// Fluent setup for a `SimWorld`.
pub struct SimWorldBuilder {
    world: SimWorld,
}

impl Default for SimWorldBuilder {
    fn default() -> Self {
        SimWorldBuilder::new()
    }
}

impl SimWorldBuilder {
    /// An empty map with no units, resources or geography.
    pub fn new() -> SimWorldBuilder {
        SimWorldBuilder {
            world: SimWorld {
                tick: 0,
                minerals: 0,
                vespene: 0,
                mineral_income: 0,
                vespene_income: 0,
                travel_ticks: 1,
                next_tag: 0,
                units: Vec::new(),
                geysers: Vec::new(),
                orders: Vec::new(),
                start_location: Point2::default(),
                map_center: Point2::default(),
                ramp_depots: Vec::new(),
                ramp_barracks: Point2::default(),
                expansions: Vec::new(),
                blocked_placement: false,
                commands: Vec::new(),
            },
        }
    }

    /// A two-base start: a finished command center with twelve workers at the
    /// start location, a walled ramp, two geysers per base and three free
    /// expansions.
    pub fn standard() -> SimWorldBuilder {
        let start = Point2::new(30.0, 30.0);

        let mut builder = SimWorldBuilder::new()
            .start_location(start)
            .map_center(Point2::new(64.0, 64.0))
            .ramp(vec![Point2::new(36.0, 42.0), Point2::new(40.0, 38.0)], Point2::new(38.5, 40.5))
            .resources(50, 0)
            .income(8, 3)
            .travel_ticks(3)
            .with_unit(UnitType::CommandCenter, start, true)
            .with_geyser(Point2::new(23.0, 33.0))
            .with_geyser(Point2::new(33.0, 23.0));

        for expansion in [Point2::new(70.0, 28.0), Point2::new(28.0, 70.0), Point2::new(90.0, 90.0)] {
            builder = builder
                .with_expansion(expansion)
                .with_geyser(Point2::new(expansion.x - 7.0, expansion.y + 3.0))
                .with_geyser(Point2::new(expansion.x + 3.0, expansion.y - 7.0));
        }

        builder.with_workers(12, start)
    }

    pub fn resources(mut self, minerals: u32, vespene: u32) -> Self {
        self.world.minerals = minerals;
        self.world.vespene = vespene;
        self
    }

    /// Minerals per tick, and vespene per tick per finished refinery.
    pub fn income(mut self, minerals: u32, vespene_per_refinery: u32) -> Self {
        self.world.mineral_income = minerals;
        self.world.vespene_income = vespene_per_refinery;
        self
    }

    pub fn travel_ticks(mut self, ticks: u32) -> Self {
        self.world.travel_ticks = ticks;
        self
    }

    pub fn start_location(mut self, location: Point2) -> Self {
        self.world.start_location = location;
        self
    }

    pub fn map_center(mut self, center: Point2) -> Self {
        self.world.map_center = center;
        self
    }

    pub fn ramp(mut self, depots: Vec<Point2>, barracks: Point2) -> Self {
        self.world.ramp_depots = depots;
        self.world.ramp_barracks = barracks;
        self
    }

    pub fn with_unit(mut self, unit_type: UnitType, position: Point2, ready: bool) -> Self {
        self.world.spawn_unit(unit_type, position, ready);
        self
    }

    pub fn with_workers(mut self, count: u32, position: Point2) -> Self {
        for _ in 0..count {
            self.world.spawn_unit(UnitType::Scv, position, true);
        }
        self
    }

    pub fn with_geyser(mut self, position: Point2) -> Self {
        self.world.spawn_geyser(position);
        self
    }

    pub fn with_expansion(mut self, location: Point2) -> Self {
        self.world.expansions.push(location);
        self
    }

    pub fn build(self) -> SimWorld {
        self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_is_pending_until_finished() {
        let mut world = SimWorldBuilder::standard().resources(1000, 0).travel_ticks(2).build();

        world.build(UnitType::SupplyDepot, Point2::new(40.0, 40.0)).unwrap();

        assert_eq!(world.minerals(), 900);
        assert_eq!(world.already_pending(UnitType::SupplyDepot), 1);
        assert_eq!(world.count_of(&[UnitType::SupplyDepot]), 0);

        world.step();
        world.step();

        assert_eq!(world.count_of(&[UnitType::SupplyDepot]), 1);
        assert_eq!(world.already_pending(UnitType::SupplyDepot), 1);

        for _ in 0..unit_stats(UnitType::SupplyDepot).build_time {
            world.step();
        }

        assert_eq!(world.already_pending(UnitType::SupplyDepot), 0);
        assert_eq!(world.ready_of(&[UnitType::SupplyDepot]).len(), 1);
        assert_eq!(world.supply_cap(), 23);
    }

    #[test]
    fn busy_workers_are_not_selected() {
        let mut world = SimWorldBuilder::new()
            .resources(1000, 0)
            .with_workers(1, Point2::new(0.0, 0.0))
            .travel_ticks(5)
            .build();

        world.build(UnitType::Barracks, Point2::new(5.0, 5.0)).unwrap();

        assert_eq!(world.select_build_worker(Point2::new(5.0, 5.0)), None);
        assert_eq!(world.build(UnitType::Barracks, Point2::new(5.0, 5.0)), Err(IssueError::NoWorker));
    }

    #[test]
    fn orbital_morph_keeps_base_count() {
        let mut world = SimWorldBuilder::standard().resources(1000, 0).build();
        let base = world.units(UnitType::CommandCenter)[0].tag;

        world.use_ability(base, AbilityId::UpgradeToOrbital).unwrap();

        assert_eq!(world.already_pending(UnitType::OrbitalCommand), 1);
        assert_eq!(world.count_of(UnitType::command_centers()), 1);

        for _ in 0..unit_stats(UnitType::OrbitalCommand).build_time {
            world.step();
        }

        assert_eq!(world.units(UnitType::OrbitalCommand).len(), 1);
        assert_eq!(world.units(UnitType::CommandCenter).len(), 0);
        assert_eq!(world.already_pending(UnitType::OrbitalCommand), 0);
    }

    #[test]
    fn geyser_can_only_be_claimed_once() {
        let mut world = SimWorldBuilder::standard().resources(1000, 0).build();
        let geyser = world.vespene_geysers()[0].tag;
        let first = world.select_build_worker(Point2::default()).unwrap();

        world.build_on(first, UnitType::Refinery, geyser).unwrap();

        let second = world.select_build_worker(Point2::default()).unwrap();

        assert!(matches!(world.build_on(second, UnitType::Refinery, geyser), Err(IssueError::Rejected(_))));
    }

    #[test]
    fn expansion_taken_by_pending_base_is_skipped() {
        let mut world = SimWorldBuilder::standard().resources(1000, 0).build();
        let first = world.next_expansion().unwrap();

        world.found_base(first).unwrap();

        let second = world.next_expansion().unwrap();
        assert_ne!(first, second);
    }
}
