use crate::unittype::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Point2 {
        Point2 { x, y }
    }

    pub fn distance_to(&self, other: Point2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;

        (dx * dx + dy * dy).sqrt()
    }

    /// Moves `distance` towards `target`, stopping on it if closer than that.
    pub fn towards(&self, target: Point2, distance: f32) -> Point2 {
        let length = self.distance_to(target);

        if length <= distance || length == 0.0 {
            return target;
        }

        let t = distance / length;

        Point2::new(self.x + (target.x - self.x) * t, self.y + (target.y - self.y) * t)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitTag(pub u64);

/// Snapshot of a single unit as seen this tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub tag: UnitTag,
    pub unit_type: UnitType,
    pub position: Point2,
    /// Construction or morph has finished.
    pub is_ready: bool,
    /// No orders queued.
    pub is_idle: bool,
    /// Ideal number of mineral harvesters; only meaningful for command centers.
    pub ideal_harvesters: u32,
}

/// Reasons a construction command was not accepted.
///
/// None of these are fatal. The issuing controller keeps its state and tries
/// again on the next tick.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IssueError {
    #[error("cannot afford {0}")]
    CannotAfford(UnitType),
    #[error("no valid placement for {0}")]
    NoPlacement(UnitType),
    #[error("no worker available")]
    NoWorker,
    #[error("no eligible target for {0}")]
    NoTarget(UnitType),
    #[error("command rejected: {0}")]
    Rejected(String),
}

/// Read-only view of the game state for the current tick.
///
/// All reads within one tick are expected to be consistent with each other,
/// apart from resources already spent by commands accepted earlier in the
/// same tick.
pub trait WorldQuery {
    /// Every owned unit of exactly this type, ready or not, oldest first.
    fn units(&self, unit_type: UnitType) -> Vec<Unit>;

    /// Outstanding unresolved production of this type: queued orders plus
    /// structures that are placed but not finished.
    fn already_pending(&self, unit_type: UnitType) -> u32;

    fn can_afford(&self, unit_type: UnitType) -> bool;

    fn can_afford_ability(&self, ability: AbilityId) -> bool;

    fn supply_used(&self) -> u32;

    fn supply_cap(&self) -> u32;

    fn start_location(&self) -> Point2;

    fn map_center(&self) -> Point2;

    /// Depot spots that wall off the main base ramp.
    fn ramp_depot_positions(&self) -> Vec<Point2>;

    /// Barracks spot in the middle of the main base ramp wall.
    fn ramp_barracks_position(&self) -> Point2;

    /// Neutral vespene geysers, including ones already carrying a refinery.
    fn vespene_geysers(&self) -> Vec<Unit>;

    fn select_build_worker(&self, near: Point2) -> Option<UnitTag>;

    /// Closest free expansion location, if any remain.
    fn next_expansion(&self) -> Option<Point2>;

    fn supply_left(&self) -> u32 {
        self.supply_cap().saturating_sub(self.supply_used())
    }

    fn units_of(&self, unit_types: &[UnitType]) -> Vec<Unit> {
        unit_types.iter().flat_map(|unit_type| self.units(*unit_type)).collect()
    }

    fn count_of(&self, unit_types: &[UnitType]) -> u32 {
        unit_types.iter().map(|unit_type| self.units(*unit_type).len() as u32).sum()
    }

    fn ready_of(&self, unit_types: &[UnitType]) -> Vec<Unit> {
        self.units_of(unit_types).into_iter().filter(|unit| unit.is_ready).collect()
    }
}

/// Command surface of the game. Commands are fire-and-forget: `Ok` only
/// means the command was accepted, never that it finished.
pub trait CommandSink {
    /// Place a structure somewhere near `near`, using any suitable worker.
    fn build(&mut self, unit_type: UnitType, near: Point2) -> Result<(), IssueError>;

    /// Order a specific worker to build on a target unit (refinery on a geyser).
    fn build_on(&mut self, worker: UnitTag, unit_type: UnitType, target: UnitTag) -> Result<(), IssueError>;

    fn use_ability(&mut self, unit: UnitTag, ability: AbilityId) -> Result<(), IssueError>;

    /// Found a new command center exactly at `location`.
    fn found_base(&mut self, location: Point2) -> Result<(), IssueError>;
}

/// Combined capability handed to the construction layer each tick.
pub trait Game: WorldQuery + CommandSink {}

impl<T> Game for T where T: WorldQuery + CommandSink {}

/// Shortest distance from `position` to any of `units`.
pub fn closest_distance(units: &[Unit], position: Point2) -> Option<f32> {
    units
        .iter()
        .map(|unit| unit.position.distance_to(position))
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn towards_stops_at_target() {
        let from = Point2::new(0.0, 0.0);
        let to = Point2::new(3.0, 4.0);

        assert_eq!(from.towards(to, 10.0), to);

        let step = from.towards(to, 2.5);
        assert!((step.x - 1.5).abs() < 1e-5);
        assert!((step.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn closest_distance_of_empty_is_none() {
        assert_eq!(closest_distance(&[], Point2::new(1.0, 1.0)), None);
    }
}
