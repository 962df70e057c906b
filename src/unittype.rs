use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit and structure types the construction layer reasons about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitType {
    Scv,
    CommandCenter,
    OrbitalCommand,
    SupplyDepot,
    SupplyDepotLowered,
    SupplyDepotDrop,
    Barracks,
    Factory,
    Starport,
    Refinery,
    VespeneGeyser,
}

const COMMAND_CENTER_TYPES: &[UnitType] = &[UnitType::CommandCenter, UnitType::OrbitalCommand];
const SUPPLY_DEPOT_TYPES: &[UnitType] = &[UnitType::SupplyDepot, UnitType::SupplyDepotLowered, UnitType::SupplyDepotDrop];
/// Types with a builder, in the order the supervisor drives them.
const CONSTRUCTIBLE_TYPES: &[UnitType] = &[
    UnitType::CommandCenter,
    UnitType::SupplyDepot,
    UnitType::Barracks,
    UnitType::Factory,
    UnitType::Starport,
    UnitType::Refinery,
    UnitType::OrbitalCommand,
];

impl UnitType {
    /// The set of unit types that count towards this type's total.
    ///
    /// An orbital command is still a command center for quota purposes and a
    /// lowered depot still provides supply, so both controllers and build plan
    /// goals count every form together.
    pub fn counted_as(self) -> &'static [UnitType] {
        match self {
            UnitType::CommandCenter => COMMAND_CENTER_TYPES,
            UnitType::SupplyDepot => SUPPLY_DEPOT_TYPES,
            UnitType::Scv => &[UnitType::Scv],
            UnitType::OrbitalCommand => &[UnitType::OrbitalCommand],
            UnitType::SupplyDepotLowered => &[UnitType::SupplyDepotLowered],
            UnitType::SupplyDepotDrop => &[UnitType::SupplyDepotDrop],
            UnitType::Barracks => &[UnitType::Barracks],
            UnitType::Factory => &[UnitType::Factory],
            UnitType::Starport => &[UnitType::Starport],
            UnitType::Refinery => &[UnitType::Refinery],
            UnitType::VespeneGeyser => &[UnitType::VespeneGeyser],
        }
    }

    pub fn command_centers() -> &'static [UnitType] {
        COMMAND_CENTER_TYPES
    }

    pub fn supply_depots() -> &'static [UnitType] {
        SUPPLY_DEPOT_TYPES
    }

    pub fn constructible() -> &'static [UnitType] {
        CONSTRUCTIBLE_TYPES
    }

    /// Whether a build plan may ask for this type. Alternate forms such as a
    /// lowered depot are counted but never built directly.
    pub fn is_constructible(self) -> bool {
        CONSTRUCTIBLE_TYPES.contains(&self)
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitType::Scv => "SCV",
            UnitType::CommandCenter => "COMMANDCENTER",
            UnitType::OrbitalCommand => "ORBITALCOMMAND",
            UnitType::SupplyDepot => "SUPPLYDEPOT",
            UnitType::SupplyDepotLowered => "SUPPLYDEPOTLOWERED",
            UnitType::SupplyDepotDrop => "SUPPLYDEPOTDROP",
            UnitType::Barracks => "BARRACKS",
            UnitType::Factory => "FACTORY",
            UnitType::Starport => "STARPORT",
            UnitType::Refinery => "REFINERY",
            UnitType::VespeneGeyser => "VESPENEGEYSER",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Abilities the construction layer issues against existing units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    UpgradeToOrbital,
}

impl AbilityId {
    /// Unit type produced by a morph ability.
    pub fn morphs_into(self) -> UnitType {
        match self {
            AbilityId::UpgradeToOrbital => UnitType::OrbitalCommand,
        }
    }
}
