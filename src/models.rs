//! Data models for reshaped unitdefs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Armada,
    Cortex,
    Legion,
    Raptor,
    Scavenger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Unit,
    Building,
}

/// Coarse functional category of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    // Buildings
    Factory,
    Extractor,
    Solargen,
    Windgen,
    Tidalgen,
    StaticBuilder,
    Storage,
    Defense,
    Building,
    // Mobile units
    Space,
    Commander,
    Bot,
    Vehicle,
    Hover,
    Sub,
    Ship,
    Shield,
    Immobile,
    Decoycommander,
    Object,
    Air,
    Vtol,
}

impl UnitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Factory => "factory",
            UnitKind::Extractor => "extractor",
            UnitKind::Solargen => "solargen",
            UnitKind::Windgen => "windgen",
            UnitKind::Tidalgen => "tidalgen",
            UnitKind::StaticBuilder => "static_builder",
            UnitKind::Storage => "storage",
            UnitKind::Defense => "defense",
            UnitKind::Building => "building",
            UnitKind::Space => "space",
            UnitKind::Commander => "commander",
            UnitKind::Bot => "bot",
            UnitKind::Vehicle => "vehicle",
            UnitKind::Hover => "hover",
            UnitKind::Sub => "sub",
            UnitKind::Ship => "ship",
            UnitKind::Shield => "shield",
            UnitKind::Immobile => "immobile",
            UnitKind::Decoycommander => "decoycommander",
            UnitKind::Object => "object",
            UnitKind::Air => "air",
            UnitKind::Vtol => "vtol",
        }
    }
}

/// Capability flag reported in `features`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    SelfDestruct,
    Kamikaze,
    Cloak,
    Transport,
    Capturable,
    CanCapture,
    CanResurrect,
    CanRepair,
    Empable,
    Vtol,
}

/// Sparse feature set; never serialized empty.
pub type Features = BTreeMap<Feature, bool>;

/// Kind-specific values derived while classifying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    /// Metal extraction rate of a metal extractor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracts_metal: Option<Number>,
    /// Implied energy output of a solar generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_output: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_multiplier: Option<f64>,
}

/// One reshaped unitdef, as written to the output array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSummary {
    pub name: String,
    pub human_name: String,
    pub human_tooltip: String,

    // Copied stats keep the exported number as is, integer or float.
    pub metal_cost: Number,
    pub energy_cost: Number,
    pub build_time: Number,
    pub metal_storage: Number,
    pub energy_storage: Number,

    pub health: Number,
    pub los: Number,
    pub los_air: Number,
    /// Radar radius; an approximation of the effective radar range.
    pub radar_range: Number,

    pub faction: Option<Faction>,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    #[serde(rename = "unit_kind")]
    pub kind: Option<UnitKind>,
    pub tech_level: Option<i64>,
    #[serde(rename = "unitgroup")]
    pub unit_group: Option<String>,
    pub features: Option<Features>,

    #[serde(flatten)]
    pub derived: DerivedStats,
}
