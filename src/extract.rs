//! Field extraction for exported unitdefs
//!
//! Copies and derives the scalar attributes of a [`UnitSummary`] from a raw
//! unitdef, then merges in the kind classification and feature flags.

use crate::classify::{self, Diagnostic};
use crate::config::{CustomParamsPolicy, FactionMatch, ReshapeOptions};
use crate::error::{ReshapeError, Result};
use crate::features;
use crate::models::{Faction, UnitSummary, UnitType};
use crate::raw::{CustomParams, RawUnitDef};

/// Unit name prefixes in match order.
pub const FACTION_PREFIXES: &[(&str, Faction)] = &[
    ("arm", Faction::Armada),
    ("cor", Faction::Cortex),
    ("leg", Faction::Legion),
    ("raptor", Faction::Raptor),
    ("scav", Faction::Scavenger),
];

/// Names starting with this are scavenger units regardless of the table.
const SCAVENGER_PREFIX: &str = "scav";

/// Scavenger-only units that carry a regular faction prefix.
const SCAVENGER_UNITS: &[&str] = &["corvacct"];

/// A reshaped unitdef plus whatever the classifier had to say about it.
#[derive(Debug)]
pub struct ExtractedUnit {
    pub summary: UnitSummary,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the summary of a single unitdef.
///
/// Fails if a required field is missing; never returns a partial record.
pub fn extract_unit(raw: &RawUnitDef<'_>, options: &ReshapeOptions) -> Result<ExtractedUnit> {
    let name = raw.required_str("name")?;
    let classification = classify::classify(raw, options.archetypes)?;

    let summary = UnitSummary {
        name: name.to_string(),
        human_name: raw.required_str("translatedHumanName")?.to_string(),
        human_tooltip: raw.required_str("translatedTooltip")?.to_string(),

        metal_cost: raw.required_number("metalCost")?,
        energy_cost: raw.required_number("energyCost")?,
        build_time: raw.required_number("buildTime")?,
        metal_storage: raw.number_or_zero("metalStorage")?,
        energy_storage: raw.number_or_zero("energyStorage")?,

        health: raw.required_number("health")?,
        los: raw.number_or_zero("sightDistance")?,
        los_air: raw.number_or_zero("airSightDistance")?,
        radar_range: raw.number_or_zero("radarRadius")?,

        faction: faction_for_name(name, options.faction_match),
        unit_type: unit_type(raw)?,
        kind: classification.kind,
        tech_level: tech_level(raw, options.custom_params)?,
        unit_group: unit_group(raw, options.custom_params)?,
        features: features::extract_features(raw),

        derived: classification.derived,
    };

    Ok(ExtractedUnit {
        summary,
        diagnostics: classification.diagnostics,
    })
}

/// Resolve the faction of a unit from its engine name.
pub fn faction_for_name(name: &str, mode: FactionMatch) -> Option<Faction> {
    if name.starts_with(SCAVENGER_PREFIX) || SCAVENGER_UNITS.contains(&name) {
        return Some(Faction::Scavenger);
    }
    scan_prefixes(name, FACTION_PREFIXES, mode)
}

/// Match `name` against an ordered prefix table.
pub fn scan_prefixes(
    name: &str,
    table: &[(&str, Faction)],
    mode: FactionMatch,
) -> Option<Faction> {
    let mut matches = table
        .iter()
        .filter(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, faction)| *faction);

    match mode {
        FactionMatch::First => matches.next(),
        FactionMatch::Last => matches.last(),
    }
}

pub fn unit_type(raw: &RawUnitDef<'_>) -> Result<UnitType> {
    Ok(if raw.required_bool("isBuilding")? {
        UnitType::Building
    } else {
        UnitType::Unit
    })
}

/// Tech tier from `customParams.techlevel`.
pub fn tech_level(raw: &RawUnitDef<'_>, policy: CustomParamsPolicy) -> Result<Option<i64>> {
    Ok(custom_params(raw, policy)?.and_then(|params| params.integer("techlevel")))
}

pub fn unit_group(raw: &RawUnitDef<'_>, policy: CustomParamsPolicy) -> Result<Option<String>> {
    Ok(custom_params(raw, policy)?.and_then(|params| params.string("unitgroup")))
}

fn custom_params<'a>(
    raw: &RawUnitDef<'a>,
    policy: CustomParamsPolicy,
) -> Result<Option<CustomParams<'a>>> {
    match (raw.custom_params(), policy) {
        (Some(params), _) => Ok(Some(params)),
        (None, CustomParamsPolicy::Tolerant) => Ok(None),
        (None, CustomParamsPolicy::Strict) => Err(ReshapeError::MissingCustomParams {
            unit: raw.label().to_string(),
        }),
    }
}
