//! Unit kind classification
//!
//! An ordered decision tree over the raw engine flags and category tags.
//! Exactly one branch fires per unitdef; branch order is part of the output
//! format, so reordering rules changes results for real units.
//!
//! Buildings are split on explicit engine flags. Mobile units are split on
//! their category tags, first match wins.

use std::fmt;

use crate::config::ArchetypePolicy;
use crate::error::{ReshapeError, Result};
use crate::models::{DerivedStats, UnitKind};
use crate::raw::{Categories, RawUnitDef};

/// Category tags of mobile units, in priority order.
pub const MOBILE_CATEGORY_KINDS: &[(&str, UnitKind)] = &[
    ("space", UnitKind::Space),
    ("commander", UnitKind::Commander),
    ("bot", UnitKind::Bot),
    ("tank", UnitKind::Vehicle),
    ("hover", UnitKind::Hover),
    ("underwater", UnitKind::Sub),
    ("ship", UnitKind::Ship),
];

/// Every air unit without a ground category must carry this tag.
const AIR_TAG: &str = "air";

/// Refines an `air` unit into a VTOL.
const VTOL_TAG: &str = "vtol";

/// `deathExplosion` shared by all decoy commanders.
const DECOY_COMMANDER_EXPLOSION: &str = "decoycommander";

/// Where in the tree classification gave up. Buildings and air units
/// always resolve to a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Ground,
    /// Neither building, air nor ground unit.
    Unknown,
}

/// Non-fatal findings of the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnclassifiedKind { unit: String, partition: Partition },
    UnexpectedArchetype { unit: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnclassifiedKind { unit, partition } => {
                write!(f, "{unit}: no kind matched ({partition:?} unit)")
            }
            Diagnostic::UnexpectedArchetype { unit } => {
                write!(f, "{unit}: unexpected air unit archetype, defaulting to air")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub kind: Option<UnitKind>,
    pub derived: DerivedStats,
    pub diagnostics: Vec<Diagnostic>,
}

impl Classification {
    fn kind(kind: UnitKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    fn with(kind: UnitKind, derived: DerivedStats) -> Self {
        Self {
            kind: Some(kind),
            derived,
            diagnostics: Vec::new(),
        }
    }

    fn unclassified(raw: &RawUnitDef<'_>, partition: Partition) -> Self {
        Self {
            kind: None,
            derived: DerivedStats::default(),
            diagnostics: vec![Diagnostic::UnclassifiedKind {
                unit: raw.label().to_string(),
                partition,
            }],
        }
    }
}

/// Classify one unitdef.
///
/// Only fails on missing data a matched branch needs, or on an unknown air
/// archetype under [`ArchetypePolicy::Strict`].
pub fn classify(raw: &RawUnitDef<'_>, policy: ArchetypePolicy) -> Result<Classification> {
    let mut classification = if raw.flag("isBuilding") {
        classify_building(raw)?
    } else if raw.flag("isAirUnit") {
        classify_air(raw, policy)?
    } else if raw.flag("isGroundUnit") {
        classify_ground(raw)
    } else {
        Classification::unclassified(raw, Partition::Unknown)
    };

    // Reported for every extractor, whichever kind won.
    if raw.flag("isExtractor") {
        classification.derived.extracts_metal = Some(raw.required_number("extractsMetal")?);
    }

    Ok(classification)
}

fn classify_building(raw: &RawUnitDef<'_>) -> Result<Classification> {
    if raw.flag("isFactory") {
        return Ok(Classification::kind(UnitKind::Factory));
    }

    if raw.flag("isExtractor") {
        return Ok(Classification::kind(UnitKind::Extractor));
    }

    let custom_params = raw.custom_params();

    if custom_params.is_some_and(|params| params.is_set("solar")) {
        let derived = DerivedStats {
            energy_output: Some(solar_energy_output(raw)?),
            ..Default::default()
        };
        return Ok(Classification::with(UnitKind::Solargen, derived));
    }

    if raw.flag("windGenerator") {
        let derived = DerivedStats {
            energy_multiplier: custom_params.and_then(|params| params.number("energymultiplier")),
            ..Default::default()
        };
        return Ok(Classification::with(UnitKind::Windgen, derived));
    }

    let kind = if raw.flag("tidalGenerator") {
        UnitKind::Tidalgen
    } else if raw.flag("isStaticBuilder") {
        UnitKind::StaticBuilder
    } else if raw.f64_or_zero("energyStorage")? > 0.0 || raw.f64_or_zero("metalStorage")? > 0.0 {
        UnitKind::Storage
    } else if raw.categories().has("weapon") {
        UnitKind::Defense
    } else {
        UnitKind::Building
    };

    Ok(Classification::kind(kind))
}

/// Energy produced by a solar collector.
///
/// Tier 1 collectors encode their output as negative upkeep, tier 2 ones use
/// `energyMake`, falling back to `totalEnergyOut`.
pub fn solar_energy_output(raw: &RawUnitDef<'_>) -> Result<f64> {
    let upkeep = raw.f64_or_zero("energyUpkeep")?;
    if upkeep < 0.0 {
        return Ok(upkeep.abs());
    }

    let make = raw.f64_or_zero("energyMake")?;
    if make != 0.0 {
        Ok(make)
    } else {
        raw.f64_or_zero("totalEnergyOut")
    }
}

fn classify_air(raw: &RawUnitDef<'_>, policy: ArchetypePolicy) -> Result<Classification> {
    let categories = raw.categories();

    // `space` and ground signals win over the air refinement.
    if let Some(kind) = category_kind(categories, MOBILE_CATEGORY_KINDS) {
        return Ok(Classification::kind(kind));
    }

    if !categories.has(AIR_TAG) {
        let unit = raw.label().to_string();
        return match policy {
            ArchetypePolicy::Strict => Err(ReshapeError::UnexpectedArchetype { unit }),
            ArchetypePolicy::Lenient => Ok(Classification {
                kind: Some(UnitKind::Air),
                derived: DerivedStats::default(),
                diagnostics: vec![Diagnostic::UnexpectedArchetype { unit }],
            }),
        };
    }

    let kind = if categories.has(VTOL_TAG) {
        UnitKind::Vtol
    } else {
        UnitKind::Air
    };
    Ok(Classification::kind(kind))
}

fn classify_ground(raw: &RawUnitDef<'_>) -> Classification {
    let categories = raw.categories();

    if let Some(kind) = category_kind(categories, MOBILE_CATEGORY_KINDS) {
        return Classification::kind(kind);
    }

    if raw.flag("isImmobile") {
        let kind = if raw.flag("hasShield") {
            UnitKind::Shield
        } else {
            UnitKind::Immobile
        };
        return Classification::kind(kind);
    }

    if raw.str_field("deathExplosion") == Some(DECOY_COMMANDER_EXPLOSION) {
        return Classification::kind(UnitKind::Decoycommander);
    }

    if categories.has("object") {
        return Classification::kind(UnitKind::Object);
    }

    Classification::unclassified(raw, Partition::Ground)
}

fn category_kind(categories: Categories<'_>, table: &[(&str, UnitKind)]) -> Option<UnitKind> {
    table
        .iter()
        .find(|(tag, _)| categories.has(tag))
        .map(|(_, kind)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Number, Value, json};

    fn run(value: Value) -> Classification {
        classify(&RawUnitDef::new(&value).unwrap(), ArchetypePolicy::Lenient).unwrap()
    }

    fn building(extra: Value) -> Value {
        let mut value = json!({"name": "armtest", "isBuilding": true});
        for (k, v) in extra.as_object().unwrap() {
            value[k] = v.clone();
        }
        value
    }

    fn ground(categories: Value) -> Value {
        json!({"name": "armtest", "isBuilding": false, "isGroundUnit": true, "modCategories": categories})
    }

    fn air(categories: Value) -> Value {
        json!({"name": "armtest", "isBuilding": false, "isAirUnit": true, "modCategories": categories})
    }

    #[test]
    fn test_no_partition_is_unclassified() {
        let result = run(json!({
            "name": "armtest",
            "isBuilding": false,
            "isAirUnit": false,
            "isGroundUnit": false,
            "modCategories": {"bot": true}
        }));
        assert_eq!(result.kind, None);
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::UnclassifiedKind {
                unit: "armtest".to_string(),
                partition: Partition::Unknown,
            }]
        );
    }

    #[test]
    fn test_building_branches() {
        let cases = [
            (json!({"isFactory": true}), UnitKind::Factory),
            (json!({"isExtractor": true, "extractsMetal": 0.001}), UnitKind::Extractor),
            (json!({"customParams": {"solar": true}, "energyUpkeep": -20}), UnitKind::Solargen),
            (json!({"windGenerator": 25}), UnitKind::Windgen),
            (json!({"tidalGenerator": 1}), UnitKind::Tidalgen),
            (json!({"isStaticBuilder": true}), UnitKind::StaticBuilder),
            (json!({"energyStorage": 6000}), UnitKind::Storage),
            (json!({"metalStorage": 3000}), UnitKind::Storage),
            (json!({"modCategories": {"weapon": true}}), UnitKind::Defense),
            (json!({}), UnitKind::Building),
        ];
        for (extra, expected) in cases {
            let result = run(building(extra.clone()));
            assert_eq!(result.kind, Some(expected), "{extra}");
            assert!(result.diagnostics.is_empty());
        }
    }

    #[test]
    fn test_building_first_match_wins() {
        let result = run(building(json!({
            "isFactory": true,
            "isExtractor": true,
            "extractsMetal": 0.001,
            "energyStorage": 500
        })));
        assert_eq!(result.kind, Some(UnitKind::Factory));
        assert_eq!(result.derived.extracts_metal, Number::from_f64(0.001));
        assert_eq!(result.derived.energy_output, None);

        let result = run(building(json!({"isStaticBuilder": true, "metalStorage": 100})));
        assert_eq!(result.kind, Some(UnitKind::StaticBuilder));
    }

    #[test]
    fn test_extractor_copies_rate() {
        let result = run(building(json!({"isExtractor": true, "extractsMetal": 0.004})));
        assert_eq!(result.derived.extracts_metal, Number::from_f64(0.004));

        // Integer rates stay integers in the output.
        let result = run(building(json!({"isExtractor": true, "extractsMetal": 2})));
        assert_eq!(json!(result.derived)["extractsMetal"], json!(2));

        let value = building(json!({"isExtractor": true}));
        let err = classify(&RawUnitDef::new(&value).unwrap(), ArchetypePolicy::Lenient).unwrap_err();
        assert!(matches!(err, ReshapeError::MissingField { field: "extractsMetal", .. }));
    }

    #[test]
    fn test_solar_negative_upkeep() {
        let value = building(json!({"customParams": {"solar": true}, "energyUpkeep": -50}));
        let result = run(value.clone());
        assert_eq!(result.kind, Some(UnitKind::Solargen));
        assert_eq!(result.derived.energy_output, Some(50.0));
        // The raw record is left untouched.
        assert_eq!(value["energyUpkeep"], json!(-50));
        assert!(value.get("energyOutput").is_none());
    }

    #[test]
    fn test_solar_energy_make() {
        let value = building(json!({
            "customParams": {"solar": "1"},
            "energyUpkeep": 0,
            "energyMake": 75,
            "totalEnergyOut": 10
        }));
        assert_eq!(run(value).derived.energy_output, Some(75.0));

        let value = building(json!({
            "customParams": {"solar": "1"},
            "energyMake": 0,
            "totalEnergyOut": 600
        }));
        assert_eq!(run(value).derived.energy_output, Some(600.0));

        let value = building(json!({"customParams": {"solar": "1"}}));
        assert_eq!(run(value).derived.energy_output, Some(0.0));
    }

    #[test]
    fn test_windgen_multiplier() {
        let value = building(json!({"windGenerator": 25, "customParams": {"energymultiplier": "1.3"}}));
        let result = run(value);
        assert_eq!(result.kind, Some(UnitKind::Windgen));
        assert_eq!(result.derived.energy_multiplier, Some(1.3));

        let result = run(building(json!({"windGenerator": 25})));
        assert_eq!(result.derived.energy_multiplier, None);
    }

    #[test]
    fn test_ground_category_order() {
        let cases = [
            (json!({"space": true, "commander": true}), UnitKind::Space),
            (json!({"commander": true, "bot": true}), UnitKind::Commander),
            (json!({"bot": true, "tank": true}), UnitKind::Bot),
            (json!({"tank": true, "hover": true}), UnitKind::Vehicle),
            (json!({"hover": true, "ship": true}), UnitKind::Hover),
            (json!({"underwater": true, "ship": true}), UnitKind::Sub),
            (json!({"ship": true}), UnitKind::Ship),
        ];
        for (categories, expected) in cases {
            assert_eq!(run(ground(categories.clone())).kind, Some(expected), "{categories}");
        }
    }

    #[test]
    fn test_ground_fallbacks() {
        let mut value = ground(json!({}));
        value["isImmobile"] = json!(true);
        value["hasShield"] = json!(true);
        assert_eq!(run(value).kind, Some(UnitKind::Shield));

        let mut value = ground(json!({}));
        value["isImmobile"] = json!(true);
        assert_eq!(run(value).kind, Some(UnitKind::Immobile));

        let mut value = ground(json!({"object": true}));
        value["deathExplosion"] = json!("decoycommander");
        assert_eq!(run(value).kind, Some(UnitKind::Decoycommander));

        let value = ground(json!({"object": true}));
        assert_eq!(run(value).kind, Some(UnitKind::Object));
    }

    #[test]
    fn test_ground_unclassified() {
        let result = run(ground(json!({"notair": true})));
        assert_eq!(result.kind, None);
        assert!(matches!(
            result.diagnostics.as_slice(),
            [Diagnostic::UnclassifiedKind { partition: Partition::Ground, .. }]
        ));
    }

    #[test]
    fn test_air_refinement() {
        assert_eq!(run(air(json!({"air": true, "vtol": true}))).kind, Some(UnitKind::Vtol));
        assert_eq!(run(air(json!({"air": true}))).kind, Some(UnitKind::Air));
        assert_eq!(run(air(json!({"space": true, "vtol": true}))).kind, Some(UnitKind::Space));
        // Ground signals take precedence over the air refinement.
        assert_eq!(run(air(json!({"commander": true, "vtol": true}))).kind, Some(UnitKind::Commander));
    }

    #[test]
    fn test_unexpected_air_archetype() {
        let lenient = run(air(json!({"notsub": true})));
        assert_eq!(lenient.kind, Some(UnitKind::Air));
        assert_eq!(
            lenient.diagnostics,
            vec![Diagnostic::UnexpectedArchetype { unit: "armtest".to_string() }]
        );

        let value = air(json!({}));
        let strict = classify(&RawUnitDef::new(&value).unwrap(), ArchetypePolicy::Strict);
        assert!(matches!(strict, Err(ReshapeError::UnexpectedArchetype { .. })));
    }

    #[test]
    fn test_vtol_without_air_tag_is_unexpected() {
        let lenient = run(air(json!({"vtol": true})));
        assert_eq!(lenient.kind, Some(UnitKind::Air));
        assert_eq!(
            lenient.diagnostics,
            vec![Diagnostic::UnexpectedArchetype { unit: "armtest".to_string() }]
        );

        let value = air(json!({"vtol": true}));
        let strict = classify(&RawUnitDef::new(&value).unwrap(), ArchetypePolicy::Strict);
        assert!(matches!(strict, Err(ReshapeError::UnexpectedArchetype { .. })));
    }

    #[test]
    fn test_building_takes_precedence_over_mobile_flags() {
        let value = json!({
            "name": "armnanotc",
            "isBuilding": true,
            "isGroundUnit": true,
            "isStaticBuilder": true,
            "modCategories": {"bot": true}
        });
        assert_eq!(run(value).kind, Some(UnitKind::StaticBuilder));
    }
}
