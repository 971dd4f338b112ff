//! Capability flags of a unit

use crate::models::{Feature, Features};
use crate::raw::RawUnitDef;

/// Feature and the raw engine flags that enable it (any of them).
const FEATURE_FLAGS: &[(Feature, &[&str])] = &[
    (Feature::SelfDestruct, &["canSelfDestruct", "canSelfD"]),
    (Feature::Kamikaze, &["canKamikaze"]),
    (Feature::Cloak, &["canCloak"]),
    (Feature::Transport, &["isTransport"]),
    (Feature::Capturable, &["capturable"]),
    (Feature::CanCapture, &["canCapture"]),
    (Feature::CanResurrect, &["canResurrect"]),
    (Feature::CanRepair, &["canRepair"]),
    (Feature::Empable, &["empable"]),
    (Feature::Vtol, &["canFly"]),
];

/// Collect the enabled features, or `None` if the unit has none.
pub fn extract_features(raw: &RawUnitDef<'_>) -> Option<Features> {
    let features: Features = FEATURE_FLAGS
        .iter()
        .filter(|(_, flags)| flags.iter().any(|flag| raw.flag(flag)))
        .map(|(feature, _)| (*feature, true))
        .collect();

    (!features.is_empty()).then_some(features)
}
