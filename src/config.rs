//! Reshaping policies
//!
//! Exported unitdefs are not consistent about optional data, so the places
//! where the reshaper has to choose between defaulting and failing are
//! explicit switches, settable from the command line.

/// How to treat a unitdef without a `customParams` mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CustomParamsPolicy {
    /// Tech level and unit group become null.
    #[default]
    Tolerant,
    /// The unitdef fails to reshape.
    Strict,
}

/// How to treat an air unit that fits no known archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ArchetypePolicy {
    /// Log an error and keep the base `air` kind.
    #[default]
    Lenient,
    /// Abort reshaping.
    Strict,
}

/// Which faction wins when several prefixes match the same unit name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FactionMatch {
    /// First match in table order.
    First,
    /// Last match in table order.
    #[default]
    Last,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReshapeOptions {
    pub custom_params: CustomParamsPolicy,
    pub archetypes: ArchetypePolicy,
    pub faction_match: FactionMatch,
    /// Skip unitdefs that fail instead of aborting the whole run.
    pub keep_going: bool,
}
