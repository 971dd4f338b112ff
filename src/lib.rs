//! Reshapes the unitdefs JSON export of Beyond All Reason into a condensed,
//! engine-agnostic summary.
//!
//! Each exported unitdef is reduced to a [`models::UnitSummary`]: costs,
//! health, sight, faction, unit kind, tech level and feature flags.

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod features;
pub mod index;
pub mod models;
pub mod raw;
pub mod reshape;

pub use error::{ReshapeError, Result};
