//! unitdefs-reshaper
//!
//! Reshapes the unitdefs JSON export of Beyond All Reason into a single,
//! condensed array: costs, health, sight, faction, kind, tech level and
//! feature flags per unit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use unitdefs_reshaper::config::{
    ArchetypePolicy, CustomParamsPolicy, FactionMatch, ReshapeOptions,
};
use unitdefs_reshaper::reshape::{self, Output};

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser)]
#[command(name = "unitdefs-reshaper")]
#[command(about = "Reshape exported unitdefs into a condensed summary")]
struct Cli {
    /// Location of json exported unitdefs (usually "json_export/")
    #[arg(long)]
    unitdefs_dir: PathBuf,

    /// File to write the reshaped unitdefs to
    #[arg(long, default_value = "./unitdefs.json")]
    output_file: PathBuf,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    debug: bool,

    /// Process everything but do not write the output file
    #[arg(long)]
    dry_run: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Skip unitdefs that fail to reshape instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// What to do with unitdefs lacking customParams
    #[arg(long, value_enum, default_value_t = CustomParamsPolicy::Tolerant)]
    custom_params: CustomParamsPolicy,

    /// What to do with air units of an unknown archetype
    #[arg(long, value_enum, default_value_t = ArchetypePolicy::Lenient)]
    archetypes: ArchetypePolicy,

    /// Which faction prefix wins when several match
    #[arg(long, value_enum, default_value_t = FactionMatch::Last)]
    faction_match: FactionMatch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = log_filter(cli.debug, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .init();

    let unitdefs_dir = cli.unitdefs_dir.canonicalize().with_context(|| {
        format!(
            "Could not find unitdefs directory '{}', does it exist?",
            cli.unitdefs_dir.display()
        )
    })?;

    let options = ReshapeOptions {
        custom_params: cli.custom_params,
        archetypes: cli.archetypes,
        faction_match: cli.faction_match,
        keep_going: cli.keep_going,
    };

    let output = if cli.dry_run {
        Output::DryRun
    } else {
        Output::File {
            path: &cli.output_file,
            pretty: cli.pretty,
        }
    };

    let stats = reshape::run(&unitdefs_dir, output, &options)?;
    info!("{}", stats);

    Ok(())
}

/// Log filter directive: `--debug` wins over `RUST_LOG`, which wins over the default.
fn log_filter(debug: bool, env_directive: Option<String>) -> String {
    if debug {
        return "debug".to_string();
    }
    env_directive
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_overrides_rust_log() {
        assert_eq!(log_filter(true, Some("warn".to_string())), "debug");
        assert_eq!(log_filter(false, Some("warn".to_string())), "warn");
        assert_eq!(log_filter(false, Some(String::new())), "info");
        assert_eq!(log_filter(false, None), "info");
    }

    #[test]
    fn test_cli_parses_policies() {
        let cli = Cli::parse_from([
            "unitdefs-reshaper",
            "--unitdefs-dir",
            "json_export",
            "-d",
            "--archetypes",
            "strict",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.archetypes, ArchetypePolicy::Strict);
        assert_eq!(cli.output_file, PathBuf::from("./unitdefs.json"));
    }
}
