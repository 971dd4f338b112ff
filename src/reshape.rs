//! Reshaping of a whole unitdefs export directory

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::classify::Diagnostic;
use crate::config::ReshapeOptions;
use crate::extract::{ExtractedUnit, extract_unit};
use crate::index::UnitIndex;
use crate::models::{UnitKind, UnitSummary};
use crate::raw::RawUnitDef;

/// Where the reshaped array goes.
#[derive(Debug, Clone, Copy)]
pub enum Output<'a> {
    File { path: &'a Path, pretty: bool },
    /// Process everything but write nothing.
    DryRun,
}

#[derive(Debug)]
pub struct Reshaped {
    pub units: Vec<UnitSummary>,
    pub index: UnitIndex,
    pub stats: ReshapeStats,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReshapeStats {
    pub units: usize,
    pub unclassified: usize,
    pub unexpected_archetypes: usize,
    pub weapon_defs: usize,
    pub failed: usize,
}

impl std::fmt::Display for ReshapeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reshaped {} unitdefs ({} unclassified, {} unexpected archetypes, {} weapon defs). Failed: {}",
            self.units, self.unclassified, self.unexpected_archetypes, self.weapon_defs, self.failed
        )
    }
}

/// Reshape every unitdef in `unitdefs_dir` and write the result.
///
/// The output file is either written completely or left untouched.
pub fn run(
    unitdefs_dir: &Path,
    output: Output<'_>,
    options: &ReshapeOptions,
) -> Result<ReshapeStats> {
    let reshaped = process_unitdefs(unitdefs_dir, options)?;
    debug!(
        "Processed raw unitdefs, indexed {} unit ids",
        reshaped.index.unit_count()
    );

    match output {
        Output::File { path, pretty } => {
            write_output(path, &reshaped.units, pretty)?;
            info!("Wrote {} units to {}", reshaped.units.len(), path.display());
        }
        Output::DryRun => info!("Dry run, not writing output"),
    }

    Ok(reshaped.stats)
}

/// Find all unitdef JSON files directly inside `unitdefs_dir`, sorted by name
pub fn find_unitdef_files(unitdefs_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(unitdefs_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list {}", unitdefs_dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        } else {
            debug!("Skipping {}", path.display());
        }
    }

    Ok(files)
}

/// Reshape all unitdefs of a directory, in file name order.
pub fn process_unitdefs(unitdefs_dir: &Path, options: &ReshapeOptions) -> Result<Reshaped> {
    let mut index = UnitIndex::new();
    let mut units = Vec::new();
    let mut stats = ReshapeStats::default();

    let files = find_unitdef_files(unitdefs_dir)?;
    info!("Found {} unitdef files in {}", files.len(), unitdefs_dir.display());

    for path in &files {
        match reshape_file(path, &mut index, options) {
            Ok(unit) => {
                for diagnostic in &unit.diagnostics {
                    match diagnostic {
                        Diagnostic::UnclassifiedKind { .. } => {
                            warn!("{diagnostic}");
                            stats.unclassified += 1;
                        }
                        Diagnostic::UnexpectedArchetype { .. } => {
                            error!("{diagnostic}");
                            stats.unexpected_archetypes += 1;
                        }
                    }
                }
                units.push(unit.summary);
            }
            Err(e) if options.keep_going => {
                error!("Skipping {}: {e:#}", path.display());
                stats.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    stats.units = units.len();
    stats.weapon_defs = index.weapon_def_count();

    Ok(Reshaped {
        units,
        index,
        stats,
    })
}

/// Reshape one unitdef file and register its ids.
fn reshape_file(
    path: &Path,
    index: &mut UnitIndex,
    options: &ReshapeOptions,
) -> Result<ExtractedUnit> {
    info!("Processing {}", path.file_name().unwrap_or_default().to_string_lossy());

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let raw = RawUnitDef::new(&value)
        .with_context(|| format!("Invalid unitdef {}", path.display()))?;
    let unit = extract_unit(&raw, options)
        .with_context(|| format!("Failed to reshape {}", path.display()))?;
    let id = raw
        .required_i64("id")
        .with_context(|| format!("Failed to index {}", path.display()))?;

    let name = unit.summary.name.as_str();
    index.register_unit(id, name);
    let weapons = index.register_weapon_defs(name, raw.weapon_defs());
    debug!(
        "{name} - extracted fields, kind {}, {weapons} weapon defs",
        unit.summary.kind.map_or("none", UnitKind::as_str)
    );

    Ok(unit)
}

/// Serialize `units` as a JSON array to `path` via a temp file and rename.
pub fn write_output(path: &Path, units: &[UnitSummary], pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(units)
    } else {
        serde_json::to_string(units)
    }
    .context("Failed to serialize reshaped units")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let written =
        write_synced(&temp_path, json.as_bytes()).and_then(|()| fs::rename(&temp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to write output to {}", path.display()));
    }

    Ok(())
}

fn write_synced(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
