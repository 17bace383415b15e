//! Per-file migration drivers.
//!
//! A file's on-disk content is either fully the original or fully the
//! migrated result: the engine runs to completion in memory, output is
//! staged in a scratch file next to the original, and only a fully
//! successful migration is renamed over it. Scratch files are removed on
//! success and failure alike.

pub mod batch;
pub mod sfc;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::MigratorConfig;
use crate::engine;
use crate::error::MigrateError;

pub use batch::{BatchOptions, BatchReport, FileReport, FileStatus, migrate_directory};
pub use sfc::vue_file_to_sfc;

/// Migrate one file in place, dispatching on its extension.
pub fn migrate_file(path: &Path, config: &MigratorConfig) -> Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    // Idempotency guard: without the marker there is nothing left to do.
    if !source.contains("@Component") {
        return Err(MigrateError::AlreadyMigrated.into());
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("ts") => migrate_ts_file(path, &source, config),
        Some("vue") => migrate_vue_file(path, &source, config),
        other => {
            Err(MigrateError::UnsupportedExtension(other.unwrap_or("").to_string()).into())
        }
    }
}

/// Migrate a TypeScript program file: stage the result as
/// `<stem>_migrated.ts`, then atomically rename it over the original.
fn migrate_ts_file(path: &Path, source: &str, config: &MigratorConfig) -> Result<()> {
    let migrated = engine::migrate_script(source, &path.to_string_lossy(), config)?;

    let staged = suffixed_path(path, "_migrated");
    fs::write(&staged, &migrated)
        .with_context(|| format!("Failed to write {}", staged.display()))?;
    if let Err(err) = fs::rename(&staged, path) {
        let _ = fs::remove_file(&staged);
        return Err(err).with_context(|| format!("Failed to replace {}", path.display()));
    }
    Ok(())
}

/// Migrate a `.vue` document: extract the script block into a scratch
/// program file, migrate that, and re-inject the result at the extracted
/// range. All non-script blocks come through byte-identical.
fn migrate_vue_file(path: &Path, source: &str, config: &MigratorConfig) -> Result<()> {
    let range = sfc::script_content_range(source)?;

    let scratch = scratch_ts_path(path);
    fs::write(&scratch, &source[range.clone()])
        .with_context(|| format!("Failed to write {}", scratch.display()))?;

    let outcome = migrate_ts_file(&scratch, &source[range.clone()], config).and_then(|_| {
        fs::read_to_string(&scratch)
            .with_context(|| format!("Failed to read {}", scratch.display()))
    });
    let _ = fs::remove_file(&scratch);
    let migrated_script = outcome?;

    let document = sfc::inject_script(source, &migrated_script)?;
    let staged = suffixed_path(path, "_migrated");
    fs::write(&staged, &document)
        .with_context(|| format!("Failed to write {}", staged.display()))?;
    if let Err(err) = fs::rename(&staged, path) {
        let _ = fs::remove_file(&staged);
        return Err(err).with_context(|| format!("Failed to replace {}", path.display()));
    }
    Ok(())
}

fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("migration");
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => path.with_file_name(format!("{}{}.{}", stem, suffix, ext)),
        None => path.with_file_name(format!("{}{}", stem, suffix)),
    }
}

fn scratch_ts_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("migration");
    path.with_file_name(format!("{}_temp_migrated.ts", stem))
}
