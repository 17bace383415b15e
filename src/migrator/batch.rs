//! Directory-mode driver.
//!
//! Discovery walks the tree for `.ts`/`.vue` files mentioning `@Component`
//! (the original's quick eligibility filter), then migrates task-per-file
//! with rayon. Failure domains are independent: one failing file records a
//! failure and never rolls back or blocks completed siblings. With
//! `fail_fast`, tasks that have not started when a failure lands record a
//! skip instead of running.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use super::{migrate_file, vue_file_to_sfc};
use crate::config::MigratorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Migrated,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn migrated(path: PathBuf) -> Self {
        Self {
            path,
            status: FileStatus::Migrated,
            error: None,
        }
    }

    pub fn skipped(path: PathBuf) -> Self {
        Self {
            path,
            status: FileStatus::Skipped,
            error: None,
        }
    }

    pub fn failed(path: PathBuf, error: String) -> Self {
        Self {
            path,
            status: FileStatus::Failed,
            error: Some(error),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub reports: Vec<FileReport>,
}

impl BatchReport {
    pub fn count(&self, status: FileStatus) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.count(FileStatus::Failed) > 0
    }
}

#[derive(Debug)]
pub struct BatchOptions {
    pub config: MigratorConfig,
    pub to_sfc: bool,
    pub fail_fast: bool,
}

/// Migrate every eligible file under `dir`. The returned report carries one
/// outcome per discovered file; completed migrations are never undone.
pub fn migrate_directory(dir: &Path, options: &BatchOptions) -> Result<BatchReport> {
    let ignores = compile_ignores(&options.config.ignores)?;
    let files = discover_files(dir, &ignores);

    let stop = AtomicBool::new(false);
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| {
            if options.fail_fast && stop.load(Ordering::Relaxed) {
                return FileReport::skipped(path.clone());
            }
            match migrate_file(path, &options.config) {
                Ok(()) => FileReport::migrated(path.clone()),
                Err(err) => {
                    stop.store(true, Ordering::Relaxed);
                    FileReport::failed(path.clone(), format!("{:#}", err))
                }
            }
        })
        .collect();

    let report = BatchReport { reports };

    // The conversion pass only runs over a fully migrated tree, matching the
    // original's early return on any batch error.
    if options.to_sfc && !report.has_failures() {
        for path in discover_vue_files(dir, &ignores) {
            vue_file_to_sfc(&path)
                .with_context(|| format!("Error converting {} to SFC", path.display()))?;
        }
    }

    Ok(report)
}

fn compile_ignores(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
        })
        .collect()
}

/// Eligible migration inputs: `.ts`/`.vue` files outside `node_modules`
/// whose text mentions the `@Component` marker.
pub fn discover_files(dir: &Path, ignores: &[Pattern]) -> Vec<PathBuf> {
    walk(dir, ignores, &["ts", "vue"])
        .into_iter()
        .filter(|path| {
            fs::read_to_string(path)
                .map(|text| text.contains("@Component"))
                .unwrap_or(false)
        })
        .collect()
}

fn discover_vue_files(dir: &Path, ignores: &[Pattern]) -> Vec<PathBuf> {
    walk(dir, ignores, &["vue"])
}

fn walk(dir: &Path, ignores: &[Pattern], extensions: &[&str]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != "node_modules")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .filter(|path| !ignores.iter().any(|pattern| pattern.matches_path(path)))
        .collect();
    files.sort();
    files
}
