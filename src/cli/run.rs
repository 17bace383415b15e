//! Command dispatch.
//!
//! Resolves the effective configuration (CLI arguments over the optional
//! `.vuemigraterc.json` over defaults) and drives the per-file or
//! per-directory migration, returning the per-path outcome report.

use std::path::Path;

use anyhow::Result;

use super::args::{Arguments, Command, CommonArgs, DirCommand, FileCommand};
use crate::config::{MigratorConfig, load_config};
use crate::migrator::{
    BatchOptions, BatchReport, FileReport, migrate_directory, migrate_file, vue_file_to_sfc,
};

/// What a command produced, plus how the user asked to see it.
pub struct RunOutput {
    pub report: BatchReport,
    pub json: bool,
}

pub fn run(Arguments { command }: Arguments) -> Result<RunOutput> {
    match command {
        Some(Command::File(cmd)) => run_file(cmd),
        Some(Command::Dir(cmd)) => run_dir(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn resolve_config(common: &CommonArgs, config_dir: &Path) -> Result<MigratorConfig> {
    let mut config = load_config(config_dir)?;
    if let Some(import_source) = &common.import_source {
        config.import_source = import_source.clone();
    }
    Ok(config)
}

fn run_file(cmd: FileCommand) -> Result<RunOutput> {
    let config = resolve_config(&cmd.common, Path::new("."))?;

    let report = match migrate_file(&cmd.path, &config) {
        Ok(()) => {
            if cmd.common.sfc && cmd.path.extension().is_some_and(|e| e == "vue") {
                vue_file_to_sfc(&cmd.path)?;
            }
            FileReport::migrated(cmd.path)
        }
        Err(err) => FileReport::failed(cmd.path, format!("{:#}", err)),
    };

    Ok(RunOutput {
        report: BatchReport {
            reports: vec![report],
        },
        json: false,
    })
}

fn run_dir(cmd: DirCommand) -> Result<RunOutput> {
    let mut config = resolve_config(&cmd.common, &cmd.path)?;
    config.ignores.extend(cmd.ignore.iter().cloned());
    config.validate()?;

    let options = BatchOptions {
        config,
        to_sfc: cmd.common.sfc,
        fail_fast: cmd.fail_fast,
    };
    let report = migrate_directory(&cmd.path, &options)?;

    Ok(RunOutput {
        report,
        json: cmd.json,
    })
}
