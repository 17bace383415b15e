//! The migration engine.
//!
//! Takes one TypeScript program text containing a default-exported
//! `@Component` class and returns the same program with the class replaced
//! by an equivalent `export default defineComponent({ ... })` options
//! object and its decorator-package imports rewritten. Everything outside
//! the two replaced ranges is returned byte-identical.

pub mod classify;
pub mod code;
pub mod imports;
pub mod model;
pub mod options;
pub mod parse;
pub mod transform;

#[cfg(test)]
mod tests;

use crate::config::MigratorConfig;
use crate::engine::code::{Edit, apply_edits};
use crate::error::MigrateError;

/// Migrate one program text. On any error the input is returned untouched to
/// the caller's discretion; nothing here performs I/O.
pub fn migrate_script(
    source: &str,
    file_path: &str,
    config: &MigratorConfig,
) -> Result<String, MigrateError> {
    let parsed = parse::parse_script(source, file_path)?;
    let component = model::extract_component(&parsed)?;
    let options = transform::run(&component)?;

    let mut edits = vec![Edit {
        range: component.replace_range.clone(),
        text: format!("export default defineComponent({})", options.render()),
    }];
    edits.extend(imports::rewrite(&parsed, &options.needs, &config.import_source));

    Ok(apply_edits(source, edits))
}
