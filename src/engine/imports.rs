//! Import migration.
//!
//! Imports from the class-component decorator packages are removed and
//! replaced by a named import of `defineComponent` (plus `PropType` and the
//! vuex binding helpers when the generated code references them). Named
//! imports that already target the destination modules are merged instead of
//! duplicated; every other import is left byte-identical.

use std::ops::Range;

use swc_common::Spanned;
use swc_ecma_ast::{ImportDecl, ImportSpecifier, ModuleDecl, ModuleItem};

use crate::config::MIGRATED_MODULES;
use crate::engine::code::Edit;
use crate::engine::options::Needs;
use crate::engine::parse::ParsedScript;

pub fn rewrite(parsed: &ParsedScript, needs: &Needs, import_source: &str) -> Vec<Edit> {
    let mut vue_names: Vec<String> = vec!["defineComponent".to_string()];
    if needs.prop_type {
        vue_names.push("PropType".to_string());
    }
    let mut vuex_names: Vec<String> = needs.vuex_helpers.iter().map(|h| h.to_string()).collect();

    let mut removals: Vec<Range<usize>> = Vec::new();

    for item in &parsed.module.body {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
            continue;
        };
        let Some(src) = import.src.value.as_str() else {
            continue;
        };

        if MIGRATED_MODULES.contains(&src) {
            removals.push(import_range(parsed, import));
        } else if src == import_source {
            if let Some(existing) = named_specifier_texts(parsed, import) {
                merge_names(&mut vue_names, existing);
                removals.push(import_range(parsed, import));
            }
        } else if src == "vuex" && !vuex_names.is_empty() {
            if let Some(existing) = named_specifier_texts(parsed, import) {
                merge_names(&mut vuex_names, existing);
                removals.push(import_range(parsed, import));
            }
        }
    }

    let mut lines = vec![format!(
        "import {{ {} }} from '{}';",
        vue_names.join(", "),
        import_source
    )];
    if !vuex_names.is_empty() {
        lines.push(format!(
            "import {{ {} }} from 'vuex';",
            vuex_names.join(", ")
        ));
    }
    let block = lines.join("\n");

    let mut edits: Vec<Edit> = Vec::new();
    match removals.first() {
        // The rewritten imports take the place of the first removed one.
        Some(first) => {
            edits.push(Edit {
                range: first.clone(),
                text: format!("{}\n", block),
            });
            edits.extend(removals.into_iter().skip(1).map(|range| Edit {
                range,
                text: String::new(),
            }));
        }
        None => {
            edits.push(Edit {
                range: 0..0,
                text: format!("{}\n", block),
            });
        }
    }
    edits
}

/// Existing specifier texts of a mergeable (purely named, value) import.
fn named_specifier_texts(parsed: &ParsedScript, import: &ImportDecl) -> Option<Vec<String>> {
    if import.type_only {
        return None;
    }
    let mut texts = Vec::with_capacity(import.specifiers.len());
    for specifier in &import.specifiers {
        match specifier {
            ImportSpecifier::Named(named) if !named.is_type_only => {
                texts.push(parsed.snippet(named.span()).to_string());
            }
            _ => return None,
        }
    }
    Some(texts)
}

/// Keep the existing names first, then ours, without duplicates.
fn merge_names(names: &mut Vec<String>, existing: Vec<String>) {
    let added = std::mem::replace(names, existing);
    for name in added {
        if !names.contains(&name) {
            names.push(name);
        }
    }
}

/// The import statement plus its trailing newline.
fn import_range(parsed: &ParsedScript, import: &ImportDecl) -> Range<usize> {
    let start = parsed.offset(import.span.lo);
    let mut end = parsed.offset(import.span.hi);
    let bytes = parsed.source().as_bytes();
    if bytes.get(end) == Some(&b'\r') {
        end += 1;
    }
    if bytes.get(end) == Some(&b'\n') {
        end += 1;
    }
    start..end
}
