//! Composite document (.vue) surgery.
//!
//! A `.vue` document is plain text with delimited blocks. Only the
//! `<script>` block's inner byte range is ever replaced during migration;
//! template and style blocks pass through untouched. The SFC conversion
//! step additionally inlines `src`-referenced script/style files into their
//! blocks, turning split components into single-file components.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::MigrateError;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script([^>]*)>(.*?)</script>").unwrap());

/// Script and style tags in either normal or self-closing form, for the SFC
/// conversion pass.
static SCRIPT_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script([^>]*?)\s*(?:/>|>(?:.*?)</script>)").unwrap());
static STYLE_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style([^>]*?)\s*(?:/>|>(?:.*?)</style>)").unwrap());

static SRC_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\s*\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

/// Byte range of the `<script>` block's inner text.
pub fn script_content_range(document: &str) -> Result<Range<usize>, MigrateError> {
    let caps = SCRIPT_BLOCK
        .captures(document)
        .ok_or(MigrateError::ScriptNotFound)?;
    let content = caps.get(2).ok_or(MigrateError::ScriptNotFound)?;
    Ok(content.start()..content.end())
}

pub fn script_content(document: &str) -> Result<&str, MigrateError> {
    let range = script_content_range(document)?;
    Ok(&document[range])
}

/// Replace the script block's inner text; every other byte is unchanged.
pub fn inject_script(document: &str, migrated: &str) -> Result<String, MigrateError> {
    let range = script_content_range(document)?;
    let mut out = String::with_capacity(document.len() + migrated.len());
    out.push_str(&document[..range.start]);
    out.push_str(migrated);
    out.push_str(&document[range.end..]);
    Ok(out)
}

/// Restructure a `.vue` document into single-file layout: blocks referencing
/// external files via `src="…"` get that text inlined and the referenced
/// file removed. Returns whether the document changed.
pub fn vue_file_to_sfc(path: &Path) -> Result<bool> {
    let document = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut inlined: Vec<PathBuf> = Vec::new();
    let step = inline_tag(&document, &SCRIPT_ANY, "script", dir, &mut inlined)?;
    let converted = inline_tag(&step, &STYLE_ANY, "style", dir, &mut inlined)?;

    if converted == document {
        return Ok(false);
    }
    fs::write(path, &converted).with_context(|| format!("Failed to write {}", path.display()))?;
    // The referenced text moved into the document; the split-out files are
    // part of the old layout.
    for file in inlined {
        let _ = fs::remove_file(file);
    }
    Ok(true)
}

fn inline_tag(
    document: &str,
    blocks: &Regex,
    tag: &str,
    dir: &Path,
    inlined: &mut Vec<PathBuf>,
) -> Result<String> {
    let mut out = String::with_capacity(document.len());
    let mut cursor = 0;

    for caps in blocks.captures_iter(document) {
        let whole = caps.get(0).expect("whole match");
        let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let Some(src_caps) = SRC_ATTR.captures(attrs) else {
            continue;
        };
        let src = src_caps
            .get(1)
            .or_else(|| src_caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");

        let file = dir.join(src);
        let mut content = fs::read_to_string(&file)
            .with_context(|| format!("Failed to inline {}", file.display()))?;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        let kept_attrs = SRC_ATTR.replace(attrs, "");

        out.push_str(&document[cursor..whole.start()]);
        out.push_str(&format!("<{tag}{kept_attrs}>\n{content}</{tag}>"));
        cursor = whole.end();
        inlined.push(file);
    }

    out.push_str(&document[cursor..]);
    Ok(out)
}
