//! Text carpentry for verbatim fragments.
//!
//! The engine never re-prints code from the AST: statement bodies, parameter
//! lists and type annotations are byte ranges sliced out of the original
//! source. The helpers here normalize such fragments to a relative
//! indentation (first line at column zero) so they can be nested anywhere in
//! the generated object literal, and splice replacement ranges back into the
//! original text.

use std::ops::Range;

pub const INDENT: &str = "  ";

/// A replacement of one byte range of the source text.
#[derive(Debug)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

/// Apply non-overlapping edits to `source`, regardless of the order given.
/// A zero-width insertion sorts before a replacement starting at the same
/// offset.
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| (e.range.start, e.range.end));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        debug_assert!(edit.range.start >= cursor, "overlapping edits");
        out.push_str(&source[cursor..edit.range.start]);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Strip the common leading whitespace from every line after the first.
///
/// Sliced fragments keep the indentation of their position in the source
/// file; dedenting makes them relative so `indent_by` can re-nest them.
pub fn dedent(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }

    let mut common: Option<&str> = None;
    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let ws = leading_whitespace(line);
        common = Some(match common {
            None => ws,
            Some(prev) => common_prefix(prev, ws),
        });
    }
    let common_len = common.map_or(0, str::len);

    let mut lines = text.lines();
    let mut out = String::with_capacity(text.len());
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(&line[common_len.min(leading_whitespace(line).len())..]);
    }
    out
}

/// Prefix every line after the first with `pad`, leaving blank lines bare.
pub fn indent_by(text: &str, pad: &str) -> String {
    let mut lines = text.lines();
    let mut out = String::with_capacity(text.len());
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        if !line.trim().is_empty() {
            out.push_str(pad);
            out.push_str(line);
        }
    }
    out
}

/// `{}` when empty, otherwise entries each on their own line, one level in.
pub fn object_literal(entries: &[String]) -> String {
    wrap_entries(entries, '{', '}')
}

/// `[]` when empty, otherwise entries each on their own line, one level in.
pub fn array_literal(entries: &[String]) -> String {
    wrap_entries(entries, '[', ']')
}

fn wrap_entries(entries: &[String], open: char, close: char) -> String {
    if entries.is_empty() {
        return format!("{}{}", open, close);
    }
    let body = entries
        .iter()
        .map(|e| format!("{}{}", INDENT, indent_by(e, INDENT)))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{}\n{}\n{}", open, body, close)
}

/// Object keys stay bare when they are valid identifiers, otherwise they are
/// single-quoted (`'person.name'`).
pub fn quote_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        format!("'{}'", key.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
