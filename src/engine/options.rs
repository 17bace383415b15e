//! The output options object builder.
//!
//! `OptionsObject` is the single mutable value of a migration: transformers
//! write entries into named sections (`props`, `data`, `computed`, `watch`,
//! `methods`) or at the object root, and `render` emits the final literal.
//! Sections are created on first use and always render in the style-guide
//! order, regardless of which transformer touched them first. Keys are never
//! overwritten: a collision after classification indicates a taxonomy
//! ambiguity and fails the file.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;

use crate::engine::code::{INDENT, array_literal, indent_by, object_literal, quote_key};
use crate::error::MigrateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Props,
    Data,
    Computed,
    Watch,
    Methods,
}

impl SectionKind {
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Props => "props",
            SectionKind::Data => "data",
            SectionKind::Computed => "computed",
            SectionKind::Watch => "watch",
            SectionKind::Methods => "methods",
        }
    }

    /// Render order: structure, interface, state, reactive callbacks,
    /// behavior. Root hooks and store spreads follow all sections.
    const ORDER: [SectionKind; 5] = [
        SectionKind::Props,
        SectionKind::Data,
        SectionKind::Computed,
        SectionKind::Watch,
        SectionKind::Methods,
    ];
}

#[derive(Debug)]
enum SectionValue {
    /// A complete entry, key included (`doSomething() { ... }`).
    Entry(String),
    /// Watch handler descriptors accumulating under one watched expression.
    Handlers(Vec<String>),
}

/// Identifiers the generated code references, driving import synthesis.
#[derive(Debug, Default)]
pub struct Needs {
    pub prop_type: bool,
    pub vuex_helpers: BTreeSet<&'static str>,
}

#[derive(Debug, Default)]
pub struct OptionsObject {
    /// Verbatim properties of the `@Component` argument, emitted first.
    seed: Vec<String>,
    /// `extends` / `mixins` entries.
    structure: Vec<String>,
    /// `model: { prop, event }`.
    model: Option<String>,
    sections: IndexMap<SectionKind, IndexMap<String, SectionValue>>,
    /// A whole section provided verbatim (a class `data()` method).
    raw_sections: IndexMap<SectionKind, String>,
    /// Lifecycle and Nuxt hooks, in source declaration order.
    root_methods: Vec<String>,
    /// Store binding helper spreads, emitted last.
    spreads: Vec<String>,
    root_keys: HashSet<String>,
    pub needs: Needs,
}

impl OptionsObject {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim_root_key(&mut self, key: &str) -> Result<(), MigrateError> {
        if !self.root_keys.insert(key.to_string()) {
            return Err(MigrateError::duplicate("root", key));
        }
        Ok(())
    }

    /// Seed a verbatim `@Component` argument property.
    pub fn add_seed(&mut self, key: Option<&str>, entry: String) -> Result<(), MigrateError> {
        if let Some(key) = key {
            self.claim_root_key(key)?;
        }
        self.seed.push(entry);
        Ok(())
    }

    /// Add an `extends`/`mixins` structure entry.
    pub fn add_structure(&mut self, key: &str, entry: String) -> Result<(), MigrateError> {
        self.claim_root_key(key)?;
        self.structure.push(entry);
        Ok(())
    }

    pub fn set_model(&mut self, entry: String) -> Result<(), MigrateError> {
        self.claim_root_key("model")?;
        self.model = Some(entry);
        Ok(())
    }

    /// Insert a complete entry into a section, creating the section at its
    /// mandated position if needed. Duplicate keys fail loudly.
    pub fn add_entry(
        &mut self,
        kind: SectionKind,
        key: &str,
        entry: String,
    ) -> Result<(), MigrateError> {
        let section = self.section_mut(kind)?;
        if section.contains_key(key) {
            return Err(MigrateError::duplicate(kind.name(), key));
        }
        section.insert(key.to_string(), SectionValue::Entry(entry));
        Ok(())
    }

    /// Append a handler descriptor to a watched expression's ordered list.
    pub fn append_watch_handler(
        &mut self,
        target: &str,
        handler: String,
    ) -> Result<(), MigrateError> {
        let section = self.section_mut(SectionKind::Watch)?;
        match section.get_mut(target) {
            None => {
                section.insert(target.to_string(), SectionValue::Handlers(vec![handler]));
                Ok(())
            }
            Some(SectionValue::Handlers(handlers)) => {
                handlers.push(handler);
                Ok(())
            }
            Some(SectionValue::Entry(_)) => {
                Err(MigrateError::duplicate(SectionKind::Watch.name(), target))
            }
        }
    }

    /// Provide a whole section verbatim (a class `data()` method becomes the
    /// root `data` entry). Conflicts with per-entry use of the same section.
    pub fn set_raw_section(&mut self, kind: SectionKind, text: String) -> Result<(), MigrateError> {
        if self.sections.contains_key(&kind) || self.raw_sections.contains_key(&kind) {
            return Err(MigrateError::duplicate("root", kind.name()));
        }
        self.claim_root_key(kind.name())?;
        self.raw_sections.insert(kind, text);
        Ok(())
    }

    pub fn add_root_method(&mut self, name: &str, entry: String) -> Result<(), MigrateError> {
        self.claim_root_key(name)?;
        self.root_methods.push(entry);
        Ok(())
    }

    pub fn add_spread(&mut self, helper: &'static str, entry: String) {
        self.needs.vuex_helpers.insert(helper);
        self.spreads.push(entry);
    }

    fn section_mut(
        &mut self,
        kind: SectionKind,
    ) -> Result<&mut IndexMap<String, SectionValue>, MigrateError> {
        if self.raw_sections.contains_key(&kind) {
            return Err(MigrateError::duplicate("root", kind.name()));
        }
        if !self.sections.contains_key(&kind) {
            self.claim_root_key(kind.name())?;
            self.sections.insert(kind, IndexMap::new());
        }
        Ok(self.sections.get_mut(&kind).expect("section just ensured"))
    }

    /// Render the options object literal, sections in style-guide order.
    pub fn render(&self) -> String {
        let mut entries: Vec<String> = Vec::new();
        entries.extend(self.seed.iter().cloned());
        entries.extend(self.structure.iter().cloned());
        entries.extend(self.model.iter().cloned());

        for kind in SectionKind::ORDER {
            if let Some(raw) = self.raw_sections.get(&kind) {
                entries.push(raw.clone());
                continue;
            }
            let Some(section) = self.sections.get(&kind) else {
                continue;
            };
            let rendered: Vec<String> = section
                .iter()
                .map(|(key, value)| match value {
                    SectionValue::Entry(entry) => entry.clone(),
                    SectionValue::Handlers(handlers) => {
                        format!("'{}': {}", key.replace('\'', "\\'"), array_literal(handlers))
                    }
                })
                .collect();
            let body = object_literal(&rendered);
            if kind == SectionKind::Data {
                // data is a function returning the field map.
                entries.push(format!(
                    "data() {{\n{pad}return {};\n}}",
                    indent_by(&body, INDENT),
                    pad = INDENT
                ));
            } else {
                entries.push(format!("{}: {}", kind.name(), body));
            }
        }

        entries.extend(self.root_methods.iter().cloned());
        entries.extend(self.spreads.iter().cloned());

        object_literal(&entries)
    }
}

/// Render a plain `key: value` entry.
pub fn keyed(key: &str, value: &str) -> String {
    format!("{}: {}", quote_key(key), value)
}
