//! Role taxonomy tables and runtime configuration.
//!
//! The name tables here are the single source of truth for member
//! classification: every transformer and the classifier consult these
//! predicates instead of carrying their own lists. Supporting a new
//! decorator or hook means extending a table and providing a transformer.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".vuemigraterc.json";

/// Vue methods that won't be included under `methods: {...}`, they go to the
/// root of the options object.
pub const VUE_LIFECYCLE_HOOKS: &[&str] = &[
    "beforeCreate",
    "created",
    "beforeMount",
    "mounted",
    "beforeUpdate",
    "updated",
    "beforeUnmount",
    "unmounted",
    "errorCaptured",
    "renderTracked",
    "renderTriggered",
    "activated",
    "deactivated",
    "serverPrefetch",
    "destroyed",
];

/// Nuxt application hooks, also located at the root of components.
pub const NUXT_ROOT_METHODS: &[&str] = &[
    "beforeRouteEnter",
    "beforeRouteUpdate",
    "beforeRouteLeave",
    "asyncData",
    "fetch",
    "fetchOnServer",
    "head",
    "key",
    "layout",
    "loading",
    "middleware",
    "scrollToTop",
    "transition",
    "validate",
    "watchQuery",
    "meta",
];

/// vue-property-decorator member decorators the engine understands.
pub const PROPERTY_DECORATORS: &[&str] = &["Prop", "PropSync", "Model", "ModelSync", "Ref", "Watch"];

/// vuex-class member decorators the engine understands.
pub const VUEX_DECORATORS: &[&str] = &["State", "Getter", "Mutation", "Action"];

/// Module specifiers whose imports are removed after migration.
pub const MIGRATED_MODULES: &[&str] = &[
    "vue-class-component",
    "vue-property-decorator",
    "nuxt-property-decorator",
    "vuex-class",
];

/// True for method names placed verbatim at the root of the options object.
pub fn is_lifecycle_hook(name: &str) -> bool {
    VUE_LIFECYCLE_HOOKS.contains(&name) || NUXT_ROOT_METHODS.contains(&name)
}

/// True for the fixed set of member decorators a transformer claims.
pub fn is_recognized_decorator(name: &str) -> bool {
    PROPERTY_DECORATORS.contains(&name) || VUEX_DECORATORS.contains(&name)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratorConfig {
    /// Module the generated `defineComponent` import points at.
    #[serde(default = "default_import_source")]
    pub import_source: String,

    /// Glob patterns excluded from directory discovery.
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_import_source() -> String {
    "vue".to_string()
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self {
            import_source: default_import_source(),
            ignores: Vec::new(),
        }
    }
}

impl MigratorConfig {
    /// Returns an error if any glob pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        Ok(())
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let config_path = start_dir.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Load configuration from `start_dir`, falling back to defaults when no
/// config file is present.
pub fn load_config(start_dir: &Path) -> Result<MigratorConfig> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(MigratorConfig::default());
    };

    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: MigratorConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
