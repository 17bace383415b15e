//! Structural migration: the `@Component` argument seed and the superclass.

use super::MigrationContext;
use crate::engine::model::SuperClass;
use crate::engine::options::OptionsObject;
use crate::error::MigrateError;

pub fn migrate(
    ctx: &MigrationContext,
    mut options: OptionsObject,
) -> Result<OptionsObject, MigrateError> {
    // The @Component argument object seeds the head of the options object,
    // properties verbatim (`name`, `components`, ...).
    for prop in &ctx.component.decorator_props {
        options.add_seed(prop.key.as_deref(), prop.text.clone())?;
    }

    match &ctx.component.super_class {
        // `extends Vue` is the implicit base and disappears.
        Some(SuperClass::Base(base)) if base == "Vue" => {}
        Some(SuperClass::Base(base)) => {
            options.add_structure("extends", format!("extends: {}", base))?;
        }
        Some(SuperClass::Mixins(args)) => {
            options.add_structure("mixins", format!("mixins: [{}]", args.join(", ")))?;
        }
        None => {}
    }

    Ok(options)
}
