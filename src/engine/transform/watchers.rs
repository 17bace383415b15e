//! Reactive callback migration: unpaired setters and `@Watch` methods.
//!
//! A setter with no matching getter becomes a watch entry whose handler is
//! the setter body. `@Watch` methods move bodily into the watch section,
//! keyed by the watched expression; several decorations targeting the same
//! expression accumulate one ordered handler list.

use super::MigrationContext;
use crate::engine::classify::MemberRole;
use crate::engine::code::object_literal;
use crate::engine::options::{OptionsObject, SectionKind, keyed};
use crate::error::MigrateError;

pub fn migrate(
    ctx: &MigrationContext,
    mut options: OptionsObject,
) -> Result<OptionsObject, MigrateError> {
    for setter in ctx.members_with(MemberRole::Setter) {
        if ctx.getter_of(&setter.name).is_some() {
            // Paired accessors were already collapsed into computed.
            continue;
        }
        let value = object_literal(&[setter.render_as("handler")]);
        options.add_entry(
            SectionKind::Watch,
            &setter.name,
            keyed(&setter.name, &value),
        )?;
    }

    for member in ctx.members_with(MemberRole::Watcher) {
        for decorator in &member.decorators {
            let Some(target) = decorator.args.first().and_then(|a| a.as_string()) else {
                return Err(MigrateError::unsupported_member(
                    &member.name,
                    "the @Watch target must be a string literal",
                ));
            };
            if decorator.args.len() > 2 {
                return Err(MigrateError::unsupported_member(
                    &member.name,
                    "@Watch takes at most two arguments",
                ));
            }

            let mut entries = vec![member.render_as("handler")];
            if let Some(watch_options) = decorator.args.get(1) {
                let props = watch_options.object_props.as_ref().ok_or_else(|| {
                    MigrateError::unsupported_member(
                        &member.name,
                        "the @Watch options must be an object literal",
                    )
                })?;
                entries.extend(props.iter().map(|p| p.text.clone()));
            }

            options.append_watch_handler(target, object_literal(&entries))?;
        }
    }

    Ok(options)
}
