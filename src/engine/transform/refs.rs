//! `@Ref` migration: template ref accessors as uncached computed entries.

use super::MigrationContext;
use crate::engine::classify::MemberRole;
use crate::engine::code::{is_identifier, object_literal};
use crate::engine::options::{OptionsObject, SectionKind, keyed};
use crate::error::MigrateError;

pub fn migrate(
    ctx: &MigrationContext,
    mut options: OptionsObject,
) -> Result<OptionsObject, MigrateError> {
    for member in ctx.members_with(MemberRole::Ref) {
        let decorator = &member.decorators[0];
        let target = match decorator.args.first() {
            Some(arg) => arg
                .as_string()
                .ok_or_else(|| {
                    MigrateError::unsupported_member(
                        &member.name,
                        "the @Ref key must be a string literal",
                    )
                })?
                .to_string(),
            None => member.name.clone(),
        };
        if decorator.args.len() > 1 {
            return Err(MigrateError::unsupported_member(
                &member.name,
                "@Ref takes at most one argument",
            ));
        }

        let access = refs_access(&target);
        let body = match &member.type_ann {
            Some(t) => format!("get() {{\n  return {} as {};\n}}", access, t),
            None => format!("get() {{\n  return {};\n}}", access),
        };
        // $refs access must not be cached.
        let value = object_literal(&["cache: false".to_string(), body]);
        options.add_entry(
            SectionKind::Computed,
            &member.name,
            keyed(&member.name, &value),
        )?;
    }
    Ok(options)
}

fn refs_access(target: &str) -> String {
    if is_identifier(target) {
        format!("this.$refs.{}", target)
    } else {
        format!("this.$refs['{}']", target.replace('\'', "\\'"))
    }
}
