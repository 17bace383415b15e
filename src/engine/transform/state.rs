//! Local state migration: `data` fields and computed accessors.

use super::MigrationContext;
use crate::engine::classify::MemberRole;
use crate::engine::code::object_literal;
use crate::engine::model::MemberKind;
use crate::engine::options::{OptionsObject, SectionKind, keyed};
use crate::error::MigrateError;

pub fn migrate(
    ctx: &MigrationContext,
    mut options: OptionsObject,
) -> Result<OptionsObject, MigrateError> {
    migrate_data(ctx, &mut options)?;
    migrate_computed(ctx, &mut options)?;
    Ok(options)
}

/// Undecorated instance properties become fields of the `data()` function;
/// a class `data()` method already is that function and is hoisted verbatim.
fn migrate_data(ctx: &MigrationContext, options: &mut OptionsObject) -> Result<(), MigrateError> {
    for member in ctx.members_with(MemberRole::Data) {
        match member.kind {
            MemberKind::Method => options.set_raw_section(SectionKind::Data, member.render())?,
            _ => {
                let initializer = member.initializer.as_deref().unwrap_or("undefined");
                options.add_entry(
                    SectionKind::Data,
                    &member.name,
                    keyed(&member.name, initializer),
                )?;
            }
        }
    }
    Ok(())
}

/// Getters become computed entries: a bare function when unpaired, a
/// `{ get, set }` pair when a setter shares the name. Setter-only members
/// are claimed by the watch transformer instead.
fn migrate_computed(
    ctx: &MigrationContext,
    options: &mut OptionsObject,
) -> Result<(), MigrateError> {
    for getter in ctx.members_with(MemberRole::Getter) {
        match ctx.setter_of(&getter.name) {
            Some(setter) => {
                let pair = object_literal(&[getter.render_as("get"), setter.render_as("set")]);
                options.add_entry(
                    SectionKind::Computed,
                    &getter.name,
                    keyed(&getter.name, &pair),
                )?;
            }
            None => {
                options.add_entry(SectionKind::Computed, &getter.name, getter.render())?;
            }
        }
    }
    Ok(())
}
