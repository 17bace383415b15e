//! Behavior migration: lifecycle hooks to the object root, everything else
//! under `methods`. Runs after the other member-consuming phases so claimed
//! members (watchers, data, accessors, props) are already excluded.

use super::MigrationContext;
use crate::engine::classify::MemberRole;
use crate::engine::options::{OptionsObject, SectionKind};
use crate::error::MigrateError;

pub fn migrate(
    ctx: &MigrationContext,
    mut options: OptionsObject,
) -> Result<OptionsObject, MigrateError> {
    for (member, role) in ctx.members() {
        match role {
            MemberRole::RootLifecycle => {
                options.add_root_method(&member.name, member.render())?;
            }
            MemberRole::Method => {
                options.add_entry(SectionKind::Methods, &member.name, member.render())?;
            }
            _ => {}
        }
    }
    Ok(options)
}
