//! Store binding migration: vuex-class decorators become root-level spreads
//! of the corresponding vuex binding helper, one spread per helper.

use super::MigrationContext;
use crate::engine::classify::{MemberRole, StoreKind};
use crate::engine::model::ClassMember;
use crate::error::MigrateError;
use crate::engine::options::OptionsObject;

const STORE_KINDS: [StoreKind; 4] = [
    StoreKind::State,
    StoreKind::Getter,
    StoreKind::Mutation,
    StoreKind::Action,
];

pub fn migrate(
    ctx: &MigrationContext,
    mut options: OptionsObject,
) -> Result<OptionsObject, MigrateError> {
    for kind in STORE_KINDS {
        let members: Vec<&ClassMember> = ctx
            .members_with(MemberRole::StoreBinding(kind))
            .collect();
        if members.is_empty() {
            continue;
        }

        let mut bindings = Vec::with_capacity(members.len());
        for member in &members {
            bindings.push((member.name.clone(), binding_path(member)?));
        }

        // Array form when every member binds its own name, object form when
        // any binding aliases a different store path.
        let all_plain = bindings.iter().all(|(name, path)| path == name);
        let body = if all_plain {
            format!(
                "[{}]",
                bindings
                    .iter()
                    .map(|(name, _)| format!("'{}'", name))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        } else {
            format!(
                "{{ {} }}",
                bindings
                    .iter()
                    .map(|(name, path)| format!("{}: '{}'", name, path))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };

        options.add_spread(kind.helper(), format!("...{}({})", kind.helper(), body));
    }
    Ok(options)
}

/// The store path is the decorator argument; without one the member name is
/// its own path.
fn binding_path(member: &ClassMember) -> Result<String, MigrateError> {
    let decorator = &member.decorators[0];
    match decorator.args.first() {
        None => Ok(member.name.clone()),
        Some(arg) => {
            if decorator.args.len() > 1 {
                return Err(MigrateError::unsupported_member(
                    &member.name,
                    "store binding decorators take at most one argument",
                ));
            }
            arg.as_string().map(|s| s.to_string()).ok_or_else(|| {
                MigrateError::unsupported_member(
                    &member.name,
                    "the store binding path must be a string literal",
                )
            })
        }
    }
}
