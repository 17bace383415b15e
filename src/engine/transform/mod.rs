//! Per-role transformers and their sequencing.
//!
//! `run` classifies every member once, then threads one owned
//! `OptionsObject` through the phases in the order mandated by the Vue style
//! guide: structure (extends, mixins), interface (props, model), local state
//! (data, computed), template refs, reactive callbacks (watch), behavior
//! (lifecycle hooks, methods), store bindings. Order matters: the methods
//! phase runs last among member-consuming phases so members claimed by
//! earlier roles are never duplicated under `methods`.

mod methods;
mod props;
mod refs;
mod state;
mod store;
mod structure;
mod watchers;

use crate::engine::classify::{MemberRole, classify};
use crate::engine::model::{ClassComponent, ClassMember};
use crate::engine::options::OptionsObject;
use crate::error::MigrateError;

/// Read-only view of one class with every member's role resolved up front.
pub struct MigrationContext<'a> {
    pub component: &'a ClassComponent,
    roles: Vec<MemberRole>,
}

impl<'a> MigrationContext<'a> {
    pub fn new(component: &'a ClassComponent) -> Result<Self, MigrateError> {
        let roles = component
            .members
            .iter()
            .map(classify)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { component, roles })
    }

    /// All members with their roles, in source declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&'a ClassMember, MemberRole)> + '_ {
        self.component
            .members
            .iter()
            .zip(self.roles.iter().copied())
    }

    /// Members holding exactly `role`, in source declaration order.
    pub fn members_with(&self, role: MemberRole) -> impl Iterator<Item = &'a ClassMember> + '_ {
        self.members()
            .filter(move |(_, r)| *r == role)
            .map(|(m, _)| m)
    }

    pub fn getter_of(&self, name: &str) -> Option<&'a ClassMember> {
        self.members_with(MemberRole::Getter).find(|m| m.name == name)
    }

    pub fn setter_of(&self, name: &str) -> Option<&'a ClassMember> {
        self.members_with(MemberRole::Setter).find(|m| m.name == name)
    }
}

/// Build the options object for one component.
pub fn run(component: &ClassComponent) -> Result<OptionsObject, MigrateError> {
    let ctx = MigrationContext::new(component)?;
    let options = OptionsObject::new();

    let options = structure::migrate(&ctx, options)?;
    let options = props::migrate(&ctx, options)?;
    let options = state::migrate(&ctx, options)?;
    let options = refs::migrate(&ctx, options)?;
    let options = watchers::migrate(&ctx, options)?;
    let options = methods::migrate(&ctx, options)?;
    let options = store::migrate(&ctx, options)?;

    Ok(options)
}
