//! Member role assignment.
//!
//! Exactly one role per member, decided purely by the member's name, kind
//! and decorator set. Decorator roles take precedence over name-based ones,
//! and any decorator outside the recognized vocabulary aborts the file.

use crate::config;
use crate::engine::model::{ClassMember, MemberKind};
use crate::error::MigrateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    State,
    Getter,
    Mutation,
    Action,
}

impl StoreKind {
    /// The vuex binding helper generating this kind of mapping.
    pub fn helper(self) -> &'static str {
        match self {
            StoreKind::State => "mapState",
            StoreKind::Getter => "mapGetters",
            StoreKind::Mutation => "mapMutations",
            StoreKind::Action => "mapActions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    RootLifecycle,
    Method,
    Getter,
    Setter,
    Watcher,
    Prop,
    PropSync,
    Model,
    ModelSync,
    Ref,
    StoreBinding(StoreKind),
    Data,
}

pub fn classify(member: &ClassMember) -> Result<MemberRole, MigrateError> {
    if !member.decorators.is_empty() {
        return classify_decorated(member);
    }

    Ok(match member.kind {
        MemberKind::Getter => MemberRole::Getter,
        MemberKind::Setter => MemberRole::Setter,
        MemberKind::Property => MemberRole::Data,
        MemberKind::Method => {
            if member.name == "data" {
                // A class data() method is already the options data function.
                MemberRole::Data
            } else if config::is_lifecycle_hook(&member.name) {
                MemberRole::RootLifecycle
            } else {
                MemberRole::Method
            }
        }
    })
}

fn classify_decorated(member: &ClassMember) -> Result<MemberRole, MigrateError> {
    for decorator in &member.decorators {
        if !config::is_recognized_decorator(&decorator.name) {
            return Err(MigrateError::UnsupportedDecorator {
                member: member.name.clone(),
                decorator: decorator.name.clone(),
            });
        }
    }

    // Stacked decorators are only meaningful for @Watch.
    if member.decorators.len() > 1 && member.decorators.iter().any(|d| d.name != "Watch") {
        return Err(MigrateError::unsupported_member(
            &member.name,
            "multiple decorators on one member are only supported for @Watch",
        ));
    }

    let role = match member.decorators[0].name.as_str() {
        "Watch" => {
            require_kind(member, MemberKind::Method, "@Watch")?;
            MemberRole::Watcher
        }
        "Prop" => {
            require_kind(member, MemberKind::Property, "@Prop")?;
            MemberRole::Prop
        }
        "PropSync" => {
            require_kind(member, MemberKind::Property, "@PropSync")?;
            MemberRole::PropSync
        }
        "Model" => {
            require_kind(member, MemberKind::Property, "@Model")?;
            MemberRole::Model
        }
        "ModelSync" => {
            require_kind(member, MemberKind::Property, "@ModelSync")?;
            MemberRole::ModelSync
        }
        "Ref" => {
            require_kind(member, MemberKind::Property, "@Ref")?;
            MemberRole::Ref
        }
        "State" => store_binding(member, StoreKind::State)?,
        "Getter" => store_binding(member, StoreKind::Getter)?,
        "Mutation" => store_binding(member, StoreKind::Mutation)?,
        "Action" => store_binding(member, StoreKind::Action)?,
        // The table and is_recognized_decorator cover the same names.
        other => {
            return Err(MigrateError::UnsupportedDecorator {
                member: member.name.clone(),
                decorator: other.to_string(),
            });
        }
    };
    Ok(role)
}

fn store_binding(member: &ClassMember, kind: StoreKind) -> Result<MemberRole, MigrateError> {
    // A store decorator on a method would drop the method body; the binding
    // helpers replace the whole member, so only properties are accepted.
    require_kind(member, MemberKind::Property, "store binding decorators")?;
    Ok(MemberRole::StoreBinding(kind))
}

fn require_kind(
    member: &ClassMember,
    expected: MemberKind,
    what: &str,
) -> Result<(), MigrateError> {
    if member.kind == expected {
        return Ok(());
    }
    let shape = match expected {
        MemberKind::Method => "methods",
        MemberKind::Property => "properties",
        MemberKind::Getter => "getters",
        MemberKind::Setter => "setters",
    };
    Err(MigrateError::unsupported_member(
        &member.name,
        format!("{} can only decorate {}", what, shape),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::model::DecoratorCall;

    fn member(name: &str, kind: MemberKind, decorators: &[&str]) -> ClassMember {
        ClassMember {
            name: name.to_string(),
            kind,
            is_async: false,
            is_generator: false,
            params: Vec::new(),
            type_params: None,
            return_type: None,
            body: Some("{}".to_string()),
            type_ann: None,
            initializer: None,
            decorators: decorators
                .iter()
                .map(|d| DecoratorCall {
                    name: d.to_string(),
                    args: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn names_drive_undecorated_methods() {
        assert_eq!(
            classify(&member("created", MemberKind::Method, &[])).unwrap(),
            MemberRole::RootLifecycle
        );
        assert_eq!(
            classify(&member("asyncData", MemberKind::Method, &[])).unwrap(),
            MemberRole::RootLifecycle
        );
        assert_eq!(
            classify(&member("doSomething", MemberKind::Method, &[])).unwrap(),
            MemberRole::Method
        );
        assert_eq!(
            classify(&member("data", MemberKind::Method, &[])).unwrap(),
            MemberRole::Data
        );
    }

    #[test]
    fn accessors_and_fields() {
        assert_eq!(
            classify(&member("params", MemberKind::Getter, &[])).unwrap(),
            MemberRole::Getter
        );
        assert_eq!(
            classify(&member("params", MemberKind::Setter, &[])).unwrap(),
            MemberRole::Setter
        );
        assert_eq!(
            classify(&member("count", MemberKind::Property, &[])).unwrap(),
            MemberRole::Data
        );
    }

    #[test]
    fn decorator_roles_take_precedence_over_lifecycle_names() {
        // A watched method named like a hook is a watcher, not a root hook.
        assert_eq!(
            classify(&member("updated", MemberKind::Method, &["Watch"])).unwrap(),
            MemberRole::Watcher
        );
    }

    #[test]
    fn prop_family_on_properties() {
        assert_eq!(
            classify(&member("size", MemberKind::Property, &["Prop"])).unwrap(),
            MemberRole::Prop
        );
        assert_eq!(
            classify(&member("size", MemberKind::Property, &["PropSync"])).unwrap(),
            MemberRole::PropSync
        );
        assert_eq!(
            classify(&member("checked", MemberKind::Property, &["ModelSync"])).unwrap(),
            MemberRole::ModelSync
        );
        assert_eq!(
            classify(&member("anchor", MemberKind::Property, &["Ref"])).unwrap(),
            MemberRole::Ref
        );
    }

    #[test]
    fn store_decorators_map_to_their_helper() {
        let role = classify(&member("count", MemberKind::Property, &["State"])).unwrap();
        assert_eq!(role, MemberRole::StoreBinding(StoreKind::State));
        let role = classify(&member("fetch", MemberKind::Property, &["Action"])).unwrap();
        assert_eq!(role, MemberRole::StoreBinding(StoreKind::Action));
    }

    #[test]
    fn unknown_decorator_fails_loudly() {
        let err = classify(&member("emitChange", MemberKind::Method, &["Emit"])).unwrap_err();
        let MigrateError::UnsupportedDecorator { member, decorator } = err else {
            panic!("expected unsupported decorator");
        };
        assert_eq!(member, "emitChange");
        assert_eq!(decorator, "Emit");
    }

    #[test]
    fn prop_on_method_is_rejected() {
        let err = classify(&member("size", MemberKind::Method, &["Prop"])).unwrap_err();
        assert!(matches!(err, MigrateError::UnsupportedMember { .. }));
    }

    #[test]
    fn stacked_watch_is_allowed_mixed_stacks_are_not() {
        assert_eq!(
            classify(&member("onChange", MemberKind::Method, &["Watch", "Watch"])).unwrap(),
            MemberRole::Watcher
        );
        let err =
            classify(&member("onChange", MemberKind::Method, &["Watch", "Prop"])).unwrap_err();
        assert!(matches!(err, MigrateError::UnsupportedMember { .. }));
    }
}
