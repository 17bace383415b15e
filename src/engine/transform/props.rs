//! Interface migration: `@Prop`, `@PropSync`, `@Model`, `@ModelSync`.
//!
//! Prop entries are built from the decorator options verbatim; when the
//! options carry no `type`, one is synthesized from the property's TS
//! annotation. PropSync/ModelSync additionally synthesize a computed
//! get/set pair wired to emit the corresponding update event.

use super::MigrationContext;
use crate::engine::classify::MemberRole;
use crate::engine::code::{is_identifier, object_literal};
use crate::engine::model::{ClassMember, DecoratorArg, DecoratorCall};
use crate::engine::options::{OptionsObject, SectionKind, keyed};
use crate::error::MigrateError;

pub fn migrate(
    ctx: &MigrationContext,
    mut options: OptionsObject,
) -> Result<OptionsObject, MigrateError> {
    for (member, role) in ctx.members() {
        match role {
            MemberRole::Prop => migrate_prop(member, &mut options)?,
            MemberRole::PropSync => migrate_prop_sync(member, &mut options)?,
            MemberRole::Model => migrate_model(member, &mut options)?,
            MemberRole::ModelSync => migrate_model_sync(member, &mut options)?,
            _ => {}
        }
    }
    Ok(options)
}

fn migrate_prop(member: &ClassMember, options: &mut OptionsObject) -> Result<(), MigrateError> {
    let decorator = sole_decorator(member);
    if decorator.args.len() > 1 {
        return Err(MigrateError::unsupported_member(
            &member.name,
            "@Prop takes at most one argument",
        ));
    }

    let value = prop_value(member, decorator.args.first(), options)?;
    options.add_entry(SectionKind::Props, &member.name, keyed(&member.name, &value))
}

fn migrate_prop_sync(
    member: &ClassMember,
    options: &mut OptionsObject,
) -> Result<(), MigrateError> {
    let decorator = sole_decorator(member);
    let Some(prop_name) = decorator.args.first().and_then(DecoratorArg::as_string) else {
        return Err(MigrateError::unsupported_member(
            &member.name,
            "the first argument of @PropSync must be a string literal",
        ));
    };
    let prop_name = prop_name.to_string();
    if decorator.args.len() > 2 {
        return Err(MigrateError::unsupported_member(
            &member.name,
            "@PropSync takes at most two arguments",
        ));
    }

    let value = prop_value(member, decorator.args.get(1), options)?;
    options.add_entry(SectionKind::Props, &prop_name, keyed(&prop_name, &value))?;

    let pair = accessor_pair(
        member.type_ann.as_deref(),
        &prop_name,
        &format!("update:{}", prop_name),
    );
    options.add_entry(
        SectionKind::Computed,
        &member.name,
        keyed(&member.name, &pair),
    )
}

fn migrate_model(member: &ClassMember, options: &mut OptionsObject) -> Result<(), MigrateError> {
    let decorator = sole_decorator(member);
    let event = match decorator.args.first() {
        Some(arg) => arg
            .as_string()
            .ok_or_else(|| {
                MigrateError::unsupported_member(
                    &member.name,
                    "the first argument of @Model must be a string literal",
                )
            })?
            .to_string(),
        // Vue 2 components model on `input` when no event is given.
        None => "input".to_string(),
    };
    if decorator.args.len() > 2 {
        return Err(MigrateError::unsupported_member(
            &member.name,
            "@Model takes at most two arguments",
        ));
    }

    let value = prop_value(member, decorator.args.get(1), options)?;
    options.add_entry(SectionKind::Props, &member.name, keyed(&member.name, &value))?;
    options.set_model(format!(
        "model: {{ prop: '{}', event: '{}' }}",
        member.name, event
    ))
}

fn migrate_model_sync(
    member: &ClassMember,
    options: &mut OptionsObject,
) -> Result<(), MigrateError> {
    let decorator = sole_decorator(member);
    let Some(prop_name) = decorator.args.first().and_then(DecoratorArg::as_string) else {
        return Err(MigrateError::unsupported_member(
            &member.name,
            "the first argument of @ModelSync must be a string literal",
        ));
    };
    let prop_name = prop_name.to_string();
    let event = match decorator.args.get(1) {
        Some(arg) => arg
            .as_string()
            .ok_or_else(|| {
                MigrateError::unsupported_member(
                    &member.name,
                    "the event argument of @ModelSync must be a string literal",
                )
            })?
            .to_string(),
        None => "input".to_string(),
    };
    if decorator.args.len() > 3 {
        return Err(MigrateError::unsupported_member(
            &member.name,
            "@ModelSync takes at most three arguments",
        ));
    }

    let value = prop_value(member, decorator.args.get(2), options)?;
    options.add_entry(SectionKind::Props, &prop_name, keyed(&prop_name, &value))?;
    options.set_model(format!(
        "model: {{ prop: '{}', event: '{}' }}",
        prop_name, event
    ))?;

    let pair = accessor_pair(member.type_ann.as_deref(), &prop_name, &event);
    options.add_entry(
        SectionKind::Computed,
        &member.name,
        keyed(&member.name, &pair),
    )
}

/// Classification guarantees prop-family members carry exactly one decorator.
fn sole_decorator(member: &ClassMember) -> &DecoratorCall {
    &member.decorators[0]
}

/// Build the `{ type, required, default }` prop options value.
fn prop_value(
    member: &ClassMember,
    options_arg: Option<&DecoratorArg>,
    options: &mut OptionsObject,
) -> Result<String, MigrateError> {
    let inferred = infer_prop_type(member.type_ann.as_deref());

    let value = match options_arg {
        Some(arg) => match &arg.object_props {
            Some(props) => {
                let has_type = props.iter().any(|p| p.key.as_deref() == Some("type"));
                match (&inferred, has_type) {
                    (Some(inferred), false) => {
                        options.needs.prop_type |= inferred.uses_prop_type;
                        let mut entries = vec![format!("type: {}", inferred.constructor)];
                        entries.extend(props.iter().map(|p| p.text.clone()));
                        inline_object(&entries)
                    }
                    // The decorator's object already says it all.
                    _ => arg.text.clone(),
                }
            }
            // A bare constructor argument: `@Prop(String)`, `@Prop([String, Number])`.
            None => format!("{{ type: {} }}", arg.text),
        },
        None => match inferred {
            Some(inferred) => {
                options.needs.prop_type |= inferred.uses_prop_type;
                format!("{{ type: {} }}", inferred.constructor)
            }
            None => "{}".to_string(),
        },
    };
    Ok(value)
}

struct InferredType {
    constructor: String,
    uses_prop_type: bool,
}

/// Map a TS annotation to a runtime prop constructor. `any`/`unknown` stay
/// untyped; non-primitive annotations keep their static type via `PropType`.
fn infer_prop_type(type_ann: Option<&str>) -> Option<InferredType> {
    let t = type_ann?.trim();
    let plain = |constructor: &str| {
        Some(InferredType {
            constructor: constructor.to_string(),
            uses_prop_type: false,
        })
    };
    let cast = |constructor: &str| {
        Some(InferredType {
            constructor: format!("{} as PropType<{}>", constructor, t),
            uses_prop_type: true,
        })
    };

    match t {
        "string" => plain("String"),
        "number" => plain("Number"),
        "boolean" => plain("Boolean"),
        "object" => plain("Object"),
        "any" | "unknown" => None,
        _ if t.ends_with("[]") || t.starts_with("Array<") || t.starts_with("ReadonlyArray<") => {
            cast("Array")
        }
        _ if t.contains("=>") => cast("Function"),
        _ => cast("Object"),
    }
}

/// The synthesized computed pair for PropSync/ModelSync.
fn accessor_pair(type_ann: Option<&str>, prop_name: &str, event: &str) -> String {
    let ret = type_ann.map(|t| format!(": {}", t)).unwrap_or_default();
    let get = format!(
        "get(){} {{\n  return {};\n}}",
        ret,
        this_access(prop_name)
    );
    let set = format!(
        "set(value{}) {{\n  this.$emit('{}', value);\n}}",
        ret, event
    );
    object_literal(&[get, set])
}

fn this_access(name: &str) -> String {
    if is_identifier(name) {
        format!("this.{}", name)
    } else {
        format!("this['{}']", name.replace('\'', "\\'"))
    }
}

fn inline_object(entries: &[String]) -> String {
    if entries.iter().any(|e| e.contains('\n')) {
        object_literal(entries)
    } else {
        format!("{{ {} }}", entries.join(", "))
    }
}
