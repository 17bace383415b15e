//! Read-only model of the source class.
//!
//! `extract_component` lowers the default-exported `@Component` class into
//! plain data: member names, kinds, flags and decorator calls, with every
//! body, parameter, type annotation and argument kept as verbatim (dedented)
//! source text. The model is built once per file and never mutated.

use std::ops::Range;

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    Callee, ClassExpr, ClassMember as SwcClassMember, ClassMethod, ClassProp, Decorator,
    DefaultDecl, Expr, ExprOrSpread, Lit, MethodKind, ModuleDecl, ModuleItem, ObjectLit, Prop,
    PropName, PropOrSpread,
};

use crate::engine::code::{dedent, quote_key};
use crate::engine::parse::ParsedScript;
use crate::error::MigrateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Getter,
    Setter,
    Property,
}

/// One property of an object-literal argument, verbatim, with its key name
/// pre-split so transformers can check for specific fields.
#[derive(Debug, Clone)]
pub struct ObjectProp {
    pub key: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct DecoratorArg {
    pub text: String,
    pub string_value: Option<String>,
    pub object_props: Option<Vec<ObjectProp>>,
}

impl DecoratorArg {
    pub fn as_string(&self) -> Option<&str> {
        self.string_value.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct DecoratorCall {
    pub name: String,
    pub args: Vec<DecoratorArg>,
}

#[derive(Debug, Clone)]
pub struct ClassMember {
    pub name: String,
    pub kind: MemberKind,
    pub is_async: bool,
    pub is_generator: bool,
    pub params: Vec<String>,
    pub type_params: Option<String>,
    pub return_type: Option<String>,
    /// Dedented braced statement block, for methods and accessors.
    pub body: Option<String>,
    /// Property type annotation text, without the colon.
    pub type_ann: Option<String>,
    pub initializer: Option<String>,
    pub decorators: Vec<DecoratorCall>,
}

impl ClassMember {
    /// Render the member as a shorthand method entry under a new name,
    /// signature and body verbatim.
    pub fn render_as(&self, name: &str) -> String {
        let mut out = String::new();
        if self.is_async {
            out.push_str("async ");
        }
        if self.is_generator {
            out.push('*');
        }
        out.push_str(&quote_key(name));
        if let Some(tp) = &self.type_params {
            out.push_str(tp);
        }
        out.push('(');
        out.push_str(&self.params.join(", "));
        out.push(')');
        if let Some(ret) = &self.return_type {
            out.push_str(": ");
            out.push_str(ret);
        }
        out.push(' ');
        out.push_str(self.body.as_deref().unwrap_or("{}"));
        out
    }

    pub fn render(&self) -> String {
        self.render_as(&self.name)
    }
}

#[derive(Debug, Clone)]
pub enum SuperClass {
    /// `extends Vue` or any other base expression, verbatim.
    Base(String),
    /// `extends mixins(A, B)` / `extends Mixins(A, B)`, argument texts.
    Mixins(Vec<String>),
}

#[derive(Debug)]
pub struct ClassComponent {
    pub name: Option<String>,
    /// Properties of the `@Component({ ... })` argument object, verbatim.
    pub decorator_props: Vec<ObjectProp>,
    pub super_class: Option<SuperClass>,
    pub members: Vec<ClassMember>,
    /// Byte range of the whole declaration (first decorator through the
    /// closing brace), replaced by the generated options object.
    pub replace_range: Range<usize>,
}

/// Locate the default-exported class and lower it into the migration model.
pub fn extract_component(parsed: &ParsedScript) -> Result<ClassComponent, MigrateError> {
    let (item_span, class_expr) = find_default_class(parsed)?;
    let class = &class_expr.class;
    let name = class_expr.ident.as_ref().map(|i| i.sym.to_string());
    let holder = name.clone().unwrap_or_else(|| "default".to_string());

    let mut marker = None;
    for decorator in &class.decorators {
        let call = lower_decorator(parsed, decorator, &holder)?;
        if call.name == "Component" {
            marker = Some(call);
        } else {
            return Err(MigrateError::UnsupportedDecorator {
                member: holder,
                decorator: call.name,
            });
        }
    }
    let Some(marker) = marker else {
        return Err(MigrateError::AlreadyMigrated);
    };
    let decorator_props = component_props(marker, &holder)?;

    let super_class = match &class.super_class {
        Some(expr) => Some(lower_super_class(parsed, expr)),
        None => None,
    };

    let mut members = Vec::new();
    for member in &class.body {
        match member {
            SwcClassMember::Method(method) => members.push(lower_method(parsed, method)?),
            SwcClassMember::ClassProp(prop) => members.push(lower_property(parsed, prop)?),
            SwcClassMember::Empty(_) => {}
            SwcClassMember::Constructor(c) => {
                return Err(MigrateError::unsupported_member(
                    "constructor",
                    format!("constructors are not supported: {}", short(parsed, c.span)),
                ));
            }
            SwcClassMember::PrivateMethod(m) => {
                return Err(MigrateError::unsupported_member(
                    format!("#{}", m.key.name),
                    "private members are not supported",
                ));
            }
            SwcClassMember::PrivateProp(p) => {
                return Err(MigrateError::unsupported_member(
                    format!("#{}", p.key.name),
                    "private members are not supported",
                ));
            }
            SwcClassMember::TsIndexSignature(sig) => {
                return Err(MigrateError::unsupported_member(
                    short(parsed, sig.span),
                    "index signatures are not supported",
                ));
            }
            SwcClassMember::StaticBlock(block) => {
                return Err(MigrateError::unsupported_member(
                    short(parsed, block.span),
                    "static blocks are not supported",
                ));
            }
            SwcClassMember::AutoAccessor(acc) => {
                return Err(MigrateError::unsupported_member(
                    short(parsed, acc.span),
                    "auto accessors are not supported",
                ));
            }
        }
    }

    let decorator_lo = class
        .decorators
        .iter()
        .map(|d| d.span.lo)
        .min()
        .unwrap_or(item_span.lo);
    let lo = decorator_lo.min(item_span.lo);

    Ok(ClassComponent {
        name,
        decorator_props,
        super_class,
        members,
        replace_range: parsed.offset(lo)..parsed.offset(item_span.hi),
    })
}

fn find_default_class(parsed: &ParsedScript) -> Result<(Span, &ClassExpr), MigrateError> {
    for item in &parsed.module.body {
        if let ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) = item
            && let DefaultDecl::Class(class_expr) = &export.decl
        {
            return Ok((export.span, class_expr));
        }
    }
    Err(MigrateError::ComponentClassNotFound)
}

fn component_props(
    marker: DecoratorCall,
    holder: &str,
) -> Result<Vec<ObjectProp>, MigrateError> {
    let mut args = marker.args;
    match args.len() {
        0 => Ok(Vec::new()),
        1 => args.remove(0).object_props.ok_or_else(|| {
            MigrateError::unsupported_member(holder, "@Component argument must be an object literal")
        }),
        _ => Err(MigrateError::unsupported_member(
            holder,
            "@Component takes at most one argument",
        )),
    }
}

fn lower_super_class(parsed: &ParsedScript, expr: &Expr) -> SuperClass {
    if let Expr::Call(call) = expr
        && let Callee::Expr(callee) = &call.callee
        && let Expr::Ident(ident) = &**callee
        && matches!(ident.sym.as_str(), "mixins" | "Mixins")
    {
        let args = call
            .args
            .iter()
            .map(|a| arg_text(parsed, a))
            .collect::<Vec<_>>();
        return SuperClass::Mixins(args);
    }
    SuperClass::Base(dedent(parsed.snippet(expr.span())))
}

fn arg_text(parsed: &ParsedScript, arg: &ExprOrSpread) -> String {
    match arg.spread {
        Some(dot3) => dedent(parsed.slice(dot3.lo, arg.expr.span().hi)),
        None => dedent(parsed.snippet(arg.expr.span())),
    }
}

fn lower_method(parsed: &ParsedScript, method: &ClassMethod) -> Result<ClassMember, MigrateError> {
    let name = member_name(parsed, &method.key)?;
    reject_modifiers(
        &name,
        method.is_static,
        method.accessibility.is_some(),
        method.is_abstract,
    )?;

    let function = &method.function;
    let decorators = lower_decorators(parsed, &function.decorators, &name)?;

    Ok(ClassMember {
        name,
        kind: match method.kind {
            MethodKind::Method => MemberKind::Method,
            MethodKind::Getter => MemberKind::Getter,
            MethodKind::Setter => MemberKind::Setter,
        },
        is_async: function.is_async,
        is_generator: function.is_generator,
        params: function
            .params
            .iter()
            .map(|p| dedent(parsed.snippet(p.span)))
            .collect(),
        type_params: function
            .type_params
            .as_ref()
            .map(|tp| parsed.snippet(tp.span).to_string()),
        return_type: function
            .return_type
            .as_ref()
            .map(|t| parsed.snippet(t.type_ann.span()).to_string()),
        body: function
            .body
            .as_ref()
            .map(|b| dedent(parsed.snippet(b.span))),
        type_ann: None,
        initializer: None,
        decorators,
    })
}

fn lower_property(parsed: &ParsedScript, prop: &ClassProp) -> Result<ClassMember, MigrateError> {
    let name = member_name(parsed, &prop.key)?;
    reject_modifiers(
        &name,
        prop.is_static,
        prop.accessibility.is_some(),
        prop.is_abstract,
    )?;
    if prop.declare {
        return Err(MigrateError::unsupported_member(
            name,
            "`declare` properties are not supported",
        ));
    }

    let decorators = lower_decorators(parsed, &prop.decorators, &name)?;

    Ok(ClassMember {
        name,
        kind: MemberKind::Property,
        is_async: false,
        is_generator: false,
        params: Vec::new(),
        type_params: None,
        return_type: None,
        body: None,
        type_ann: prop
            .type_ann
            .as_ref()
            .map(|t| parsed.snippet(t.type_ann.span()).to_string()),
        initializer: prop
            .value
            .as_ref()
            .map(|v| dedent(parsed.snippet(v.span()))),
        decorators,
    })
}

fn reject_modifiers(
    name: &str,
    is_static: bool,
    has_accessibility: bool,
    is_abstract: bool,
) -> Result<(), MigrateError> {
    if is_static {
        return Err(MigrateError::unsupported_member(
            name,
            "static members are not supported",
        ));
    }
    if has_accessibility {
        return Err(MigrateError::unsupported_member(
            name,
            "visibility modifiers are not supported",
        ));
    }
    if is_abstract {
        return Err(MigrateError::unsupported_member(
            name,
            "abstract members are not supported",
        ));
    }
    Ok(())
}

fn lower_decorators(
    parsed: &ParsedScript,
    decorators: &[Decorator],
    member: &str,
) -> Result<Vec<DecoratorCall>, MigrateError> {
    decorators
        .iter()
        .map(|d| lower_decorator(parsed, d, member))
        .collect()
}

fn lower_decorator(
    parsed: &ParsedScript,
    decorator: &Decorator,
    member: &str,
) -> Result<DecoratorCall, MigrateError> {
    match &*decorator.expr {
        Expr::Ident(ident) => Ok(DecoratorCall {
            name: ident.sym.to_string(),
            args: Vec::new(),
        }),
        Expr::Call(call) => {
            if let Callee::Expr(callee) = &call.callee
                && let Expr::Ident(ident) = &**callee
            {
                let args = call
                    .args
                    .iter()
                    .map(|a| lower_arg(parsed, a, member))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DecoratorCall {
                    name: ident.sym.to_string(),
                    args,
                })
            } else {
                Err(MigrateError::UnsupportedDecorator {
                    member: member.to_string(),
                    decorator: short(parsed, decorator.expr.span()),
                })
            }
        }
        _ => Err(MigrateError::UnsupportedDecorator {
            member: member.to_string(),
            decorator: short(parsed, decorator.expr.span()),
        }),
    }
}

fn lower_arg(
    parsed: &ParsedScript,
    arg: &ExprOrSpread,
    member: &str,
) -> Result<DecoratorArg, MigrateError> {
    if arg.spread.is_some() {
        return Err(MigrateError::unsupported_member(
            member,
            "spread decorator arguments are not supported",
        ));
    }

    let string_value = match &*arg.expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|v| v.to_string()),
        _ => None,
    };
    let object_props = match &*arg.expr {
        Expr::Object(obj) => Some(lower_object_props(parsed, obj)),
        _ => None,
    };

    Ok(DecoratorArg {
        text: dedent(parsed.snippet(arg.expr.span())),
        string_value,
        object_props,
    })
}

fn lower_object_props(parsed: &ParsedScript, obj: &ObjectLit) -> Vec<ObjectProp> {
    obj.props
        .iter()
        .map(|p| match p {
            PropOrSpread::Prop(prop) => ObjectProp {
                key: prop_key_name(prop_name_of(prop)),
                text: dedent(parsed.snippet(prop.span())),
            },
            PropOrSpread::Spread(spread) => ObjectProp {
                key: None,
                text: dedent(parsed.slice(spread.dot3_token.lo, spread.expr.span().hi)),
            },
        })
        .collect()
}

fn prop_name_of(prop: &Prop) -> Option<&PropName> {
    match prop {
        Prop::KeyValue(kv) => Some(&kv.key),
        Prop::Method(m) => Some(&m.key),
        Prop::Getter(g) => Some(&g.key),
        Prop::Setter(s) => Some(&s.key),
        Prop::Shorthand(_) | Prop::Assign(_) => None,
    }
}

fn prop_key_name(key: Option<&PropName>) -> Option<String> {
    match key? {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|v| v.to_string()),
        _ => None,
    }
}

fn member_name(parsed: &ParsedScript, key: &PropName) -> Result<String, MigrateError> {
    match key {
        PropName::Ident(ident) => Ok(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|v| v.to_string()).ok_or_else(|| {
            MigrateError::unsupported_member(
                short(parsed, s.span),
                "member name is not valid UTF-8",
            )
        }),
        other => Err(MigrateError::unsupported_member(
            short(parsed, other.span()),
            "computed member names are not supported",
        )),
    }
}

/// A single-line excerpt for error messages.
fn short(parsed: &ParsedScript, span: Span) -> String {
    let text = parsed.snippet(span);
    match text.find('\n') {
        Some(idx) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::engine::parse::parse_script;

    fn extract(code: &str) -> ClassComponent {
        let parsed = parse_script(code, "test.ts").unwrap();
        extract_component(&parsed).unwrap()
    }

    fn extract_err(code: &str) -> MigrateError {
        let parsed = parse_script(code, "test.ts").unwrap();
        extract_component(&parsed).unwrap_err()
    }

    #[test]
    fn extracts_members_in_source_order() {
        let component = extract(
            r#"@Component
export default class Test extends Vue {
    created() {
        console.log("OK");
    }
    myMethod(param1: string, p2, p3: any): void {
        console.log("hey")
    }
    count = 0;
}"#,
        );
        assert_eq!(component.name.as_deref(), Some("Test"));
        let names: Vec<_> = component.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["created", "myMethod", "count"]);
        assert_eq!(component.members[1].params.len(), 3);
        assert_eq!(component.members[1].params[0], "param1: string");
        assert_eq!(component.members[1].return_type.as_deref(), Some("void"));
        assert_eq!(component.members[2].initializer.as_deref(), Some("0"));
    }

    #[test]
    fn dedents_method_bodies() {
        let component = extract(
            "@Component\nexport default class Test extends Vue {\n    created() {\n        init();\n    }\n}",
        );
        assert_eq!(
            component.members[0].body.as_deref(),
            Some("{\n    init();\n}")
        );
    }

    #[test]
    fn members_render_with_signature_and_body_verbatim() {
        let component = extract(
            "@Component\nexport default class extends Vue {\n  async fetchData(id: number): Promise<void> {\n    await load(id);\n  }\n}",
        );
        assert_eq!(
            component.members[0].render(),
            "async fetchData(id: number): Promise<void> {\n  await load(id);\n}"
        );
        assert_eq!(
            component.members[0].render_as("handler"),
            "async handler(id: number): Promise<void> {\n  await load(id);\n}"
        );
    }

    #[test]
    fn component_arguments_are_seeded_verbatim() {
        let component = extract(
            "@Component({ name: 'MyComp', components: { Child } })\nexport default class extends Vue {}",
        );
        assert_eq!(component.decorator_props.len(), 2);
        assert_eq!(component.decorator_props[0].key.as_deref(), Some("name"));
        assert_eq!(component.decorator_props[0].text, "name: 'MyComp'");
        assert_eq!(
            component.decorator_props[1].text,
            "components: { Child }"
        );
    }

    #[test]
    fn mixins_superclass_is_recognized() {
        let component =
            extract("@Component\nexport default class extends mixins(A, B) {}");
        let Some(SuperClass::Mixins(args)) = &component.super_class else {
            panic!("expected mixins");
        };
        assert_eq!(args, &vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn decorator_arguments_keep_text_and_structure() {
        let component = extract(
            "@Component\nexport default class extends Vue {\n  @Prop({ type: Object, required: true })\n  member: Member;\n}",
        );
        let member = &component.members[0];
        assert_eq!(member.decorators.len(), 1);
        let arg = &member.decorators[0].args[0];
        assert_eq!(arg.text, "{ type: Object, required: true }");
        let props = arg.object_props.as_ref().unwrap();
        assert_eq!(props[0].key.as_deref(), Some("type"));
        assert_eq!(props[1].text, "required: true");
    }

    #[test]
    fn missing_marker_means_already_migrated() {
        let err = extract_err("export default class Test extends Vue {}");
        assert!(matches!(err, MigrateError::AlreadyMigrated));
    }

    #[test]
    fn no_default_export_is_rejected() {
        let err = extract_err("export class Test {}");
        assert!(matches!(err, MigrateError::ComponentClassNotFound));
    }

    #[test]
    fn static_members_are_out_of_taxonomy() {
        let err = extract_err(
            "@Component\nexport default class extends Vue {\n  static helper() {}\n}",
        );
        assert!(matches!(err, MigrateError::UnsupportedMember { .. }));
    }

    #[test]
    fn visibility_modifiers_are_out_of_taxonomy() {
        let err = extract_err(
            "@Component\nexport default class extends Vue {\n  private secret = 1;\n}",
        );
        assert!(matches!(err, MigrateError::UnsupportedMember { .. }));
    }

    #[test]
    fn foreign_class_decorator_is_rejected() {
        let err = extract_err("@Injectable()\nexport default class Test extends Vue {}");
        let MigrateError::UnsupportedDecorator { decorator, .. } = err else {
            panic!("expected unsupported decorator");
        };
        assert_eq!(decorator, "Injectable");
    }

    #[test]
    fn replace_range_starts_at_the_decorator() {
        let code = "// header\n@Component\nexport default class Test extends Vue {}\n";
        let component = extract(code);
        let replaced = &code[component.replace_range.clone()];
        assert!(replaced.starts_with("@Component"));
        assert!(replaced.ends_with('}'));
    }
}
