//! Type and member rendering.

use super::enums::literal_union;
use super::members::MemberClassifier;
use super::primitives::{TS_ANY, TS_BLOB, map_primitive};
use super::push_indent;
use crate::error::CodegenError;
use typings_schema::{ApiSpec, Member, Type, to_title};

/// Renders types and member lines into a text buffer.
///
/// Errors carry the name of the top-level composite being rendered.
#[derive(Debug, Clone, Copy)]
pub struct TypeRenderer<'a> {
    spec: &'a ApiSpec,
    classifier: MemberClassifier<'a>,
}

impl<'a> TypeRenderer<'a> {
    /// Creates a renderer resolving references through `spec`.
    #[must_use]
    pub fn new(spec: &'a ApiSpec) -> Self {
        Self {
            spec,
            classifier: MemberClassifier::new(spec),
        }
    }

    /// Returns the member classifier used for nested composites.
    #[must_use]
    pub fn classifier(&self) -> MemberClassifier<'a> {
        self.classifier
    }

    /// Renders a type expression.
    ///
    /// `indent` is the indent of the line the type appears on; nested
    /// object literals indent their members one level deeper.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedType` for kinds without a
    /// TypeScript equivalent and unresolved references.
    pub fn render_type(
        &self,
        owner: &str,
        ty: &'a Type,
        indent: usize,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        match ty {
            Type::Primitive(kind) => out.push_str(map_primitive(owner, *kind)?),
            Type::Named(name) => {
                if !self.spec.has_type(name) {
                    return Err(CodegenError::unsupported(owner, name));
                }
                out.push_str(&to_title(name));
            }
            Type::Nested(members) => self.render_object(owner, members, indent, out)?,
            Type::Array(elem) => {
                if ty.is_byte_array() {
                    out.push_str(TS_BLOB);
                } else {
                    out.push_str("Array<");
                    self.render_type(owner, elem, indent, out)?;
                    out.push('>');
                }
            }
            Type::Map { value, .. } => {
                out.push_str("{ [key: string]: ");
                self.render_type(owner, value, indent, out)?;
                out.push_str(" }");
            }
            Type::Pointer(referent) => self.render_type(owner, referent, indent, out)?,
            Type::Interface => out.push_str(TS_ANY),
        }
        Ok(())
    }

    /// Renders an anonymous composite as an object literal type.
    fn render_object(
        &self,
        owner: &str,
        members: &'a [Member],
        indent: usize,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        let classified = self.classifier.classify(owner, members)?;
        out.push_str("{\n");
        self.write_members(owner, &classified.body, indent + 1, out)?;
        push_indent(out, indent);
        out.push('}');
        Ok(())
    }

    /// Renders the type of a member, applying its allowed values.
    ///
    /// # Errors
    /// Returns `CodegenError` if the member's type cannot be rendered.
    pub fn render_member_type(
        &self,
        owner: &str,
        member: &'a Member,
        indent: usize,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        let options = member.options.as_deref().filter(|o| !o.is_empty());
        match (options, &member.ty) {
            (Some(options), ty) if !matches!(ty, Type::Nested(_)) => {
                let mut base = String::new();
                self.render_type(owner, ty, indent, &mut base)?;
                out.push_str(&literal_union(options, &base));
                Ok(())
            }
            (_, ty) => self.render_type(owner, ty, indent, out),
        }
    }

    /// Writes one line per member, with its documentation above it.
    ///
    /// # Errors
    /// Returns `CodegenError` if a member's type cannot be rendered.
    pub fn write_members(
        &self,
        owner: &str,
        members: &[&'a Member],
        indent: usize,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        for &member in members {
            self.write_property(owner, member, indent, out)?;
        }
        Ok(())
    }

    fn write_property(
        &self,
        owner: &str,
        member: &'a Member,
        indent: usize,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        for doc in &member.docs {
            push_indent(out, indent);
            out.push_str(doc.trim());
            out.push('\n');
        }

        push_indent(out, indent);
        out.push_str(&property_key(&member.property_name()));
        // every field is optional
        out.push_str("?: ");
        self.render_member_type(owner, member, indent, out)?;
        if let Some(comment) = trailing_comment(member) {
            out.push_str(" // ");
            out.push_str(comment);
        }
        out.push('\n');
        Ok(())
    }
}

/// Returns the member's trailing comment without its marker.
fn trailing_comment(member: &Member) -> Option<&str> {
    let comment = member.comment.as_deref()?;
    let text = comment.strip_prefix("//").unwrap_or(comment).trim();
    (!text.is_empty()).then_some(text)
}

/// Quotes property names that are not valid identifiers (`X-Token`).
fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if is_ident {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "\\'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typings_schema::{Binding, DefineStruct, PrimitiveKind};

    fn prim(kind: PrimitiveKind) -> Type {
        Type::Primitive(kind)
    }

    fn render(spec: &ApiSpec, ty: &Type, indent: usize) -> Result<String, CodegenError> {
        let mut out = String::new();
        TypeRenderer::new(spec).render_type("Owner", ty, indent, &mut out)?;
        Ok(out)
    }

    fn spec_with_user() -> ApiSpec {
        [DefineStruct::new("user")].into_iter().collect()
    }

    #[test]
    fn test_render_named_reference_is_title_cased() {
        let spec = spec_with_user();
        assert_eq!(render(&spec, &Type::named("user"), 1).expect("render"), "User");
    }

    #[test]
    fn test_render_unknown_reference_fails() {
        let spec = ApiSpec::new();
        let err = render(&spec, &Type::named("Ghost"), 1).expect_err("should fail");
        assert!(matches!(err, CodegenError::UnsupportedType { ref composite, .. } if composite == "Owner"));
    }

    #[test]
    fn test_render_collections() {
        let spec = spec_with_user();
        let ty = Type::map(
            prim(PrimitiveKind::Int),
            Type::array(Type::pointer(Type::named("user"))),
        );
        assert_eq!(
            render(&spec, &ty, 1).expect("render"),
            "{ [key: string]: Array<User> }"
        );
    }

    #[test]
    fn test_render_byte_array_is_blob() {
        let spec = ApiSpec::new();
        assert_eq!(render(&spec, &Type::bytes(), 1).expect("render"), "Blob");
        assert_eq!(
            render(&spec, &Type::array(prim(PrimitiveKind::Uint8)), 1).expect("render"),
            "Array<number>"
        );
    }

    #[test]
    fn test_render_pointer_is_transparent() {
        let spec = ApiSpec::new();
        let ty = Type::pointer(Type::pointer(prim(PrimitiveKind::Uint64)));
        assert_eq!(render(&spec, &ty, 1).expect("render"), "string");
    }

    #[test]
    fn test_render_interface_is_any() {
        let spec = ApiSpec::new();
        assert_eq!(render(&spec, &Type::Interface, 1).expect("render"), "any");
    }

    #[test]
    fn test_render_nested_object_indentation() {
        let spec = ApiSpec::new();
        let ty = Type::Nested(vec![
            Member::new("Lat", prim(PrimitiveKind::Float64)).with_tag(Binding::Body, "lat"),
            Member::new("Lng", prim(PrimitiveKind::Float64)).with_tag(Binding::Body, "lng"),
        ]);
        assert_eq!(
            render(&spec, &ty, 2).expect("render"),
            "{\n\t\t\tlat?: number\n\t\t\tlng?: number\n\t\t}"
        );
    }

    #[test]
    fn test_render_nested_object_skips_non_body_members() {
        let spec = ApiSpec::new();
        let ty = Type::Nested(vec![
            Member::new("A", prim(PrimitiveKind::Int)),
            Member::new("B", prim(PrimitiveKind::Int)).with_binding(Binding::Form),
        ]);
        assert_eq!(render(&spec, &ty, 0).expect("render"), "{\n\tA?: number\n}");
    }

    #[test]
    fn test_render_unsupported_inside_collection() {
        let spec = ApiSpec::new();
        let ty = Type::array(prim(PrimitiveKind::Rune));
        let err = render(&spec, &ty, 1).expect_err("should fail");
        assert!(matches!(err, CodegenError::UnsupportedType { ref kind, .. } if kind == "rune"));
    }

    #[test]
    fn test_member_with_options_on_int64_is_quoted() {
        let spec = ApiSpec::new();
        let member = Member::new("Kind", prim(PrimitiveKind::Int64)).with_options(["1", "2"]);
        let mut out = String::new();
        TypeRenderer::new(&spec)
            .render_member_type("Owner", &member, 1, &mut out)
            .expect("render");
        assert_eq!(out, "'1' | '2'");
    }

    #[test]
    fn test_member_with_options_on_nested_keeps_object() {
        let spec = ApiSpec::new();
        let member = Member::new(
            "Inner",
            Type::Nested(vec![Member::new("A", prim(PrimitiveKind::Bool))]),
        )
        .with_options(["x"]);
        let mut out = String::new();
        TypeRenderer::new(&spec)
            .render_member_type("Owner", &member, 0, &mut out)
            .expect("render");
        assert_eq!(out, "{\n\tA?: boolean\n}");
    }

    #[test]
    fn test_write_member_with_docs_and_comment() {
        let spec = ApiSpec::new();
        let member = Member::new("Name", prim(PrimitiveKind::String))
            .with_tag(Binding::Body, "name")
            .with_doc("// Display name.")
            .with_comment("//   shown in UI  ");
        let mut out = String::new();
        TypeRenderer::new(&spec)
            .write_members("Owner", &[&member], 1, &mut out)
            .expect("render");
        assert_eq!(out, "\t// Display name.\n\tname?: string // shown in UI\n");
    }

    #[test]
    fn test_property_key_quotes_non_identifiers() {
        assert_eq!(property_key("userId"), "userId");
        assert_eq!(property_key("$ref"), "$ref");
        assert_eq!(property_key("X-Token"), "'X-Token'");
        assert_eq!(property_key("1st"), "'1st'");
    }
}
