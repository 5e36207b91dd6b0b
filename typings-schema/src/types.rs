//! Type graph definitions.
//!
//! This module contains the data structures representing the parsed API
//! description: composite types, their members, the binding location of each
//! member and the closed set of type shapes a member can have.

use std::collections::HashMap;
use std::fmt;

/// Complete parsed API description.
#[derive(Debug, Clone, Default)]
pub struct ApiSpec {
    /// Syntax version declared by `syntax = "..."`.
    pub syntax: Option<String>,
    /// `info ( ... )` properties in declaration order.
    pub info: Vec<(String, String)>,
    /// Imported description paths (recorded, never resolved).
    pub imports: Vec<String>,
    /// Top-level composite types in declaration order.
    pub types: Vec<DefineStruct>,
    /// Type lookup map (built on insertion).
    type_map: HashMap<String, usize>,
}

impl ApiSpec {
    /// Creates a new empty description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a composite type to the description.
    pub fn add_type(&mut self, type_def: DefineStruct) {
        let index = self.types.len();
        self.type_map.insert(type_def.name.clone(), index);
        self.types.push(type_def);
    }

    /// Looks up a composite type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&DefineStruct> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.type_map.contains_key(name)
    }

    /// Returns an `info` property by key.
    #[must_use]
    pub fn info_property(&self, key: &str) -> Option<&str> {
        self.info
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the description's `info.version` property, if declared.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.info_property("version")
    }
}

impl FromIterator<DefineStruct> for ApiSpec {
    fn from_iter<I: IntoIterator<Item = DefineStruct>>(iter: I) -> Self {
        let mut spec = Self::new();
        for type_def in iter {
            spec.add_type(type_def);
        }
        spec
    }
}

/// Named composite type (`type Name { ... }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineStruct {
    /// Type name.
    pub name: String,
    /// Members in declaration order.
    pub members: Vec<Member>,
    /// Leading documentation lines, verbatim.
    pub docs: Vec<String>,
}

impl DefineStruct {
    /// Creates a new composite with no members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            docs: Vec::new(),
        }
    }

    /// Builder-style member addition.
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Builder-style documentation line.
    #[must_use]
    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.docs.push(line.into());
        self
    }
}

/// Shape of a member's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Scalar kind.
    Primitive(PrimitiveKind),
    /// Reference to a named composite.
    Named(String),
    /// Anonymous composite declared in place.
    Nested(Vec<Member>),
    /// Slice or fixed-length array.
    Array(Box<Type>),
    /// Map with its key and value types.
    Map {
        /// Key type.
        key: Box<Type>,
        /// Value type.
        value: Box<Type>,
    },
    /// Pointer to another type.
    Pointer(Box<Type>),
    /// `interface{}`.
    Interface,
}

impl Type {
    /// Creates a named reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Creates an array of `elem`.
    #[must_use]
    pub fn array(elem: Type) -> Self {
        Self::Array(Box::new(elem))
    }

    /// Creates a pointer to `referent`.
    #[must_use]
    pub fn pointer(referent: Type) -> Self {
        Self::Pointer(Box::new(referent))
    }

    /// Creates a map type.
    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates the `[]byte` raw byte array type.
    #[must_use]
    pub fn bytes() -> Self {
        Self::array(Self::Primitive(PrimitiveKind::Byte))
    }

    /// Returns true for `[]byte`.
    #[must_use]
    pub fn is_byte_array(&self) -> bool {
        matches!(self, Self::Array(elem) if **elem == Self::Primitive(PrimitiveKind::Byte))
    }

    /// Returns the composite name referenced directly or through pointers.
    #[must_use]
    pub fn struct_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Pointer(inner) => inner.struct_name(),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Named(name) => f.write_str(name),
            Self::Nested(_) => f.write_str("struct{...}"),
            Self::Array(elem) => write!(f, "[]{elem}"),
            Self::Map { key, value } => write!(f, "map[{key}]{value}"),
            Self::Pointer(referent) => write!(f, "*{referent}"),
            Self::Interface => f.write_str("interface{}"),
        }
    }
}

/// Scalar kinds of the API description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `string`.
    String,
    /// `bool`.
    Bool,
    /// `int`.
    Int,
    /// `int8`.
    Int8,
    /// `int16`.
    Int16,
    /// `int32`.
    Int32,
    /// `int64`.
    Int64,
    /// `uint`.
    Uint,
    /// `uint8`.
    Uint8,
    /// `uint16`.
    Uint16,
    /// `uint32`.
    Uint32,
    /// `uint64`.
    Uint64,
    /// `float32` (also spelled `float`).
    Float32,
    /// `float64`.
    Float64,
    /// `any`.
    Any,
    /// `byte`; only meaningful as the element of `[]byte`.
    Byte,
    /// `rune`.
    Rune,
    /// `uintptr`.
    Uintptr,
    /// `complex64`.
    Complex64,
    /// `complex128`.
    Complex128,
}

impl PrimitiveKind {
    /// Returns the source spelling of the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Any => "any",
            Self::Byte => "byte",
            Self::Rune => "rune",
            Self::Uintptr => "uintptr",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
        }
    }

    /// Parses a primitive kind from its source spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "int8" => Some(Self::Int8),
            "int16" => Some(Self::Int16),
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "uint" => Some(Self::Uint),
            "uint8" => Some(Self::Uint8),
            "uint16" => Some(Self::Uint16),
            "uint32" => Some(Self::Uint32),
            "uint64" => Some(Self::Uint64),
            "float" | "float32" => Some(Self::Float32),
            "float64" => Some(Self::Float64),
            "any" => Some(Self::Any),
            "byte" => Some(Self::Byte),
            "rune" => Some(Self::Rune),
            "uintptr" => Some(Self::Uintptr),
            "complex64" => Some(Self::Complex64),
            "complex128" => Some(Self::Complex128),
            _ => None,
        }
    }
}

/// Where a member travels in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Binding {
    /// Request or response body (`json` tag, or untagged).
    #[default]
    Body,
    /// Path segment (`path` tag).
    Path,
    /// Query string or form field (`form` tag).
    Form,
    /// HTTP header (`header` tag).
    Header,
}

impl Binding {
    /// Maps a struct tag key to a binding.
    #[must_use]
    pub fn from_tag_key(key: &str) -> Option<Self> {
        match key {
            "json" => Some(Self::Body),
            "path" => Some(Self::Path),
            "form" => Some(Self::Form),
            "header" => Some(Self::Header),
            _ => None,
        }
    }
}

/// Member of a composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Source field name.
    pub name: String,
    /// Member type.
    pub ty: Type,
    /// Binding location.
    pub binding: Binding,
    /// Wire name taken from the binding tag.
    pub property: Option<String>,
    /// Embedded member whose fields are flattened into the owner.
    pub is_inline: bool,
    /// Leading documentation lines, verbatim.
    pub docs: Vec<String>,
    /// Trailing comment, verbatim.
    pub comment: Option<String>,
    /// Allowed values.
    pub options: Option<Vec<String>>,
}

impl Member {
    /// Creates a body-bound member with no tag.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            binding: Binding::Body,
            property: None,
            is_inline: false,
            docs: Vec::new(),
            comment: None,
            options: None,
        }
    }

    /// Creates an inline (embedded) member of the given type.
    #[must_use]
    pub fn inline(ty: Type) -> Self {
        let name = ty
            .struct_name()
            .map_or_else(|| ty.to_string(), str::to_string);
        Self {
            is_inline: true,
            ..Self::new(name, ty)
        }
    }

    /// Sets the binding and wire name.
    #[must_use]
    pub fn with_tag(mut self, binding: Binding, property: impl Into<String>) -> Self {
        self.binding = binding;
        self.property = Some(property.into());
        self
    }

    /// Sets the binding, keeping the field name as wire name.
    #[must_use]
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    /// Sets the allowed values.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the trailing comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Adds a documentation line.
    #[must_use]
    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.docs.push(line.into());
        self
    }

    /// Returns the name the member is emitted under.
    #[must_use]
    pub fn property_name(&self) -> String {
        match self.property.as_deref() {
            Some("-") => to_untitle(&self.name),
            Some(property) if !property.is_empty() => property.to_string(),
            _ => self.name.clone(),
        }
    }
}

/// Upper-cases the first character.
#[must_use]
pub fn to_title(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character.
#[must_use]
pub fn to_untitle(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_title() {
        assert_eq!(to_title("user"), "User");
        assert_eq!(to_title("userInfo"), "UserInfo");
        assert_eq!(to_title("user_info"), "User_info");
        assert_eq!(to_title(""), "");
    }

    #[test]
    fn test_to_untitle() {
        assert_eq!(to_untitle("UserId"), "userId");
        assert_eq!(to_untitle("x"), "x");
    }

    #[test]
    fn test_primitive_kind_round_trip_names() {
        for name in ["string", "int64", "uint8", "float64", "complex128", "any"] {
            let kind = PrimitiveKind::from_name(name).expect("known kind");
            assert_eq!(kind.name(), name);
        }
        assert_eq!(PrimitiveKind::from_name("float"), Some(PrimitiveKind::Float32));
        assert_eq!(PrimitiveKind::from_name("Time"), None);
    }

    #[test]
    fn test_binding_from_tag_key() {
        assert_eq!(Binding::from_tag_key("json"), Some(Binding::Body));
        assert_eq!(Binding::from_tag_key("form"), Some(Binding::Form));
        assert_eq!(Binding::from_tag_key("path"), Some(Binding::Path));
        assert_eq!(Binding::from_tag_key("header"), Some(Binding::Header));
        assert_eq!(Binding::from_tag_key("xml"), None);
    }

    #[test]
    fn test_property_name() {
        let plain = Member::new("Id", Type::Primitive(PrimitiveKind::Int64));
        assert_eq!(plain.property_name(), "Id");

        let tagged = plain.clone().with_tag(Binding::Body, "id");
        assert_eq!(tagged.property_name(), "id");

        let dashed = plain.with_tag(Binding::Body, "-");
        assert_eq!(dashed.property_name(), "id");
    }

    #[test]
    fn test_type_display() {
        assert_eq!(Type::bytes().to_string(), "[]byte");
        assert_eq!(
            Type::map(
                Type::Primitive(PrimitiveKind::String),
                Type::pointer(Type::named("User"))
            )
            .to_string(),
            "map[string]*User"
        );
        assert_eq!(Type::Interface.to_string(), "interface{}");
    }

    #[test]
    fn test_struct_name_through_pointers() {
        let ty = Type::pointer(Type::pointer(Type::named("Base")));
        assert_eq!(ty.struct_name(), Some("Base"));
        assert_eq!(Type::array(Type::named("Base")).struct_name(), None);
    }

    #[test]
    fn test_api_spec_lookup_and_version() {
        let mut spec: ApiSpec = [DefineStruct::new("User"), DefineStruct::new("Req")]
            .into_iter()
            .collect();
        spec.info.push(("version".to_string(), "1.2".to_string()));

        assert!(spec.has_type("User"));
        assert!(!spec.has_type("user"));
        assert_eq!(spec.get_type("Req").map(|t| t.name.as_str()), Some("Req"));
        assert_eq!(spec.version(), Some("1.2"));
    }

    #[test]
    fn test_inline_member_takes_struct_name() {
        let member = Member::inline(Type::pointer(Type::named("Base")));
        assert!(member.is_inline);
        assert_eq!(member.name, "Base");
    }
}
