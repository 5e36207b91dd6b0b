//! Type graph validation utilities.
//!
//! This module checks a parsed description for the structural guarantees the
//! declaration generator relies on: resolvable references, acyclic inline
//! expansion and unique property names per composite.

use crate::error::SchemaError;
use crate::types::{ApiSpec, Binding, DefineStruct, Member, Type};
use std::collections::HashSet;

/// Validates a parsed description.
///
/// # Arguments
/// * `spec` - The description to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_spec(spec: &ApiSpec) -> Result<(), SchemaError> {
    for type_def in &spec.types {
        validate_references(spec, &type_def.name, &type_def.members)?;
    }
    for type_def in &spec.types {
        validate_members(spec, type_def)?;
    }
    Ok(())
}

/// Checks that every named reference resolves.
fn validate_references(spec: &ApiSpec, owner: &str, members: &[Member]) -> Result<(), SchemaError> {
    for member in members {
        check_type(spec, owner, member, &member.ty)?;
    }
    Ok(())
}

fn check_type(spec: &ApiSpec, owner: &str, member: &Member, ty: &Type) -> Result<(), SchemaError> {
    match ty {
        Type::Named(name) => {
            if !spec.has_type(name) {
                return Err(SchemaError::TypeNotFound {
                    name: name.clone(),
                    owner: owner.to_string(),
                    member: member.name.clone(),
                });
            }
            Ok(())
        }
        Type::Nested(members) => validate_references(spec, owner, members),
        Type::Array(elem) => check_type(spec, owner, member, elem),
        Type::Map { key, value } => {
            check_type(spec, owner, member, key)?;
            check_type(spec, owner, member, value)
        }
        Type::Pointer(referent) => check_type(spec, owner, member, referent),
        Type::Primitive(_) | Type::Interface => Ok(()),
    }
}

/// Property names already used by each declaration a composite renders to.
#[derive(Default)]
struct DeclaredNames {
    body: HashSet<String>,
    params: HashSet<String>,
    headers: HashSet<String>,
}

impl DeclaredNames {
    /// Records `property`, returning false if its declaration already has it.
    fn insert(&mut self, binding: Binding, property: String) -> bool {
        match binding {
            Binding::Body => self.body.insert(property),
            Binding::Path | Binding::Form => self.params.insert(property),
            Binding::Header => self.headers.insert(property),
        }
    }
}

/// Checks inline expansion for cycles and duplicate property names.
///
/// Body, path/form and header members end up in separate declarations, so
/// names only clash within the same group.
fn validate_members(spec: &ApiSpec, type_def: &DefineStruct) -> Result<(), SchemaError> {
    let mut seen = DeclaredNames::default();
    let mut path = vec![type_def.name.clone()];
    walk_flattened(spec, type_def, &type_def.members, &mut path, &mut seen)
}

fn walk_flattened(
    spec: &ApiSpec,
    owner: &DefineStruct,
    members: &[Member],
    path: &mut Vec<String>,
    seen: &mut DeclaredNames,
) -> Result<(), SchemaError> {
    for member in members {
        if member.is_inline {
            match &member.ty {
                Type::Nested(inner) => walk_flattened(spec, owner, inner, path, seen)?,
                ty => {
                    let Some(name) = ty.struct_name() else {
                        return Err(SchemaError::Validation {
                            message: format!(
                                "inline member of type '{}' in '{}' is not a struct",
                                member.ty, owner.name
                            ),
                        });
                    };
                    if path.iter().any(|visited| visited == name) {
                        path.push(name.to_string());
                        return Err(SchemaError::CircularReference {
                            path: path.join(" -> "),
                        });
                    }
                    // references were checked in the first pass
                    let Some(embedded) = spec.get_type(name) else {
                        continue;
                    };
                    path.push(name.to_string());
                    walk_flattened(spec, owner, &embedded.members, path, seen)?;
                    path.pop();
                }
            }
            continue;
        }

        let property = member.property_name();
        if !seen.insert(member.binding, property.clone()) {
            return Err(SchemaError::DuplicateMember {
                owner: owner.name.clone(),
                member: property,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_api;

    #[test]
    fn test_validate_valid_spec() {
        let source = r#"
type Base {
    Page int `form:"page"`
}
type Req {
    Base
    Id int64 `path:"id"`
    Owner *User `json:"owner"`
}
type User {
    Name string `json:"name"`
}
"#;
        let spec = parse_api(source).expect("Failed to parse");
        assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn test_validate_unknown_reference() {
        let source = "type Req {\n Items []Missing `json:\"items\"`\n}\n";
        let spec = parse_api(source).expect("Failed to parse");
        let err = validate_spec(&spec).expect_err("should fail");
        match err {
            SchemaError::TypeNotFound { name, owner, member } => {
                assert_eq!(name, "Missing");
                assert_eq!(owner, "Req");
                assert_eq!(member, "Items");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_circular_inline() {
        let source = "type A {\n B\n}\ntype B {\n *A\n}\n";
        let spec = parse_api(source).expect("Failed to parse");
        let err = validate_spec(&spec).expect_err("should fail");
        match err {
            SchemaError::CircularReference { path } => assert_eq!(path, "A -> B -> A"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_self_reference_by_field_is_allowed() {
        let source = "type Node {\n Children []*Node `json:\"children\"`\n}\n";
        let spec = parse_api(source).expect("Failed to parse");
        assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn test_validate_duplicate_after_flattening() {
        let source = r#"
type Base {
    Id int64 `json:"id"`
}
type User {
    Base
    Id string `json:"id"`
}
"#;
        let spec = parse_api(source).expect("Failed to parse");
        let err = validate_spec(&spec).expect_err("should fail");
        assert!(matches!(err, SchemaError::DuplicateMember { ref member, .. } if member == "id"));
    }

    #[test]
    fn test_validate_same_name_in_separate_declarations() {
        let source = r#"
type Req {
    UserId int64 `path:"id"`
    Id int64 `json:"id"`
    Trace string `header:"id"`
}
"#;
        let spec = parse_api(source).expect("Failed to parse");
        assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn test_validate_path_and_form_share_params() {
        let source = r#"
type Req {
    UserId int64 `path:"id"`
    Id int64 `form:"id"`
}
"#;
        let spec = parse_api(source).expect("Failed to parse");
        let err = validate_spec(&spec).expect_err("should fail");
        assert!(matches!(err, SchemaError::DuplicateMember { ref member, .. } if member == "id"));
    }

    #[test]
    fn test_validate_inline_non_struct() {
        let source = "type A {\n string\n}\n";
        let spec = parse_api(source).expect("Failed to parse");
        let err = validate_spec(&spec).expect_err("should fail");
        assert!(matches!(err, SchemaError::Validation { .. }));
    }
}
