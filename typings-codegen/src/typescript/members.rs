//! Member classification.
//!
//! Inline members are expanded first (depth first, left to right), then the
//! flat list is split by binding location.

use crate::error::CodegenError;
use typings_schema::{ApiSpec, Binding, Member, Type};

/// Members of one composite grouped by binding location.
#[derive(Debug, Default)]
pub struct ClassifiedMembers<'a> {
    /// Body-bound members.
    pub body: Vec<&'a Member>,
    /// Path, form and header members.
    pub non_body: Vec<&'a Member>,
    /// Path and form members (the `Params` companion).
    pub params: Vec<&'a Member>,
    /// Header members (the `Headers` companion).
    pub headers: Vec<&'a Member>,
}

impl<'a> ClassifiedMembers<'a> {
    /// Partitions an already flattened member list.
    #[must_use]
    pub fn from_flat(members: Vec<&'a Member>) -> Self {
        let mut classified = Self::default();
        for member in members {
            match member.binding {
                Binding::Body => classified.body.push(member),
                Binding::Path | Binding::Form => {
                    classified.non_body.push(member);
                    classified.params.push(member);
                }
                Binding::Header => {
                    classified.non_body.push(member);
                    classified.headers.push(member);
                }
            }
        }
        classified
    }
}

/// Expands inline members and partitions composites by binding.
#[derive(Debug, Clone, Copy)]
pub struct MemberClassifier<'a> {
    spec: &'a ApiSpec,
}

impl<'a> MemberClassifier<'a> {
    /// Creates a classifier resolving inline references through `spec`.
    #[must_use]
    pub fn new(spec: &'a ApiSpec) -> Self {
        Self { spec }
    }

    /// Classifies the members of the composite `owner`.
    ///
    /// # Errors
    /// Returns `CodegenError` if an inline member cannot be expanded.
    pub fn classify(
        &self,
        owner: &str,
        members: &'a [Member],
    ) -> Result<ClassifiedMembers<'a>, CodegenError> {
        Ok(ClassifiedMembers::from_flat(self.flatten(owner, members)?))
    }

    /// Expands inline members transitively, preserving order.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedType` for inline members that are
    /// not composites and `CodegenError::CircularReference` when expansion
    /// revisits a composite.
    pub fn flatten(
        &self,
        owner: &str,
        members: &'a [Member],
    ) -> Result<Vec<&'a Member>, CodegenError> {
        let mut flat = Vec::with_capacity(members.len());
        let mut path = vec![owner.to_string()];
        self.expand(owner, members, &mut path, &mut flat)?;
        Ok(flat)
    }

    fn expand(
        &self,
        owner: &str,
        members: &'a [Member],
        path: &mut Vec<String>,
        flat: &mut Vec<&'a Member>,
    ) -> Result<(), CodegenError> {
        for member in members {
            if !member.is_inline {
                flat.push(member);
                continue;
            }

            let name = match &member.ty {
                Type::Nested(inner) => {
                    self.expand(owner, inner, path, flat)?;
                    continue;
                }
                ty => ty
                    .struct_name()
                    .ok_or_else(|| CodegenError::unsupported(owner, format!("inline {ty}")))?,
            };
            let embedded = self
                .spec
                .get_type(name)
                .ok_or_else(|| CodegenError::unsupported(owner, name))?;

            if path.iter().any(|visited| visited == name) {
                path.push(name.to_string());
                return Err(CodegenError::CircularReference {
                    composite: owner.to_string(),
                    path: path.join(" -> "),
                });
            }
            path.push(name.to_string());
            self.expand(owner, &embedded.members, path, flat)?;
            path.pop();
        }
        Ok(())
    }
}
