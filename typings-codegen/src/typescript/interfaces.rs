//! Interface declaration assembly.
//!
//! Every top-level composite becomes an `export interface`. Composites with
//! path, form or header members also get a `<Name>Params` companion, and a
//! `<Name>Headers` companion when header members exist.

use super::members::ClassifiedMembers;
use super::push_indent;
use super::types::TypeRenderer;
use crate::error::CodegenError;
use std::collections::HashMap;
use typings_schema::{ApiSpec, DefineStruct, Member, to_title};

/// Companion declaration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Companion {
    /// Path and form members.
    Params,
    /// Header members.
    Headers,
}

impl Companion {
    /// Returns the suffix appended to the composite name.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Params => "Params",
            Self::Headers => "Headers",
        }
    }
}

/// Assembles interface declarations for every composite of a description.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationAssembler<'a> {
    spec: &'a ApiSpec,
    renderer: TypeRenderer<'a>,
    base_indent: usize,
}

impl<'a> DeclarationAssembler<'a> {
    /// Creates an assembler rendering at indent zero.
    #[must_use]
    pub fn new(spec: &'a ApiSpec) -> Self {
        Self {
            spec,
            renderer: TypeRenderer::new(spec),
            base_indent: 0,
        }
    }

    /// Sets the indent of the `export interface` lines.
    #[must_use]
    pub fn with_base_indent(mut self, indent: usize) -> Self {
        self.base_indent = indent;
        self
    }

    /// Renders all declarations in input order.
    ///
    /// Blocks are separated by one blank line. Nothing is returned unless
    /// every composite rendered.
    ///
    /// # Errors
    /// Returns the first `CodegenError` raised by any composite, or
    /// `CodegenError::NameCollision` if two declarations share a name.
    pub fn assemble(&self) -> Result<String, CodegenError> {
        let classifier = self.renderer.classifier();
        let classified = self
            .spec
            .types
            .iter()
            .map(|type_def| {
                classifier
                    .classify(&type_def.name, &type_def.members)
                    .map(|members| (type_def, members))
            })
            .collect::<Result<Vec<_>, _>>()?;

        check_name_collisions(&classified)?;

        let mut blocks = Vec::with_capacity(classified.len());
        for (type_def, members) in &classified {
            tracing::debug!(
                name = %type_def.name,
                body = members.body.len(),
                params = members.params.len(),
                headers = members.headers.len(),
                "rendering declaration"
            );
            self.write_declaration(type_def, members, &mut blocks)?;
        }
        Ok(blocks.join("\n\n"))
    }

    /// Renders one composite and its companions as separate blocks.
    ///
    /// # Errors
    /// Returns `CodegenError` if any member cannot be rendered.
    pub fn write_declaration(
        &self,
        type_def: &'a DefineStruct,
        members: &ClassifiedMembers<'a>,
        blocks: &mut Vec<String>,
    ) -> Result<(), CodegenError> {
        let title = to_title(&type_def.name);
        blocks.push(self.interface(&type_def.name, &title, &type_def.docs, &members.body)?);

        if !members.non_body.is_empty() {
            blocks.push(self.companion(type_def, members, Companion::Params)?);
        }
        if !members.headers.is_empty() {
            blocks.push(self.companion(type_def, members, Companion::Headers)?);
        }
        Ok(())
    }

    /// Renders a companion declaration.
    ///
    /// # Errors
    /// Returns `CodegenError::MissingMembers` if the member set that
    /// requires the companion is empty.
    pub fn companion(
        &self,
        type_def: &'a DefineStruct,
        members: &ClassifiedMembers<'a>,
        companion: Companion,
    ) -> Result<String, CodegenError> {
        let (required_by, fields) = match companion {
            Companion::Params => (&members.non_body, &members.params),
            Companion::Headers => (&members.headers, &members.headers),
        };
        if required_by.is_empty() {
            return Err(CodegenError::missing_members(
                &type_def.name,
                companion.suffix(),
            ));
        }

        let name = format!("{}{}", to_title(&type_def.name), companion.suffix());
        self.interface(&type_def.name, &name, &[], fields)
    }

    fn interface(
        &self,
        owner: &str,
        name: &str,
        docs: &[String],
        members: &[&'a Member],
    ) -> Result<String, CodegenError> {
        let mut out = String::new();
        for doc in docs {
            push_indent(&mut out, self.base_indent);
            out.push_str(doc.trim());
            out.push('\n');
        }
        push_indent(&mut out, self.base_indent);
        out.push_str(&format!("export interface {} {{\n", name));
        self.renderer
            .write_members(owner, members, self.base_indent + 1, &mut out)?;
        push_indent(&mut out, self.base_indent);
        out.push('}');
        Ok(out)
    }
}

/// Fails when two composites would emit the same interface name.
fn check_name_collisions(
    classified: &[(&DefineStruct, ClassifiedMembers<'_>)],
) -> Result<(), CodegenError> {
    let mut emitted: HashMap<String, &str> = HashMap::new();
    for (type_def, members) in classified {
        let title = to_title(&type_def.name);
        let mut names = vec![title.clone()];
        if !members.non_body.is_empty() {
            names.push(format!("{title}{}", Companion::Params.suffix()));
        }
        if !members.headers.is_empty() {
            names.push(format!("{title}{}", Companion::Headers.suffix()));
        }

        for name in names {
            if let Some(first) = emitted.get(&name) {
                return Err(CodegenError::NameCollision {
                    name,
                    first: (*first).to_string(),
                    second: type_def.name.clone(),
                });
            }
            emitted.insert(name, &type_def.name);
        }
    }
    Ok(())
}
