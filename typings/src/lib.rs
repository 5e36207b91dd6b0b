//! # Typings
//!
//! TypeScript declaration generation for go-zero style API descriptions.
//!
//! Reads the `type` declarations of an `.api` description and emits a
//! `typings.d.ts` file with one `export interface` per composite inside a
//! `declare namespace API` block. Path and form fields are collected into a
//! `<Name>Params` companion and header fields into `<Name>Headers`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use typings::codegen::{GeneratorOptions, generate_from_source};
//!
//! let source = "type User {\n    Id int64 `json:\"id\"`\n}\n";
//! let declarations = generate_from_source(source, &GeneratorOptions::default())?;
//! assert!(declarations.contains("export interface User {"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - API description parsing and validation
//! - [`codegen`] - Declaration generation and file emission
//! - [`plugin`] - goctl plugin payload read from stdin

/// API description parsing and validation.
pub mod schema {
    pub use typings_schema::*;
}

/// Declaration generation from API descriptions.
pub mod codegen {
    pub use typings_codegen::*;
}

pub mod plugin;

pub use plugin::PluginPayload;
pub use typings_codegen::{CodegenError, Emission, GeneratorOptions};
