//! # Typings Schema
//!
//! API description parser and type graph definitions.
//!
//! This crate provides:
//! - Parsing of the type section of go-zero style `.api` descriptions
//! - The type graph consumed by the declaration generator
//! - Structural validation of the parsed graph

pub mod error;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::{parse_api, parse_api_file};
pub use types::{
    ApiSpec, Binding, DefineStruct, Member, PrimitiveKind, Type, to_title, to_untitle,
};
pub use validation::validate_spec;
