//! # Typings Codegen
//!
//! TypeScript declaration generation from API descriptions.
//!
//! This crate provides:
//! - Scalar kind mapping and type rendering
//! - Binding classification with `Params` and `Headers` companions
//! - Enum literal unions
//! - The declaration file template and a no-clobber file sink

pub mod error;
pub mod generator;
pub mod output;
pub mod typescript;

pub use error::CodegenError;
pub use generator::{DEFAULT_FILENAME, DEFAULT_TOOL, Generator, GeneratorOptions};
pub use output::{Emission, emit, write_new_file};

use typings_schema::ApiSpec;

/// Parses and validates an API description.
///
/// # Errors
/// Returns `CodegenError` if parsing or validation fails.
pub fn load_spec(source: &str) -> Result<ApiSpec, CodegenError> {
    let spec = typings_schema::parse_api(source)?;
    typings_schema::validate_spec(&spec)?;
    Ok(spec)
}

/// Generates a declaration file from an API description string.
///
/// # Arguments
/// * `source` - `.api` description content
/// * `options` - Header settings
///
/// # Returns
/// Generated declarations as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_source(
    source: &str,
    options: &GeneratorOptions,
) -> Result<String, CodegenError> {
    let spec = load_spec(source)?;
    Generator::new(&spec, options).generate()
}

/// Generates a declaration file from an API description file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation, or generation
/// fails.
pub fn generate_from_file(
    path: &std::path::Path,
    options: &GeneratorOptions,
) -> Result<String, CodegenError> {
    let source = std::fs::read_to_string(path)?;
    generate_from_source(&source, options)
}
