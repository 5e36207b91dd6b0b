//! Emission sink.
//!
//! The declaration body is generated completely in memory before the
//! filesystem is touched. The target is created exclusively: an existing
//! file is never truncated or replaced.

use crate::error::CodegenError;
use crate::generator::{Generator, GeneratorOptions};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use typings_schema::ApiSpec;

/// Outcome of an emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// The file was created.
    Written(PathBuf),
    /// The target already existed and was left untouched.
    Exists(PathBuf),
    /// The description declares no types; nothing was written.
    Empty,
}

/// Creates `path` with `contents`, creating parent directories as needed.
///
/// # Errors
/// Returns `CodegenError::FileConflict` if `path` already exists and
/// `CodegenError::Io` for any other filesystem failure.
pub fn write_new_file(path: &Path, contents: &str) -> Result<(), CodegenError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            return Err(CodegenError::FileConflict {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(err.into()),
    };
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Generates the declaration file for `spec` and writes it to
/// `dir/filename`.
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails. An occupied
/// target is reported as `Emission::Exists`.
pub fn emit(
    spec: &ApiSpec,
    options: &GeneratorOptions,
    dir: &Path,
    filename: &str,
) -> Result<Emission, CodegenError> {
    if spec.types.is_empty() {
        tracing::info!("no types declared, nothing to generate");
        return Ok(Emission::Empty);
    }

    let contents = Generator::new(spec, options).generate()?;
    let path = dir.join(filename);
    match write_new_file(&path, &contents) {
        Ok(()) => {
            tracing::info!(path = %path.display(), types = spec.types.len(), "declarations written");
            Ok(Emission::Written(path))
        }
        Err(err) if err.is_file_conflict() => {
            tracing::info!(path = %path.display(), "file already exists");
            Ok(Emission::Exists(path))
        }
        Err(err) => Err(err),
    }
}
