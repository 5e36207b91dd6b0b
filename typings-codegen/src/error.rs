//! Error types for declaration generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for declaration generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// API description parse error.
    #[error("API parse error: {0}")]
    Parse(#[from] typings_schema::ParseError),

    /// API description validation error.
    #[error("schema error: {0}")]
    Schema(#[from] typings_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A kind or type shape with no declaration equivalent.
    #[error("type {composite} generate error: unsupported type {kind}")]
    UnsupportedType {
        /// Composite being rendered.
        composite: String,
        /// Offending kind or shape.
        kind: String,
    },

    /// A companion declaration was requested for an empty member set.
    #[error("type {composite} generate error: no members for {companion} declaration")]
    MissingMembers {
        /// Composite being rendered.
        composite: String,
        /// Companion suffix (`Params` or `Headers`).
        companion: &'static str,
    },

    /// Inline expansion revisits a composite already being expanded.
    #[error("type {composite} generate error: circular inline reference {path}")]
    CircularReference {
        /// Composite being rendered.
        composite: String,
        /// Expansion path.
        path: String,
    },

    /// Two declarations would be emitted under the same name.
    #[error("interface name '{name}' is produced by both '{first}' and '{second}'")]
    NameCollision {
        /// Emitted interface name.
        name: String,
        /// First source composite.
        first: String,
        /// Second source composite.
        second: String,
    },

    /// Target path is already occupied.
    #[error("file already exists: {}", path.display())]
    FileConflict {
        /// Target path.
        path: PathBuf,
    },
}

impl CodegenError {
    /// Creates an unsupported type error.
    pub fn unsupported(composite: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedType {
            composite: composite.into(),
            kind: kind.into(),
        }
    }

    /// Creates a missing members error.
    pub fn missing_members(composite: impl Into<String>, companion: &'static str) -> Self {
        Self::MissingMembers {
            composite: composite.into(),
            companion,
        }
    }

    /// Returns true if this error is a benign no-op for the caller.
    #[must_use]
    pub fn is_file_conflict(&self) -> bool {
        matches!(self, Self::FileConflict { .. })
    }
}
