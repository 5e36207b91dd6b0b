//! Error types for API description parsing and validation.

use thiserror::Error;

/// Error type for API description parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Unexpected token.
    #[error("line {line}: expected {expected}, found {found}")]
    Unexpected {
        /// Line number (1-based).
        line: usize,
        /// What the parser was looking for.
        expected: String,
        /// What was found instead.
        found: String,
    },

    /// Input ended in the middle of a construct.
    #[error("unexpected end of input while parsing {context}")]
    UnexpectedEof {
        /// Construct being parsed.
        context: String,
    },

    /// Unterminated string, raw string or tag literal.
    #[error("line {line}: unterminated {what}")]
    Unterminated {
        /// Line number (1-based).
        line: usize,
        /// Kind of literal.
        what: &'static str,
    },

    /// Malformed struct tag.
    #[error("line {line}: invalid tag `{tag}` on member '{member}'")]
    InvalidTag {
        /// Line number (1-based).
        line: usize,
        /// Member name.
        member: String,
        /// Raw tag text.
        tag: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, info property).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for type graph validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Referenced type is not declared.
    #[error("type '{name}' referenced by member '{member}' of '{owner}' not found")]
    TypeNotFound {
        /// Type name.
        name: String,
        /// Composite holding the reference.
        owner: String,
        /// Member holding the reference.
        member: String,
    },

    /// Circular inline expansion.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },

    /// Two members render under the same property name.
    #[error("duplicate member '{member}' in type '{owner}' after inline expansion")]
    DuplicateMember {
        /// Composite name.
        owner: String,
        /// Property name.
        member: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates an unexpected token error.
    pub fn unexpected(line: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Unexpected {
            line,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an unexpected end of input error.
    pub fn eof(context: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            context: context.into(),
        }
    }

    /// Creates an invalid tag error.
    pub fn invalid_tag(line: usize, member: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::InvalidTag {
            line,
            member: member.into(),
            tag: tag.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_display() {
        let err = ParseError::unexpected(3, "'{'", "'('");
        assert_eq!(err.to_string(), "line 3: expected '{', found '('");
    }

    #[test]
    fn test_schema_error_wraps_parse_error() {
        let err: SchemaError = ParseError::duplicate("type", "User").into();
        assert_eq!(
            err.to_string(),
            "parse error: duplicate type definition: 'User'"
        );
    }
}
