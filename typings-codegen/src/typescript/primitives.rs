//! Scalar kind mapping.

use crate::error::CodegenError;
use typings_schema::PrimitiveKind;

/// TypeScript string type.
pub const TS_STRING: &str = "string";
/// TypeScript number type.
pub const TS_NUMBER: &str = "number";
/// TypeScript boolean type.
pub const TS_BOOLEAN: &str = "boolean";
/// Binary payload type.
pub const TS_BLOB: &str = "Blob";
/// TypeScript top type.
pub const TS_ANY: &str = "any";

/// Returns the TypeScript type for a scalar kind.
///
/// 64-bit integers map to `string`: a JavaScript number cannot hold them
/// without losing precision.
#[must_use]
pub const fn ts_primitive(kind: PrimitiveKind) -> Option<&'static str> {
    match kind {
        PrimitiveKind::String | PrimitiveKind::Int64 | PrimitiveKind::Uint64 => Some(TS_STRING),
        PrimitiveKind::Int
        | PrimitiveKind::Int8
        | PrimitiveKind::Int16
        | PrimitiveKind::Int32
        | PrimitiveKind::Uint
        | PrimitiveKind::Uint8
        | PrimitiveKind::Uint16
        | PrimitiveKind::Uint32
        | PrimitiveKind::Float32
        | PrimitiveKind::Float64 => Some(TS_NUMBER),
        PrimitiveKind::Bool => Some(TS_BOOLEAN),
        PrimitiveKind::Any => Some(TS_ANY),
        PrimitiveKind::Byte
        | PrimitiveKind::Rune
        | PrimitiveKind::Uintptr
        | PrimitiveKind::Complex64
        | PrimitiveKind::Complex128 => None,
    }
}

/// Maps a scalar kind for a member of `composite`.
///
/// # Errors
/// Returns `CodegenError::UnsupportedType` naming the kind when it has no
/// TypeScript equivalent.
pub fn map_primitive(composite: &str, kind: PrimitiveKind) -> Result<&'static str, CodegenError> {
    ts_primitive(kind).ok_or_else(|| CodegenError::unsupported(composite, kind.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_64bit_integers_are_strings() {
        assert_eq!(ts_primitive(PrimitiveKind::Int64), Some("string"));
        assert_eq!(ts_primitive(PrimitiveKind::Uint64), Some("string"));
    }

    #[test]
    fn test_numeric_kinds() {
        for kind in [
            PrimitiveKind::Int,
            PrimitiveKind::Int8,
            PrimitiveKind::Int16,
            PrimitiveKind::Int32,
            PrimitiveKind::Uint,
            PrimitiveKind::Uint8,
            PrimitiveKind::Uint16,
            PrimitiveKind::Uint32,
            PrimitiveKind::Float32,
            PrimitiveKind::Float64,
        ] {
            assert_eq!(ts_primitive(kind), Some("number"), "{kind:?}");
        }
    }

    #[test]
    fn test_other_kinds() {
        assert_eq!(ts_primitive(PrimitiveKind::String), Some("string"));
        assert_eq!(ts_primitive(PrimitiveKind::Bool), Some("boolean"));
        assert_eq!(ts_primitive(PrimitiveKind::Any), Some("any"));
    }

    #[test]
    fn test_unsupported_kind_names_kind() {
        let err = map_primitive("Event", PrimitiveKind::Complex128).expect_err("unsupported");
        match err {
            CodegenError::UnsupportedType { composite, kind } => {
                assert_eq!(composite, "Event");
                assert_eq!(kind, "complex128");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
