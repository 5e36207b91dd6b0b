//! TypeScript declaration generation modules.

pub mod enums;
pub mod interfaces;
pub mod members;
pub mod primitives;
pub mod types;

pub use interfaces::{Companion, DeclarationAssembler};
pub use members::{ClassifiedMembers, MemberClassifier};
pub use types::TypeRenderer;

/// Indentation unit of generated declarations.
pub const INDENT: char = '\t';

/// Appends `indent` indentation units to `out`.
pub(crate) fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(INDENT, indent));
}
