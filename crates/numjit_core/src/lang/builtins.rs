//! Builtin function vocabulary.
//!
//! The host-language builtins the compiler lowers directly: the generic casts (`bool`, `int`, `float`), `len`,
//! `min`, `max` and `abs`. Their canonical spelling doubles as their registry key.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//!
//! ## Examples
//! ```rust
//! use numjit_core::lang::builtins::{self, BuiltinFnId};
//!
//! assert_eq!(builtins::from_str("max"), Some(BuiltinFnId::Max));
//! assert_eq!(builtins::as_str(BuiltinFnId::Abs), "abs");
//! ```

use super::registry::{self, LangItemInfo, stable};

/// Stable identifier for a builtin function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFnId {
    Bool,
    Int,
    Float,
    Len,
    Min,
    Max,
    Abs,
}

/// Metadata for a builtin function.
pub type BuiltinFnInfo = LangItemInfo<BuiltinFnId>;

/// Registry of all directly lowered builtin functions.
pub const BUILTIN_FUNCTIONS: &[BuiltinFnInfo] = &[
    stable(BuiltinFnId::Bool, "bool", &[], "Convert a value to a boolean."),
    stable(BuiltinFnId::Int, "int", &[], "Convert a value to a 64-bit signed integer."),
    stable(BuiltinFnId::Float, "float", &[], "Convert a value to a 64-bit float."),
    stable(
        BuiltinFnId::Len,
        "len",
        &[],
        "Return the statically known length of a container.",
    ),
    stable(BuiltinFnId::Min, "min", &[], "Smallest of two or more values."),
    stable(BuiltinFnId::Max, "max", &[], "Largest of two or more values."),
    stable(BuiltinFnId::Abs, "abs", &[], "Absolute value (magnitude for complex)."),
];

/// Return the canonical spelling for a builtin function.
pub fn as_str(id: BuiltinFnId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a builtin function.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinFnId) -> &'static BuiltinFnInfo {
    BUILTIN_FUNCTIONS
        .iter()
        .find(|b| b.id == id)
        .expect("builtin info missing")
}

/// Resolve a spelling (canonical or alias) to a builtin function identifier.
pub fn from_str(name: &str) -> Option<BuiltinFnId> {
    registry::resolve(BUILTIN_FUNCTIONS, name)
}
