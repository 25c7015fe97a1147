//! Numeric type vocabulary and cast-target registry keys.
//!
//! Every [`NumType`] has a canonical spelling (`"int8"`, `"complex128"`) plus short aliases (`"i8"`, `"c128"`). The
//! explicit cast builtins are keyed as `$number.<canonical>`.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-insensitive ASCII**.
//!
//! ## Examples
//! ```rust
//! use numjit_core::NumType;
//! use numjit_core::lang::numerics;
//!
//! assert_eq!(numerics::from_str("F32"), Some(NumType::Float32));
//! assert_eq!(numerics::cast_key(NumType::UInt16), "$number.uint16");
//! assert_eq!(numerics::cast_target("$number.complex64"), Some(NumType::Complex64));
//! ```

use super::registry::{LangItemInfo, stable};
use crate::types::NumType;

/// Prefix of the explicit cast registry keys.
pub const CAST_KEY_PREFIX: &str = "$number.";

pub type NumericTypeInfo = LangItemInfo<NumType>;

/// Registry of scalar numeric type spellings, in [`NumType::ALL`] order.
pub const NUMERIC_TYPES: &[NumericTypeInfo] = &[
    stable(NumType::Bool, "bool", &[], "Boolean."),
    stable(NumType::Int8, "int8", &["i8"], "8-bit signed integer."),
    stable(NumType::Int16, "int16", &["i16"], "16-bit signed integer."),
    stable(NumType::Int32, "int32", &["i32"], "32-bit signed integer."),
    stable(NumType::Int64, "int64", &["i64"], "64-bit signed integer."),
    stable(NumType::UInt8, "uint8", &["u8"], "8-bit unsigned integer."),
    stable(NumType::UInt16, "uint16", &["u16"], "16-bit unsigned integer."),
    stable(NumType::UInt32, "uint32", &["u32"], "32-bit unsigned integer."),
    stable(NumType::UInt64, "uint64", &["u64"], "64-bit unsigned integer."),
    stable(NumType::Float32, "float32", &["f32"], "IEEE-754 single precision."),
    stable(NumType::Float64, "float64", &["f64"], "IEEE-754 double precision."),
    stable(
        NumType::Complex64,
        "complex64",
        &["c64"],
        "Complex number with float32 components.",
    ),
    stable(
        NumType::Complex128,
        "complex128",
        &["c128"],
        "Complex number with float64 components.",
    ),
];

/// Return the canonical spelling for a numeric type.
pub fn as_str(ty: NumType) -> &'static str {
    info_for(ty).canonical
}

/// Return the metadata entry for a numeric type.
///
/// ## Panics
/// - If the registry is missing an entry for `ty` (this indicates a programming error).
pub fn info_for(ty: NumType) -> &'static NumericTypeInfo {
    NUMERIC_TYPES
        .iter()
        .find(|t| t.id == ty)
        .expect("numeric type info missing")
}

/// Resolve a type name (canonical or alias, ASCII case-insensitive).
pub fn from_str(name: &str) -> Option<NumType> {
    if let Some(t) = NUMERIC_TYPES.iter().find(|t| t.canonical.eq_ignore_ascii_case(name)) {
        return Some(t.id);
    }
    NUMERIC_TYPES
        .iter()
        .find(|t| t.aliases.iter().any(|a| a.eq_ignore_ascii_case(name)))
        .map(|t| t.id)
}

/// Registry key of the explicit cast to `ty`.
pub fn cast_key(ty: NumType) -> String {
    format!("{CAST_KEY_PREFIX}{}", as_str(ty))
}

/// Parse a `$number.<type>` key back to its target type.
///
/// ## Notes
/// - Only canonical spellings are accepted after the prefix, since keys are generated from them.
pub fn cast_target(key: &str) -> Option<NumType> {
    let name = key.strip_prefix(CAST_KEY_PREFIX)?;
    NUMERIC_TYPES.iter().find(|t| t.canonical == name).map(|t| t.id)
}
