//! Numeric promotion policy: pick the common type operands are cast into before a variadic numeric operation.
//!
//! The rules, in order:
//! - Host literals enter the lattice as `Int64` (integer literal) or `Float64` (float literal).
//! - Equal types promote to themselves; `Bool` yields to any other type.
//! - If either side is floating or complex, the result is the widest floating/complex type present. Integer
//!   operands do not widen the result (`int64` with `float32` is `float32`), and a complex operand combined with a
//!   wider float widens its components (`complex64` with `float64` is `complex128`).
//! - Two integers of the same signedness promote to the wider one.
//! - Mixed signedness promotes to a signed type wide enough for the unsigned operand, capped at 64 bits
//!   (`int8` with `uint8` is `int16`; `int64` with `uint64` is `int64`).
//!
//! Every function here is pure and deterministic.

use crate::types::NumType;

/// A promotion input: either a raw host literal or an already-typed IR value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCandidate {
    /// An untyped host integer literal (treated as `Int64`).
    IntLiteral,
    /// An untyped host float literal (treated as `Float64`).
    FloatLiteral,
    /// The reported type of an IR value.
    Typed(NumType),
}

impl TypeCandidate {
    /// Resolve the candidate to the type it contributes to promotion.
    pub fn resolve(self) -> NumType {
        match self {
            TypeCandidate::IntLiteral => NumType::Int64,
            TypeCandidate::FloatLiteral => NumType::Float64,
            TypeCandidate::Typed(ty) => ty,
        }
    }
}

impl From<NumType> for TypeCandidate {
    fn from(ty: NumType) -> Self {
        TypeCandidate::Typed(ty)
    }
}

/// Promote two types to their common type.
///
/// ## Examples
/// ```rust
/// use numjit_core::{NumType, promote};
///
/// assert_eq!(promote(NumType::Int64, NumType::Float64), NumType::Float64);
/// assert_eq!(promote(NumType::Int32, NumType::Int32), NumType::Int32);
/// assert_eq!(promote(NumType::Int8, NumType::UInt8), NumType::Int16);
/// ```
pub fn promote(lhs: NumType, rhs: NumType) -> NumType {
    if lhs == rhs {
        return lhs;
    }
    if lhs.is_bool() {
        return rhs;
    }
    if rhs.is_bool() {
        return lhs;
    }

    if is_inexact(lhs) || is_inexact(rhs) {
        return promote_inexact(lhs, rhs);
    }

    promote_int(lhs, rhs)
}

/// Compute the common type of a sequence of candidates by repeated pairwise promotion.
///
/// ## Returns
/// - `None` if `candidates` is empty.
///
/// ## Examples
/// ```rust
/// use numjit_core::{NumType, TypeCandidate, broadcast_type};
///
/// let ty = broadcast_type(&[TypeCandidate::IntLiteral, TypeCandidate::Typed(NumType::Float64)]);
/// assert_eq!(ty, Some(NumType::Float64));
/// ```
pub fn broadcast_type(candidates: &[TypeCandidate]) -> Option<NumType> {
    let (first, rest) = candidates.split_first()?;
    Some(rest.iter().fold(first.resolve(), |acc, c| promote(acc, c.resolve())))
}

fn is_inexact(ty: NumType) -> bool {
    ty.is_float() || ty.is_complex()
}

/// Component precision in bits of a floating/complex type; integers contribute nothing.
fn inexact_precision(ty: NumType) -> u32 {
    match ty {
        NumType::Float32 | NumType::Complex64 => 32,
        NumType::Float64 | NumType::Complex128 => 64,
        _ => 0,
    }
}

fn promote_inexact(lhs: NumType, rhs: NumType) -> NumType {
    let precision = inexact_precision(lhs).max(inexact_precision(rhs));
    match (lhs.is_complex() || rhs.is_complex(), precision) {
        (true, 32) => NumType::Complex64,
        (true, _) => NumType::Complex128,
        (false, 32) => NumType::Float32,
        (false, _) => NumType::Float64,
    }
}

fn promote_int(lhs: NumType, rhs: NumType) -> NumType {
    let width = lhs.bit_width().max(rhs.bit_width());
    let same_signedness = lhs.is_signed_int() == rhs.is_signed_int();

    let promoted = if same_signedness {
        if lhs.is_signed_int() {
            NumType::signed_with_width(width)
        } else {
            NumType::unsigned_with_width(width)
        }
    } else {
        let (signed, unsigned) = if lhs.is_signed_int() { (lhs, rhs) } else { (rhs, lhs) };
        let needed = (unsigned.bit_width() * 2).min(64);
        NumType::signed_with_width(signed.bit_width().max(needed))
    };

    // Both inputs are 8/16/32/64-bit integers, so the width is always representable.
    promoted.unwrap_or(NumType::Int64)
}
