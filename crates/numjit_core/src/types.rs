//! Numeric type lattice.
//!
//! [`NumType`] enumerates every scalar type an IR value can carry. The predicates here are the single source of truth
//! for "is this an integer / float / complex" questions asked by the promotion resolver, the libm symbol synthesizer
//! and the lowering handlers.
//!
//! ## Notes
//! - `Bool` is **not** an integer for the purposes of [`NumType::is_int`]. Callers that accept booleans must test
//!   [`NumType::is_bool`] separately.
//! - Spellings (`"int8"`, `"float64"`, ...) live in [`crate::lang::numerics`].

use std::fmt;

/// A scalar numeric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// Complex number with two `Float32` components.
    Complex64,
    /// Complex number with two `Float64` components.
    Complex128,
}

impl NumType {
    /// Every scalar type, in lattice order (bool, signed, unsigned, float, complex).
    pub const ALL: [NumType; 13] = [
        NumType::Bool,
        NumType::Int8,
        NumType::Int16,
        NumType::Int32,
        NumType::Int64,
        NumType::UInt8,
        NumType::UInt16,
        NumType::UInt32,
        NumType::UInt64,
        NumType::Float32,
        NumType::Float64,
        NumType::Complex64,
        NumType::Complex128,
    ];

    /// Check whether this is a signed or unsigned integer type (excluding `Bool`).
    pub fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    pub fn is_signed_int(self) -> bool {
        matches!(self, NumType::Int8 | NumType::Int16 | NumType::Int32 | NumType::Int64)
    }

    pub fn is_unsigned_int(self) -> bool {
        matches!(self, NumType::UInt8 | NumType::UInt16 | NumType::UInt32 | NumType::UInt64)
    }

    pub fn is_bool(self) -> bool {
        self == NumType::Bool
    }

    pub fn is_float(self) -> bool {
        matches!(self, NumType::Float32 | NumType::Float64)
    }

    pub fn is_complex(self) -> bool {
        matches!(self, NumType::Complex64 | NumType::Complex128)
    }

    /// Storage width in bits. `Bool` reports 1; complex types report the width of both components together.
    pub fn bit_width(self) -> u32 {
        match self {
            NumType::Bool => 1,
            NumType::Int8 | NumType::UInt8 => 8,
            NumType::Int16 | NumType::UInt16 => 16,
            NumType::Int32 | NumType::UInt32 | NumType::Float32 => 32,
            NumType::Int64 | NumType::UInt64 | NumType::Float64 | NumType::Complex64 => 64,
            NumType::Complex128 => 128,
        }
    }

    /// Return the real component type of a complex type.
    ///
    /// ## Returns
    /// - `Some(Float32)` for `Complex64`, `Some(Float64)` for `Complex128`.
    /// - `None` for any non-complex type.
    pub fn complex_component(self) -> Option<NumType> {
        match self {
            NumType::Complex64 => Some(NumType::Float32),
            NumType::Complex128 => Some(NumType::Float64),
            _ => None,
        }
    }

    /// Return the type of a real-valued result computed from a value of this type (e.g. a magnitude).
    ///
    /// Complex types map to their component type; every other type maps to itself.
    pub fn real_type(self) -> NumType {
        self.complex_component().unwrap_or(self)
    }

    /// Signed integer type of the given width.
    ///
    /// ## Returns
    /// - `None` unless `bits` is 8, 16, 32 or 64.
    pub fn signed_with_width(bits: u32) -> Option<NumType> {
        match bits {
            8 => Some(NumType::Int8),
            16 => Some(NumType::Int16),
            32 => Some(NumType::Int32),
            64 => Some(NumType::Int64),
            _ => None,
        }
    }

    pub fn unsigned_with_width(bits: u32) -> Option<NumType> {
        match bits {
            8 => Some(NumType::UInt8),
            16 => Some(NumType::UInt16),
            32 => Some(NumType::UInt32),
            64 => Some(NumType::UInt64),
            _ => None,
        }
    }

    /// Canonical spelling, e.g. `"float32"`.
    pub fn as_str(self) -> &'static str {
        crate::lang::numerics::as_str(self)
    }
}

impl fmt::Display for NumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
