//! Concrete scalar values and conversion rules.
//!
//! Conversions follow the C / NumPy rules a compiled kernel observes at runtime:
//! - integer to narrower integer wraps (two's complement truncation),
//! - float to integer truncates toward zero and saturates at the target bounds (NaN becomes 0),
//! - any numeric to `bool` is `value != 0`,
//! - real to complex has a zero imaginary part, complex to real drops the imaginary part.

use std::fmt;

use numjit_core::NumType;

use super::Literal;

/// A scalar value with its exact type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    C64(f32, f32),
    C128(f64, f64),
}

/// Lossless widened form used as the pivot for conversions and comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Wide {
    Int(i128),
    Float(f64),
    Complex(f64, f64),
}

impl ScalarValue {
    pub fn ty(&self) -> NumType {
        match self {
            ScalarValue::Bool(_) => NumType::Bool,
            ScalarValue::I8(_) => NumType::Int8,
            ScalarValue::I16(_) => NumType::Int16,
            ScalarValue::I32(_) => NumType::Int32,
            ScalarValue::I64(_) => NumType::Int64,
            ScalarValue::U8(_) => NumType::UInt8,
            ScalarValue::U16(_) => NumType::UInt16,
            ScalarValue::U32(_) => NumType::UInt32,
            ScalarValue::U64(_) => NumType::UInt64,
            ScalarValue::F32(_) => NumType::Float32,
            ScalarValue::F64(_) => NumType::Float64,
            ScalarValue::C64(..) => NumType::Complex64,
            ScalarValue::C128(..) => NumType::Complex128,
        }
    }

    /// The value a host literal has before any cast (`int64` or `float64`).
    pub fn from_literal(literal: Literal) -> Self {
        match literal {
            Literal::Int(i) => ScalarValue::I64(i),
            Literal::Float(x) => ScalarValue::F64(x),
        }
    }

    /// Convert to `ty` following the module-level conversion rules.
    pub fn cast(self, ty: NumType) -> Self {
        if self.ty() == ty {
            return self;
        }
        from_wide(self.widen(), ty)
    }

    pub(crate) fn widen(self) -> Wide {
        match self {
            ScalarValue::Bool(b) => Wide::Int(i128::from(b)),
            ScalarValue::I8(i) => Wide::Int(i.into()),
            ScalarValue::I16(i) => Wide::Int(i.into()),
            ScalarValue::I32(i) => Wide::Int(i.into()),
            ScalarValue::I64(i) => Wide::Int(i.into()),
            ScalarValue::U8(u) => Wide::Int(u.into()),
            ScalarValue::U16(u) => Wide::Int(u.into()),
            ScalarValue::U32(u) => Wide::Int(u.into()),
            ScalarValue::U64(u) => Wide::Int(u.into()),
            ScalarValue::F32(x) => Wide::Float(x.into()),
            ScalarValue::F64(x) => Wide::Float(x),
            ScalarValue::C64(re, im) => Wide::Complex(re.into(), im.into()),
            ScalarValue::C128(re, im) => Wide::Complex(re, im),
        }
    }
}

fn from_wide(wide: Wide, ty: NumType) -> ScalarValue {
    match (wide, ty) {
        (_, NumType::Bool) => ScalarValue::Bool(match wide {
            Wide::Int(i) => i != 0,
            Wide::Float(x) => x != 0.0,
            Wide::Complex(re, im) => re != 0.0 || im != 0.0,
        }),
        (Wide::Complex(re, _), _) if !ty.is_complex() => from_wide(Wide::Float(re), ty),

        (Wide::Int(i), NumType::Int8) => ScalarValue::I8(i as i8),
        (Wide::Int(i), NumType::Int16) => ScalarValue::I16(i as i16),
        (Wide::Int(i), NumType::Int32) => ScalarValue::I32(i as i32),
        (Wide::Int(i), NumType::Int64) => ScalarValue::I64(i as i64),
        (Wide::Int(i), NumType::UInt8) => ScalarValue::U8(i as u8),
        (Wide::Int(i), NumType::UInt16) => ScalarValue::U16(i as u16),
        (Wide::Int(i), NumType::UInt32) => ScalarValue::U32(i as u32),
        (Wide::Int(i), NumType::UInt64) => ScalarValue::U64(i as u64),

        // `as` from float to integer truncates toward zero and saturates.
        (Wide::Float(x), NumType::Int8) => ScalarValue::I8(x as i8),
        (Wide::Float(x), NumType::Int16) => ScalarValue::I16(x as i16),
        (Wide::Float(x), NumType::Int32) => ScalarValue::I32(x as i32),
        (Wide::Float(x), NumType::Int64) => ScalarValue::I64(x as i64),
        (Wide::Float(x), NumType::UInt8) => ScalarValue::U8(x as u8),
        (Wide::Float(x), NumType::UInt16) => ScalarValue::U16(x as u16),
        (Wide::Float(x), NumType::UInt32) => ScalarValue::U32(x as u32),
        (Wide::Float(x), NumType::UInt64) => ScalarValue::U64(x as u64),

        (Wide::Int(i), NumType::Float32) => ScalarValue::F32(i as f32),
        (Wide::Int(i), NumType::Float64) => ScalarValue::F64(i as f64),
        (Wide::Float(x), NumType::Float32) => ScalarValue::F32(x as f32),
        (Wide::Float(x), NumType::Float64) => ScalarValue::F64(x),

        (Wide::Int(i), NumType::Complex64) => ScalarValue::C64(i as f32, 0.0),
        (Wide::Int(i), NumType::Complex128) => ScalarValue::C128(i as f64, 0.0),
        (Wide::Float(x), NumType::Complex64) => ScalarValue::C64(x as f32, 0.0),
        (Wide::Float(x), NumType::Complex128) => ScalarValue::C128(x, 0.0),
        (Wide::Complex(re, im), NumType::Complex64) => ScalarValue::C64(re as f32, im as f32),
        (Wide::Complex(re, im), _) => ScalarValue::C128(re, im),
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{b}"),
            ScalarValue::I8(i) => write!(f, "{i}"),
            ScalarValue::I16(i) => write!(f, "{i}"),
            ScalarValue::I32(i) => write!(f, "{i}"),
            ScalarValue::I64(i) => write!(f, "{i}"),
            ScalarValue::U8(u) => write!(f, "{u}"),
            ScalarValue::U16(u) => write!(f, "{u}"),
            ScalarValue::U32(u) => write!(f, "{u}"),
            ScalarValue::U64(u) => write!(f, "{u}"),
            ScalarValue::F32(x) => write!(f, "{x:?}"),
            ScalarValue::F64(x) => write!(f, "{x:?}"),
            ScalarValue::C64(re, im) => write!(f, "({re:?}, {im:?})"),
            ScalarValue::C128(re, im) => write!(f, "({re:?}, {im:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_narrowing_wraps() {
        assert_eq!(ScalarValue::I64(300).cast(NumType::UInt8), ScalarValue::U8(44));
        assert_eq!(ScalarValue::I64(-1).cast(NumType::UInt16), ScalarValue::U16(u16::MAX));
        assert_eq!(ScalarValue::U64(u64::MAX).cast(NumType::Int64), ScalarValue::I64(-1));
    }

    #[test]
    fn test_float_to_int_truncates_and_saturates() {
        assert_eq!(ScalarValue::F64(-2.9).cast(NumType::Int32), ScalarValue::I32(-2));
        assert_eq!(ScalarValue::F64(1e10).cast(NumType::Int8), ScalarValue::I8(i8::MAX));
        assert_eq!(ScalarValue::F64(f64::NAN).cast(NumType::Int64), ScalarValue::I64(0));
    }

    #[test]
    fn test_bool_conversions() {
        assert_eq!(ScalarValue::F32(0.0).cast(NumType::Bool), ScalarValue::Bool(false));
        assert_eq!(ScalarValue::I8(-3).cast(NumType::Bool), ScalarValue::Bool(true));
        assert_eq!(ScalarValue::Bool(true).cast(NumType::Float64), ScalarValue::F64(1.0));
    }

    #[test]
    fn test_complex_conversions() {
        assert_eq!(ScalarValue::I64(2).cast(NumType::Complex64), ScalarValue::C64(2.0, 0.0));
        assert_eq!(ScalarValue::C128(1.5, -2.0).cast(NumType::Float32), ScalarValue::F32(1.5));
        assert_eq!(
            ScalarValue::C128(1.5, -2.0).cast(NumType::Complex64),
            ScalarValue::C64(1.5, -2.0)
        );
    }

    #[test]
    fn test_cast_to_own_type_is_identity() {
        for ty in NumType::ALL {
            let v = ScalarValue::I64(7).cast(ty);
            assert_eq!(v.cast(ty), v);
            assert_eq!(v.ty(), ty);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarValue::F64(2.0).to_string(), "2.0");
        assert_eq!(ScalarValue::C64(1.0, -0.5).to_string(), "(1.0, -0.5)");
        assert_eq!(ScalarValue::U8(7).to_string(), "7");
    }
}
