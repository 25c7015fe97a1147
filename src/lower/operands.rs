//! Operand inspection shared by the handlers.
//!
//! Handlers validate every operand through these helpers **before** emitting any IR, so a declined call leaves the
//! builder untouched.

use numjit_core::{NumType, TypeCandidate};

use super::errors::Unsupported;
use crate::ir::{IrBuilder, Operand};

/// Promotion candidate of a scalar operand.
///
/// ## Returns
/// - `None` for tuples and non-scalar IR values.
pub(crate) fn candidate<B: IrBuilder>(builder: &B, operand: &Operand<B::Value>) -> Option<TypeCandidate> {
    match operand {
        Operand::Int(_) => Some(TypeCandidate::IntLiteral),
        Operand::Float(_) => Some(TypeCandidate::FloatLiteral),
        Operand::Value(v) => builder.scalar_type(v).map(TypeCandidate::Typed),
        Operand::Tuple(_) => None,
    }
}

/// Resolved scalar type of operand `index`, or the reason it has none.
pub(crate) fn scalar_type<B: IrBuilder>(
    builder: &B,
    operand: &Operand<B::Value>,
    index: usize,
) -> Result<NumType, Unsupported> {
    candidate(builder, operand)
        .map(TypeCandidate::resolve)
        .ok_or(Unsupported::OperandKind { index })
}

/// Produce operand `index` as a value of type `ty`: literals become constants, values are cast.
pub(crate) fn cast_operand<B: IrBuilder>(
    builder: &mut B,
    operand: &Operand<B::Value>,
    ty: NumType,
    index: usize,
) -> Result<B::Value, Unsupported> {
    if let Some(literal) = operand.literal() {
        return Ok(builder.constant(literal, ty));
    }
    match operand {
        Operand::Value(v) if builder.scalar_type(v).is_some() => Ok(builder.cast(v, ty)),
        _ => Err(Unsupported::OperandKind { index }),
    }
}

/// Produce operand `index` as a value of its own type, without any cast.
pub(crate) fn materialize<B: IrBuilder>(
    builder: &mut B,
    operand: &Operand<B::Value>,
    index: usize,
) -> Result<B::Value, Unsupported> {
    match operand {
        Operand::Value(v) if builder.scalar_type(v).is_some() => Ok(v.clone()),
        _ => {
            let ty = scalar_type(builder, operand, index)?;
            cast_operand(builder, operand, ty, index)
        }
    }
}

/// Check that exactly `expected` operands were passed.
pub(crate) fn expect_arity<V>(args: &[Operand<V>], expected: usize) -> Result<(), Unsupported> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(Unsupported::Arity {
            expected,
            found: args.len(),
        })
    }
}
