//! Transcendental math functions and the `exp` / `sqrt` helper aliases.
//!
//! The table handlers accept integer and floating operands only. The helper aliases go through the same libm naming
//! and additionally accept complex operands (`cexp`, `csqrt`).

use numjit_core::lang::math::{self, HELPER_FUNCTIONS, HelperFnId, MATH_FUNCTIONS, MathFuncSpec};
use numjit_core::{NumType, libm_symbol};

use super::Handler;
use crate::ir::{IrBuilder, Literal, Operand};
use crate::lower::errors::Unsupported;
use crate::lower::operands::{cast_operand, expect_arity, materialize, scalar_type};
use crate::lower::registry::{HostCallable, RegistryBuilder, RegistryConfig};

/// Lower a call to one row of the math table.
///
/// `float32` operands call the `f`-suffixed single-precision symbol unchanged; every other accepted type is cast to
/// `float64` first.
pub(super) fn lower_math_fn<B: IrBuilder>(
    builder: &mut B,
    args: &[Operand<B::Value>],
    spec: &MathFuncSpec,
) -> Result<B::Value, Unsupported> {
    expect_arity(args, spec.arity)?;

    let first = scalar_type(builder, &args[0], 0)?;
    if !(first.is_int() || first.is_float()) {
        return Err(Unsupported::OperandType { index: 0, ty: first });
    }
    for (index, arg) in args.iter().enumerate().skip(1) {
        let ty = scalar_type(builder, arg, index)?;
        if ty != first {
            return Err(Unsupported::TypeMismatch {
                index,
                expected: first,
                found: ty,
            });
        }
    }

    let call_ty = if first == NumType::Float32 {
        NumType::Float32
    } else {
        NumType::Float64
    };
    let symbol =
        libm_symbol(spec.name(), call_ty, false).ok_or(Unsupported::OperandType { index: 0, ty: first })?;

    let mut values = Vec::with_capacity(args.len());
    for (index, arg) in args.iter().enumerate() {
        values.push(cast_operand(builder, arg, call_ty, index)?);
    }
    let template = builder.constant(Literal::Int(0), call_ty);
    Ok(builder.external_call(&symbol, &values, &template, false))
}

/// Lower a helper alias: integers are promoted to `float64`, floating and complex operands keep their type.
pub(super) fn lower_helper<B: IrBuilder>(
    builder: &mut B,
    args: &[Operand<B::Value>],
    id: HelperFnId,
) -> Result<B::Value, Unsupported> {
    expect_arity(args, 1)?;
    let ty = scalar_type(builder, &args[0], 0)?;
    let call_ty = if ty.is_int() { NumType::Float64 } else { ty };
    let symbol =
        libm_symbol(math::helper_as_str(id), call_ty, false).ok_or(Unsupported::OperandType { index: 0, ty })?;

    let value = if ty.is_int() {
        cast_operand(builder, &args[0], call_ty, 0)?
    } else {
        materialize(builder, &args[0], 0)?
    };
    let template = builder.constant(Literal::Int(0), call_ty);
    Ok(builder.external_call(&symbol, &[value], &template, false))
}

pub(super) fn install_table(registry: &mut RegistryBuilder, config: &RegistryConfig) {
    for spec in MATH_FUNCTIONS {
        registry.register(
            math::fn_key(spec.info.id),
            Handler::Math(spec.info.id),
            config.host_alias(HostCallable::Math(spec.info.id)),
        );
    }
}

pub(super) fn install_helpers(registry: &mut RegistryBuilder, config: &RegistryConfig) {
    for info in HELPER_FUNCTIONS {
        registry.register(
            math::helper_key(info.id),
            Handler::Helper(info.id),
            config.host_alias(HostCallable::Helper(info.id)),
        );
    }
}
