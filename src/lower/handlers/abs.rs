//! `abs`: inline select for integers, a libm call for floating and complex operands.

use numjit_core::lang::builtins::{self, BuiltinFnId};
use numjit_core::libm_symbol;

use super::Handler;
use crate::ir::{CmpPredicate, IrBuilder, Literal, Operand};
use crate::lower::errors::Unsupported;
use crate::lower::operands::{expect_arity, materialize, scalar_type};
use crate::lower::registry::{HostCallable, RegistryBuilder, RegistryConfig};

pub(super) fn lower_abs<B: IrBuilder>(builder: &mut B, args: &[Operand<B::Value>]) -> Result<B::Value, Unsupported> {
    expect_arity(args, 1)?;
    let ty = scalar_type(builder, &args[0], 0)?;

    if ty.is_int() {
        let value = materialize(builder, &args[0], 0)?;
        let zero = builder.constant(Literal::Int(0), ty);
        let negative = builder.compare(CmpPredicate::Lt, &value, &zero);
        let negated = builder.neg(&value);
        return Ok(builder.select(&negative, &negated, &value));
    }

    // `bool` has neither an integer nor a libm lowering.
    let symbol = libm_symbol(builtins::as_str(BuiltinFnId::Abs), ty, true)
        .ok_or(Unsupported::OperandType { index: 0, ty })?;
    let value = materialize(builder, &args[0], 0)?;
    let template = builder.constant(Literal::Int(0), ty.real_type());
    Ok(builder.external_call(&symbol, &[value], &template, false))
}

pub(super) fn install(registry: &mut RegistryBuilder, config: &RegistryConfig) {
    registry.register(
        builtins::as_str(BuiltinFnId::Abs),
        Handler::Abs,
        config.host_alias(HostCallable::Builtin(BuiltinFnId::Abs)),
    );
}
