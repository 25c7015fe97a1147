//! `bool`, `int`, `float` and the explicit `$number.<type>` casts.

use numjit_core::NumType;
use numjit_core::lang::builtins::{self, BuiltinFnId};
use numjit_core::lang::numerics;

use super::Handler;
use crate::ir::{IrBuilder, Operand};
use crate::lower::errors::Unsupported;
use crate::lower::operands::{cast_operand, expect_arity};
use crate::lower::registry::{HostCallable, RegistryBuilder, RegistryConfig};

/// Target types of the generic host casts.
const HOST_CASTS: [(BuiltinFnId, NumType); 3] = [
    (BuiltinFnId::Bool, NumType::Bool),
    (BuiltinFnId::Int, NumType::Int64),
    (BuiltinFnId::Float, NumType::Float64),
];

pub(super) fn lower_cast<B: IrBuilder>(
    builder: &mut B,
    args: &[Operand<B::Value>],
    ty: NumType,
) -> Result<B::Value, Unsupported> {
    expect_arity(args, 1)?;
    cast_operand(builder, &args[0], ty, 0)
}

pub(super) fn install(registry: &mut RegistryBuilder, config: &RegistryConfig) {
    for (id, ty) in HOST_CASTS {
        registry.register(
            builtins::as_str(id),
            Handler::Cast(ty),
            config.host_alias(HostCallable::Builtin(id)),
        );
    }

    if config.number_casts {
        for ty in NumType::ALL {
            registry.register(numerics::cast_key(ty), Handler::Cast(ty), None);
        }
    }
}
