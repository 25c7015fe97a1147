//! Builtin lowering handlers.
//!
//! Every handler is a variant of [`Handler`]: plain data, so the registry can be shared freely between compilation
//! threads. The table-driven math handlers carry the identifier of their [`MathFuncSpec`] row instead of a captured
//! closure.
//!
//! ## Module Organization
//!
//! - `casts.rs` - `bool`, `int`, `float` and the `$number.<type>` casts
//! - `len.rs` - `len` over statically sized containers
//! - `minmax.rs` - variadic `min` / `max`
//! - `abs.rs` - `abs` (inline for integers, libm call otherwise)
//! - `math.rs` - the transcendental table and the helper-function aliases
//!
//! [`MathFuncSpec`]: numjit_core::lang::math::MathFuncSpec

mod abs;
mod casts;
mod len;
mod math;
mod minmax;

use std::fmt;

use numjit_core::NumType;
use numjit_core::lang::math::{self as math_vocab, HelperFnId, MathFnId};

use super::errors::Lowering;
use super::registry::{RegistryBuilder, RegistryConfig};
use crate::ir::{IrBuilder, Operand};

use minmax::Extremum;

/// A builtin lowering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Cast the single operand to the given type.
    Cast(NumType),
    Len,
    Min,
    Max,
    Abs,
    /// Row of the transcendental table.
    Math(MathFnId),
    /// Helper-function alias (`exp` / `sqrt` accepting complex operands).
    Helper(HelperFnId),
}

impl Handler {
    /// Lower one call site.
    ///
    /// ## Parameters
    /// - `builder`: the IR builder of the function being compiled.
    /// - `args`: the call's operands, already lowered by the frontend.
    ///
    /// ## Returns
    /// - [`Lowering::Lowered`] with the result value, or [`Lowering::Unsupported`] when the operands fall outside the
    ///   handler's supported arity/type set. A declined call emits no IR.
    pub fn invoke<B: IrBuilder>(&self, builder: &mut B, args: &[Operand<B::Value>]) -> Lowering<B::Value> {
        let result = match *self {
            Handler::Cast(ty) => casts::lower_cast(builder, args, ty),
            Handler::Len => len::lower_len(builder, args),
            Handler::Min => minmax::lower_extremum(builder, args, Extremum::Min),
            Handler::Max => minmax::lower_extremum(builder, args, Extremum::Max),
            Handler::Abs => abs::lower_abs(builder, args),
            Handler::Math(id) => math::lower_math_fn(builder, args, math_vocab::spec_for(id)),
            Handler::Helper(id) => math::lower_helper(builder, args, id),
        };
        result.into()
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Cast(ty) => write!(f, "cast -> {ty}"),
            Handler::Len => f.write_str("len"),
            Handler::Min => f.write_str("min"),
            Handler::Max => f.write_str("max"),
            Handler::Abs => f.write_str("abs"),
            Handler::Math(id) => {
                let spec = math_vocab::spec_for(*id);
                write!(f, "libm {}/{}", spec.name(), spec.arity)
            }
            Handler::Helper(id) => write!(f, "libm helper {}", math_vocab::helper_as_str(*id)),
        }
    }
}

/// Populate `registry` with every standard handler group enabled in `config`.
pub(crate) fn install_standard(registry: &mut RegistryBuilder, config: &RegistryConfig) {
    casts::install(registry, config);
    len::install(registry, config);
    minmax::install(registry, config);
    abs::install(registry, config);
    if config.math_functions {
        math::install_table(registry, config);
    }
    if config.helper_functions {
        math::install_helpers(registry, config);
    }
}
