//! `len` over containers with a compile-time length.

use numjit_core::NumType;
use numjit_core::lang::builtins::{self, BuiltinFnId};

use super::Handler;
use crate::ir::{IrBuilder, Literal, Operand};
use crate::lower::errors::Unsupported;
use crate::lower::operands::expect_arity;
use crate::lower::registry::{HostCallable, RegistryBuilder, RegistryConfig};

/// Lower `len(x)` to an `int64` constant, or decline when the length is not known statically.
pub(super) fn lower_len<B: IrBuilder>(builder: &mut B, args: &[Operand<B::Value>]) -> Result<B::Value, Unsupported> {
    expect_arity(args, 1)?;
    let len = match &args[0] {
        Operand::Tuple(items) => u64::try_from(items.len()).ok(),
        Operand::Value(v) => builder.static_len(v),
        Operand::Int(_) | Operand::Float(_) => None,
    };
    let len = len
        .and_then(|len| i64::try_from(len).ok())
        .ok_or(Unsupported::NoStaticLength)?;
    Ok(builder.constant(Literal::Int(len), NumType::Int64))
}

pub(super) fn install(registry: &mut RegistryBuilder, config: &RegistryConfig) {
    registry.register(
        builtins::as_str(BuiltinFnId::Len),
        Handler::Len,
        config.host_alias(HostCallable::Builtin(BuiltinFnId::Len)),
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ir::{Evaluator, RecordingBuilder, ScalarValue};

    #[test]
    fn test_static_array_length() {
        let mut b = RecordingBuilder::new();
        let arr = b.array_param(NumType::Float32, Some(10));
        let res = lower_len(&mut b, &[Operand::Value(arr)]).unwrap();
        assert_eq!(b.scalar_type(&res), Some(NumType::Int64));
        assert_eq!(Evaluator::new(&b).eval(res), Ok(ScalarValue::I64(10)));
    }

    #[test]
    fn test_tuple_length() {
        let mut b = RecordingBuilder::new();
        let tuple = Operand::Tuple(vec![Operand::Int(1), Operand::Float(2.0), Operand::Int(3)]);
        let res = lower_len(&mut b, &[tuple]).unwrap();
        assert_eq!(Evaluator::new(&b).eval(res), Ok(ScalarValue::I64(3)));
    }

    #[test]
    fn test_unknown_length_declines() {
        let mut b = RecordingBuilder::new();
        let arr = b.array_param(NumType::Float32, None);
        let scalar = b.param(NumType::Int64);
        assert_eq!(lower_len(&mut b, &[Operand::Value(arr)]), Err(Unsupported::NoStaticLength));
        assert_eq!(lower_len(&mut b, &[Operand::Value(scalar)]), Err(Unsupported::NoStaticLength));
        assert_eq!(lower_len::<RecordingBuilder>(&mut b, &[Operand::Int(4)]), Err(Unsupported::NoStaticLength));
        assert_eq!(b.len(), 2);
    }
}
