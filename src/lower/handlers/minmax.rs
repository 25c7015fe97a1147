//! Variadic `min` / `max`.
//!
//! `min(a, b, c)` lowers as `min(a, min(b, c))`: the tail is reduced first, then each pair is promoted, compared
//! with a strict inequality and selected. On a tie the comparison is false, so the later-reduced operand wins.

use numjit_core::lang::builtins::{self, BuiltinFnId};
use numjit_core::{NumType, broadcast_type, promote};

use super::Handler;
use crate::ir::{CmpPredicate, IrBuilder, Operand};
use crate::lower::errors::Unsupported;
use crate::lower::operands::{candidate, cast_operand, scalar_type};
use crate::lower::registry::{HostCallable, RegistryBuilder, RegistryConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Extremum {
    Min,
    Max,
}

impl Extremum {
    fn predicate(self) -> CmpPredicate {
        match self {
            Extremum::Min => CmpPredicate::Lt,
            Extremum::Max => CmpPredicate::Gt,
        }
    }
}

pub(super) fn lower_extremum<B: IrBuilder>(
    builder: &mut B,
    args: &[Operand<B::Value>],
    which: Extremum,
) -> Result<B::Value, Unsupported> {
    if args.len() < 2 {
        return Err(Unsupported::MinArity {
            min: 2,
            found: args.len(),
        });
    }

    let candidates = args
        .iter()
        .enumerate()
        .map(|(index, arg)| candidate(builder, arg).ok_or(Unsupported::OperandKind { index }))
        .collect::<Result<Vec<_>, _>>()?;

    // Complex numbers are unordered; every pairwise promotion is at most as wide as the overall one.
    if broadcast_type(&candidates).is_some_and(NumType::is_complex) {
        let (index, ty) = candidates
            .iter()
            .map(|c| c.resolve())
            .enumerate()
            .find(|(_, ty)| ty.is_complex())
            .unwrap_or((0, NumType::Complex128));
        return Err(Unsupported::OperandType { index, ty });
    }

    // Right fold: the last pair is reduced first, then each earlier operand is combined with the running result.
    let n = args.len();
    let mut acc = step(builder, &args[n - 2], &args[n - 1], n - 2, which)?;
    for offset in (0..n - 2).rev() {
        acc = step(builder, &args[offset], &Operand::Value(acc), offset, which)?;
    }
    Ok(acc)
}

/// Combine operand `offset` with `rhs`, the reduction of everything after it.
fn step<B: IrBuilder>(
    builder: &mut B,
    lhs: &Operand<B::Value>,
    rhs: &Operand<B::Value>,
    offset: usize,
    which: Extremum,
) -> Result<B::Value, Unsupported> {
    let ty = promote(
        scalar_type(builder, lhs, offset)?,
        scalar_type(builder, rhs, offset + 1)?,
    );
    let lhs = cast_operand(builder, lhs, ty, offset)?;
    let rhs = cast_operand(builder, rhs, ty, offset + 1)?;

    let cond = builder.compare(which.predicate(), &lhs, &rhs);
    Ok(builder.select(&cond, &lhs, &rhs))
}

pub(super) fn install(registry: &mut RegistryBuilder, config: &RegistryConfig) {
    for (id, handler) in [(BuiltinFnId::Min, Handler::Min), (BuiltinFnId::Max, Handler::Max)] {
        registry.register(
            builtins::as_str(id),
            handler,
            config.host_alias(HostCallable::Builtin(id)),
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ir::{Evaluator, RecordingBuilder, ScalarValue};

    fn eval_literals(args: &[Operand<crate::ir::ValueId>], which: Extremum) -> ScalarValue {
        let mut b = RecordingBuilder::new();
        let res = lower_extremum(&mut b, args, which).unwrap();
        Evaluator::new(&b).eval(res).unwrap()
    }

    #[test]
    fn test_min_promotes_mixed_literals() {
        let args = [Operand::Int(5), Operand::Float(2.0), Operand::Int(9)];
        assert_eq!(eval_literals(&args, Extremum::Min), ScalarValue::F64(2.0));
        assert_eq!(eval_literals(&args, Extremum::Max), ScalarValue::F64(9.0));
    }

    #[test]
    fn test_pure_int_literals_stay_int64() {
        let args = [Operand::Int(3), Operand::Int(-7)];
        assert_eq!(eval_literals(&args, Extremum::Min), ScalarValue::I64(-7));
        assert_eq!(eval_literals(&args, Extremum::Max), ScalarValue::I64(3));
    }

    #[test]
    fn test_tie_selects_later_operand() {
        let mut b = RecordingBuilder::new();
        let x = b.param(NumType::Float64);
        let y = b.param(NumType::Float64);
        let res = lower_extremum(&mut b, &[Operand::Value(x), Operand::Value(y)], Extremum::Min).unwrap();
        let ev = Evaluator::new(&b)
            .bind(0, ScalarValue::F64(0.0))
            .bind(1, ScalarValue::F64(-0.0));
        let ScalarValue::F64(out) = ev.eval(res).unwrap() else {
            panic!("expected float64");
        };
        assert!(out.is_sign_negative(), "0.0 == -0.0, so the rhs is selected");
    }

    #[test]
    fn test_typed_operands_are_cast_to_promoted_type() {
        let mut b = RecordingBuilder::new();
        let x = b.param(NumType::Int8);
        let y = b.param(NumType::UInt8);
        let res = lower_extremum(&mut b, &[Operand::Value(x), Operand::Value(y)], Extremum::Max).unwrap();
        assert_eq!(b.scalar_type(&res), Some(NumType::Int16));
    }

    #[test]
    fn test_declines_without_emitting() {
        let mut b = RecordingBuilder::new();
        let z = b.param(NumType::Complex64);
        let arr = b.array_param(NumType::Float64, Some(2));
        assert_eq!(
            lower_extremum(&mut b, &[Operand::Int(1)], Extremum::Min),
            Err(Unsupported::MinArity { min: 2, found: 1 })
        );
        assert_eq!(
            lower_extremum(&mut b, &[Operand::Float(1.0), Operand::Value(z)], Extremum::Min),
            Err(Unsupported::OperandType {
                index: 1,
                ty: NumType::Complex64
            })
        );
        assert_eq!(
            lower_extremum(&mut b, &[Operand::Int(1), Operand::Int(2), Operand::Value(arr)], Extremum::Max),
            Err(Unsupported::OperandKind { index: 2 })
        );
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_right_fold_emission_order() {
        let mut b = RecordingBuilder::new();
        let x = b.param(NumType::Int64);
        let y = b.param(NumType::Int64);
        let z = b.param(NumType::Int64);
        let args = [Operand::Value(x), Operand::Value(y), Operand::Value(z)];
        lower_extremum(&mut b, &args, Extremum::Min).unwrap();
        let text = b.to_string();
        let body: Vec<&str> = text.lines().skip(3).collect();
        assert_eq!(
            body,
            [
                "%3 = cmp lt %1, %2 : bool",
                "%4 = select %3, %1, %2 : int64",
                "%5 = cmp lt %0, %4 : bool",
                "%6 = select %5, %0, %4 : int64",
            ]
        );
    }

    #[test]
    fn test_very_long_operand_list() {
        let args: Vec<Operand<crate::ir::ValueId>> = (0..50_000).rev().map(Operand::Int).collect();
        let mut b = RecordingBuilder::new();
        let res = lower_extremum(&mut b, &args, Extremum::Min).unwrap();
        assert_eq!(b.scalar_type(&res), Some(NumType::Int64));
        assert_eq!(Evaluator::new(&b).eval(res), Ok(ScalarValue::I64(0)));
    }
}
