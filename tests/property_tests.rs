//! Property-based tests for builtin lowering
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use numjit::ir::{Evaluator, Operand, RecordingBuilder, ScalarValue, ValueId};
use numjit::lower::{Registry, lower_call};
use numjit_core::{NumType, TypeCandidate, broadcast_type, promote};
use proptest::prelude::*;

fn num_type() -> impl Strategy<Value = NumType> {
    prop::sample::select(NumType::ALL.to_vec())
}

/// Operand shapes a frontend may hand to a handler.
#[derive(Debug, Clone)]
enum OperandShape {
    Int(i64),
    Float(f64),
    Param(NumType),
    Array(Option<u64>),
    Tuple(usize),
}

fn operand_shape() -> impl Strategy<Value = OperandShape> {
    prop_oneof![
        any::<i64>().prop_map(OperandShape::Int),
        any::<f64>().prop_map(OperandShape::Float),
        num_type().prop_map(OperandShape::Param),
        prop::option::of(0u64..64).prop_map(OperandShape::Array),
        (0usize..4).prop_map(OperandShape::Tuple),
    ]
}

fn build(builder: &mut RecordingBuilder, shape: &OperandShape) -> Operand<ValueId> {
    match shape {
        OperandShape::Int(i) => Operand::Int(*i),
        OperandShape::Float(x) => Operand::Float(*x),
        OperandShape::Param(ty) => Operand::Value(builder.param(*ty)),
        OperandShape::Array(len) => Operand::Value(builder.array_param(NumType::Float64, *len)),
        OperandShape::Tuple(n) => Operand::Tuple((0..*n as i64).map(Operand::Int).collect()),
    }
}

fn eval_min_max(key: &str, values: &[i64]) -> ScalarValue {
    let mut builder = RecordingBuilder::new();
    let args: Vec<Operand<ValueId>> = values.iter().copied().map(Operand::Int).collect();
    let value = lower_call(&Registry::standard(), &mut builder, &key.into(), &args).expect("lowering failed");
    Evaluator::new(&builder).eval(value).expect("evaluation failed")
}

// =============================================================================
// Promotion Properties
// =============================================================================

mod promotion_tests {
    use super::*;

    proptest! {
        /// Property: promotion does not depend on operand order
        #[test]
        fn promote_is_commutative(a in num_type(), b in num_type()) {
            prop_assert_eq!(promote(a, b), promote(b, a));
        }

        /// Property: promoting a type with itself is the identity
        #[test]
        fn promote_is_idempotent(a in num_type()) {
            prop_assert_eq!(promote(a, a), a);
        }

        /// Property: an inexact operand always yields an inexact result
        #[test]
        fn inexact_operands_stay_inexact(a in num_type(), b in num_type()) {
            let out = promote(a, b);
            if a.is_float() || a.is_complex() || b.is_float() || b.is_complex() {
                prop_assert!(out.is_float() || out.is_complex());
            }
        }

        /// Property: an int literal combined with a float64 value promotes to float64
        #[test]
        fn literal_with_float64_is_float64(extra in prop::collection::vec(num_type(), 0..3)) {
            let mut candidates = vec![TypeCandidate::IntLiteral, TypeCandidate::Typed(NumType::Float64)];
            candidates.extend(extra.iter().copied().filter(|t| t.is_int() || t.is_bool()).map(TypeCandidate::Typed));
            prop_assert_eq!(broadcast_type(&candidates), Some(NumType::Float64));
        }
    }
}

// =============================================================================
// Lowering Properties
// =============================================================================

mod lowering_tests {
    use super::*;

    proptest! {
        /// Property: every cast handler yields exactly its target type
        #[test]
        fn casts_yield_target_type(from in num_type(), to in num_type()) {
            let mut builder = RecordingBuilder::new();
            let x = builder.param(from);
            let key = numjit_core::lang::numerics::cast_key(to);
            let value = lower_call(&Registry::standard(), &mut builder, &key.into(), &[Operand::Value(x)])
                .expect("cast failed");
            prop_assert_eq!(builder.type_of(value).and_then(|t| t.as_scalar()), Some(to));
        }

        /// Property: min/max over three int literals matches the reference in value
        #[test]
        fn min_max_match_reference(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
            prop_assert_eq!(eval_min_max("min", &[a, b, c]), ScalarValue::I64(a.min(b).min(c)));
            prop_assert_eq!(eval_min_max("max", &[a, b, c]), ScalarValue::I64(a.max(b).max(c)));
        }

        /// Property: min/max are associative in value
        #[test]
        fn min_is_associative_in_value(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
            let inner = eval_min_max("min", &[a, b]);
            let ScalarValue::I64(inner) = inner else { panic!("expected int64") };
            prop_assert_eq!(eval_min_max("min", &[inner, c]), eval_min_max("min", &[a, b, c]));
        }

        /// Property: every registered handler either lowers or declines without emitting IR, and never panics
        #[test]
        fn handlers_are_total(shapes in prop::collection::vec(operand_shape(), 0..4)) {
            let registry = Registry::standard();
            for key in registry.keys() {
                let mut builder = RecordingBuilder::new();
                let args: Vec<Operand<ValueId>> = shapes.iter().map(|s| build(&mut builder, s)).collect();
                let before = builder.len();
                match lower_call(&registry, &mut builder, &key.into(), &args) {
                    Ok(value) => {
                        prop_assert!(builder.type_of(value).is_some());
                    }
                    Err(_) => {
                        prop_assert_eq!(builder.len(), before, "{} emitted IR before declining", key);
                    }
                }
            }
        }
    }
}
