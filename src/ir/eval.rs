//! Evaluate recorded IR with concrete parameter values.
//!
//! The evaluator resolves the libm-style symbols builtin lowering emits (`fabs`, `expf`, `csqrt`, ...) to the Rust
//! standard library's implementations of the same functions. Symbols the standard library has no counterpart for
//! (`erf`, `erff`) are reported as [`EvalError::UnknownSymbol`].

use std::collections::HashMap;

use numjit_core::NumType;
use thiserror::Error;

use super::recording::{InstKind, IrType, RecordingBuilder, ValueId};
use super::value::{ScalarValue, Wide};
use super::CmpPredicate;

/// Errors produced while evaluating recorded IR.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("value {0} is not defined")]
    UndefinedValue(ValueId),

    #[error("parameter {index} is not bound")]
    Unbound { index: usize },

    #[error("parameter {index} has type {expected} but was bound to a {found} value")]
    BindingType {
        index: usize,
        expected: IrType,
        found: NumType,
    },

    #[error("value {0} is not a scalar")]
    NotScalar(ValueId),

    #[error("{0} values are unordered")]
    Unordered(NumType),

    #[error("select condition {0} is not a bool")]
    NonBoolCondition(ValueId),

    #[error("cannot negate a {0} value")]
    InvalidNegation(NumType),

    #[error("unknown external symbol `{symbol}` for {arity} argument(s)")]
    UnknownSymbol { symbol: String, arity: usize },

    #[error("`{symbol}` produced a {found} value but the call returns {expected}")]
    ReturnType {
        symbol: String,
        expected: NumType,
        found: NumType,
    },
}

/// Computes recorded values for a set of bound parameters.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    func: &'a RecordingBuilder,
    bindings: HashMap<usize, ScalarValue>,
}

impl<'a> Evaluator<'a> {
    pub fn new(func: &'a RecordingBuilder) -> Self {
        Self {
            func,
            bindings: HashMap::new(),
        }
    }

    /// Bind scalar parameter `index` to `value`.
    pub fn bind(mut self, index: usize, value: ScalarValue) -> Self {
        self.bindings.insert(index, value);
        self
    }

    /// Evaluate `id` and everything it depends on.
    ///
    /// Only the taken branch of a `select` is evaluated. Evaluation is driven by an explicit work list, so arbitrarily
    /// long dependency chains do not grow the call stack.
    pub fn eval(&self, id: ValueId) -> Result<ScalarValue, EvalError> {
        let mut memo: Vec<Option<ScalarValue>> = vec![None; self.func.len()];
        let mut pending = vec![id];
        while let Some(&top) = pending.last() {
            if known(&memo, top).is_some() {
                pending.pop();
                continue;
            }
            let inst = self.func.inst(top).ok_or(EvalError::UndefinedValue(top))?;
            match next_operand(&inst.kind, &memo)? {
                Some(operand) => pending.push(operand),
                None => {
                    let value = self.compute(top, &memo)?;
                    memo[top.index()] = Some(value);
                    pending.pop();
                }
            }
        }
        known(&memo, id).ok_or(EvalError::UndefinedValue(id))
    }

    /// Value of `id`, given that every operand it reads is already in `memo`.
    fn compute(&self, id: ValueId, memo: &[Option<ScalarValue>]) -> Result<ScalarValue, EvalError> {
        let inst = self.func.inst(id).ok_or(EvalError::UndefinedValue(id))?;
        let IrType::Scalar(ty) = inst.ty else {
            return Err(EvalError::NotScalar(id));
        };
        let operand = |v: ValueId| known(memo, v).ok_or(EvalError::UndefinedValue(v));

        let value = match &inst.kind {
            InstKind::Param { index } => {
                let bound = *self.bindings.get(index).ok_or(EvalError::Unbound { index: *index })?;
                if bound.ty() != ty {
                    return Err(EvalError::BindingType {
                        index: *index,
                        expected: inst.ty,
                        found: bound.ty(),
                    });
                }
                bound
            }
            InstKind::Const { value } => *value,
            InstKind::Cast { src } => operand(*src)?.cast(ty),
            InstKind::Cmp { pred, lhs, rhs } => ScalarValue::Bool(compare(*pred, operand(*lhs)?, operand(*rhs)?)?),
            InstKind::Select {
                cond,
                on_true,
                on_false,
            } => match operand(*cond)? {
                ScalarValue::Bool(true) => operand(*on_true)?,
                ScalarValue::Bool(false) => operand(*on_false)?,
                _ => return Err(EvalError::NonBoolCondition(*cond)),
            },
            InstKind::Neg { operand: src } => negate(operand(*src)?)?,
            InstKind::Call { symbol, args, .. } => {
                let args = args.iter().map(|arg| operand(*arg)).collect::<Result<Vec<_>, _>>()?;
                let result = call_libm(symbol, &args)?;
                if result.ty() != ty {
                    return Err(EvalError::ReturnType {
                        symbol: symbol.clone(),
                        expected: ty,
                        found: result.ty(),
                    });
                }
                result
            }
        };
        Ok(value)
    }
}

fn known(memo: &[Option<ScalarValue>], id: ValueId) -> Option<ScalarValue> {
    memo.get(id.index()).copied().flatten()
}

/// The first operand of `kind` that still has to be evaluated, if any.
fn next_operand(kind: &InstKind, memo: &[Option<ScalarValue>]) -> Result<Option<ValueId>, EvalError> {
    let missing = |id: &ValueId| known(memo, *id).is_none();
    let next = match kind {
        InstKind::Param { .. } | InstKind::Const { .. } => None,
        InstKind::Cast { src } => Some(*src).filter(missing),
        InstKind::Neg { operand } => Some(*operand).filter(missing),
        InstKind::Cmp { lhs, rhs, .. } => [*lhs, *rhs].into_iter().find(missing),
        InstKind::Select {
            cond,
            on_true,
            on_false,
        } => match known(memo, *cond) {
            None => Some(*cond),
            Some(ScalarValue::Bool(true)) => Some(*on_true).filter(missing),
            Some(ScalarValue::Bool(false)) => Some(*on_false).filter(missing),
            Some(_) => return Err(EvalError::NonBoolCondition(*cond)),
        },
        InstKind::Call { args, .. } => args.iter().copied().find(missing),
    };
    Ok(next)
}

fn compare(pred: CmpPredicate, lhs: ScalarValue, rhs: ScalarValue) -> Result<bool, EvalError> {
    let ordering = match (lhs.widen(), rhs.widen()) {
        (Wide::Int(a), Wide::Int(b)) => Some(a.cmp(&b)),
        (Wide::Float(a), Wide::Float(b)) => a.partial_cmp(&b),
        (Wide::Int(a), Wide::Float(b)) => (a as f64).partial_cmp(&b),
        (Wide::Float(a), Wide::Int(b)) => a.partial_cmp(&(b as f64)),
        (Wide::Complex(re_a, im_a), Wide::Complex(re_b, im_b)) => {
            return match pred {
                CmpPredicate::Eq => Ok(re_a == re_b && im_a == im_b),
                CmpPredicate::Ne => Ok(re_a != re_b || im_a != im_b),
                _ => Err(EvalError::Unordered(lhs.ty())),
            };
        }
        _ => return Err(EvalError::Unordered(lhs.ty())),
    };

    // Unordered (NaN) operands satisfy only `ne`, matching IEEE-754 comparisons.
    let Some(ordering) = ordering else {
        return Ok(pred == CmpPredicate::Ne);
    };
    Ok(match pred {
        CmpPredicate::Lt => ordering.is_lt(),
        CmpPredicate::Le => ordering.is_le(),
        CmpPredicate::Gt => ordering.is_gt(),
        CmpPredicate::Ge => ordering.is_ge(),
        CmpPredicate::Eq => ordering.is_eq(),
        CmpPredicate::Ne => ordering.is_ne(),
    })
}

fn negate(value: ScalarValue) -> Result<ScalarValue, EvalError> {
    Ok(match value {
        ScalarValue::I8(i) => ScalarValue::I8(i.wrapping_neg()),
        ScalarValue::I16(i) => ScalarValue::I16(i.wrapping_neg()),
        ScalarValue::I32(i) => ScalarValue::I32(i.wrapping_neg()),
        ScalarValue::I64(i) => ScalarValue::I64(i.wrapping_neg()),
        ScalarValue::U8(u) => ScalarValue::U8(u.wrapping_neg()),
        ScalarValue::U16(u) => ScalarValue::U16(u.wrapping_neg()),
        ScalarValue::U32(u) => ScalarValue::U32(u.wrapping_neg()),
        ScalarValue::U64(u) => ScalarValue::U64(u.wrapping_neg()),
        ScalarValue::F32(x) => ScalarValue::F32(-x),
        ScalarValue::F64(x) => ScalarValue::F64(-x),
        ScalarValue::C64(re, im) => ScalarValue::C64(-re, -im),
        ScalarValue::C128(re, im) => ScalarValue::C128(-re, -im),
        ScalarValue::Bool(_) => return Err(EvalError::InvalidNegation(NumType::Bool)),
    })
}

fn call_libm(symbol: &str, args: &[ScalarValue]) -> Result<ScalarValue, EvalError> {
    let unknown = || EvalError::UnknownSymbol {
        symbol: symbol.to_string(),
        arity: args.len(),
    };

    match (symbol, args) {
        ("fabs", [ScalarValue::F64(x)]) => Ok(ScalarValue::F64(x.abs())),
        ("fabsf", [ScalarValue::F32(x)]) => Ok(ScalarValue::F32(x.abs())),
        ("cabs", [ScalarValue::C128(re, im)]) => Ok(ScalarValue::F64(re.hypot(*im))),
        ("cabsf", [ScalarValue::C64(re, im)]) => Ok(ScalarValue::F32(re.hypot(*im))),
        ("atan2", [ScalarValue::F64(y), ScalarValue::F64(x)]) => Ok(ScalarValue::F64(y.atan2(*x))),
        ("atan2f", [ScalarValue::F32(y), ScalarValue::F32(x)]) => Ok(ScalarValue::F32(y.atan2(*x))),
        ("cexp", [ScalarValue::C128(re, im)]) => {
            let (re, im) = complex_exp(*re, *im);
            Ok(ScalarValue::C128(re, im))
        }
        ("cexpf", [ScalarValue::C64(re, im)]) => {
            let (re, im) = complex_exp(f64::from(*re), f64::from(*im));
            Ok(ScalarValue::C64(re as f32, im as f32))
        }
        ("csqrt", [ScalarValue::C128(re, im)]) => {
            let (re, im) = complex_sqrt(*re, *im);
            Ok(ScalarValue::C128(re, im))
        }
        ("csqrtf", [ScalarValue::C64(re, im)]) => {
            let (re, im) = complex_sqrt(f64::from(*re), f64::from(*im));
            Ok(ScalarValue::C64(re as f32, im as f32))
        }
        (name, [ScalarValue::F64(x)]) => unary_f64(name, *x).map(ScalarValue::F64).ok_or_else(unknown),
        (name, [ScalarValue::F32(x)]) => name
            .strip_suffix('f')
            .and_then(|base| unary_f32(base, *x))
            .map(ScalarValue::F32)
            .ok_or_else(unknown),
        _ => Err(unknown()),
    }
}

fn unary_f64(name: &str, x: f64) -> Option<f64> {
    Some(match name {
        "floor" => x.floor(),
        "log" => x.ln(),
        "sqrt" => x.sqrt(),
        "exp" => x.exp(),
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tanh" => x.tanh(),
        _ => return None,
    })
}

fn unary_f32(name: &str, x: f32) -> Option<f32> {
    Some(match name {
        "floor" => x.floor(),
        "log" => x.ln(),
        "sqrt" => x.sqrt(),
        "exp" => x.exp(),
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tanh" => x.tanh(),
        _ => return None,
    })
}

fn complex_exp(re: f64, im: f64) -> (f64, f64) {
    let scale = re.exp();
    (scale * im.cos(), scale * im.sin())
}

/// Principal square root; the imaginary part carries the sign of `im`.
fn complex_sqrt(re: f64, im: f64) -> (f64, f64) {
    let modulus = re.hypot(im);
    let real = ((modulus + re) / 2.0).sqrt();
    let imag = ((modulus - re) / 2.0).sqrt().copysign(im);
    (real, imag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IrBuilder, Literal};

    #[test]
    fn test_select_picks_branch() {
        let mut b = RecordingBuilder::new();
        let x = b.param(NumType::Int32);
        let zero = b.constant(Literal::Int(0), NumType::Int32);
        let cond = b.compare(CmpPredicate::Lt, &x, &zero);
        let neg = b.neg(&x);
        let res = b.select(&cond, &neg, &x);

        let eval = Evaluator::new(&b).bind(0, ScalarValue::I32(-7));
        assert_eq!(eval.eval(res), Ok(ScalarValue::I32(7)));
        let eval = Evaluator::new(&b).bind(0, ScalarValue::I32(3));
        assert_eq!(eval.eval(res), Ok(ScalarValue::I32(3)));
    }

    #[test]
    fn test_untaken_branch_is_not_evaluated() {
        let mut b = RecordingBuilder::new();
        let flag = b.param(NumType::Bool);
        let unbound = b.param(NumType::Float64);
        let one = b.constant(Literal::Float(1.0), NumType::Float64);
        let res = b.select(&flag, &one, &unbound);
        let eval = Evaluator::new(&b).bind(0, ScalarValue::Bool(true));
        assert_eq!(eval.eval(res), Ok(ScalarValue::F64(1.0)));
        let eval = Evaluator::new(&b).bind(0, ScalarValue::Bool(false));
        assert_eq!(eval.eval(res), Err(EvalError::Unbound { index: 1 }));
    }

    #[test]
    fn test_long_dependency_chain() {
        let mut b = RecordingBuilder::new();
        let mut value = b.param(NumType::Int64);
        for _ in 0..100_001 {
            value = b.neg(&value);
        }
        let eval = Evaluator::new(&b).bind(0, ScalarValue::I64(5));
        assert_eq!(eval.eval(value), Ok(ScalarValue::I64(-5)));
    }

    #[test]
    fn test_unbound_and_mistyped_params() {
        let mut b = RecordingBuilder::new();
        let x = b.param(NumType::Float64);
        assert_eq!(Evaluator::new(&b).eval(x), Err(EvalError::Unbound { index: 0 }));
        assert!(matches!(
            Evaluator::new(&b).bind(0, ScalarValue::F32(1.0)).eval(x),
            Err(EvalError::BindingType { index: 0, .. })
        ));
    }

    #[test]
    fn test_nan_comparisons() {
        let nan = ScalarValue::F64(f64::NAN);
        let one = ScalarValue::F64(1.0);
        assert_eq!(compare(CmpPredicate::Lt, nan, one), Ok(false));
        assert_eq!(compare(CmpPredicate::Gt, nan, one), Ok(false));
        assert_eq!(compare(CmpPredicate::Ne, nan, nan), Ok(true));
    }

    #[test]
    fn test_complex_is_unordered() {
        let z = ScalarValue::C64(1.0, 1.0);
        assert_eq!(compare(CmpPredicate::Lt, z, z), Err(EvalError::Unordered(NumType::Complex64)));
        assert_eq!(compare(CmpPredicate::Eq, z, z), Ok(true));
    }

    #[test]
    fn test_libm_dispatch() {
        assert_eq!(call_libm("fabsf", &[ScalarValue::F32(-2.5)]), Ok(ScalarValue::F32(2.5)));
        assert_eq!(call_libm("cabs", &[ScalarValue::C128(3.0, 4.0)]), Ok(ScalarValue::F64(5.0)));
        assert_eq!(call_libm("sqrtf", &[ScalarValue::F32(9.0)]), Ok(ScalarValue::F32(3.0)));
        assert_eq!(call_libm("floor", &[ScalarValue::F64(-1.5)]), Ok(ScalarValue::F64(-2.0)));
        assert_eq!(
            call_libm("csqrt", &[ScalarValue::C128(-4.0, 0.0)]),
            Ok(ScalarValue::C128(0.0, 2.0))
        );
    }

    #[test]
    fn test_libm_rejects_mismatched_precision() {
        assert!(matches!(
            call_libm("floorf", &[ScalarValue::F64(1.0)]),
            Err(EvalError::UnknownSymbol { .. })
        ));
        assert!(matches!(
            call_libm("erf", &[ScalarValue::F64(1.0)]),
            Err(EvalError::UnknownSymbol { .. })
        ));
    }
}
