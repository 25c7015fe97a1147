//! IR builder interface consumed by builtin lowering.
//!
//! Lowering never constructs IR itself. Handlers receive an [`IrBuilder`] and ask it for casts, comparisons, selects,
//! negations and external calls. Any backend that can provide those operations can host the builtin handlers.
//!
//! ## Module Organization
//!
//! - `mod.rs` - The [`IrBuilder`] trait and the operand model handed to handlers
//! - `recording.rs` - [`RecordingBuilder`], a reference builder that records a typed instruction list
//! - `value.rs` - [`ScalarValue`], concrete scalar values and their conversion rules
//! - `eval.rs` - [`Evaluator`], computes recorded values for bound parameters

pub mod eval;
pub mod recording;
pub mod value;

pub use eval::{EvalError, Evaluator};
pub use recording::{Inst, InstKind, IrType, RecordingBuilder, ValueId};
pub use value::ScalarValue;

use std::fmt;

use numjit_core::NumType;

/// An untyped host-language literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// An argument at a builtin call site, as handed to a handler by the frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<V> {
    /// Raw host integer literal (promotes as `int64`).
    Int(i64),
    /// Raw host float literal (promotes as `float64`).
    Float(f64),
    /// Host tuple with a statically known number of elements.
    Tuple(Vec<Operand<V>>),
    /// An already-lowered IR value.
    Value(V),
}

impl<V> Operand<V> {
    /// Return the literal carried by this operand, if it is one.
    pub fn literal(&self) -> Option<Literal> {
        match self {
            Operand::Int(i) => Some(Literal::Int(*i)),
            Operand::Float(x) => Some(Literal::Float(*x)),
            Operand::Tuple(_) | Operand::Value(_) => None,
        }
    }
}

impl<V> From<V> for Operand<V> {
    fn from(value: V) -> Self {
        Operand::Value(value)
    }
}

/// Comparison predicate; the result is always a `bool` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpPredicate {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpPredicate {
    pub fn as_str(self) -> &'static str {
        match self {
            CmpPredicate::Lt => "lt",
            CmpPredicate::Le => "le",
            CmpPredicate::Gt => "gt",
            CmpPredicate::Ge => "ge",
            CmpPredicate::Eq => "eq",
            CmpPredicate::Ne => "ne",
        }
    }
}

/// The operations builtin lowering needs from an IR builder.
///
/// ## Notes
/// - Callers only pass scalar values to [`cast`](IrBuilder::cast), [`compare`](IrBuilder::compare),
///   [`select`](IrBuilder::select) and [`neg`](IrBuilder::neg), and both sides of a comparison share a type.
///   Anything else is a compiler bug, not a user error.
/// - `external_call` with `decorate = false` must reference `symbol` verbatim, bypassing any mangling scheme, so the
///   name resolves against the C math library.
pub trait IrBuilder {
    /// Handle to a value in the function under construction.
    type Value: Clone + fmt::Debug;

    /// Scalar type of a value, or `None` for non-scalar values such as array handles.
    fn scalar_type(&self, value: &Self::Value) -> Option<NumType>;

    /// Compile-time length of a container value, if the builder knows it.
    fn static_len(&self, value: &Self::Value) -> Option<u64>;

    /// Materialize `literal` as a constant of type `ty`.
    fn constant(&mut self, literal: Literal, ty: NumType) -> Self::Value;

    /// Convert a scalar value to `ty`. Casting to the value's own type yields a value of that type.
    fn cast(&mut self, value: &Self::Value, ty: NumType) -> Self::Value;

    fn compare(&mut self, pred: CmpPredicate, lhs: &Self::Value, rhs: &Self::Value) -> Self::Value;

    fn select(&mut self, cond: &Self::Value, on_true: &Self::Value, on_false: &Self::Value) -> Self::Value;

    fn neg(&mut self, value: &Self::Value) -> Self::Value;

    /// Call an externally linked function. `result` is a template value whose type is the call's return type.
    fn external_call(
        &mut self,
        symbol: &str,
        args: &[Self::Value],
        result: &Self::Value,
        decorate: bool,
    ) -> Self::Value;
}
