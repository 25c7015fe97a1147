//! Reference IR builder that records a typed, SSA-style instruction list.
//!
//! Each instruction defines exactly one value, identified by its position. The recorder is what the CLI and the
//! tests lower into; [`Evaluator`](super::Evaluator) can then compute any recorded value.
//!
//! ```text
//! %0 = param 0 : float32
//! %1 = const 0.0 : float32
//! %2 = call @fabsf(%0) : float32
//! ```

use std::fmt;

use numjit_core::NumType;

use super::value::ScalarValue;
use super::{CmpPredicate, IrBuilder, Literal};

/// Handle to a recorded value (`%N`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(pub u32);

impl ValueId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Type of a recorded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrType {
    Scalar(NumType),
    /// Array handle; `len` is the statically known length, if any.
    Array { elem: NumType, len: Option<u64> },
}

impl IrType {
    pub fn as_scalar(self) -> Option<NumType> {
        match self {
            IrType::Scalar(ty) => Some(ty),
            IrType::Array { .. } => None,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Scalar(ty) => write!(f, "{ty}"),
            IrType::Array { elem, len: Some(len) } => write!(f, "array<{elem} x {len}>"),
            IrType::Array { elem, len: None } => write!(f, "array<{elem} x ?>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstKind {
    Param {
        index: usize,
    },
    Const {
        value: ScalarValue,
    },
    Cast {
        src: ValueId,
    },
    Cmp {
        pred: CmpPredicate,
        lhs: ValueId,
        rhs: ValueId,
    },
    Select {
        cond: ValueId,
        on_true: ValueId,
        on_false: ValueId,
    },
    Neg {
        operand: ValueId,
    },
    Call {
        symbol: String,
        args: Vec<ValueId>,
        /// Return-type template; the call's type is the template's type.
        template: ValueId,
        decorate: bool,
    },
}

/// A recorded instruction: the value it defines, that value's type, and the operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Inst {
    pub id: ValueId,
    pub ty: IrType,
    pub kind: InstKind,
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ", self.id)?;
        match &self.kind {
            InstKind::Param { index } => write!(f, "param {index}")?,
            InstKind::Const { value } => write!(f, "const {value}")?,
            InstKind::Cast { src } => write!(f, "cast {src}")?,
            InstKind::Cmp { pred, lhs, rhs } => write!(f, "cmp {} {lhs}, {rhs}", pred.as_str())?,
            InstKind::Select {
                cond,
                on_true,
                on_false,
            } => write!(f, "select {cond}, {on_true}, {on_false}")?,
            InstKind::Neg { operand } => write!(f, "neg {operand}")?,
            InstKind::Call {
                symbol, args, decorate, ..
            } => {
                let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                let mangling = if *decorate { "decorated " } else { "" };
                write!(f, "call {mangling}@{symbol}({})", args.join(", "))?;
            }
        }
        write!(f, " : {}", self.ty)
    }
}

/// Records every builder operation as an [`Inst`].
#[derive(Debug, Clone, Default)]
pub struct RecordingBuilder {
    insts: Vec<Inst>,
    params: usize,
}

impl RecordingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar function parameter.
    pub fn param(&mut self, ty: NumType) -> ValueId {
        self.push_param(IrType::Scalar(ty))
    }

    /// Add an array parameter, optionally with a statically known length.
    pub fn array_param(&mut self, elem: NumType, len: Option<u64>) -> ValueId {
        self.push_param(IrType::Array { elem, len })
    }

    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    pub fn inst(&self, id: ValueId) -> Option<&Inst> {
        self.insts.get(id.index())
    }

    pub fn type_of(&self, id: ValueId) -> Option<IrType> {
        self.inst(id).map(|inst| inst.ty)
    }

    pub fn param_count(&self) -> usize {
        self.params
    }

    /// Number of recorded instructions, parameters included.
    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    /// Symbols of every recorded external call, in emission order.
    pub fn external_symbols(&self) -> Vec<&str> {
        self.insts
            .iter()
            .filter_map(|inst| match &inst.kind {
                InstKind::Call { symbol, .. } => Some(symbol.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push_param(&mut self, ty: IrType) -> ValueId {
        let index = self.params;
        self.params += 1;
        self.push(ty, InstKind::Param { index })
    }

    fn push(&mut self, ty: IrType, kind: InstKind) -> ValueId {
        let id = ValueId(self.insts.len() as u32);
        self.insts.push(Inst { id, ty, kind });
        id
    }

    fn scalar(&self, id: ValueId) -> Option<NumType> {
        self.type_of(id).and_then(IrType::as_scalar)
    }
}

impl IrBuilder for RecordingBuilder {
    type Value = ValueId;

    fn scalar_type(&self, value: &ValueId) -> Option<NumType> {
        self.scalar(*value)
    }

    fn static_len(&self, value: &ValueId) -> Option<u64> {
        match self.type_of(*value)? {
            IrType::Array { len, .. } => len,
            IrType::Scalar(_) => None,
        }
    }

    fn constant(&mut self, literal: Literal, ty: NumType) -> ValueId {
        let value = ScalarValue::from_literal(literal).cast(ty);
        self.push(IrType::Scalar(ty), InstKind::Const { value })
    }

    fn cast(&mut self, value: &ValueId, ty: NumType) -> ValueId {
        debug_assert!(self.scalar(*value).is_some(), "INVARIANT: cast source {value} must be scalar");
        if self.scalar(*value) == Some(ty) {
            return *value;
        }
        self.push(IrType::Scalar(ty), InstKind::Cast { src: *value })
    }

    fn compare(&mut self, pred: CmpPredicate, lhs: &ValueId, rhs: &ValueId) -> ValueId {
        debug_assert_eq!(self.scalar(*lhs), self.scalar(*rhs), "INVARIANT: compared values share a type");
        self.push(
            IrType::Scalar(NumType::Bool),
            InstKind::Cmp {
                pred,
                lhs: *lhs,
                rhs: *rhs,
            },
        )
    }

    fn select(&mut self, cond: &ValueId, on_true: &ValueId, on_false: &ValueId) -> ValueId {
        let ty = self
            .type_of(*on_true)
            .unwrap_or(IrType::Scalar(NumType::Bool));
        self.push(
            ty,
            InstKind::Select {
                cond: *cond,
                on_true: *on_true,
                on_false: *on_false,
            },
        )
    }

    fn neg(&mut self, value: &ValueId) -> ValueId {
        let ty = self.type_of(*value).unwrap_or(IrType::Scalar(NumType::Int64));
        self.push(ty, InstKind::Neg { operand: *value })
    }

    fn external_call(&mut self, symbol: &str, args: &[ValueId], result: &ValueId, decorate: bool) -> ValueId {
        let ty = self.type_of(*result).unwrap_or(IrType::Scalar(NumType::Float64));
        self.push(
            ty,
            InstKind::Call {
                symbol: symbol.to_string(),
                args: args.to_vec(),
                template: *result,
                decorate,
            },
        )
    }
}

impl fmt::Display for RecordingBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in &self.insts {
            writeln!(f, "{inst}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_are_numbered_in_order() {
        let mut b = RecordingBuilder::new();
        let x = b.param(NumType::Float32);
        let a = b.array_param(NumType::Int64, Some(4));
        assert_eq!(b.param_count(), 2);
        assert_eq!(b.scalar_type(&x), Some(NumType::Float32));
        assert_eq!(b.scalar_type(&a), None);
        assert_eq!(b.static_len(&a), Some(4));
        assert_eq!(b.static_len(&x), None);
    }

    #[test]
    fn test_cast_to_own_type_records_nothing() {
        let mut b = RecordingBuilder::new();
        let x = b.param(NumType::Int32);
        assert_eq!(b.cast(&x, NumType::Int32), x);
        assert_eq!(b.len(), 1);
        let y = b.cast(&x, NumType::Float64);
        assert_ne!(y, x);
        assert_eq!(b.scalar_type(&y), Some(NumType::Float64));
    }

    #[test]
    fn test_constant_applies_conversion() {
        let mut b = RecordingBuilder::new();
        let c = b.constant(Literal::Int(5), NumType::Float64);
        assert_eq!(
            b.inst(c).map(|i| &i.kind),
            Some(&InstKind::Const {
                value: ScalarValue::F64(5.0)
            })
        );
    }

    #[test]
    fn test_display_lines() {
        let mut b = RecordingBuilder::new();
        let x = b.param(NumType::Float64);
        let zero = b.constant(Literal::Int(0), NumType::Float64);
        b.external_call("fabs", &[x], &zero, false);
        let text = b.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "%0 = param 0 : float64",
                "%1 = const 0.0 : float64",
                "%2 = call @fabs(%0) : float64",
            ]
        );
    }

    #[test]
    fn test_array_type_display() {
        assert_eq!(
            IrType::Array {
                elem: NumType::Float32,
                len: Some(10)
            }
            .to_string(),
            "array<float32 x 10>"
        );
        assert_eq!(
            IrType::Array {
                elem: NumType::Float32,
                len: None
            }
            .to_string(),
            "array<float32 x ?>"
        );
    }
}
