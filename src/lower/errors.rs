//! Lowering outcomes and error types.
//!
//! A handler either lowers a call ([`Lowering::Lowered`]) or declines it ([`Lowering::Unsupported`]). Declining is
//! a normal outcome, not a fault: the frontend turns it into a typing error at the offending call site through
//! [`LoweringError`].

use miette::Diagnostic;
use numjit_core::NumType;
use thiserror::Error;

/// Result of invoking a builtin handler.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "an unsupported lowering must be reported to the frontend"]
pub enum Lowering<V> {
    Lowered(V),
    Unsupported(Unsupported),
}

impl<V> Lowering<V> {
    pub fn unsupported(&self) -> Option<&Unsupported> {
        match self {
            Lowering::Lowered(_) => None,
            Lowering::Unsupported(reason) => Some(reason),
        }
    }

    /// Convert into a `Result`, attributing a decline to `builtin`.
    pub fn into_result(self, builtin: &str) -> Result<V, LoweringError> {
        match self {
            Lowering::Lowered(v) => Ok(v),
            Lowering::Unsupported(reason) => Err(LoweringError::Unsupported {
                builtin: builtin.to_string(),
                reason,
            }),
        }
    }
}

impl<V> From<Result<V, Unsupported>> for Lowering<V> {
    fn from(result: Result<V, Unsupported>) -> Self {
        match result {
            Ok(v) => Lowering::Lowered(v),
            Err(reason) => Lowering::Unsupported(reason),
        }
    }
}

/// Why a handler declined a call. The reason only affects reporting, never whether a call is declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unsupported {
    #[error("expected {expected} operand(s), found {found}")]
    Arity { expected: usize, found: usize },

    #[error("expected at least {min} operands, found {found}")]
    MinArity { min: usize, found: usize },

    #[error("operand {index} is not a scalar")]
    OperandKind { index: usize },

    #[error("operand {index} has unsupported type {ty}")]
    OperandType { index: usize, ty: NumType },

    #[error("operand {index} has type {found}, expected {expected}")]
    TypeMismatch {
        index: usize,
        expected: NumType,
        found: NumType,
    },

    #[error("operand has no statically known length")]
    NoStaticLength,
}

/// Frontend-facing lowering failure for one call site.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum LoweringError {
    #[error("no lowering registered for `{key}`")]
    #[diagnostic(
        code(numjit::lower::unknown_builtin),
        help("run `numjit builtins` to list the registered keys")
    )]
    UnknownBuiltin { key: String },

    #[error("cannot lower `{builtin}`: {reason}")]
    #[diagnostic(
        code(numjit::lower::unsupported),
        help("the operands do not match any supported signature of this builtin")
    )]
    Unsupported { builtin: String, reason: Unsupported },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result_keeps_reason() {
        let lowering: Lowering<u32> = Lowering::Unsupported(Unsupported::NoStaticLength);
        assert_eq!(
            lowering.into_result("len"),
            Err(LoweringError::Unsupported {
                builtin: "len".to_string(),
                reason: Unsupported::NoStaticLength,
            })
        );
        assert_eq!(Lowering::Lowered(3u32).into_result("len"), Ok(3));
    }

    #[test]
    fn test_messages() {
        let err = LoweringError::Unsupported {
            builtin: "math.atan2".to_string(),
            reason: Unsupported::Arity { expected: 2, found: 1 },
        };
        assert_eq!(err.to_string(), "cannot lower `math.atan2`: expected 2 operand(s), found 1");
        assert_eq!(
            Unsupported::TypeMismatch {
                index: 1,
                expected: NumType::Float32,
                found: NumType::Float64
            }
            .to_string(),
            "operand 1 has type float64, expected float32"
        );
    }
}
