//! Command-line operand syntax for `numjit lower`.
//!
//! | syntax          | operand                                         |
//! |-----------------|-------------------------------------------------|
//! | `5`, `-3`       | host `int` literal                              |
//! | `2.0`, `1e-3`   | host `float` literal                            |
//! | `float32`       | unbound scalar parameter of that type           |
//! | `float64=2.5`   | scalar parameter bound to a value               |
//! | `array[10]`     | array parameter with a static length            |
//! | `array[?]`      | array parameter without a static length         |
//! | `(1, 2.0, i8)`  | host tuple of the above                         |

use numjit_core::NumType;
use numjit_core::lang::numerics;
use thiserror::Error;

use crate::ir::{Literal, Operand, RecordingBuilder, ScalarValue, ValueId};

/// Element type of command-line array parameters.
const ARRAY_ELEM: NumType = NumType::Float64;

const MAX_TUPLE_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperandParseError {
    #[error("empty operand")]
    Empty,

    #[error("unknown operand `{0}`: expected a literal, a type name, `array[N]` or a tuple")]
    Unknown(String),

    #[error("invalid value `{value}` for a {ty} parameter")]
    InvalidBinding { ty: NumType, value: String },

    #[error("invalid array length `{0}`: expected a non-negative integer or `?`")]
    InvalidLength(String),

    #[error("unbalanced parentheses in `{0}`")]
    Unbalanced(String),

    #[error("tuples nest deeper than {} levels", MAX_TUPLE_DEPTH)]
    TooDeep,
}

/// A parsed operand, not yet materialized in a builder.
#[derive(Debug, Clone, PartialEq)]
pub enum OperandSpec {
    Int(i64),
    Float(f64),
    Param { ty: NumType, value: Option<Literal> },
    Array { len: Option<u64> },
    Tuple(Vec<OperandSpec>),
}

/// Parse one operand.
pub fn parse_operand(text: &str) -> Result<OperandSpec, OperandParseError> {
    parse_nested(text, 0)
}

fn parse_nested(text: &str, depth: usize) -> Result<OperandSpec, OperandParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(OperandParseError::Empty);
    }

    if let Some(inner) = text.strip_prefix('(') {
        if depth >= MAX_TUPLE_DEPTH {
            return Err(OperandParseError::TooDeep);
        }
        let inner = inner
            .strip_suffix(')')
            .ok_or_else(|| OperandParseError::Unbalanced(text.to_string()))?;
        let items = split_top_level(inner).ok_or_else(|| OperandParseError::Unbalanced(text.to_string()))?;
        return items
            .into_iter()
            .map(|item| parse_nested(item, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(OperandSpec::Tuple);
    }

    if let Some(len) = text.strip_prefix("array[").and_then(|rest| rest.strip_suffix(']')) {
        let len = match len.trim() {
            "?" => None,
            n => Some(
                n.parse::<u64>()
                    .map_err(|_| OperandParseError::InvalidLength(n.to_string()))?,
            ),
        };
        return Ok(OperandSpec::Array { len });
    }

    if let Some(literal) = parse_literal(text) {
        return Ok(match literal {
            Literal::Int(i) => OperandSpec::Int(i),
            Literal::Float(x) => OperandSpec::Float(x),
        });
    }

    let (name, value) = match text.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim())),
        None => (text, None),
    };
    let ty = numerics::from_str(name).ok_or_else(|| OperandParseError::Unknown(text.to_string()))?;
    let value = value
        .map(|v| {
            parse_binding(ty, v).ok_or_else(|| OperandParseError::InvalidBinding {
                ty,
                value: v.to_string(),
            })
        })
        .transpose()?;
    Ok(OperandSpec::Param { ty, value })
}

/// Operands materialized in a [`RecordingBuilder`], plus the parameter bindings they carry.
#[derive(Debug, Clone)]
pub struct Materialized {
    pub operands: Vec<Operand<ValueId>>,
    pub bindings: Vec<(usize, ScalarValue)>,
    /// Whether every scalar parameter has a bound value
    pub fully_bound: bool,
}

/// Create the parameters `specs` refer to and build the matching operand list.
pub fn materialize(builder: &mut RecordingBuilder, specs: &[OperandSpec]) -> Materialized {
    let mut out = Materialized {
        operands: Vec::with_capacity(specs.len()),
        bindings: Vec::new(),
        fully_bound: true,
    };
    for spec in specs {
        let operand = materialize_one(builder, spec, &mut out);
        out.operands.push(operand);
    }
    out
}

fn materialize_one(builder: &mut RecordingBuilder, spec: &OperandSpec, out: &mut Materialized) -> Operand<ValueId> {
    match spec {
        OperandSpec::Int(i) => Operand::Int(*i),
        OperandSpec::Float(x) => Operand::Float(*x),
        OperandSpec::Param { ty, value } => {
            let index = builder.param_count();
            let id = builder.param(*ty);
            match value {
                Some(literal) => out
                    .bindings
                    .push((index, ScalarValue::from_literal(*literal).cast(*ty))),
                None => out.fully_bound = false,
            }
            Operand::Value(id)
        }
        OperandSpec::Array { len } => Operand::Value(builder.array_param(ARRAY_ELEM, *len)),
        OperandSpec::Tuple(items) => Operand::Tuple(
            items
                .iter()
                .map(|item| materialize_one(builder, item, out))
                .collect(),
        ),
    }
}

fn parse_literal(text: &str) -> Option<Literal> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(Literal::Int(i));
    }
    // Only numeric spellings; `f64::from_str` would also accept `inf` / `nan`.
    let numeric = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if numeric {
        text.parse::<f64>().ok().map(Literal::Float)
    } else {
        None
    }
}

fn parse_binding(ty: NumType, text: &str) -> Option<Literal> {
    match text {
        "true" | "True" if ty.is_bool() => Some(Literal::Int(1)),
        "false" | "False" if ty.is_bool() => Some(Literal::Int(0)),
        "inf" => Some(Literal::Float(f64::INFINITY)),
        "-inf" => Some(Literal::Float(f64::NEG_INFINITY)),
        "nan" => Some(Literal::Float(f64::NAN)),
        _ => parse_literal(text),
    }
}

/// Split on commas that are not nested in parentheses. `None` when parentheses are unbalanced.
fn split_top_level(text: &str) -> Option<Vec<&str>> {
    if text.trim().is_empty() {
        return Some(Vec::new());
    }
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                items.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    let last = &text[start..];
    // Allow a trailing comma, as in `(1,)`.
    if !last.trim().is_empty() || items.is_empty() {
        items.push(last);
    }
    Some(items)
}
