//! numjit builtin vocabulary registries.
//!
//! This module is the “front door” for builtin naming: the builtin functions the compiler can lower, the numeric cast
//! targets, and the transcendental math table.
//!
//! The design goal is to avoid stringly-typed checks scattered across the compiler. Callers work with **stable IDs**
//! (e.g. `BuiltinFnId`, `MathFnId`) and look up spellings, registry keys and metadata via the tables here.
//!
//! ## Notes
//! - Registries are **pure**: no IR types, no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use numjit_core::lang::builtins::{self, BuiltinFnId};
//!
//! assert_eq!(builtins::from_str("len"), Some(BuiltinFnId::Len));
//! assert_eq!(builtins::as_str(BuiltinFnId::Len), "len");
//! ```

pub mod builtins;
pub mod math;
pub mod numerics;
pub mod registry;
