#![forbid(unsafe_code)]
//! Builtin-operation lowering for a numeric JIT compiler.
//!
//! This crate lowers calls to the host builtins (`bool`, `int`, `float`, the `$number.<type>` casts, `len`, `min`,
//! `max`, `abs`) and to the transcendental `math` functions into typed IR, including calls into the C math library.
//! Numeric semantics shared with the rest of the compiler (the type lattice, promotion, libm naming and the canonical
//! vocabulary) live in `numjit_core`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `lower` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a compiler bug (logic error), use `.expect("INVARIANT: reason")` or a
//!   `debug_assert!` with an `INVARIANT:` message.

pub mod cli;
pub mod ir;
pub mod lower;
pub mod version;

pub use ir::{IrBuilder, Operand, RecordingBuilder};
pub use lower::{LoweringContext, LoweringError, Registry, RegistryKey, lower_call};
pub use numjit_core::NumType;
