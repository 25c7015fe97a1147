//! Provide shared, pure numeric semantics and canonical builtin vocabulary for the numjit compiler.
//!
//! This crate is intentionally small and dependency-free. It contains the deterministic decisions that builtin
//! lowering depends on:
//! - the scalar type lattice and its predicates ([`types`]),
//! - the promotion policy used by variadic numeric builtins ([`promotion`]),
//! - the libm symbol naming convention ([`libm`]),
//! - registry-first vocabulary for builtin names, cast targets and math functions ([`lang`]).
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global state, and no IR types. The IR builder interface and the
//!   handler registry live in the `numjit` crate.

pub mod lang;
pub mod libm;
pub mod promotion;
pub mod types;

pub use libm::libm_symbol;
pub use promotion::{TypeCandidate, broadcast_type, promote};
pub use types::NumType;
