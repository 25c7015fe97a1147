//! `math` surface vocabulary: the transcendental function table and the helper-function aliases.
//!
//! [`MATH_FUNCTIONS`] drives bulk handler generation. Each entry is registered under `math.<name>` and lowers to an
//! external libm call of the declared arity.
//!
//! [`HELPER_FUNCTIONS`] are the separately exposed `helper_funcs.exp` / `helper_funcs.sqrt` entry points, which also
//! accept complex operands. Their registry keys are qualified (`mlir.helper_funcs.exp`); the unqualified form is the
//! spelling of the host callable.
//!
//! ## Examples
//! ```rust
//! use numjit_core::lang::math::{self, MathFnId};
//!
//! assert_eq!(math::fn_from_key("math.atan2"), Some(MathFnId::Atan2));
//! assert_eq!(math::spec_for(MathFnId::Atan2).arity, 2);
//! ```

use super::registry::{self, LangItemInfo, stable};

pub const MATH_MODULE_NAME: &str = "math";
pub const HELPER_MODULE_NAME: &str = "helper_funcs";
pub const HELPER_KEY_PREFIX: &str = "mlir.helper_funcs";

/// Stable identifier for `math.<fn>(...)` functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MathFnId {
    Floor,
    Log,
    Sqrt,
    Exp,
    Erf,
    Sin,
    Cos,
    Tanh,
    Atan2,
}

pub type MathFnInfo = LangItemInfo<MathFnId>;

/// A row of the transcendental table: vocabulary entry plus the exact operand count.
#[derive(Debug, Clone, Copy)]
pub struct MathFuncSpec {
    pub info: MathFnInfo,
    pub arity: usize,
}

impl MathFuncSpec {
    /// The libm base name (also the canonical spelling).
    pub fn name(&self) -> &'static str {
        self.info.canonical
    }
}

pub const MATH_FUNCTIONS: &[MathFuncSpec] = &[
    math_fn(MathFnId::Floor, "floor", 1, "Floor (round down)."),
    math_fn(MathFnId::Log, "log", 1, "Natural logarithm."),
    math_fn(MathFnId::Sqrt, "sqrt", 1, "Square root."),
    math_fn(MathFnId::Exp, "exp", 1, "Exponentiation (e^x)."),
    math_fn(MathFnId::Erf, "erf", 1, "Gauss error function."),
    math_fn(MathFnId::Sin, "sin", 1, "Sine."),
    math_fn(MathFnId::Cos, "cos", 1, "Cosine."),
    math_fn(MathFnId::Tanh, "tanh", 1, "Hyperbolic tangent."),
    math_fn(MathFnId::Atan2, "atan2", 2, "Two-argument arctangent."),
];

/// Stable identifier for the helper-function aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HelperFnId {
    Exp,
    Sqrt,
}

pub type HelperFnInfo = LangItemInfo<HelperFnId>;

pub const HELPER_FUNCTIONS: &[HelperFnInfo] = &[
    stable(HelperFnId::Exp, "exp", &[], "Exponentiation; accepts complex operands."),
    stable(HelperFnId::Sqrt, "sqrt", &[], "Square root; accepts complex operands."),
];

pub fn fn_from_str(name: &str) -> Option<MathFnId> {
    MATH_FUNCTIONS.iter().find(|f| f.info.canonical == name).map(|f| f.info.id).or_else(|| {
        MATH_FUNCTIONS
            .iter()
            .find(|f| {
                let aliases: &[&str] = f.info.aliases;
                aliases.contains(&name)
            })
            .map(|f| f.info.id)
    })
}

pub fn fn_as_str(id: MathFnId) -> &'static str {
    spec_for(id).info.canonical
}

/// Return the table row for a math function.
///
/// ## Panics
/// - If the table is missing an entry for `id` (this indicates a programming error).
pub fn spec_for(id: MathFnId) -> &'static MathFuncSpec {
    MATH_FUNCTIONS
        .iter()
        .find(|f| f.info.id == id)
        .expect("math fn spec missing")
}

/// Registry key for a math function, e.g. `math.sqrt`.
pub fn fn_key(id: MathFnId) -> String {
    format!("{MATH_MODULE_NAME}.{}", fn_as_str(id))
}

/// Parse a `math.<name>` key.
pub fn fn_from_key(key: &str) -> Option<MathFnId> {
    let name = key.strip_prefix(MATH_MODULE_NAME)?.strip_prefix('.')?;
    fn_from_str(name)
}

pub fn helper_from_str(name: &str) -> Option<HelperFnId> {
    registry::resolve(HELPER_FUNCTIONS, name)
}

pub fn helper_as_str(id: HelperFnId) -> &'static str {
    HELPER_FUNCTIONS
        .iter()
        .find(|h| h.id == id)
        .map(|h| h.canonical)
        .expect("helper fn info missing")
}

/// Registry key for a helper function, e.g. `mlir.helper_funcs.exp`.
pub fn helper_key(id: HelperFnId) -> String {
    format!("{HELPER_KEY_PREFIX}.{}", helper_as_str(id))
}

pub fn helper_from_key(key: &str) -> Option<HelperFnId> {
    let name = key.strip_prefix(HELPER_KEY_PREFIX)?.strip_prefix('.')?;
    helper_from_str(name)
}

/// Host spelling of a helper function, e.g. `helper_funcs.exp`.
pub fn helper_spelling(id: HelperFnId) -> String {
    format!("{HELPER_MODULE_NAME}.{}", helper_as_str(id))
}

pub fn helper_from_spelling(spelling: &str) -> Option<HelperFnId> {
    let name = spelling.strip_prefix(HELPER_MODULE_NAME)?.strip_prefix('.')?;
    helper_from_str(name)
}

const fn math_fn(id: MathFnId, canonical: &'static str, arity: usize, description: &'static str) -> MathFuncSpec {
    MathFuncSpec {
        info: stable(id, canonical, &[], description),
        arity,
    }
}
