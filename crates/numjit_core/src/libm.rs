//! libm-style external symbol naming.
//!
//! Math functions are lowered to calls into the C math library, so the symbol must match the library's export name
//! exactly: `f`-suffixed single-precision variants, `c`-prefixed complex variants.
//!
//! | name    | type         | `append_f` | symbol   |
//! |---------|--------------|------------|----------|
//! | `abs`   | `float64`    | yes        | `fabs`   |
//! | `abs`   | `float32`    | yes        | `fabsf`  |
//! | `abs`   | `complex64`  | yes        | `cabsf`  |
//! | `exp`   | `float32`    | no         | `expf`   |
//! | `sqrt`  | `complex128` | no         | `csqrt`  |

use crate::types::NumType;

/// Synthesize the external math-library symbol for `name` applied to a value of type `ty`.
///
/// ## Parameters
/// - `name`: the base operation name (`"abs"`, `"exp"`, ...).
/// - `ty`: the operand type. Must be floating or complex.
/// - `append_f`: whether floating variants carry an `f` prefix (`fabs` rather than `abs`). Has no effect on complex
///   variants.
///
/// ## Returns
/// - `Some(symbol)` for floating and complex types.
/// - `None` for any other type; callers are expected to have checked the type first.
///
/// ## Examples
/// ```rust
/// use numjit_core::{NumType, libm_symbol};
///
/// assert_eq!(libm_symbol("abs", NumType::Float32, true).as_deref(), Some("fabsf"));
/// assert_eq!(libm_symbol("sqrt", NumType::Complex128, false).as_deref(), Some("csqrt"));
/// assert_eq!(libm_symbol("exp", NumType::Int64, false), None);
/// ```
pub fn libm_symbol(name: &str, ty: NumType, append_f: bool) -> Option<String> {
    if ty.is_float() {
        let mut symbol = String::with_capacity(name.len() + 2);
        if append_f {
            symbol.push('f');
        }
        symbol.push_str(name);
        if ty == NumType::Float32 {
            symbol.push('f');
        }
        return Some(symbol);
    }

    if ty.is_complex() {
        let mut symbol = format!("c{name}");
        if ty == NumType::Complex64 {
            symbol.push('f');
        }
        return Some(symbol);
    }

    None
}
