//! Builtin lowering.
//!
//! Turns calls to the host builtins (`len`, `min`, `max`, `abs`, casts) and to the `math` functions into IR through
//! an [`IrBuilder`]. The frontend resolves each call site to a [`RegistryKey`], lowers its operands, and hands both
//! to [`lower_call`].
//!
//! # Architecture
//!
//! - `registry` - [`Registry`], [`RegistryBuilder`] and the key types
//! - `handlers` - [`Handler`] and one module per builtin family
//! - `operands` - operand inspection shared by the handlers
//! - `errors` - [`Lowering`], [`Unsupported`] and [`LoweringError`]
//!
//! # Usage
//!
//! ```rust
//! use numjit::ir::{Operand, RecordingBuilder};
//! use numjit::lower::{Registry, lower_call};
//! use numjit_core::NumType;
//!
//! let registry = Registry::standard();
//! let mut builder = RecordingBuilder::new();
//! let x = builder.param(NumType::Float32);
//! lower_call(&registry, &mut builder, &"abs".into(), &[Operand::Value(x)]).unwrap();
//! assert_eq!(builder.external_symbols(), ["fabsf"]);
//! ```

#![deny(clippy::unwrap_used)]

mod errors;
mod handlers;
mod operands;
mod registry;

use std::sync::Arc;

pub use errors::{Lowering, LoweringError, Unsupported};
pub use handlers::Handler;
pub use registry::{HostCallable, Registry, RegistryBuilder, RegistryConfig, RegistryKey};

use crate::ir::{IrBuilder, Operand};

/// Lower one builtin call site.
///
/// ## Errors
/// - [`LoweringError::UnknownBuiltin`] when nothing is registered under `key`.
/// - [`LoweringError::Unsupported`] when the handler declines the operands. No IR is emitted in that case.
#[tracing::instrument(level = "debug", skip_all, fields(key = %key, operands = args.len()))]
pub fn lower_call<B: IrBuilder>(
    registry: &Registry,
    builder: &mut B,
    key: &RegistryKey,
    args: &[Operand<B::Value>],
) -> Result<B::Value, LoweringError> {
    let Some((name, handler)) = registry.resolve(key) else {
        tracing::debug!("no handler registered");
        return Err(LoweringError::UnknownBuiltin { key: key.to_string() });
    };

    let lowering = handler.invoke(builder, args);
    if let Some(reason) = lowering.unsupported() {
        tracing::debug!(%name, %reason, "builtin lowering unsupported");
    }
    lowering.into_result(name)
}

/// Per-compilation handle to a shared, immutable [`Registry`].
#[derive(Debug, Clone)]
pub struct LoweringContext {
    registry: Arc<Registry>,
}

impl LoweringContext {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(Registry::standard()))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn lower_call<B: IrBuilder>(
        &self,
        builder: &mut B,
        key: &RegistryKey,
        args: &[Operand<B::Value>],
    ) -> Result<B::Value, LoweringError> {
        lower_call(&self.registry, builder, key, args)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use numjit_core::NumType;

    use super::*;
    use crate::ir::RecordingBuilder;

    #[test]
    fn test_unknown_builtin() {
        let mut b = RecordingBuilder::new();
        let err = lower_call::<RecordingBuilder>(&Registry::standard(), &mut b, &"math.cbrt".into(), &[]).unwrap_err();
        assert_eq!(
            err,
            LoweringError::UnknownBuiltin {
                key: "math.cbrt".to_string()
            }
        );
    }

    #[test]
    fn test_unsupported_names_the_resolved_builtin() {
        let ctx = LoweringContext::standard();
        let mut b = RecordingBuilder::new();
        let arr = b.array_param(NumType::Int64, None);
        let key = RegistryKey::from(HostCallable::Builtin(numjit_core::lang::builtins::BuiltinFnId::Len));
        let err = ctx.lower_call(&mut b, &key, &[Operand::Value(arr)]).unwrap_err();
        assert_eq!(
            err,
            LoweringError::Unsupported {
                builtin: "len".to_string(),
                reason: Unsupported::NoStaticLength
            }
        );
    }
}
