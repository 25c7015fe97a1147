//! Registry behaviour through the public API: key namespaces, configuration, and concurrent read-only use.

use std::sync::Arc;
use std::thread;

use numjit::ir::{Evaluator, Operand, RecordingBuilder, ScalarValue};
use numjit::lower::{Handler, HostCallable, LoweringContext, Registry, RegistryConfig, RegistryKey};
use numjit_core::NumType;
use numjit_core::lang::builtins::{BUILTIN_FUNCTIONS, BuiltinFnId};
use numjit_core::lang::math::{self, HELPER_FUNCTIONS, MATH_FUNCTIONS};
use numjit_core::lang::numerics;

#[test]
fn test_every_vocabulary_entry_is_registered() {
    let registry = Registry::standard();
    for info in BUILTIN_FUNCTIONS {
        assert!(registry.lookup_name(info.canonical).is_some(), "{}", info.canonical);
        let alias = RegistryKey::Host(HostCallable::Builtin(info.id));
        assert!(registry.lookup(&alias).is_some(), "{alias}");
    }
    for spec in MATH_FUNCTIONS {
        assert_eq!(
            registry.lookup_name(&math::fn_key(spec.info.id)),
            Some(Handler::Math(spec.info.id))
        );
    }
    for info in HELPER_FUNCTIONS {
        assert_eq!(
            registry.lookup(&HostCallable::Helper(info.id).into()),
            Some(Handler::Helper(info.id))
        );
    }
    for ty in NumType::ALL {
        assert_eq!(registry.lookup_name(&numerics::cast_key(ty)), Some(Handler::Cast(ty)));
    }
}

#[test]
fn test_number_casts_have_no_host_alias() {
    let registry = Registry::standard();
    for ty in NumType::ALL {
        assert!(registry.aliases_of(&numerics::cast_key(ty)).is_empty());
    }
}

#[test]
fn test_names_and_host_callables_are_separate_namespaces() {
    let registry = Registry::with_config(&RegistryConfig::default().with_host_aliases(false));
    assert!(registry.lookup(&"len".into()).is_some());
    assert!(registry.lookup(&HostCallable::Builtin(BuiltinFnId::Len).into()).is_none());
}

#[test]
fn test_custom_registry_overrides_standard_handler() {
    let mut builder = Registry::builder();
    builder.register("abs", Handler::Abs, Some(HostCallable::Builtin(BuiltinFnId::Abs)));
    // A later registration under the same name replaces the handler but keeps the alias.
    builder.register("abs", Handler::Cast(NumType::Float32), None);
    let registry = builder.finish();

    assert_eq!(
        registry.resolve(&HostCallable::Builtin(BuiltinFnId::Abs).into()),
        Some(("abs", Handler::Cast(NumType::Float32)))
    );
    assert_eq!(registry.keys(), ["abs"]);
}

#[test]
fn test_concurrent_lowering_shares_one_registry() {
    let ctx = LoweringContext::new(Arc::new(Registry::standard()));

    let results: Vec<ScalarValue> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8i64)
            .map(|i| {
                let ctx = ctx.clone();
                scope.spawn(move || {
                    let mut builder = RecordingBuilder::new();
                    let x = builder.param(NumType::Int64);
                    let key = RegistryKey::Host(HostCallable::Builtin(BuiltinFnId::Abs));
                    let value = ctx
                        .lower_call(&mut builder, &key, &[Operand::Value(x)])
                        .expect("lowering failed");
                    Evaluator::new(&builder)
                        .bind(0, ScalarValue::I64(-i))
                        .eval(value)
                        .expect("evaluation failed")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("lowering thread panicked"))
            .collect()
    });

    let expected: Vec<ScalarValue> = (0..8i64).map(ScalarValue::I64).collect();
    assert_eq!(results, expected);
    assert_eq!(ctx.registry().len(), Registry::standard().len());
}

#[test]
fn test_registry_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
    assert_send_sync::<LoweringContext>();
}
