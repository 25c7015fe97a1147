#![no_main]

use libfuzzer_sys::fuzz_target;
use numjit::cli::operands::{materialize, parse_operand};
use numjit::ir::{IrBuilder, RecordingBuilder};
use numjit::{Registry, RegistryKey, lower_call};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(specs) = s.split_whitespace().map(parse_operand).collect::<Result<Vec<_>, _>>() else {
        return;
    };

    let registry = Registry::standard();
    for key in registry.keys() {
        let mut builder = RecordingBuilder::new();
        let operands = materialize(&mut builder, &specs).operands;
        let before = builder.len();
        match lower_call(&registry, &mut builder, &RegistryKey::from(key), &operands) {
            Ok(value) => assert!(builder.scalar_type(&value).is_some(), "{key} lowered to a non-scalar"),
            Err(err) => assert_eq!(builder.len(), before, "{key} emitted IR before declining: {err}"),
        }
    }
});
