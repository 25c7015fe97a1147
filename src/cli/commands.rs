//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//! Each command renders into a `String` first so the output can be tested
//! without a subprocess.

use miette::Diagnostic;
use numjit_core::lang::numerics;
use numjit_core::libm_symbol;
use serde_json::json;

use super::operands::{self, OperandSpec};
use super::{CliError, CliResult, ExitCode, OutputFormat};
use crate::ir::{EvalError, Evaluator, IrBuilder, RecordingBuilder, ScalarValue, ValueId};
use crate::lower::{HostCallable, LoweringError, Registry, RegistryConfig, RegistryKey, lower_call};

// ============================================================================
// lower
// ============================================================================

pub fn lower(
    config: &RegistryConfig,
    key: &str,
    operand_args: &[String],
    host: bool,
    format: OutputFormat,
) -> CliResult<ExitCode> {
    let output = lower_output(config, key, operand_args, host, format)?;
    print!("{output}");
    Ok(ExitCode::SUCCESS)
}

/// Lower `key` applied to the parsed operands and render the recorded function.
pub fn lower_output(
    config: &RegistryConfig,
    key: &str,
    operand_args: &[String],
    host: bool,
    format: OutputFormat,
) -> CliResult<String> {
    let key = parse_key(key, host)?;
    let specs = operand_args
        .iter()
        .map(|arg| {
            operands::parse_operand(arg).map_err(|e| CliError::failure(format!("Error: invalid operand `{arg}`: {e}")))
        })
        .collect::<CliResult<Vec<OperandSpec>>>()?;

    let registry = Registry::with_config(config);
    let mut builder = RecordingBuilder::new();
    let materialized = operands::materialize(&mut builder, &specs);

    let value = lower_call(&registry, &mut builder, &key, &materialized.operands)
        .map_err(|err| lowering_failure(err, format))?;

    let result = materialized.fully_bound.then(|| {
        materialized
            .bindings
            .iter()
            .fold(Evaluator::new(&builder), |ev, (index, v)| ev.bind(*index, *v))
            .eval(value)
    });

    Ok(match format {
        OutputFormat::Text => render_lower_text(&builder, value, result.as_ref()),
        OutputFormat::Json => render_lower_json(&key, &builder, value, result.as_ref()),
    })
}

fn parse_key(key: &str, host: bool) -> CliResult<RegistryKey> {
    if !host {
        return Ok(RegistryKey::from(key));
    }
    HostCallable::from_spelling(key)
        .map(RegistryKey::Host)
        .ok_or_else(|| CliError::failure(format!("Error: `{key}` is not a known host callable")))
}

fn lowering_failure(err: LoweringError, format: OutputFormat) -> CliError {
    let exit_code = match err {
        LoweringError::UnknownBuiltin { .. } => ExitCode::FAILURE,
        LoweringError::Unsupported { .. } => ExitCode::UNSUPPORTED,
    };
    let message = match format {
        OutputFormat::Text => format!("{:?}", miette::Report::new(err)),
        OutputFormat::Json => json!({
            "code": err.code().map(|c| c.to_string()),
            "severity": "error",
            "message": err.to_string(),
        })
        .to_string(),
    };
    CliError::new(message, exit_code)
}

fn render_lower_text(
    builder: &RecordingBuilder,
    value: ValueId,
    result: Option<&Result<ScalarValue, EvalError>>,
) -> String {
    let mut out = builder.to_string();
    let ty = builder
        .type_of(value)
        .map(|ty| ty.to_string())
        .unwrap_or_else(|| "?".to_string());
    out.push_str(&format!("result: {value} : {ty}\n"));
    match result {
        Some(Ok(v)) => out.push_str(&format!("value: {v}\n")),
        Some(Err(e)) => out.push_str(&format!("value: <not evaluable: {e}>\n")),
        None => {}
    }
    out
}

fn render_lower_json(
    key: &RegistryKey,
    builder: &RecordingBuilder,
    value: ValueId,
    result: Option<&Result<ScalarValue, EvalError>>,
) -> String {
    let insts: Vec<String> = builder.insts().iter().map(ToString::to_string).collect();
    let (evaluated, eval_error) = match result {
        Some(Ok(v)) => (Some(v.to_string()), None),
        Some(Err(e)) => (None, Some(e.to_string())),
        None => (None, None),
    };
    let doc = json!({
        "key": key.to_string(),
        "instructions": insts,
        "result": value.to_string(),
        "type": builder.scalar_type(&value).map(|ty| ty.to_string()),
        "externals": builder.external_symbols(),
        "value": evaluated,
        "eval_error": eval_error,
    });
    format!("{doc:#}\n")
}

// ============================================================================
// builtins
// ============================================================================

pub fn list_builtins(config: &RegistryConfig, format: OutputFormat) -> CliResult<ExitCode> {
    print!("{}", builtins_output(config, format));
    Ok(ExitCode::SUCCESS)
}

/// Render every registered key with its handler and host aliases, sorted by key.
pub fn builtins_output(config: &RegistryConfig, format: OutputFormat) -> String {
    let registry = Registry::with_config(config);
    let rows: Vec<(&str, String, Vec<String>)> = registry
        .keys()
        .into_iter()
        .filter_map(|name| {
            let handler = registry.lookup_name(name)?;
            let aliases = registry.aliases_of(name).iter().map(ToString::to_string).collect();
            Some((name, handler.to_string(), aliases))
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let width = rows.iter().map(|(name, ..)| name.len()).max().unwrap_or(0);
            let mut out = String::new();
            for (name, handler, aliases) in &rows {
                let line = if aliases.is_empty() {
                    format!("{name:width$}  {handler}")
                } else {
                    format!("{name:width$}  {handler}  (host: {})", aliases.join(", "))
                };
                out.push_str(line.trim_end());
                out.push('\n');
            }
            out
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = rows
                .iter()
                .map(|(name, handler, aliases)| json!({ "key": name, "handler": handler, "host": aliases }))
                .collect();
            format!("{:#}\n", serde_json::Value::Array(entries))
        }
    }
}

// ============================================================================
// symbol
// ============================================================================

pub fn symbol(name: &str, ty: &str, append_f: bool) -> CliResult<ExitCode> {
    println!("{}", symbol_output(name, ty, append_f)?);
    Ok(ExitCode::SUCCESS)
}

/// The libm symbol for `name` applied to a value of type `ty`.
pub fn symbol_output(name: &str, ty: &str, append_f: bool) -> CliResult<String> {
    let num_ty =
        numerics::from_str(ty).ok_or_else(|| CliError::failure(format!("Error: unknown numeric type `{ty}`")))?;
    libm_symbol(name, num_ty, append_f).ok_or_else(|| {
        CliError::failure(format!(
            "Error: libm has no `{name}` variant for {num_ty}; only floating and complex types map to symbols"
        ))
    })
}
