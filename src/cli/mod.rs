//! CLI module for numjit
//!
//! ## Commands
//!
//! - `lower <KEY> [OPERAND]...` - Lower one builtin call and print the recorded IR
//! - `builtins` - List the registered builtin keys
//! - `symbol <NAME> <TYPE>` - Print the libm symbol for an operation
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `operands` - Command-line operand syntax
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod operands;

use std::fmt;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::lower::RegistryConfig;
use crate::version::NUMJIT_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The builtin exists but declined the operands.
    pub const UNSUPPORTED: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Builtin-operation lowering for a numeric JIT compiler
#[derive(Parser, Debug)]
#[command(name = "numjit")]
#[command(version = NUMJIT_VERSION)]
#[command(about = "Lower numeric builtins to typed IR", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

/// Handler groups to leave out of the registry.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RegistryArgs {
    /// Do not index handlers by host callable
    #[arg(long, global = true)]
    pub no_host_aliases: bool,

    /// Do not register the `$number.<type>` casts
    #[arg(long, global = true)]
    pub no_number_casts: bool,

    /// Do not register the `math.<name>` functions
    #[arg(long, global = true)]
    pub no_math: bool,

    /// Do not register the `mlir.helper_funcs.<name>` helpers
    #[arg(long, global = true)]
    pub no_helpers: bool,
}

impl RegistryArgs {
    pub fn config(&self) -> RegistryConfig {
        RegistryConfig::new()
            .with_host_aliases(!self.no_host_aliases)
            .with_number_casts(!self.no_number_casts)
            .with_math_functions(!self.no_math)
            .with_helper_functions(!self.no_helpers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lower one builtin call and print the recorded IR
    Lower {
        /// Registry key (`abs`, `math.sqrt`, `$number.float32`, ...)
        #[arg(value_name = "KEY")]
        key: String,
        /// Operands: `5`, `2.0`, `float32`, `float64=2.5`, `array[10]`, `array[?]`, `(1,2,3)`
        #[arg(value_name = "OPERAND", allow_hyphen_values = true)]
        operands: Vec<String>,
        /// Resolve KEY as a host callable (`len`, `math.exp`) instead of a registry name
        #[arg(long)]
        host: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the registered builtin keys and their host aliases
    Builtins {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the libm symbol for an operation on a type
    Symbol {
        /// Base operation name (`abs`, `exp`, ...)
        #[arg(value_name = "NAME")]
        name: String,
        /// Operand type (`float32`, `c128`, ...)
        #[arg(value_name = "TYPE")]
        ty: String,
        /// Prefix floating variants with `f` (`fabs`)
        #[arg(long)]
        append_f: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.registry.config();
    match cli.command {
        Command::Lower {
            key,
            operands,
            host,
            format,
        } => commands::lower(&config, &key, &operands, host, format),
        Command::Builtins { format } => commands::list_builtins(&config, format),
        Command::Symbol { name, ty, append_f } => commands::symbol(&name, &ty, append_f),
    }
}

// ============================================================================
// Tests
// ============================================================================
