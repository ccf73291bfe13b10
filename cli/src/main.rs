use std::path::{Component, Path, PathBuf};
use std::sync::Once;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use numeris_core::config::{self, NumericConfig};
use numeris_core::{NumericKind, RoundingMode};

mod calc;
mod repl;

use calc::{BinaryOp, UnaryOp};

static TRACE_INIT: Once = Once::new();
const DEFAULT_TRACE_FILTER: &str = "numeris=debug,numeris_cli=info";

#[derive(Debug, Parser)]
#[command(
    name = "numeris",
    author,
    version,
    about = "Arbitrary-precision calculator over the Integer, Rational, Real and Complex tower",
    long_about = None
)]
struct CliArgs {
    /// Subcommands like `eval 1/2 + 0.25`; without one an interactive session starts
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML file with numeric settings (default digits, rounding, limits)
    #[arg(long, global = true, value_name = "FILE", value_parser = parse_sanitized_path)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply a binary operator: `+ - * / ^`
    Eval {
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        #[arg(allow_hyphen_values = true)]
        op: BinaryOp,
        #[arg(allow_hyphen_values = true)]
        rhs: String,
    },
    /// Apply a unary operation
    Unary {
        #[arg(value_enum)]
        op: UnaryOp,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Instantiate a named constant
    Const {
        name: String,
        /// Significant digits
        #[arg(long, default_value_t = 34)]
        digits: u32,
        /// Rounding rule: up, down, ceiling, floor, half-up, half-down, half-even, unnecessary
        #[arg(long, default_value = "half-even")]
        rounding: RoundingMode,
        /// Negative branch (sqrt2, phi, i)
        #[arg(long)]
        negative: bool,
    },
    /// Convert a value to another kind
    Coerce {
        #[arg(allow_hyphen_values = true)]
        value: String,
        kind: NumericKind,
    },
    /// Describe a value
    Info {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// List the known constants
    Constants,
}

fn sanitize_path(raw: &str) -> anyhow::Result<PathBuf> {
    let p = Path::new(raw);

    for comp in p.components() {
        if matches!(comp, Component::ParentDir) {
            return Err(anyhow::anyhow!(
                "Parent directory components ('..') are not allowed in file paths."
            ));
        }
    }

    Ok(p.to_path_buf())
}

fn parse_sanitized_path(raw: &str) -> Result<PathBuf, String> {
    sanitize_path(raw).map_err(|e| e.to_string())
}

fn env_toggle_enabled(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    !(trimmed.eq_ignore_ascii_case("0") || trimmed.eq_ignore_ascii_case("false") || trimmed.eq_ignore_ascii_case("off"))
}

fn filter_expr_from(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("1")
        || trimmed.eq_ignore_ascii_case("true")
        || trimmed.eq_ignore_ascii_case("on")
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn maybe_init_tracing() {
    let raw = match std::env::var("NUMERIS_TRACE") {
        Ok(value) => value,
        Err(_) => return,
    };

    if !env_toggle_enabled(&raw) {
        return;
    }

    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        let filter_expr = filter_expr_from(&raw).or_else(|| std::env::var("RUST_LOG").ok());

        let builder = fmt().with_writer(std::io::stderr);

        let builder = match filter_expr.and_then(|expr| EnvFilter::try_new(expr).ok()) {
            Some(filter) => builder.with_env_filter(filter),
            None => builder.with_env_filter(DEFAULT_TRACE_FILTER),
        };

        let _ = builder.try_init();
    });
}

/// Installs the configuration from `path` (plus environment overrides). With
/// no file the library falls back to defaults and the environment on its own.
fn install_config(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let config = NumericConfig::load(path)?
        .with_env_overrides()
        .with_context(|| format!("apply environment overrides to {}", path.display()))?;
    config::install(config)
}

fn emit<T: Serialize + std::fmt::Display>(value: &T, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(value).context("encode result as JSON")?);
    } else {
        println!("{value}");
    }
    Ok(())
}

fn run(command: Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Eval { lhs, op, rhs } => {
            let result = calc::binary(&calc::value(&lhs)?, op, &calc::value(&rhs)?)?;
            emit(&result, json)
        }
        Commands::Unary { op, value } => emit(&calc::unary(op, &calc::value(&value)?)?, json),
        Commands::Const {
            name,
            digits,
            rounding,
            negative,
        } => emit(&calc::constant(&name, digits, rounding, negative)?, json),
        Commands::Coerce { value, kind } => emit(&calc::value(&value)?.coerce_to(kind)?, json),
        Commands::Info { value } => emit(&calc::info(&calc::value(&value)?), json),
        Commands::Constants => {
            let names = numeris_core::constant_names();
            if json {
                println!("{}", serde_json::to_string(&names).context("encode constant names as JSON")?);
            } else {
                for name in names {
                    println!("{name}");
                }
            }
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    maybe_init_tracing();

    let CliArgs { command, config, json } = CliArgs::parse();
    install_config(config.as_deref())?;

    match command {
        Some(cmd) => run(cmd, json),
        None => repl::run(json),
    }
}
