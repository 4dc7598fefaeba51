//! Command definitions and handlers

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rabridge_ir::{BackendTarget, BridgeOptions, BridgeRequest, RouteHint, TimeBlockHint};
use rabridge_sql::{Bridge, SqlCompiler};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "rabridge",
    version,
    about = "Compile relational algebra IR to SQL with @time/@route hints"
)]
pub struct Cli {
    /// Configuration file (defaults to ./rabridge.yaml when present)
    #[arg(long, global = true, env = "RABRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile an IR request document (JSON, or YAML by extension)
    Compile(CompileArgs),
    /// Translate a legacy OPEN/FILTER/SELECT script
    Legacy(LegacyArgs),
}

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Request file, or `-` for stdin
    pub input: PathBuf,

    /// Time-window hint, e.g. LAST_7_DAYS
    #[arg(long)]
    pub time_block: Option<String>,

    /// Routing target: bigquery, cloudsql, firestore, gcs
    #[arg(long)]
    pub route: Option<BackendTarget>,

    /// Routing lane, used together with --route
    #[arg(long, requires = "route")]
    pub lane: Option<String>,

    /// Print the statement without hint lines
    #[arg(long)]
    pub body_only: bool,
}

#[derive(Debug, Args)]
pub struct LegacyArgs {
    /// Script file, or `-` for stdin
    pub input: PathBuf,

    /// Print SQL and metadata as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run a command and return what should be printed to stdout
pub fn run(command: Command, config: &Config) -> Result<String> {
    match command {
        Command::Compile(args) => {
            let source = read_input(&args.input)?;
            compile(&args, &source, config)
        }
        Command::Legacy(args) => {
            let source = read_input(&args.input)?;
            legacy(&args, &source)
        }
    }
}

pub fn compile(args: &CompileArgs, source: &str, config: &Config) -> Result<String> {
    let mut request = parse_request(&args.input, source)?;
    request.options = args
        .cli_options()
        .or(request.options)
        .or(config.defaults.to_bridge_options());

    debug!(
        fingerprint = %request.fingerprint(),
        root = request.expression.kind(),
        "compiling request"
    );

    let sql = if args.body_only {
        SqlCompiler::new().compile(&request.expression)
    } else {
        Bridge::new().translate(&request)
    };
    sql.with_context(|| format!("Failed to compile {}", args.input.display()))
}

pub fn legacy(args: &LegacyArgs, source: &str) -> Result<String> {
    let translation = rabridge_legacy::translate(source)
        .with_context(|| format!("Failed to translate {}", args.input.display()))?;

    info!(bytes = translation.sql.len(), "legacy script translated");

    if args.json {
        Ok(serde_json::to_string_pretty(&translation)?)
    } else {
        Ok(translation.sql)
    }
}

impl CompileArgs {
    fn cli_options(&self) -> BridgeOptions {
        BridgeOptions {
            time_block: self.time_block.as_ref().map(TimeBlockHint::new),
            route: self.route.map(|target| RouteHint {
                target,
                lane: self.lane.clone(),
            }),
        }
    }
}

fn parse_request(path: &Path, source: &str) -> Result<BridgeRequest> {
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        serde_yaml::from_str(source)
            .with_context(|| format!("Invalid YAML request in {}", path.display()))
    } else {
        serde_json::from_str(source)
            .with_context(|| format!("Invalid JSON request in {}", path.display()))
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}
