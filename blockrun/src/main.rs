//! Blockrun Interpreter
//!
//! Command-line front end: loads a JSON program tree, reads its inputs from
//! `--var` flags or interactively from stdin, and prints the returned value.

use blockrun::config::RunConfig;
use blockrun::io::{MapSource, PromptSource, WriterSink};
use blockrun::value::Integer;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(version, about = "Run a basic-block program tree")]
struct Args {
    /// Path to the program tree (JSON).
    program: PathBuf,

    /// Preset an input as NAME=VALUE. Inputs without a preset are read from stdin.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, Integer)>,

    /// Abort after executing this many basic blocks.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Log filter, e.g. `debug` or `blockrun=trace`. Defaults to $BLOCKRUN_LOG, then `warn`.
    #[arg(long)]
    log: Option<String>,
}

fn parse_binding(s: &str) -> Result<(String, Integer), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, found `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in `{s}`"));
    }
    let value = value
        .parse()
        .map_err(|_| format!("`{}` is not an integer", value.trim()))?;
    Ok((name.to_string(), value))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = args
        .log
        .clone()
        .or_else(|| std::env::var("BLOCKRUN_LOG").ok())
        .unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig {
        max_steps: args.max_steps,
    };
    let mut source = args
        .vars
        .into_iter()
        .collect::<MapSource>()
        .with_fallback(PromptSource::stdin());
    let mut sink = WriterSink::new(std::io::stdout());

    match blockrun::run_file(&args.program, &mut source, &mut sink, config) {
        Ok(outcome) => {
            info!("Interpretation completed after {} steps", outcome.steps);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Interpretation failed: {:#}", e);
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
