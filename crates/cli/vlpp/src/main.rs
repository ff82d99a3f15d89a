//! Verilog preprocessor CLI
//!
//! Reads one source file (or standard input), runs the preprocessing pipeline
//! and writes the result to a file or standard output.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::{LevelFilter, debug};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vp_driver::{Pipeline, PipelineConfig, PortRedeclaration, Stage};

/// Path meaning standard input
const STDIN_PATH: &str = "-";

#[derive(Parser)]
#[command(name = "vlpp")]
#[command(about = "Verilog macro, module and 2D wire preprocessor", long_about = None)]
#[command(version)]
struct Cli {
    /// Source file to preprocess, `-` for standard input
    #[arg(default_value = STDIN_PATH)]
    input: PathBuf,

    /// Write the result here instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to ./vlpp.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// When to split module ports into separate declarations
    #[arg(long, value_enum)]
    redeclare_ports: Option<PortRedeclaration>,

    /// Last stage to run
    #[arg(long, value_enum)]
    stop_after: Option<Stage>,

    /// Extra directive to copy through unexpanded (repeatable)
    #[arg(long = "passthrough", value_name = "NAME")]
    passthrough: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;
    let source = read_input(&cli.input)?;
    let source_name = if cli.input.as_os_str() == STDIN_PATH {
        "<stdin>".to_string()
    } else {
        cli.input.display().to_string()
    };

    let pipeline = Pipeline::new(config).with_source_name(source_name);
    let output = match pipeline.run(&source) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!(
        "ran through {}: {} macro(s), {} module(s), {} wire(s), {} reference(s)",
        output.last_stage,
        output.macros,
        output.modules,
        output.wires.len(),
        output.references
    );

    write_output(cli.output.as_deref(), &output.text)?;
    Ok(ExitCode::SUCCESS)
}

/// Configuration file values with command line overrides applied
fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            PipelineConfig::find_in_dir(&cwd)?.unwrap_or_default()
        }
    };

    if let Some(policy) = cli.redeclare_ports {
        config.modules.redeclare_ports = policy;
    }
    if let Some(stage) = cli.stop_after {
        config.pipeline.stop_after = stage;
    }
    for directive in &cli.passthrough {
        if !config.macros.passthrough.contains(directive) {
            config.macros.passthrough.push(directive.clone());
        }
    }
    Ok(config)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read standard input")?;
        return Ok(source);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write standard output")
        }
    }
}
