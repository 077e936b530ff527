//! stoich - chemical formula analyzer
//!
//! Usage:
//!   stoich analyze "Fe2(SO4)3" C6H12O6
//!   stoich batch --input formulas.txt
//!   stoich export --format csv --output results.csv H2O CO2
//!   stoich --masses isotopes.json analyze "U{235}O2"

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stoich_cli::{commands, export::ExportFormat, input, logging, Config};

#[derive(Parser, Debug)]
#[command(name = "stoich", version, about = "Parse chemical formulas and compute molecular properties")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON object of extra or overriding atomic masses, e.g. {"D": 2.014}
    #[arg(long, global = true)]
    masses: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a full report for each formula
    Analyze {
        #[arg(required = true)]
        formulas: Vec<String>,
    },
    /// Print one summary line per formula
    Batch {
        /// File with one formula per line ("-" for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        formulas: Vec<String>,
    },
    /// Write results as JSON or CSV
    Export {
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        /// Output path ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// File with one formula per line ("-" for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        formulas: Vec<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.log_json;
    if cli.masses.is_some() {
        config.masses.file = cli.masses;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    logging::init_logging(&config.logging)?;

    let table = input::load_mass_table(config.masses.file.as_deref())?;

    let mut stdout = std::io::stdout().lock();
    let all_ok = match cli.command {
        Command::Analyze { formulas } => commands::run_analyze(&mut stdout, &formulas, &table)?,
        Command::Batch { input, formulas } => {
            let formulas = input::collect_formulas(&formulas, input.as_deref())?;
            commands::run_batch(&mut stdout, &formulas, &table)?
        }
        Command::Export {
            format,
            output,
            input,
            formulas,
        } => {
            let formulas = input::collect_formulas(&formulas, input.as_deref())?;
            let format = format.unwrap_or(config.export.format);
            let output = output
                .or(config.export.output)
                .unwrap_or_else(|| format.default_output());
            drop(stdout);
            commands::run_export(format, &output, &formulas, &table)?
        }
    };

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
