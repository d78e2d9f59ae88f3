//! MMCalc Forms - formula checks and headless form replay
//!
//! This is the binary entry point. All logic lives in the libraries.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use mmcalc_app::config::{load_settings, load_settings_file};
use mmcalc_app::Settings;
use mmcalc_core::{check_field_value, normalize_formula_input, FieldKind};

const DEFAULT_CONFIG: &str = "mmcalc.toml";

/// MMCalc Forms - the molar-mass calculator's form layer, without a browser
#[derive(Parser, Debug)]
#[command(name = "mmcalc-forms")]
#[command(about = "Check formulas and replay form interactions headlessly", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check chemical formulas the way the formula field does
    Check {
        #[arg(value_name = "FORMULA", required = true)]
        formulas: Vec<String>,
    },

    /// Print the normalized form of formula input
    Normalize {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Replay an NDJSON interaction script and print NDJSON events
    Replay {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Settings file (defaults to ./mmcalc.toml when present)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    mmcalc_core::logging::init()?;

    match args.command {
        Command::Check { formulas } => {
            let mut invalid = 0;
            for formula in &formulas {
                match check_field_value(FieldKind::Formula, true, formula) {
                    Ok(()) => println!("✅ {formula}"),
                    Err(e) => {
                        println!("❌ {formula}: {e}");
                        invalid += 1;
                    }
                }
            }
            if invalid > 0 {
                std::process::exit(1);
            }
            Ok(())
        }

        Command::Normalize { text } => {
            println!("{}", normalize_formula_input(&text));
            Ok(())
        }

        Command::Replay { script, config } => {
            let settings = match config {
                Some(path) => load_settings_file(&path)?,
                None => load_settings(&PathBuf::from(DEFAULT_CONFIG)),
            };
            replay(script, settings).await
        }
    }
}

async fn replay(path: PathBuf, settings: Settings) -> color_eyre::Result<()> {
    let script = tokio::fs::read_to_string(&path)
        .await
        .wrap_err_with(|| format!("reading {}", path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = mmcalc_forms::run_replay(&script, settings, &mut out)?;
    out.flush()?;

    tracing::info!(
        "{} step(s) from {} produced {} action(s)",
        summary.steps,
        path.display(),
        summary.actions
    );
    Ok(())
}
