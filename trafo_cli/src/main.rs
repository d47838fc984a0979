//! # Trafo CLI Application
//!
//! Command-line driver for the three-phase transformer design:
//! loads a config (or the 45 kVA defaults), runs the 22 stages, and mirrors
//! the report to the console and the append-only run log.

mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use trafo_core::equations::registry::stages_by_category;
use trafo_core::file_io::DEFAULT_LOG_FILE;
use trafo_core::{
    calculate, load_config, save_report, AwgTable, CalcError, CalcResult, DesignConfig, DesignReport, LogFile,
};

#[derive(Parser)]
#[command(name = "trafo")]
#[command(about = "Trafo - Three-phase power transformer design calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full design and log the report
    Run {
        /// Design config JSON (defaults to the 45 kVA reference design)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// AWG table CSV (defaults to the built-in standard table)
        #[arg(long)]
        awg_table: Option<PathBuf>,
        /// Run log, appended to
        #[arg(long, default_value = DEFAULT_LOG_FILE)]
        log_file: PathBuf,
        /// Also write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print the default configuration as JSON
    Defaults,
    /// List the design stages and their formulas
    Stages,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run {
            config,
            awg_table,
            log_file,
            json,
        } => cmd_run(config.as_deref(), awg_table.as_deref(), &log_file, json.as_deref()),
        Commands::Defaults => cmd_defaults(),
        Commands::Stages => cmd_stages(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(e: &CalcError) {
    error!(code = e.error_code(), "{}", e);
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!("{}", json);
    }
}

fn cmd_run(config_path: Option<&Path>, awg_path: Option<&Path>, log_path: &Path, json_path: Option<&Path>) -> CalcResult<()> {
    // The lock is held until `log` drops at the end of the run.
    let log = LogFile::open(log_path)?;
    if let Err(e) = logging::init(log.writer()?) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = match config_path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => DesignConfig::default(),
    };

    let loaded;
    let awg_table = match awg_path {
        Some(path) => {
            loaded = AwgTable::from_csv_path(path)?;
            info!("Loaded {} AWG rows from {}", loaded.rows().len(), path.display());
            &loaded
        }
        None => AwgTable::standard(),
    };

    let nameplate = &config.nameplate;
    info!(
        "Designing {:.0} VA, {:.0} Hz: primary {}, secondary {}",
        nameplate.rated_power_va,
        nameplate.frequency_hz,
        nameplate.primary_winding()?,
        nameplate.secondary_winding()
    );

    let result = calculate(&config, awg_table)?;
    let report = DesignReport::new(&config, &result);
    report.log();

    info!(
        "Active mass {:.2} kg, total losses {:.2} W",
        result.active_mass_kg(),
        result.total_losses_w()
    );

    if let Some(path) = json_path {
        save_report(&report, path)?;
        info!("Saved JSON report to {}", path.display());
    }

    drop(log);
    Ok(())
}

fn cmd_defaults() -> CalcResult<()> {
    let json = serde_json::to_string_pretty(&DesignConfig::default())
        .map_err(|e| CalcError::serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn cmd_stages() -> CalcResult<()> {
    if let Err(e) = logging::init_console() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    for (category, stages) in stages_by_category() {
        info!("{}", category.display_name());
        for stage in stages {
            info!("  {}", stage);
            let metadata = stage.metadata();
            info!("      {}", metadata.formula_plain);
            info!("      [{}]", metadata.source());
        }
    }
    Ok(())
}
