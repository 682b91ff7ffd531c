//! Main CLI application for the distributed N-Queens solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nqueens_distributed::{
    config::{CliOverrides, OutputFormat, Settings, DEFAULT_BOARD_SIZE},
    distributed::partition,
    logging::init_logging,
    NQueensError,
    search::{SolutionSet, SolutionValidator, MAX_BOARD_SIZE},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nqueens")]
#[command(about = "Distributed N-Queens solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count and enumerate all solutions for an NxN board
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board size N (overrides config)
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Number of workers (overrides config)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format for saved solutions (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Save solutions to the output directory
        #[arg(long)]
        save: bool,

        /// Re-verify every solution after the run
        #[arg(long)]
        verify: bool,

        /// Log level (overrides config)
        #[arg(long)]
        log_level: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a saved JSON solution set
    Validate {
        /// Solutions file written by `solve --format json --save`
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show how column 0 would be split across workers
    Partition {
        /// Board size N
        #[arg(short = 'n', long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,

        /// Number of workers
        #[arg(short, long)]
        workers: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config, size, workers, output, format,
            save, verify, log_level, verbose
        } => {
            let overrides = CliOverrides {
                board_size: size,
                workers,
                output_dir: output,
                format,
                save_solutions: save,
                log_level,
            };
            solve_command(config, overrides, verify, verbose)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
        Commands::Validate { input } => {
            validate_command(input)
        }
        Commands::Partition { size, workers } => {
            partition_command(size, workers)
        }
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    verify: bool,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);

    settings.validate()
        .context("Configuration validation failed")?;
    init_logging(&settings.logging.level)?;

    println!("{}", ColorOutput::info(&format!(
        "♛ Solving {}-queens with {} worker(s)",
        settings.board.size, settings.workers.count
    )));

    if verbose {
        let shares = partition(settings.board.size, settings.workers.count)?;
        println!("{}", SolutionFormatter::format_share_plan(settings.board.size, &shares));
    }

    let report = nqueens_distributed::solve(&settings)
        .context("Distributed search failed")?;

    println!("{}", ColorOutput::success(&format!("len = {}", report.count)));
    println!("{}", SolutionFormatter::format_run_summary(&report));

    if verbose {
        println!("{}", SolutionFormatter::format_worker_table(&report));
        println!("Search: {}", report.statistics);
        println!("Total time: {:.6}s\n", report.total_elapsed.as_secs_f64());
    }

    if verify {
        let validation = SolutionValidator::new(report.board_size).validate(&report.solutions);
        if validation.is_valid() {
            println!("{}", ColorOutput::success(&format!(
                "✅ All {} solutions verified", validation.checked
            )));
        } else {
            println!("{}", ColorOutput::error("❌ Verification failed"));
            println!("{}", validation);
            anyhow::bail!("Solution verification failed");
        }
    }

    if settings.output.save_solutions {
        SolutionFormatter::save_solutions(
            &report,
            &settings.output.output_directory,
            settings.output.format,
        )
        .context("Failed to save solutions")?;

        println!("{}", ColorOutput::success(&format!(
            "Solutions saved to {}",
            settings.output.output_directory.display()
        )));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config").join("default.yaml");

    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("Run: nqueens solve --config {}", config_path.display());

    Ok(())
}

fn validate_command(input: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating solutions..."));

    let set = SolutionSet::load_from_file(&input)?;
    let report = SolutionValidator::validate_set(&set);

    println!("{}", report);

    if report.is_valid() {
        println!("{}", ColorOutput::success(&format!(
            "✅ {} solutions for n = {} are valid", set.count, set.board_size
        )));
        Ok(())
    } else {
        println!("{}", ColorOutput::error("❌ Solution set is invalid"));
        anyhow::bail!("Validation failed for {}", input.display())
    }
}

fn partition_command(size: usize, workers: usize) -> Result<()> {
    if size == 0 || size > MAX_BOARD_SIZE {
        return Err(NQueensError::InvalidBoardSize { size }.into());
    }

    let shares = partition(size, workers)?;
    println!("{}", SolutionFormatter::format_share_plan(size, &shares));

    let idle = shares.iter().filter(|share| share.is_empty()).count();
    if idle > 0 {
        println!("{}", ColorOutput::warning(&format!(
            "{} worker(s) receive an empty share", idle
        )));
    }

    Ok(())
}
