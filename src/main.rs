//! Main CLI application for the maze planner

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use maze_sat::{
    config::{CliOverrides, OutputFormat, SearchStrategy, Settings},
    maze::{create_example_mazes, load_grid_from_file, maze_name},
    plan::{BatchRunner, MazeProblem, SearchOutcome},
    sat::HorizonAttempt,
    utils::{ColorOutput, PlanFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "maze_sat")]
#[command(about = "Shortest maze plans through SAT planning")]
#[command(version = "0.1.0")]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a maze file, or every maze file of a directory
    Solve {
        /// Maze file or directory of maze files
        path: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Exclusive upper bound on the number of moves (overrides config)
        #[arg(short, long)]
        max_horizon: Option<usize>,

        /// First number of moves tried (overrides config)
        #[arg(short, long)]
        start_horizon: Option<usize>,

        /// Keep one solver and add a time step per horizon
        #[arg(long)]
        incremental: bool,

        /// Forbid standing on a cell twice
        #[arg(long)]
        no_revisit: bool,

        /// Directory for the DIMACS files (overrides config)
        #[arg(long)]
        cnf_dir: Option<PathBuf>,

        /// Directory for the model files (overrides config)
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Also write the plans as JSON
        #[arg(long)]
        json: bool,

        /// Solve the mazes of a directory one after the other
        #[arg(long)]
        sequential: bool,

        /// Draw the path of a solved maze
        #[arg(long)]
        show_path: bool,
    },

    /// Write the formula of a single horizon without solving it
    Encode {
        /// Maze file
        file: PathBuf,

        /// Number of moves to encode
        #[arg(short = 'k', long)]
        horizon: usize,

        /// Output file, defaults to `<cnf_dir>/<maze>.cnf`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Forbid standing on a cell twice
        #[arg(long)]
        no_revisit: bool,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,
    },

    /// Create a default configuration and sample mazes
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::Solve {
            path,
            config,
            max_horizon,
            start_horizon,
            incremental,
            no_revisit,
            cnf_dir,
            model_dir,
            json,
            sequential,
            show_path,
        } => {
            let overrides = CliOverrides {
                max_horizon,
                start_horizon,
                incremental,
                no_revisit,
                cnf_dir,
                model_dir,
                format: json.then_some(OutputFormat::Json),
                sequential,
            };
            let settings = load_settings(&config, &overrides)?;
            solve_command(&path, settings, show_path)
        }
        Commands::Encode {
            file,
            horizon,
            output,
            no_revisit,
            config,
        } => {
            let overrides = CliOverrides {
                no_revisit,
                ..Default::default()
            };
            let settings = load_settings(&config, &overrides)?;
            encode_command(&file, horizon, output, &settings).map(|_| ())
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Config file if present, defaults otherwise, then command line overrides
fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        log::debug!("Config file {} not found, using defaults", config_path.display());
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn solve_command(path: &Path, settings: Settings, show_path: bool) -> Result<()> {
    if path.is_file() {
        return solve_single(path, settings, show_path);
    }

    let start_time = Instant::now();
    let report = BatchRunner::new(settings).run(path)?;

    println!("{}", PlanFormatter::format_batch_summary(&report));
    for failure in PlanFormatter::format_failures(&report) {
        println!("{}", ColorOutput::error(&failure));
    }

    let summary = format!(
        "Processed {} maze(s) in {:.3}s",
        report.reports.len(),
        start_time.elapsed().as_secs_f64()
    );
    if report.failed_count() > 0 {
        println!("{}", ColorOutput::warning(&summary));
    } else {
        println!("{}", ColorOutput::success(&summary));
    }

    Ok(())
}

fn solve_single(path: &Path, settings: Settings, show_path: bool) -> Result<()> {
    let problem = MazeProblem::from_file(path, settings)?;

    match problem.solve()? {
        SearchOutcome::Solved(solution) => {
            println!("{}", PlanFormatter::format_solution(&solution, problem.grid(), show_path));

            let written = solution
                .save(&problem.settings().output)
                .context("Failed to save outputs")?;
            for file in written {
                println!("{}", ColorOutput::info(&format!("Wrote {}", file.display())));
            }
            println!(
                "{}",
                ColorOutput::success(&format!("Solved {} with {} moves", problem.name(), solution.horizon))
            );
        }
        SearchOutcome::Exhausted { max_horizon, .. } => {
            println!(
                "{}",
                ColorOutput::warning(&format!("Can't find a plan in {} steps", max_horizon))
            );
        }
    }

    Ok(())
}

fn encode_command(file: &Path, horizon: usize, output: Option<PathBuf>, settings: &Settings) -> Result<PathBuf> {
    let grid = load_grid_from_file(file)?;
    let attempt = HorizonAttempt::encode(&grid, &settings.encoding, horizon);
    let cnf = attempt.cnf();

    let path = match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            let writer = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create CNF file: {}", path.display()))?;
            cnf.write_dimacs(std::io::BufWriter::new(writer))
                .with_context(|| format!("Failed to write CNF file: {}", path.display()))?;
            path
        }
        None => cnf.save_to_directory(&settings.output.cnf_directory, &maze_name(file))?,
    };

    println!("{}", attempt.statistics());
    println!("{}", ColorOutput::success(&format!("Wrote {}", path.display())));
    Ok(path)
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    let maze_dir = directory.join("mazes");

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let incremental_path = config_dir.join("examples/incremental.yaml");
    let mut incremental = Settings::default();
    incremental.search.strategy = SearchStrategy::Incremental;
    incremental.output.format = OutputFormat::Json;
    incremental.to_file(&incremental_path)?;
    println!("Created: {}", incremental_path.display());

    create_example_mazes(&maze_dir).context("Failed to create example mazes")?;
    println!("Created sample mazes in: {}", maze_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Add your mazes to {}", maze_dir.display());
    println!("2. Run: cargo run -- solve {}", maze_dir.display());

    Ok(())
}
