use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use paint_cover::bench::run_benchmark;
use paint_cover::core::Config;
use paint_cover::perception::load_grid;
use paint_cover::pipeline::solve_grid;
use paint_cover::reasoning::HighsSolver;
use paint_cover::synthesis::{generate, Program};

/// Paint a black/white grid with the fewest line, square and erase operations.
#[derive(Parser, Debug)]
#[command(name = "paint-cover", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct SolveArgs {
    /// JSON config file; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Solver wall-clock limit in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Disable the Patch-Ratio line pruning
    #[arg(long)]
    no_patch_ratio: bool,

    /// Skip replaying the program against the input
    #[arg(long)]
    no_verify: bool,
}

impl SolveArgs {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(ms) = self.time_limit_ms {
            config.time_limit_ms = ms;
        }
        if self.no_patch_ratio {
            config.patch_ratio = false;
        }
        if self.no_verify {
            config.verify = false;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve one grid and write the program
    Solve {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        args: SolveArgs,
    },
    /// List every generated candidate and each cell's coverage list
    Candidates {
        input: PathBuf,
        /// Disable the Patch-Ratio line pruning
        #[arg(long)]
        no_patch_ratio: bool,
    },
    /// Replay a program file and compare it with its grid
    Check { input: PathBuf, program: PathBuf },
    /// Solve every `*.in` grid in a directory
    Bench {
        dir: PathBuf,
        /// Only the first N grids, by file name
        #[arg(long)]
        max: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        args: SolveArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { input, output, args } => {
            let config = args.config()?;
            let grid = load_grid(&input).with_context(|| format!("reading {}", input.display()))?;
            print!("{}", grid);
            let solved = solve_grid(&grid, &config, &HighsSolver)?;
            std::fs::write(&output, solved.program.to_string())
                .with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(
                objective = solved.program.objective(),
                black_cells = solved.black_cells,
                optimal = solved.program.is_optimal(),
                "wrote {}",
                output.display()
            );
        }
        Commands::Candidates { input, no_patch_ratio } => {
            let grid = load_grid(&input).with_context(|| format!("reading {}", input.display()))?;
            let catalog = generate(&grid, !no_patch_ratio);
            let stdout = std::io::stdout();
            catalog.dump(&mut stdout.lock())?;
        }
        Commands::Check { input, program } => {
            let grid = load_grid(&input).with_context(|| format!("reading {}", input.display()))?;
            let text = std::fs::read_to_string(&program)
                .with_context(|| format!("reading {}", program.display()))?;
            let parsed = Program::parse(&text)?;
            if let Err(e) = parsed.verify(&grid) {
                bail!("{} does not reproduce {}: {}", program.display(), input.display(), e);
            }
            println!("OK: {} operations", parsed.objective());
        }
        Commands::Bench { dir, max, json, args } => {
            let config = args.config()?;
            let report = run_benchmark(&dir, max, &config, &HighsSolver)
                .with_context(|| format!("scanning {}", dir.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print_detail();
            }
        }
    }

    Ok(())
}
