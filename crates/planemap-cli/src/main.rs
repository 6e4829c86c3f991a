//! Planemap CLI - evaluate, check and sample complex plane formulas

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use planemap_core::config::CONFIG_FILE_NAME;
use planemap_core::lexer::Lexer;
use planemap_core::sampling::map_grid;
use planemap_core::{Complex, ParseError, PlaneMap, ViewConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod diagnostic;
mod repl;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "PLANEMAP_LOG";

#[derive(Parser)]
#[command(name = "planemap")]
#[command(version = planemap_core::VERSION)]
#[command(about = "Compile and evaluate complex plane mappings", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive REPL
    Repl,

    /// Evaluate a formula at one or more points
    Eval {
        /// Formula over z, x and y
        formula: String,

        /// Point to evaluate at, as "re,im" (repeatable, defaults to 0,0)
        #[arg(long = "at", value_name = "RE,IM", value_parser = parse_point)]
        points: Vec<Complex>,
    },

    /// Check that a formula parses
    Check {
        /// Formula over z, x and y
        formula: String,

        /// Print the fully parenthesized expression tree
        #[arg(long)]
        explain: bool,
    },

    /// Map the coordinate grid through a formula and print it as JSON
    Grid {
        /// Formula over z, x and y
        formula: String,

        /// View configuration file (defaults to ./planemap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Half-width of the sampled square
        #[arg(long)]
        plane_size: Option<f64>,

        /// Segments per grid line
        #[arg(long)]
        steps: Option<usize>,

        /// Lines per half-axis
        #[arg(long)]
        divisions: Option<usize>,

        /// Write the JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the tokens of a formula
    Tokens {
        /// Formula to tokenize
        formula: String,
    },
}

/// One evaluated point in `eval` output
#[derive(Debug, Serialize)]
struct Sample {
    z: Complex,
    w: Complex,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Repl) | None => {
            let mut repl = repl::Repl::new()?;
            repl.run()?;
        }

        Some(Commands::Eval { formula, points }) => {
            let map = compile(&formula)?;
            let samples = evaluate(&map, &points);
            println!("{}", serde_json::to_string_pretty(&samples)?);
        }

        Some(Commands::Check { formula, explain }) => {
            let map = compile(&formula)?;
            if explain {
                println!("{}", map.expr());
            } else {
                println!("ok");
            }
        }

        Some(Commands::Grid {
            formula,
            config,
            plane_size,
            steps,
            divisions,
            output,
        }) => {
            let map = compile(&formula)?;
            let mut view = resolve_view_config(config.as_deref(), Path::new("."))?;
            if let Some(plane_size) = plane_size {
                view = view.with_plane_size(plane_size);
            }
            if let Some(steps) = steps {
                view = view.with_steps(steps);
            }
            if let Some(divisions) = divisions {
                view = view.with_grid_divisions(divisions);
            }
            view.validate()?;

            let lines = map_grid(&map, &view);
            let json = serde_json::to_string(&lines)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), lines = lines.len(), "wrote grid");
                }
                None => println!("{json}"),
            }
        }

        Some(Commands::Tokens { formula }) => {
            let tokens = Lexer::tokenize(&formula).map_err(|err| {
                eprintln!("{}", diagnostic::render(&formula, &ParseError::from(err)));
                anyhow!("Tokenization failed")
            })?;
            for token in tokens {
                println!("{:>8}  {:?}", token.span.to_string(), token.kind);
            }
        }
    }

    Ok(())
}

/// Install the stderr subscriber; `PLANEMAP_LOG` overrides the `-v` level
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse a formula, printing a caret diagnostic on failure
fn compile(formula: &str) -> Result<PlaneMap> {
    PlaneMap::parse(formula).map_err(|err| {
        eprintln!("{}", diagnostic::render(formula, &err));
        anyhow!("Invalid formula")
    })
}

fn evaluate(map: &PlaneMap, points: &[Complex]) -> Vec<Sample> {
    let points = if points.is_empty() {
        &[Complex::ZERO][..]
    } else {
        points
    };
    points
        .iter()
        .map(|&z| Sample { z, w: map.eval(z) })
        .collect()
}

/// Parse a point written as `re,im` or a bare real number
fn parse_point(s: &str) -> Result<Complex, String> {
    let (re, im) = s.split_once(',').unwrap_or((s, "0"));
    let re = re
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid real part '{}': {e}", re.trim()))?;
    let im = im
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid imaginary part '{}': {e}", im.trim()))?;
    Ok(Complex::new(re, im))
}

/// Pick the view configuration: an explicit file, else `planemap.toml` in
/// `dir` when it exists, else defaults
fn resolve_view_config(explicit: Option<&Path>, dir: &Path) -> Result<ViewConfig> {
    if let Some(path) = explicit {
        return ViewConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        return ViewConfig::load(&candidate)
            .with_context(|| format!("Failed to load config {}", candidate.display()));
    }

    tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
    Ok(ViewConfig::default())
}
