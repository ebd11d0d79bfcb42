//! `u-tsp` command-line solver.
//!
//! Reads a TSPLIB instance, runs the genetic algorithm and writes the best
//! tour in TSPLIB `TOUR` format.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_tsp::ga::{GaConfig, GaRunner};
use u_tsp::tsplib;

/// Genetic-algorithm solver for TSPLIB instances.
#[derive(Debug, Parser)]
#[command(name = "u-tsp", version, about)]
struct Args {
    /// TSPLIB instance to solve.
    input: PathBuf,

    /// Where to write the best tour.
    output: PathBuf,

    /// Print the best tour as `ID,X,Y` triples on stdout.
    #[arg(short, long)]
    plot: bool,

    /// Mutation rate.
    #[arg(short, long, default_value_t = 0.02)]
    mutation: f64,

    /// Population size.
    #[arg(short, long, default_value_t = 10)]
    size: usize,

    /// Generations the best tour must repeat before stopping.
    #[arg(short, long, default_value_t = 200)]
    repetitions: usize,

    /// Random seed; a fixed seed reproduces the run.
    #[arg(long)]
    seed: Option<u64>,

    /// Hard bound on the number of generations.
    #[arg(long)]
    max_generations: Option<usize>,

    /// Do not carry the best tour over into the next generation.
    #[arg(long)]
    no_elitism: bool,

    /// Evaluate tours in parallel (requires the `parallel` feature).
    #[arg(long)]
    parallel: bool,
}

impl Args {
    fn config(&self) -> GaConfig {
        GaConfig {
            population_size: self.size,
            elitism: !self.no_elitism,
            mutation_rate: self.mutation,
            stagnation_threshold: self.repetitions,
            max_generations: self.max_generations,
            parallel: self.parallel,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let started = Instant::now();
    let instance = tsplib::read(&args.input)
        .with_context(|| format!("failed to read instance {}", args.input.display()))?;
    info!(
        name = %instance.name,
        cities = instance.cities.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "instance loaded"
    );

    let started = Instant::now();
    let result = GaRunner::run(&instance, &args.config()).context("genetic algorithm failed")?;
    info!(
        generations = result.generations,
        distance = result.best.distance(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "solved"
    );

    if args.plot {
        println!("{}", tsplib::format_plot(&instance, &result.best));
    }

    tsplib::write_tour(&args.output, &instance, &result.best)
        .with_context(|| format!("failed to write tour {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_library_defaults() {
        let args = Args::parse_from(["u-tsp", "in.tsp", "out.tour"]);
        let config = args.config();
        let defaults = GaConfig::default();
        assert_eq!(config, defaults);
        assert!(!args.plot);
    }

    #[test]
    fn test_short_flags() {
        let args = Args::parse_from([
            "u-tsp", "in.tsp", "out.tour", "-p", "-m", "0.1", "-s", "30", "-r", "15",
        ]);
        assert!(args.plot);
        let config = args.config();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.stagnation_threshold, 15);
        assert!((config.mutation_rate - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_long_flags() {
        let args = Args::parse_from([
            "u-tsp",
            "in.tsp",
            "out.tour",
            "--seed",
            "9",
            "--max-generations",
            "100",
            "--no-elitism",
            "--parallel",
        ]);
        let config = args.config();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_generations, Some(100));
        assert!(!config.elitism);
        assert!(config.parallel);
    }
}
