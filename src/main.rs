use clap::{Args, Parser, Subcommand};
use fuel_log::config::GeneratorConfig;
use fuel_log::error::Error;
use fuel_log::params::{check_date_order, parse_capacity, parse_date, parse_locations, parse_target};
use fuel_log::render::{render, OutputFormat};
use fuel_log::sweep::sweep;
use fuel_log::{logging, GenerationParameters, Generator, PcgSource, ReconcileSettings, Redistribution};
use std::fs;
use std::path::PathBuf;

type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Parser)]
#[command(name = "fuel-log", version, about = "Synthesize a plausible fuel purchase log")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one purchase log
    Generate {
        #[command(flatten)]
        params: ParamArgs,
        /// Seed for a reproducible log; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Generate many seeded logs in parallel and report how well they converge
    Sweep {
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long, default_value_t = 100)]
        runs: u64,
        #[arg(long, default_value_t = 0)]
        first_seed: u64,
    },
}

#[derive(Args)]
struct ParamArgs {
    /// JSON file with defaults for any of the options below
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// First day of the log (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,
    /// Last day of the log (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,
    /// Largest single purchase
    #[arg(long)]
    capacity: Option<String>,
    /// Total volume the log should add up to
    #[arg(long)]
    total: Option<String>,
    /// Candidate station, repeatable
    #[arg(long = "station")]
    stations: Vec<String>,
    /// File with one station per line
    #[arg(long)]
    stations_file: Option<PathBuf>,
    #[arg(long)]
    tolerance: Option<f64>,
    #[arg(long)]
    max_iterations: Option<usize>,
    #[arg(long, value_enum)]
    redistribution: Option<Redistribution>,
}

impl ParamArgs {
    fn resolve(&self) -> Result<(GeneratorConfig, GenerationParameters, ReconcileSettings)> {
        let config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };

        let mut params = config.parameters();
        if let Some(start) = &self.start {
            params.start_date = parse_date(start)?;
        }
        if let Some(end) = &self.end {
            params.end_date = parse_date(end)?;
        }
        check_date_order(params.start_date, params.end_date)?;
        if let Some(capacity) = &self.capacity {
            params.max_capacity = parse_capacity(capacity)?;
        }
        if let Some(total) = &self.total {
            params.target_total = parse_target(total)?;
        }
        if let Some(path) = &self.stations_file {
            params.locations = parse_locations(&fs::read_to_string(path)?);
        }
        if !self.stations.is_empty() {
            params.locations = parse_locations(&self.stations.join("\n"));
        }

        let mut settings = config.reconcile;
        if let Some(tolerance) = self.tolerance {
            settings.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            settings.max_iterations = max_iterations;
        }
        if let Some(redistribution) = self.redistribution {
            settings.redistribution = redistribution;
        }

        params.validate()?;
        settings.validate()?;
        Ok((config, params, settings))
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { params, seed, format } => {
            let (config, params, settings) = params.resolve()?;
            let generator = Generator::new(settings);
            let log = match seed.or(config.seed) {
                Some(seed) => {
                    tracing::info!(seed, "generating seeded log");
                    generator.generate(&params, &mut PcgSource::new(seed))?
                }
                None => generator.generate(&params, &mut rand::thread_rng())?,
            };
            println!("{}", render(&log, format)?);
        }
        Command::Sweep {
            params,
            runs,
            first_seed,
        } => {
            let (_, params, settings) = params.resolve()?;
            let seeds = first_seed..first_seed.saturating_add(runs);
            let summary = sweep(&Generator::new(settings), &params, seeds)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
