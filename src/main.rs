use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use u_binpack::fso::{FsoConfig, FsoRunner};
use u_binpack::report::{self, PackingSummary};
use u_binpack::{io, Result};

/// Packs a bin packing instance with Firebug Swarm Optimization.
#[derive(Parser, Debug)]
#[command(name = "u-binpack", version, about)]
struct Cli {
    /// Instance file (count, capacity, then one weight per line)
    instance: PathBuf,

    /// JSON run configuration; fields not given keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of male agents
    #[arg(long)]
    males: Option<usize>,

    /// Female vectors per male
    #[arg(long)]
    females: Option<usize>,

    /// Outer exploration/exploitation iterations (S1)
    #[arg(long)]
    s1: Option<usize>,

    /// Convergence iterations (S2)
    #[arg(long)]
    s2: Option<usize>,

    /// Seed of the population-initialization stream
    #[arg(long)]
    init_seed: Option<u64>,

    /// Seed of the search-coefficient stream
    #[arg(long)]
    search_seed: Option<u64>,

    /// Report file
    #[arg(short, long, default_value = "Result.txt")]
    output: PathBuf,

    /// Write the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn build_config(&self) -> Result<FsoConfig> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => FsoConfig::default(),
        };
        if let Some(m) = self.males {
            config.male_agents = m;
        }
        if let Some(f) = self.females {
            config.female_agents = f;
        }
        if let Some(s1) = self.s1 {
            config.s1_iterations = s1;
        }
        if let Some(s2) = self.s2 {
            config.s2_iterations = s2;
        }
        if let Some(seed) = self.init_seed {
            config.init_seed = seed;
        }
        if let Some(seed) = self.search_seed {
            config.search_seed = seed;
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.build_config()?;
    let instance = io::read_instance(&cli.instance)?;
    info!(
        "Loaded {} ({} items, capacity {})",
        cli.instance.display(),
        instance.len(),
        instance.capacity
    );

    let result = FsoRunner::run(&instance, &config)?;
    let summary = PackingSummary::calculate(&instance, &result.best, result.elapsed);
    info!(
        "Bins: {} (lower bound {}, gap {}), score {}, {} evaluations",
        summary.bins, summary.lower_bound, summary.gap, summary.score, result.evaluations
    );
    if summary.is_optimal() {
        info!("Bin count matches the lower bound");
    }

    let mut out = BufWriter::new(File::create(&cli.output)?);
    if cli.json {
        report::write_json_report(&mut out, &instance, &result)?;
    } else {
        report::write_text_report(&mut out, &result)?;
    }
    out.flush()?;
    info!("Report written to {}", cli.output.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
