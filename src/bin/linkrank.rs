//! linkrank CLI
//!
//! Ranks a directory of HTML pages by sampling and by iteration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use rapid_linkrank::report::{render_comparison, render_json};
use rapid_linkrank::{compare, crawl, ConfigOverrides, RankConfig};

#[derive(Parser)]
#[command(name = "linkrank")]
#[command(author, version, about = "Random-surfer PageRank for a directory of HTML pages")]
struct Cli {
    /// Directory holding the *.html corpus
    corpus: PathBuf,

    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Probability of following a link rather than teleporting
    #[arg(short, long)]
    damping: Option<f64>,

    /// Length of the sampling random walk
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Upper bound on power-iteration passes
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Stop iterating once no page moves by more than this
    #[arg(long)]
    threshold: Option<f64>,

    /// Seed for the sampling walk
    #[arg(long)]
    seed: Option<u64>,

    /// Run both estimators concurrently
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn rank_config(&self) -> Result<RankConfig> {
        let base = match &self.config {
            Some(path) => RankConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RankConfig::default(),
        };
        let overrides = ConfigOverrides {
            damping: self.damping,
            samples: self.samples,
            max_iterations: self.max_iterations,
            threshold: self.threshold,
            seed: self.seed,
            parallel: self.parallel,
        };

        Ok(base.merge(&overrides)?)
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.rank_config()?;

    let corpus = crawl(&cli.corpus)
        .with_context(|| format!("failed to crawl {}", cli.corpus.display()))?;
    corpus.validate()?;

    let comparison = compare(&corpus, &config)?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_comparison(&comparison)),
        OutputFormat::Json => println!("{}", render_json(&comparison)?),
    }

    Ok(())
}
