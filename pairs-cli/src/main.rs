//! `pairs`: fetch two tickers, score their correlation and report spread z-score
//! signals with their historical quality.

use clap::Parser;
use pairs_analytics::{AnalysisConfig, AnalysisError, PairAnalyzer, correlation::score_pair};
use pairs_data::{FetchError, Period, PriceDataSource, YahooClient, YahooConfig};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};

mod report;

#[derive(Debug, Parser)]
#[command(
    name = "pairs",
    version,
    about = "Pair-trading analysis of two tickers over daily prices"
)]
struct Cli {
    /// First ticker (leg A)
    ticker_a: String,

    /// Second ticker (leg B)
    ticker_b: String,

    /// History length: 1y, 2y, 5y, 10y or max
    #[arg(long, default_value_t = Period::OneYear)]
    period: Period,

    /// Rolling window for spread mean and standard deviation, overriding PAIRS_LOOKBACK_WINDOW
    #[arg(long)]
    lookback: Option<usize>,

    /// Absolute z-score beyond which a signal fires, overriding PAIRS_Z_THRESHOLD
    #[arg(long)]
    threshold: Option<f64>,

    /// Price column to analyze, overriding PAIRS_PRICE_COLUMN
    #[arg(long)]
    price_column: Option<String>,

    /// Number of trailing signal changes to list
    #[arg(long, default_value_t = 10)]
    recent: usize,

    /// Print the full report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Resolve configuration and request URLs without fetching
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

impl Cli {
    fn analysis_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::from_env();
        if let Some(lookback) = self.lookback {
            config = config.with_lookback_window(lookback);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_z_score_threshold(threshold);
        }
        if let Some(column) = &self.price_column {
            config = config.with_price_column(column.clone());
        }
        config
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "pair analysis failed");
            eprintln!("Error: {error}");
            if matches!(&error, CliError::Analysis(error) if error.is_pair_mismatch()) {
                eprintln!("Choose stocks from the same index with overlapping trading history.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ticker_a = cli.ticker_a.trim().to_uppercase();
    let ticker_b = cli.ticker_b.trim().to_uppercase();

    let config = cli.analysis_config();
    let analyzer = PairAnalyzer::new(config.clone())?;
    let client = YahooClient::new(YahooConfig::from_env())?;

    if cli.dry_run {
        println!(
            "{}",
            report::render_header(&ticker_a, &ticker_b, cli.period.as_str(), &config)
        );
        println!("{}", client.chart_url(&ticker_a, cli.period)?);
        println!("{}", client.chart_url(&ticker_b, cli.period)?);
        return Ok(());
    }

    info!(%ticker_a, %ticker_b, period = %cli.period, "fetching price history");
    let (series_a, series_b) = tokio::try_join!(
        client.fetch(&ticker_a, cli.period),
        client.fetch(&ticker_b, cli.period)
    )?;

    // Scored on its own so the correlation block survives a failing pipeline
    let correlation = score_pair(&series_a, &series_b, &config.price_column);

    if !cli.json {
        print!(
            "{}",
            report::render_header(&ticker_a, &ticker_b, cli.period.as_str(), &config)
        );
        print!("{}", report::render_correlation(&correlation));
    }

    let analysis = analyzer.run(&series_a, &series_b)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", report::render_analysis(&analysis, cli.recent));
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
