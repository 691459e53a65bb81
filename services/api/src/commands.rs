use crate::infra::{build_scoring_service, parse_as_of, resolve_chain};
use chrono::{DateTime, Utc};
use clap::Args;
use cryptocredit::config::{AppConfig, ConfigError};
use cryptocredit::error::AppError;
use cryptocredit::scoring::{ScoreAggregator, ScoreRequest};
use cryptocredit::telemetry;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Wallet address to score
    #[arg(long)]
    pub(crate) address: String,
    /// Chain symbol (ethereum) or provider chain name (eth-mainnet)
    #[arg(long)]
    pub(crate) chain: String,
    /// Number of recent transactions to analyze
    #[arg(long)]
    pub(crate) tx_limit: Option<u32>,
    /// Score as of this instant instead of now (RFC 3339)
    #[arg(long, value_parser = parse_as_of)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Emit single-line JSON
    #[arg(long)]
    pub(crate) compact: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct WeightsArgs {
    /// Emit single-line JSON
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let chain = resolve_chain(&args.chain)?;
    let service = build_scoring_service(&config)?;
    let request = ScoreRequest {
        address: args.address,
        chain: chain.provider_chain.to_string(),
        tx_limit: args.tx_limit,
    };

    let result = match args.as_of {
        Some(as_of) => service.score_at(request, as_of).await?,
        None => service.score(request).await?,
    };

    print_json(&result, args.compact)
}

pub(crate) fn run_weights(args: WeightsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let aggregator =
        ScoreAggregator::new(config.scoring.weights).map_err(ConfigError::Weights)?;

    print_json(&weights_payload(&aggregator), args.compact)
}

/// Calibration table the aggregator actually scores with.
fn weights_payload(aggregator: &ScoreAggregator) -> Value {
    let weights = aggregator.weights();
    json!({
        "target_range": weights.target_range,
        "max_raw_score": weights.max_raw_score(),
        "metrics": weights.metrics,
    })
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<(), AppError> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}
