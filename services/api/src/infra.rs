use chrono::{DateTime, Utc};
use cryptocredit::chains::{self, ChainInfo};
use cryptocredit::config::{AppConfig, ConfigError};
use cryptocredit::datasource::GoldRushClient;
use cryptocredit::error::AppError;
use cryptocredit::scoring::{
    parse_timestamp, CreditScoringService, RequestLimits, ScoreAggregator, ScoringError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the GoldRush client and the configured weights into a scoring
/// service.
pub(crate) fn build_scoring_service(
    config: &AppConfig,
) -> Result<CreditScoringService<GoldRushClient>, AppError> {
    let client = GoldRushClient::new(&config.data_source)?;
    let aggregator =
        ScoreAggregator::new(config.scoring.weights.clone()).map_err(ConfigError::Weights)?;

    Ok(CreditScoringService::new(
        Arc::new(client),
        aggregator,
        RequestLimits::from(&config.scoring),
    ))
}

pub(crate) fn resolve_chain(raw: &str) -> Result<&'static ChainInfo, ScoringError> {
    chains::resolve(raw).ok_or_else(|| {
        ScoringError::InvalidRequest(format!("Unsupported or invalid chain specified: '{raw}'"))
    })
}

pub(crate) fn parse_as_of(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw).ok_or_else(|| format!("failed to parse '{raw}' as an RFC 3339 timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn resolves_symbols_and_rejects_unknown_chains() {
        let chain = resolve_chain("ethereum").expect("ethereum is supported");
        assert_eq!(chain.provider_chain, "eth-mainnet");

        match resolve_chain("dogenet") {
            Err(ScoringError::InvalidRequest(message)) => assert!(message.contains("dogenet")),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn parses_as_of_timestamps() {
        let expected = Utc
            .with_ymd_and_hms(2025, 6, 1, 0, 0, 0)
            .single()
            .expect("valid instant");
        assert_eq!(parse_as_of("2025-06-01T00:00:00Z"), Ok(expected));
        assert!(parse_as_of("next tuesday").is_err());
    }
}
