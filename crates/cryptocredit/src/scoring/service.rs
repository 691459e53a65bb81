use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::aggregate::{ScoreAggregator, SubScore};
use super::analyzers::FeatureReports;
use super::domain::{is_valid_address, RawTransaction, WalletSnapshot};
use crate::config::ScoringConfig;
use crate::datasource::{ChainDataSource, DataSourceError};

/// Inbound scoring request. `chain` is a provider chain name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub address: String,
    pub chain: String,
    #[serde(default)]
    pub tx_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditScoreResult {
    pub credit_score: u32,
    pub details: FeatureReports,
    pub components: Vec<SubScore>,
    pub transactions: Vec<RawTransaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub default_tx_limit: u32,
    pub max_tx_limit: u32,
}

impl From<&ScoringConfig> for RequestLimits {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            default_tx_limit: config.default_tx_limit,
            max_tx_limit: config.max_tx_limit,
        }
    }
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            default_tx_limit: 100,
            max_tx_limit: 1000,
        }
    }
}

/// Fetches a wallet snapshot, runs every analyzer, and aggregates the score.
/// Holds no per-request state; concurrent calls share only read-only config.
pub struct CreditScoringService<D> {
    source: Arc<D>,
    aggregator: Arc<ScoreAggregator>,
    limits: RequestLimits,
}

impl<D> CreditScoringService<D>
where
    D: ChainDataSource + 'static,
{
    pub fn new(source: Arc<D>, aggregator: ScoreAggregator, limits: RequestLimits) -> Self {
        Self {
            source,
            aggregator: Arc::new(aggregator),
            limits,
        }
    }

    pub async fn score(&self, request: ScoreRequest) -> Result<CreditScoreResult, ScoringError> {
        self.score_at(request, Utc::now()).await
    }

    /// Scores against an explicit instant so wallet age is reproducible.
    pub async fn score_at(
        &self,
        request: ScoreRequest,
        as_of: DateTime<Utc>,
    ) -> Result<CreditScoreResult, ScoringError> {
        let ScoreRequest {
            address,
            chain,
            tx_limit,
        } = request;
        let address = address.trim().to_string();
        let chain = chain.trim().to_string();

        if !is_valid_address(&address) {
            return Err(ScoringError::InvalidRequest(format!(
                "'{address}' is not a valid wallet address"
            )));
        }
        if chain.is_empty() {
            return Err(ScoringError::InvalidRequest("chain is required".to_string()));
        }
        let limit = self.effective_limit(tx_limit)?;

        let (transactions, balances, nfts, lending) = tokio::try_join!(
            self.source.transactions(&address, &chain, limit),
            self.source.token_balances(&address, &chain),
            self.source.nft_holdings(&address, &chain),
            self.source.lending_positions(&address, &chain),
        )
        .map_err(|err| {
            warn!(%address, %chain, error = %err, "data source unavailable");
            ScoringError::DataSourceUnavailable(err)
        })?;

        let snapshot = WalletSnapshot {
            address: address.clone(),
            chain: chain.clone(),
            transactions,
            balances,
            nfts,
            lending,
        };
        let result = score_snapshot(&self.aggregator, snapshot, as_of);

        info!(
            %address,
            %chain,
            transactions = result.transactions.len(),
            credit_score = result.credit_score,
            "wallet scored"
        );
        Ok(result)
    }

    fn effective_limit(&self, requested: Option<u32>) -> Result<u32, ScoringError> {
        match requested {
            None => Ok(self.limits.default_tx_limit),
            Some(0) => Err(ScoringError::InvalidRequest(
                "tx_limit must be greater than zero".to_string(),
            )),
            Some(limit) if limit > self.limits.max_tx_limit => {
                debug!(
                    requested = limit,
                    cap = self.limits.max_tx_limit,
                    "tx_limit capped"
                );
                Ok(self.limits.max_tx_limit)
            }
            Some(limit) => Ok(limit),
        }
    }
}

/// Pure scoring phase: the same snapshot and instant always give the same
/// result.
pub fn score_snapshot(
    aggregator: &ScoreAggregator,
    snapshot: WalletSnapshot,
    as_of: DateTime<Utc>,
) -> CreditScoreResult {
    let details = FeatureReports::analyze(&snapshot, as_of);
    let aggregate = aggregator.aggregate(&details);

    CreditScoreResult {
        credit_score: aggregate.credit_score,
        details,
        components: aggregate.components,
        transactions: snapshot.transactions,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid scoring request: {0}")]
    InvalidRequest(String),
    #[error("blockchain data source unavailable: {0}")]
    DataSourceUnavailable(#[from] DataSourceError),
}
