use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::analyzers::FeatureReports;

/// Metrics the aggregator knows how to pull out of the feature reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    TotalBalanceUsd,
    TransactionCount,
    AvgTransactionValueUsd,
    FailureRate,
    UniqueCounterparties,
    UniqueTokens,
    WalletAgeDays,
    DormantMonths,
    Burstiness,
    GasPriceSpikeRatio,
    RepaymentRate,
    StakingCommitment,
    NftCollections,
}

/// Whether more of a metric is good or bad for the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSense {
    Reward,
    Penalty,
}

impl MetricId {
    pub const ALL: [MetricId; 13] = [
        MetricId::TotalBalanceUsd,
        MetricId::TransactionCount,
        MetricId::AvgTransactionValueUsd,
        MetricId::FailureRate,
        MetricId::UniqueCounterparties,
        MetricId::UniqueTokens,
        MetricId::WalletAgeDays,
        MetricId::DormantMonths,
        MetricId::Burstiness,
        MetricId::GasPriceSpikeRatio,
        MetricId::RepaymentRate,
        MetricId::StakingCommitment,
        MetricId::NftCollections,
    ];

    pub fn sense(self) -> MetricSense {
        match self {
            MetricId::FailureRate
            | MetricId::DormantMonths
            | MetricId::Burstiness
            | MetricId::GasPriceSpikeRatio => MetricSense::Penalty,
            _ => MetricSense::Reward,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricId::TotalBalanceUsd => "total_balance_usd",
            MetricId::TransactionCount => "transaction_count",
            MetricId::AvgTransactionValueUsd => "avg_transaction_value_usd",
            MetricId::FailureRate => "failure_rate",
            MetricId::UniqueCounterparties => "unique_counterparties",
            MetricId::UniqueTokens => "unique_tokens",
            MetricId::WalletAgeDays => "wallet_age_days",
            MetricId::DormantMonths => "dormant_months",
            MetricId::Burstiness => "burstiness",
            MetricId::GasPriceSpikeRatio => "gas_price_spike_ratio",
            MetricId::RepaymentRate => "repayment_rate",
            MetricId::StakingCommitment => "staking_commitment",
            MetricId::NftCollections => "nft_collections",
        }
    }

    /// Raw value for this metric. Penalty metrics return `None` when the data
    /// they judge is absent, so an empty wallet earns nothing for them.
    pub fn value(self, reports: &FeatureReports) -> Option<f64> {
        let has_transactions = reports.transaction_quality.total_transactions > 0;
        let has_dated_activity = reports.wallet_activity.first_activity.is_some();

        match self {
            MetricId::TotalBalanceUsd => Some(reports.liquidity.total_balance_usd),
            MetricId::TransactionCount => {
                Some(reports.transaction_quality.total_transactions as f64)
            }
            MetricId::AvgTransactionValueUsd => Some(reports.transaction_quality.avg_value_usd),
            MetricId::FailureRate => Some(reports.transaction_quality.failure_rate),
            MetricId::UniqueCounterparties => {
                Some(reports.diversification.unique_counterparties as f64)
            }
            MetricId::UniqueTokens => Some(reports.diversification.unique_tokens as f64),
            MetricId::WalletAgeDays => Some(reports.wallet_activity.age_days as f64),
            MetricId::DormantMonths => (has_transactions && has_dated_activity)
                .then_some(reports.wallet_activity.dormant_months as f64),
            MetricId::Burstiness => (has_transactions && has_dated_activity)
                .then_some(reports.wallet_activity.burstiness_penalty),
            MetricId::GasPriceSpikeRatio => (reports.gas_usage.samples > 0
                && reports.gas_usage.median_gas_price > 0.0)
                .then_some(reports.gas_usage.mean_to_median_ratio),
            MetricId::RepaymentRate => Some(reports.lending.repayment_rate),
            MetricId::StakingCommitment => Some(reports.staking.commitment_ratio),
            MetricId::NftCollections => Some(reports.nft_holdings.collection_count as f64),
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `(min, avg, max, max_score)` driving one metric's normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub min_val: f64,
    pub avg_val: f64,
    pub max_val: f64,
    pub max_score: f64,
}

impl Calibration {
    pub const fn new(min_val: f64, avg_val: f64, max_val: f64, max_score: f64) -> Self {
        Self {
            min_val,
            avg_val,
            max_val,
            max_score,
        }
    }

    fn is_well_formed(&self) -> bool {
        [self.min_val, self.avg_val, self.max_val, self.max_score]
            .iter()
            .all(|value| value.is_finite())
            && self.min_val < self.avg_val
            && self.avg_val < self.max_val
            && self.max_score > 0.0
    }
}

/// Calibration table plus the advertised score ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_target_range")]
    pub target_range: f64,
    pub metrics: BTreeMap<MetricId, Calibration>,
}

pub const DEFAULT_TARGET_RANGE: f64 = 900.0;

fn default_target_range() -> f64 {
    DEFAULT_TARGET_RANGE
}

impl Default for ScoreWeights {
    fn default() -> Self {
        let metrics = BTreeMap::from([
            (MetricId::TotalBalanceUsd, Calibration::new(0.0, 1000.0, 25000.0, 30.0)),
            (MetricId::TransactionCount, Calibration::new(0.0, 50.0, 300.0, 15.0)),
            (MetricId::AvgTransactionValueUsd, Calibration::new(0.0, 100.0, 5000.0, 10.0)),
            (MetricId::FailureRate, Calibration::new(0.0, 0.05, 0.25, 10.0)),
            (MetricId::UniqueCounterparties, Calibration::new(0.0, 10.0, 100.0, 10.0)),
            (MetricId::UniqueTokens, Calibration::new(0.0, 5.0, 30.0, 10.0)),
            (MetricId::WalletAgeDays, Calibration::new(0.0, 365.0, 1825.0, 20.0)),
            (MetricId::DormantMonths, Calibration::new(0.0, 3.0, 12.0, 10.0)),
            (MetricId::Burstiness, Calibration::new(0.0, 1.0, 3.0, 5.0)),
            (MetricId::GasPriceSpikeRatio, Calibration::new(1.0, 1.5, 3.0, 5.0)),
            (MetricId::RepaymentRate, Calibration::new(0.0, 0.5, 1.0, 10.0)),
            (MetricId::StakingCommitment, Calibration::new(0.0, 0.5, 1.0, 20.0)),
            (MetricId::NftCollections, Calibration::new(0.0, 5.0, 50.0, 10.0)),
        ]);

        Self {
            target_range: DEFAULT_TARGET_RANGE,
            metrics,
        }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> Result<(), WeightsError> {
        let range = self.target_range;
        // Whole-number ceiling that fits the u32 score.
        if !range.is_finite() || range <= 0.0 || range.fract() != 0.0 || range > f64::from(u32::MAX)
        {
            return Err(WeightsError::InvalidTargetRange(self.target_range));
        }
        if self.metrics.is_empty() {
            return Err(WeightsError::Empty);
        }
        for (metric, calibration) in &self.metrics {
            if !calibration.is_well_formed() {
                return Err(WeightsError::InvalidCalibration {
                    metric: *metric,
                    calibration: *calibration,
                });
            }
        }
        Ok(())
    }

    /// Sum of every metric's `max_score`.
    pub fn max_raw_score(&self) -> f64 {
        self.metrics.values().map(|c| c.max_score).sum()
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeightsError {
    #[error("target range must be a positive whole number no larger than u32::MAX, got {0}")]
    InvalidTargetRange(f64),
    #[error("weights table has no metrics")]
    Empty,
    #[error(
        "calibration for {metric} must satisfy min < avg < max and max_score > 0 (got {} / {} / {} / {})",
        .calibration.min_val, .calibration.avg_val, .calibration.max_val, .calibration.max_score
    )]
    InvalidCalibration {
        metric: MetricId,
        calibration: Calibration,
    },
}
