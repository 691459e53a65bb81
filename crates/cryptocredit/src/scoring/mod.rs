//! Wallet credit scoring: analyzers turn a wallet snapshot into feature
//! reports, the aggregator normalizes and weights them into one bounded score.

pub mod aggregate;
pub mod analyzers;
pub mod domain;
pub mod normalize;
pub mod router;
pub mod service;
pub mod weights;

#[cfg(test)]
mod tests;

pub use aggregate::{AggregateScore, ScoreAggregator, SubScore};
pub use analyzers::FeatureReports;
pub use domain::{
    canonical_address, is_valid_address, parse_timestamp, DecodedEvent, LendingPosition,
    LogEvent, NftHolding, RawTransaction, TokenBalance, WalletSnapshot,
};
pub use normalize::normalize;
pub use router::score_router;
pub use service::{
    score_snapshot, CreditScoreResult, CreditScoringService, RequestLimits, ScoreRequest,
    ScoringError,
};
pub use weights::{Calibration, MetricId, MetricSense, ScoreWeights, WeightsError};
