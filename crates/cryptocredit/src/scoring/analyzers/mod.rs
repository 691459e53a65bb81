//! Independent feature analyzers. Each one reads a slice of the wallet
//! snapshot and produces its own report; none reads another's output.

mod activity;
mod defi;
mod flow;
mod gas;
mod holdings;

pub use activity::{
    analyze_inter_transaction_timing, analyze_transaction_quality, analyze_wallet_activity,
    InterTransactionTimingReport, TransactionQualityReport, WalletActivityReport,
};
pub use defi::{analyze_lending, analyze_staking, LendingReport, StakingReport};
pub use flow::{analyze_flow, FlowReport};
pub use gas::{analyze_gas_usage, GasUsageReport};
pub use holdings::{
    analyze_diversification, analyze_liquidity, analyze_nft_holdings, DiversificationReport,
    LiquidityReport, NftHoldingsReport,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{canonical_address, WalletSnapshot};

/// Every analyzer's report for one wallet, keyed by analyzer name when
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureReports {
    pub transaction_quality: TransactionQualityReport,
    pub diversification: DiversificationReport,
    pub wallet_activity: WalletActivityReport,
    pub gas_usage: GasUsageReport,
    pub liquidity: LiquidityReport,
    pub flow: FlowReport,
    pub inter_transaction_timing: InterTransactionTimingReport,
    pub lending: LendingReport,
    pub staking: StakingReport,
    pub nft_holdings: NftHoldingsReport,
}

impl FeatureReports {
    /// Runs every analyzer over the snapshot. `as_of` anchors the wallet age.
    pub fn analyze(snapshot: &WalletSnapshot, as_of: DateTime<Utc>) -> Self {
        let subject = canonical_address(&snapshot.address);
        let transactions = snapshot.transactions.as_slice();

        Self {
            transaction_quality: analyze_transaction_quality(transactions),
            diversification: analyze_diversification(&subject, transactions, &snapshot.balances),
            wallet_activity: analyze_wallet_activity(transactions, as_of),
            gas_usage: analyze_gas_usage(transactions),
            liquidity: analyze_liquidity(&snapshot.balances),
            flow: analyze_flow(&subject, transactions),
            inter_transaction_timing: analyze_inter_transaction_timing(transactions),
            lending: analyze_lending(&snapshot.lending),
            staking: analyze_staking(transactions),
            nft_holdings: analyze_nft_holdings(&snapshot.nfts),
        }
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub(crate) fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance =
        values.iter().map(|value| (value - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

pub(crate) fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        None
    } else {
        Some(numerator / denominator)
    }
}
