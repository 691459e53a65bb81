use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::domain::RawTransaction;
use super::{mean, population_std_dev};

/// Volume, reliability, and size of the wallet's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionQualityReport {
    pub total_transactions: usize,
    pub failed_transactions: usize,
    /// `YYYY-MM` -> transactions signed in that month.
    pub monthly_counts: BTreeMap<String, usize>,
    /// `YYYY` -> transactions signed in that year.
    pub yearly_counts: BTreeMap<String, usize>,
    /// Share of transactions with a known status that failed. A wallet with no
    /// known status at all is treated as fully failing.
    pub failure_rate: f64,
    pub avg_value_usd: f64,
}

pub fn analyze_transaction_quality(transactions: &[RawTransaction]) -> TransactionQualityReport {
    let mut monthly_counts = BTreeMap::new();
    let mut yearly_counts = BTreeMap::new();
    let mut with_status = 0usize;
    let mut failed = 0usize;
    let mut quoted_values = Vec::new();

    for tx in transactions {
        match tx.timestamp {
            Some(ts) => {
                *monthly_counts.entry(ts.format("%Y-%m").to_string()).or_insert(0) += 1;
                *yearly_counts.entry(ts.format("%Y").to_string()).or_insert(0) += 1;
            }
            None => debug!(tx_hash = ?tx.tx_hash, "transaction without timestamp skipped for calendar counts"),
        }

        if let Some(successful) = tx.successful {
            with_status += 1;
            if !successful {
                failed += 1;
            }
        }

        if let Some(quote) = tx.value_quote.filter(|quote| quote.is_finite()) {
            quoted_values.push(quote);
        }
    }

    let failure_rate = if with_status == 0 {
        1.0
    } else {
        failed as f64 / with_status as f64
    };

    TransactionQualityReport {
        total_transactions: transactions.len(),
        failed_transactions: failed,
        monthly_counts,
        yearly_counts,
        failure_rate,
        avg_value_usd: mean(&quoted_values).unwrap_or(0.0),
    }
}

/// Age of the wallet and how evenly its activity is spread over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletActivityReport {
    pub first_activity: Option<DateTime<Utc>>,
    pub last_activity: Option<DateTime<Utc>>,
    /// Whole days between the earliest transaction and the scoring instant.
    pub age_days: i64,
    /// Calendar months with at least one transaction.
    pub active_months: usize,
    /// Calendar months between the first and last active month with none.
    pub dormant_months: usize,
    /// Coefficient of variation of per-month counts across the active range.
    pub burstiness_penalty: f64,
}

pub fn analyze_wallet_activity(
    transactions: &[RawTransaction],
    as_of: DateTime<Utc>,
) -> WalletActivityReport {
    let timestamps: Vec<DateTime<Utc>> = transactions.iter().filter_map(|tx| tx.timestamp).collect();

    let (first, last) = match (timestamps.iter().min(), timestamps.iter().max()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return WalletActivityReport {
                first_activity: None,
                last_activity: None,
                age_days: 0,
                active_months: 0,
                dormant_months: 0,
                burstiness_penalty: 0.0,
            }
        }
    };

    let first_month = month_index(first);
    let span = (month_index(last) - first_month + 1) as usize;
    let mut per_month = vec![0usize; span];
    for ts in &timestamps {
        per_month[(month_index(*ts) - first_month) as usize] += 1;
    }

    let active_months = per_month.iter().filter(|count| **count > 0).count();
    let counts: Vec<f64> = per_month.iter().map(|count| *count as f64).collect();
    let burstiness_penalty = match (mean(&counts), population_std_dev(&counts)) {
        (Some(avg), Some(std)) if avg > 0.0 => std / avg,
        _ => 0.0,
    };

    WalletActivityReport {
        first_activity: Some(first),
        last_activity: Some(last),
        age_days: (as_of - first).num_days().max(0),
        active_months,
        dormant_months: span - active_months,
        burstiness_penalty,
    }
}

fn month_index(ts: DateTime<Utc>) -> i64 {
    i64::from(ts.year()) * 12 + i64::from(ts.month0())
}

/// Spacing between consecutive transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterTransactionTimingReport {
    pub avg_inter_tx_seconds: Option<f64>,
    pub std_inter_tx_seconds: Option<f64>,
}

pub fn analyze_inter_transaction_timing(
    transactions: &[RawTransaction],
) -> InterTransactionTimingReport {
    let mut timestamps: Vec<DateTime<Utc>> =
        transactions.iter().filter_map(|tx| tx.timestamp).collect();
    timestamps.sort();

    let gaps: Vec<f64> = timestamps
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_milliseconds() as f64 / 1000.0)
        .collect();

    InterTransactionTimingReport {
        avg_inter_tx_seconds: mean(&gaps),
        std_inter_tx_seconds: population_std_dev(&gaps),
    }
}
