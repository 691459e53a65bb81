use serde::{Deserialize, Serialize};

use super::super::domain::RawTransaction;
use super::mean;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasUsageReport {
    pub samples: usize,
    pub mean_gas_price: f64,
    pub median_gas_price: f64,
    /// Mean over median; above 1 when a few expensive transactions dominate.
    pub mean_to_median_ratio: f64,
}

pub fn analyze_gas_usage(transactions: &[RawTransaction]) -> GasUsageReport {
    let mut prices: Vec<f64> = transactions
        .iter()
        .filter_map(|tx| tx.gas_price)
        .filter(|price| price.is_finite() && *price >= 0.0)
        .collect();
    prices.sort_by(f64::total_cmp);

    let mean_gas_price = mean(&prices).unwrap_or(0.0);
    let median_gas_price = median_of_sorted(&prices).unwrap_or(0.0);
    let mean_to_median_ratio = if median_gas_price > 0.0 {
        mean_gas_price / median_gas_price
    } else {
        0.0
    };

    GasUsageReport {
        samples: prices.len(),
        mean_gas_price,
        median_gas_price,
        mean_to_median_ratio,
    }
}

fn median_of_sorted(values: &[f64]) -> Option<f64> {
    let len = values.len();
    if len == 0 {
        return None;
    }
    let mid = len / 2;
    if len % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
