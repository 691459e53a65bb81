use serde::{Deserialize, Serialize};

use super::super::domain::{same_address, RawTransaction};
use super::ratio;

/// Direction of value movement relative to the subject address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReport {
    pub incoming_count: usize,
    pub outgoing_count: usize,
    pub incoming_value_usd: f64,
    pub outgoing_value_usd: f64,
    /// Outgoing over incoming transfer count; null with no incoming transfers.
    pub io_count_ratio: Option<f64>,
    /// Outgoing over incoming USD value; null with no incoming value.
    pub io_value_ratio: Option<f64>,
}

pub fn analyze_flow(subject: &str, transactions: &[RawTransaction]) -> FlowReport {
    let mut report = FlowReport {
        incoming_count: 0,
        outgoing_count: 0,
        incoming_value_usd: 0.0,
        outgoing_value_usd: 0.0,
        io_count_ratio: None,
        io_value_ratio: None,
    };

    for tx in transactions {
        let value = tx.value_quote.filter(|quote| quote.is_finite()).unwrap_or(0.0);
        // A self-transfer is counted once, as outgoing.
        if same_address(tx.from_address.as_deref(), subject) {
            report.outgoing_count += 1;
            report.outgoing_value_usd += value;
        } else if same_address(tx.to_address.as_deref(), subject) {
            report.incoming_count += 1;
            report.incoming_value_usd += value;
        }
    }

    report.io_count_ratio = ratio(report.outgoing_count as f64, report.incoming_count as f64);
    report.io_value_ratio = ratio(report.outgoing_value_usd, report.incoming_value_usd);
    report
}
