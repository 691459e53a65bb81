use serde::{Deserialize, Serialize};

use super::super::domain::{LendingPosition, RawTransaction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingReport {
    pub total_borrowed_usd: f64,
    pub total_repaid_usd: f64,
    /// Repaid over borrowed, 0 when nothing was borrowed.
    pub repayment_rate: f64,
}

pub fn analyze_lending(positions: &[LendingPosition]) -> LendingReport {
    let finite = |value: Option<f64>| value.filter(|amount| amount.is_finite() && *amount >= 0.0);
    let total_borrowed_usd: f64 = positions.iter().filter_map(|p| finite(p.borrowed_usd)).sum();
    let total_repaid_usd: f64 = positions.iter().filter_map(|p| finite(p.repaid_usd)).sum();

    let repayment_rate = if total_borrowed_usd > 0.0 {
        total_repaid_usd / total_borrowed_usd
    } else {
        0.0
    };

    LendingReport {
        total_borrowed_usd,
        total_repaid_usd,
        repayment_rate,
    }
}

const STAKING_KEYWORDS: [&str; 3] = ["stake", "delegate", "deposit"];
const UNSTAKING_KEYWORDS: [&str; 5] = ["unstake", "undelegate", "withdraw", "redeem", "unbond"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingReport {
    pub staking_events: usize,
    pub unstaking_events: usize,
    /// stake / (stake + unstake), 0 without any staking activity.
    pub commitment_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StakingAction {
    Stake,
    Unstake,
}

fn classify(event_name: &str) -> Option<StakingAction> {
    // "unstake" and "undelegate" contain stake keywords, so they go first.
    if UNSTAKING_KEYWORDS.iter().any(|k| event_name.contains(k)) {
        Some(StakingAction::Unstake)
    } else if STAKING_KEYWORDS.iter().any(|k| event_name.contains(k)) {
        Some(StakingAction::Stake)
    } else {
        None
    }
}

/// Counts at most one staking action per transaction, taken from the first
/// decoded log event whose name matches.
pub fn analyze_staking(transactions: &[RawTransaction]) -> StakingReport {
    let mut staking_events = 0;
    let mut unstaking_events = 0;

    for tx in transactions {
        match tx.decoded_event_names().find_map(|name| classify(&name)) {
            Some(StakingAction::Stake) => staking_events += 1,
            Some(StakingAction::Unstake) => unstaking_events += 1,
            None => {}
        }
    }

    let total = staking_events + unstaking_events;
    let commitment_ratio = if total > 0 {
        staking_events as f64 / total as f64
    } else {
        0.0
    };

    StakingReport {
        staking_events,
        unstaking_events,
        commitment_ratio,
    }
}
