use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::{canonical_address, same_address, NftHolding, RawTransaction, TokenBalance};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiversificationReport {
    pub unique_counterparties: usize,
    pub unique_tokens: usize,
}

/// Counts distinct addresses on the other side of the subject's transactions
/// and distinct token contracts currently held.
pub fn analyze_diversification(
    subject: &str,
    transactions: &[RawTransaction],
    balances: &[TokenBalance],
) -> DiversificationReport {
    let counterparties: BTreeSet<String> = transactions
        .iter()
        .filter_map(|tx| {
            let from = tx.from_address.as_deref();
            let to = tx.to_address.as_deref();
            if same_address(from, subject) {
                to
            } else if same_address(to, subject) {
                from
            } else {
                // Token transfers surface the subject only inside the logs, so
                // the contract called is the counterparty.
                to
            }
        })
        .map(canonical_address)
        .filter(|address| !address.is_empty() && address != subject)
        .collect();

    let tokens: BTreeSet<String> = balances
        .iter()
        .filter_map(|balance| balance.contract_address.as_deref())
        .map(canonical_address)
        .filter(|address| !address.is_empty())
        .collect();

    DiversificationReport {
        unique_counterparties: counterparties.len(),
        unique_tokens: tokens.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityReport {
    pub total_balance_usd: f64,
    pub priced_positions: usize,
}

pub fn analyze_liquidity(balances: &[TokenBalance]) -> LiquidityReport {
    let quotes: Vec<f64> = balances
        .iter()
        .filter_map(|balance| balance.quote)
        .filter(|quote| quote.is_finite())
        .collect();

    LiquidityReport {
        total_balance_usd: quotes.iter().sum(),
        priced_positions: quotes.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftHoldingsReport {
    pub collection_count: usize,
    pub token_count: u64,
}

pub fn analyze_nft_holdings(nfts: &[NftHolding]) -> NftHoldingsReport {
    let collections: BTreeSet<String> = nfts
        .iter()
        .filter_map(|holding| holding.contract_address.as_deref())
        .map(canonical_address)
        .filter(|address| !address.is_empty())
        .collect();

    let token_count = nfts
        .iter()
        .filter_map(|holding| holding.balance.as_deref())
        .filter_map(|balance| balance.trim().parse::<u64>().ok())
        .fold(0u64, u64::saturating_add);

    NftHoldingsReport {
        collection_count: collections.len(),
        token_count,
    }
}
