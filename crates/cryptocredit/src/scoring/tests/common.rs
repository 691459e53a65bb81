use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::datasource::{ChainDataSource, DataSourceError};
use crate::scoring::domain::{
    DecodedEvent, LendingPosition, LogEvent, NftHolding, RawTransaction, TokenBalance,
    WalletSnapshot,
};
use crate::scoring::{
    score_router, CreditScoringService, RequestLimits, ScoreAggregator, ScoreWeights,
};

/// Subject address written with mixed case on purpose.
pub(super) const SUBJECT: &str = "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01";
pub(super) const SUBJECT_UPPER: &str = "0xABCDEF0123456789ABCDEF0123456789ABCDEF01";
pub(super) const COUNTERPARTY: &str = "0x1111111111111111111111111111111111111111";
pub(super) const OTHER_COUNTERPARTY: &str = "0x2222222222222222222222222222222222222222";
pub(super) const TOKEN: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

pub(super) fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn at(year: i32, month: u32, day: u32, seconds: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid instant")
        + Duration::seconds(i64::from(seconds))
}

pub(super) fn outgoing(to: &str, timestamp: DateTime<Utc>, value_usd: f64) -> RawTransaction {
    RawTransaction {
        tx_hash: Some(format!("0x{:x}", timestamp.timestamp())),
        timestamp: Some(timestamp),
        successful: Some(true),
        from_address: Some(SUBJECT.to_string()),
        to_address: Some(to.to_string()),
        value: Some("0".to_string()),
        value_quote: Some(value_usd),
        gas_price: Some(20_000_000_000.0),
        gas_spent: Some(21_000),
        log_events: Vec::new(),
    }
}

pub(super) fn incoming(from: &str, timestamp: DateTime<Utc>, value_usd: f64) -> RawTransaction {
    RawTransaction {
        from_address: Some(from.to_string()),
        to_address: Some(SUBJECT_UPPER.to_string()),
        ..outgoing(from, timestamp, value_usd)
    }
}

pub(super) fn with_event(mut tx: RawTransaction, name: &str) -> RawTransaction {
    tx.log_events.push(LogEvent {
        sender_address: None,
        decoded: Some(DecodedEvent {
            name: Some(name.to_string()),
            signature: None,
        }),
    });
    tx
}

pub(super) fn balance(contract: &str, quote: Option<f64>) -> TokenBalance {
    TokenBalance {
        contract_address: Some(contract.to_string()),
        contract_ticker_symbol: None,
        balance: Some("1".to_string()),
        quote,
    }
}

pub(super) fn nft(contract: &str, count: &str) -> NftHolding {
    NftHolding {
        contract_address: Some(contract.to_string()),
        contract_name: None,
        balance: Some(count.to_string()),
    }
}

pub(super) fn lending(borrowed: f64, repaid: f64) -> LendingPosition {
    LendingPosition {
        protocol: Some("aave-v3".to_string()),
        borrowed_usd: Some(borrowed),
        repaid_usd: Some(repaid),
    }
}

pub(super) fn empty_snapshot() -> WalletSnapshot {
    WalletSnapshot {
        address: SUBJECT.to_string(),
        chain: "eth-mainnet".to_string(),
        ..WalletSnapshot::default()
    }
}

/// One $100 outgoing transaction 400 days old and a single $5,000 token.
pub(super) fn single_transaction_snapshot() -> WalletSnapshot {
    WalletSnapshot {
        transactions: vec![outgoing(COUNTERPARTY, as_of() - Duration::days(400), 100.0)],
        balances: vec![balance(TOKEN, Some(5000.0))],
        ..empty_snapshot()
    }
}

pub(super) fn aggregator() -> ScoreAggregator {
    ScoreAggregator::new(ScoreWeights::default()).expect("default weights validate")
}

#[derive(Debug, Default, Clone)]
pub(super) struct MemorySource {
    pub(super) transactions: Vec<RawTransaction>,
    pub(super) balances: Vec<TokenBalance>,
    pub(super) nfts: Vec<NftHolding>,
    pub(super) lending: Vec<LendingPosition>,
    pub(super) requests: Arc<Mutex<Vec<(String, String, u32)>>>,
}

impl MemorySource {
    pub(super) fn from_snapshot(snapshot: WalletSnapshot) -> Self {
        Self {
            transactions: snapshot.transactions,
            balances: snapshot.balances,
            nfts: snapshot.nfts,
            lending: snapshot.lending,
            requests: Arc::default(),
        }
    }

    pub(super) fn requests(&self) -> Vec<(String, String, u32)> {
        self.requests.lock().expect("request mutex poisoned").clone()
    }
}

impl ChainDataSource for MemorySource {
    async fn transactions(
        &self,
        address: &str,
        chain: &str,
        limit: u32,
    ) -> Result<Vec<RawTransaction>, DataSourceError> {
        self.requests
            .lock()
            .expect("request mutex poisoned")
            .push((address.to_string(), chain.to_string(), limit));
        Ok(self
            .transactions
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn token_balances(
        &self,
        _address: &str,
        _chain: &str,
    ) -> Result<Vec<TokenBalance>, DataSourceError> {
        Ok(self.balances.clone())
    }

    async fn nft_holdings(
        &self,
        _address: &str,
        _chain: &str,
    ) -> Result<Vec<NftHolding>, DataSourceError> {
        Ok(self.nfts.clone())
    }

    async fn lending_positions(
        &self,
        _address: &str,
        _chain: &str,
    ) -> Result<Vec<LendingPosition>, DataSourceError> {
        Ok(self.lending.clone())
    }
}

/// Balances endpoint is down; everything else answers.
#[derive(Debug, Default)]
pub(super) struct UnavailableSource;

impl ChainDataSource for UnavailableSource {
    async fn transactions(
        &self,
        _address: &str,
        _chain: &str,
        _limit: u32,
    ) -> Result<Vec<RawTransaction>, DataSourceError> {
        Ok(Vec::new())
    }

    async fn token_balances(
        &self,
        _address: &str,
        _chain: &str,
    ) -> Result<Vec<TokenBalance>, DataSourceError> {
        Err(DataSourceError::Status {
            status: 503,
            message: "maintenance".to_string(),
        })
    }

    async fn nft_holdings(
        &self,
        _address: &str,
        _chain: &str,
    ) -> Result<Vec<NftHolding>, DataSourceError> {
        Ok(Vec::new())
    }
}

pub(super) fn memory_service(
    source: MemorySource,
    limits: RequestLimits,
) -> CreditScoringService<MemorySource> {
    CreditScoringService::new(Arc::new(source), aggregator(), limits)
}

pub(super) fn router_with_service<D>(service: CreditScoringService<D>) -> axum::Router
where
    D: ChainDataSource + 'static,
{
    score_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
