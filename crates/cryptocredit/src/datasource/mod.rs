//! Boundary to the blockchain data provider. The scoring service only sees
//! this trait, so tests and alternative providers plug in without network
//! access.

mod goldrush;

pub use goldrush::GoldRushClient;

use std::future::Future;

use crate::scoring::domain::{LendingPosition, NftHolding, RawTransaction, TokenBalance};

/// Read-only access to a wallet's on-chain records. An `Ok` empty list means
/// the wallet has no records; any provider failure must be an `Err`.
pub trait ChainDataSource: Send + Sync {
    /// Most recent transactions first, at most `limit` of them.
    fn transactions(
        &self,
        address: &str,
        chain: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawTransaction>, DataSourceError>> + Send;

    fn token_balances(
        &self,
        address: &str,
        chain: &str,
    ) -> impl Future<Output = Result<Vec<TokenBalance>, DataSourceError>> + Send;

    fn nft_holdings(
        &self,
        address: &str,
        chain: &str,
    ) -> impl Future<Output = Result<Vec<NftHolding>, DataSourceError>> + Send;

    /// Providers without lending coverage report no positions.
    fn lending_positions(
        &self,
        _address: &str,
        _chain: &str,
    ) -> impl Future<Output = Result<Vec<LendingPosition>, DataSourceError>> + Send {
        async { Ok(Vec::new()) }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("data provider unreachable: {0}")]
    Transport(String),
    #[error("data provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("data provider reported an error: {message}")]
    Provider { message: String },
    #[error("data provider response could not be decoded: {0}")]
    Decode(String),
    #[error("data provider is not configured: {0}")]
    NotConfigured(String),
}
