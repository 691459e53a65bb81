use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ChainDataSource, DataSourceError};
use crate::config::DataSourceConfig;
use crate::scoring::domain::{NftHolding, RawTransaction, TokenBalance};

/// HTTP client for the GoldRush (Covalent) unified API.
#[derive(Debug, Clone)]
pub struct GoldRushClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<ItemsPage<T>>,
    #[serde(default)]
    error: bool,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemsPage<T> {
    items: Option<Vec<T>>,
}

impl GoldRushClient {
    pub fn new(config: &DataSourceConfig) -> Result<Self, DataSourceError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DataSourceError::NotConfigured("GOLDRUSH_API_KEY is not set".into()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| DataSourceError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn fetch_items<T: DeserializeOwned>(
        &self,
        path: String,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, DataSourceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "requesting provider data");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|err| DataSourceError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| DataSourceError::Transport(err.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error_message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            warn!(status = status.as_u16(), %message, "provider request failed");
            return Err(DataSourceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<serde_json::Value> = serde_json::from_slice(&body)
            .map_err(|err| DataSourceError::Decode(err.to_string()))?;

        if envelope.error {
            return Err(DataSourceError::Provider {
                message: envelope
                    .error_message
                    .unwrap_or_else(|| "unspecified provider error".to_string()),
            });
        }

        let items = envelope
            .data
            .and_then(|page| page.items)
            .unwrap_or_default();
        Ok(decode_records(&url, items))
    }
}

/// Decodes each provider item on its own; a malformed record is dropped
/// instead of failing the whole page.
fn decode_records<T: DeserializeOwned>(url: &str, items: Vec<serde_json::Value>) -> Vec<T> {
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(%url, index, error = %err, "skipping malformed provider record");
                None
            }
        })
        .collect();
    if records.len() < total {
        debug!(%url, kept = records.len(), total, "provider page partially decoded");
    }
    records
}

impl ChainDataSource for GoldRushClient {
    async fn transactions(
        &self,
        address: &str,
        chain: &str,
        limit: u32,
    ) -> Result<Vec<RawTransaction>, DataSourceError> {
        let mut items: Vec<RawTransaction> = self
            .fetch_items(
                format!("/v1/{chain}/address/{address}/transactions_v2/"),
                &[
                    ("page-size", limit.to_string()),
                    ("page-number", "0".to_string()),
                    ("quote-currency", "USD".to_string()),
                ],
            )
            .await?;
        items.truncate(limit as usize);
        Ok(items)
    }

    async fn token_balances(
        &self,
        address: &str,
        chain: &str,
    ) -> Result<Vec<TokenBalance>, DataSourceError> {
        self.fetch_items(
            format!("/v1/{chain}/address/{address}/balances_v2/"),
            &[
                ("quote-currency", "USD".to_string()),
                ("nft", "false".to_string()),
            ],
        )
        .await
    }

    async fn nft_holdings(
        &self,
        address: &str,
        chain: &str,
    ) -> Result<Vec<NftHolding>, DataSourceError> {
        self.fetch_items(
            format!("/v1/{chain}/address/{address}/balances_nft/"),
            &[("no-spam", "true".to_string())],
        )
        .await
    }
}
