use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One on-chain transaction touching the subject address, as returned by the
/// data provider. Every field is optional so a partial record can still feed
/// the analyzers that do not depend on the missing piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTransaction {
    pub tx_hash: Option<String>,
    #[serde(rename = "block_signed_at", deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    pub successful: Option<bool>,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    /// Native amount in the chain's smallest unit.
    pub value: Option<String>,
    /// USD quote of `value` at signing time.
    pub value_quote: Option<f64>,
    pub gas_price: Option<f64>,
    pub gas_spent: Option<u64>,
    #[serde(deserialize_with = "null_as_empty")]
    pub log_events: Vec<LogEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEvent {
    pub sender_address: Option<String>,
    pub decoded: Option<DecodedEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodedEvent {
    pub name: Option<String>,
    pub signature: Option<String>,
}

impl RawTransaction {
    /// Lowercased decoded event names, in log order.
    pub fn decoded_event_names(&self) -> impl Iterator<Item = String> + '_ {
        self.log_events
            .iter()
            .filter_map(|event| event.decoded.as_ref())
            .filter_map(|decoded| decoded.name.as_deref())
            .map(str::to_ascii_lowercase)
    }
}

/// A held fungible token position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenBalance {
    pub contract_address: Option<String>,
    pub contract_ticker_symbol: Option<String>,
    pub balance: Option<String>,
    /// Current USD value of the whole position.
    pub quote: Option<f64>,
}

/// A held NFT collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NftHolding {
    pub contract_address: Option<String>,
    pub contract_name: Option<String>,
    /// Number of tokens held from the collection, as a decimal string.
    pub balance: Option<String>,
}

/// Aggregate borrow/repay activity on one lending protocol, in USD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingPosition {
    pub protocol: Option<String>,
    pub borrowed_usd: Option<f64>,
    pub repaid_usd: Option<f64>,
}

/// Everything fetched for one (address, chain) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletSnapshot {
    pub address: String,
    pub chain: String,
    pub transactions: Vec<RawTransaction>,
    pub balances: Vec<TokenBalance>,
    pub nfts: Vec<NftHolding>,
    pub lending: Vec<LendingPosition>,
}

/// Lowercases and trims an address so comparisons are case-insensitive.
pub fn canonical_address(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Compares an optional record address against an already canonical subject.
pub(crate) fn same_address(candidate: Option<&str>, canonical_subject: &str) -> bool {
    match candidate {
        Some(address) => address.trim().eq_ignore_ascii_case(canonical_subject),
        None => false,
    }
}

/// Checks the shape of a wallet address. `0x` addresses must be 20-byte hex;
/// anything else (base58, bech32) must be plain ASCII alphanumerics.
pub fn is_valid_address(raw: &str) -> bool {
    let address = raw.trim();
    if let Some(hex) = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
    {
        return hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    !address.is_empty()
        && address.len() <= 128
        && address.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Parses provider timestamps such as `2023-04-01T12:30:00Z`. Offsets other
/// than UTC are converted; timestamps without a designator are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = trimmed.trim_end_matches(['Z', 'z']);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|value| value.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_trailing_z_and_offsets() {
        let expected = Utc.with_ymd_and_hms(2023, 4, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2023-04-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2023-04-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-04-01T12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-04-01 12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn malformed_timestamp_deserializes_to_none() {
        let tx: RawTransaction = serde_json::from_value(serde_json::json!({
            "block_signed_at": "yesterday",
            "successful": true,
        }))
        .expect("record decodes");
        assert!(tx.timestamp.is_none());
        assert_eq!(tx.successful, Some(true));
    }

    #[test]
    fn validates_address_shapes() {
        assert!(is_valid_address("0xAbC0000000000000000000000000000000000001"));
        assert!(is_valid_address("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"));
        assert!(!is_valid_address("0x1234"));
        assert!(!is_valid_address("0xZZ00000000000000000000000000000000000001"));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("has spaces"));
    }

    #[test]
    fn address_comparison_ignores_case() {
        let subject = canonical_address(" 0xAbCdEf0000000000000000000000000000000001 ");
        assert_eq!(subject, "0xabcdef0000000000000000000000000000000001");
        assert!(same_address(
            Some("0xABCDEF0000000000000000000000000000000001"),
            &subject
        ));
        assert!(!same_address(None, &subject));
    }
}
