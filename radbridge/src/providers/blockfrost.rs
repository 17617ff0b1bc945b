//! Blockfrost-style HTTP ledger data provider.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use tracing::{debug, info};

use super::LedgerProvider;
use crate::chain::{Address, AssetClass, SignedTx, TxHash, Utxo, Value, LOVELACE_UNIT};
use crate::error::{ProviderError, ProviderResult};

/// Main network API base URL.
pub const BLOCKFROST_MAINNET_URL: &str = "https://cardano-mainnet.blockfrost.io/api/v0";

/// Preview test network API base URL.
pub const BLOCKFROST_PREVIEW_URL: &str = "https://cardano-preview.blockfrost.io/api/v0";

/// Page size for paginated listing endpoints.
const PAGE_SIZE: usize = 100;

/// HTTP client for a Blockfrost-compatible ledger API.
///
/// # Example
///
/// ```rust,ignore
/// use radbridge::providers::{BlockfrostClient, BLOCKFROST_PREVIEW_URL};
///
/// let client = BlockfrostClient::new(BLOCKFROST_PREVIEW_URL, project_id);
/// let holdings = client.utxos_at(&address).await?;
/// ```
#[derive(Clone)]
pub struct BlockfrostClient {
    http_client: reqwest::Client,
    base_url: Arc<str>,
    project_id: Arc<str>,
}

impl std::fmt::Debug for BlockfrostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockfrostClient")
            .field("base_url", &self.base_url)
            .field("project_id", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl BlockfrostClient {
    /// Create a client against the given API base URL and project id.
    #[must_use]
    pub fn new(base_url: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into().into(),
            project_id: project_id.into().into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn error_from(response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ProviderError::Status { status, body }
    }
}

#[async_trait]
impl LedgerProvider for BlockfrostClient {
    fn name(&self) -> &'static str {
        "blockfrost"
    }

    async fn utxos_at(&self, address: &Address) -> ProviderResult<Vec<Utxo>> {
        let mut holdings = Vec::new();
        let mut page = 1usize;

        loop {
            let response = self
                .http_client
                .get(self.url(&format!("/addresses/{address}/utxos")))
                .header("project_id", self.project_id.as_ref())
                .query(&[("page", page.to_string()), ("count", PAGE_SIZE.to_string())])
                .send()
                .await?;

            // An address the chain has never seen is simply empty.
            if response.status() == StatusCode::NOT_FOUND {
                break;
            }
            if !response.status().is_success() {
                return Err(Self::error_from(response).await);
            }

            let entries: Vec<AddressUtxo> = response.json().await?;
            let fetched = entries.len();
            for entry in entries {
                holdings.push(entry.into_utxo()?);
            }
            if fetched < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        debug!(address = %address, utxos = holdings.len(), "fetched holdings");
        Ok(holdings)
    }

    async fn submit(&self, tx: &SignedTx) -> ProviderResult<TxHash> {
        let response = self
            .http_client
            .post(self.url("/tx/submit"))
            .header("project_id", self.project_id.as_ref())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/cbor"))
            .body(tx.bytes.clone())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        // The API answers with the transaction hash as a JSON string.
        let hash: String = response.json().await?;
        info!(tx = %hash, "transaction submitted");
        Ok(TxHash(hash))
    }

    async fn tx_confirmed(&self, hash: &TxHash) -> ProviderResult<bool> {
        let response = self
            .http_client
            .get(self.url(&format!("/txs/{hash}")))
            .header("project_id", self.project_id.as_ref())
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::error_from(response).await),
        }
    }
}

/// One unspent output as listed by the address UTXO endpoint.
#[derive(Debug, Deserialize)]
struct AddressUtxo {
    tx_hash: String,
    output_index: u32,
    amount: Vec<AmountEntry>,
}

/// One `{unit, quantity}` balance pair.
#[derive(Debug, Deserialize)]
struct AmountEntry {
    unit: String,
    quantity: String,
}

impl AddressUtxo {
    fn into_utxo(self) -> ProviderResult<Utxo> {
        let mut value = Value::default();
        for entry in self.amount {
            if entry.unit == LOVELACE_UNIT {
                value.lovelace = entry
                    .quantity
                    .parse()
                    .map_err(|_| ProviderError::decode(format!("lovelace quantity: {}", entry.quantity)))?;
            } else {
                let asset = AssetClass::from_unit(&entry.unit)
                    .ok_or_else(|| ProviderError::decode(format!("asset unit: {}", entry.unit)))?;
                let quantity = entry
                    .quantity
                    .parse()
                    .map_err(|_| ProviderError::decode(format!("asset quantity: {}", entry.quantity)))?;
                value = value.with_asset(asset, quantity);
            }
        }
        Ok(Utxo {
            tx_hash: TxHash(self.tx_hash),
            output_index: self.output_index,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UTXO_FIXTURE: &str = r#"
    [
      {
        "address": "addr_test1qz2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x",
        "tx_hash": "39a7a284c2a0948189dc45dec670211cd4d72f7b66c5726c08d9b3df11e44d58",
        "output_index": 0,
        "amount": [
          { "unit": "lovelace", "quantity": "2000000" },
          {
            "unit": "abababababababababababababababababababababababababababab524144",
            "quantity": "500"
          }
        ],
        "block": "7eb8e27d18686c7db9a18f8bbcfe34e3fed6e047afaa2d969904d15e934847e6"
      }
    ]"#;

    #[test]
    fn test_parse_address_utxos() {
        let entries: Vec<AddressUtxo> = serde_json::from_str(UTXO_FIXTURE).unwrap();
        assert_eq!(entries.len(), 1);

        let utxo = entries.into_iter().next().unwrap().into_utxo().unwrap();
        assert_eq!(utxo.output_index, 0);
        assert_eq!(utxo.value.lovelace, 2_000_000);

        let rad = AssetClass::new(vec![0xAB; 28], b"RAD".to_vec());
        assert_eq!(utxo.value.quantity_of(&rad), 500);
    }

    #[test]
    fn test_malformed_unit_is_a_decode_error() {
        let entry = AddressUtxo {
            tx_hash: "aa".into(),
            output_index: 0,
            amount: vec![AmountEntry {
                unit: "zz".into(),
                quantity: "1".into(),
            }],
        };
        assert!(matches!(
            entry.into_utxo().unwrap_err(),
            ProviderError::Decode(_)
        ));
    }

    #[test]
    fn test_debug_redacts_project_id() {
        let client = BlockfrostClient::new(BLOCKFROST_PREVIEW_URL, "previewSECRET");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("previewSECRET"));
    }
}
