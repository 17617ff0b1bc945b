//! Core ledger value types shared across the bridge.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chain::datum::PlutusData;

/// Base-currency unit name on the wire.
pub const LOVELACE_UNIT: &str = "lovelace";

/// Minimum base-currency amount attached to every payment output,
/// in smallest units.
pub const MIN_LOVELACE: u64 = 1_500_000;

/// Hex length of a policy id (28 bytes).
const POLICY_HEX_LEN: usize = 56;

/// A bech32 ledger address, kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Transaction hash representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (policy id, asset name) pair identifying a non-base asset type.
///
/// Identity on the wire is the hex concatenation of both parts, which is
/// also how providers key asset balances.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetClass {
    policy_id: Vec<u8>,
    asset_name: Vec<u8>,
}

impl AssetClass {
    /// Create an asset class from raw policy id and asset name bytes.
    #[must_use]
    pub fn new(policy_id: Vec<u8>, asset_name: Vec<u8>) -> Self {
        Self {
            policy_id,
            asset_name,
        }
    }

    /// Parse an asset class from hex-encoded policy id and asset name.
    ///
    /// The policy id must be exactly 28 bytes.
    pub fn from_hex(policy_hex: &str, name_hex: &str) -> Result<Self, String> {
        if policy_hex.len() != POLICY_HEX_LEN {
            return Err(format!(
                "policy id must be {POLICY_HEX_LEN} hex chars, got {}",
                policy_hex.len()
            ));
        }
        let policy_id = hex::decode(policy_hex).map_err(|e| format!("policy id: {e}"))?;
        let asset_name = hex::decode(name_hex).map_err(|e| format!("asset name: {e}"))?;
        Ok(Self {
            policy_id,
            asset_name,
        })
    }

    /// The concatenated hex identity (`policy id ++ asset name`).
    #[must_use]
    pub fn unit(&self) -> String {
        format!("{}{}", hex::encode(&self.policy_id), hex::encode(&self.asset_name))
    }

    /// Parse a concatenated hex identity back into its two parts.
    ///
    /// Returns `None` for the base-currency unit or anything too short to
    /// carry a full policy id.
    #[must_use]
    pub fn from_unit(unit: &str) -> Option<Self> {
        if unit == LOVELACE_UNIT || unit.len() < POLICY_HEX_LEN {
            return None;
        }
        let (policy_hex, name_hex) = unit.split_at(POLICY_HEX_LEN);
        let policy_id = hex::decode(policy_hex).ok()?;
        let asset_name = hex::decode(name_hex).ok()?;
        Some(Self {
            policy_id,
            asset_name,
        })
    }

    /// Raw policy id bytes.
    #[must_use]
    pub fn policy_id(&self) -> &[u8] {
        &self.policy_id
    }

    /// Raw asset name bytes.
    #[must_use]
    pub fn asset_name(&self) -> &[u8] {
        &self.asset_name
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unit())
    }
}

/// The balances carried by a single holding: an implicit base-currency
/// amount plus zero or more asset balances keyed by [`AssetClass`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    /// Base-currency amount in smallest units.
    pub lovelace: u64,
    /// Non-base asset balances.
    pub assets: BTreeMap<AssetClass, u128>,
}

impl Value {
    /// A value holding only base currency.
    #[must_use]
    pub fn lovelace(amount: u64) -> Self {
        Self {
            lovelace: amount,
            assets: BTreeMap::new(),
        }
    }

    /// Add an asset balance, accumulating if the class is already present.
    #[must_use]
    pub fn with_asset(mut self, asset: AssetClass, quantity: u128) -> Self {
        *self.assets.entry(asset).or_insert(0) += quantity;
        self
    }

    /// Quantity of the given asset class, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, asset: &AssetClass) -> u128 {
        self.assets.get(asset).copied().unwrap_or(0)
    }
}

/// An unspent holding: an opaque output reference plus its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utxo {
    /// Hash of the transaction that produced this output.
    pub tx_hash: TxHash,
    /// Index of the output within that transaction.
    pub output_index: u32,
    /// Balances attached to the output.
    pub value: Value,
}

/// Sum the quantity of one asset class across a holdings set.
///
/// Holdings without the class contribute zero; an empty set totals zero.
/// The fold is order-independent.
#[must_use]
pub fn asset_total(holdings: &[Utxo], asset: &AssetClass) -> u128 {
    holdings
        .iter()
        .fold(0u128, |total, utxo| total + utxo.value.quantity_of(asset))
}

/// A payment to build and submit: one output at the destination carrying an
/// inline datum, the minimum base amount, and an asset quantity.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Destination address.
    pub to: Address,
    /// Inline datum attached to the output.
    pub datum: PlutusData,
    /// Base-currency amount, fixed at [`MIN_LOVELACE`].
    pub lovelace: u64,
    /// Asset class being paid.
    pub asset: AssetClass,
    /// Requested asset quantity.
    pub quantity: u128,
}

impl PaymentRequest {
    /// Create a payment request with the fixed minimum base amount.
    #[must_use]
    pub fn new(to: Address, datum: PlutusData, asset: AssetClass, quantity: u128) -> Self {
        Self {
            to,
            datum,
            lovelace: MIN_LOVELACE,
            asset,
            quantity,
        }
    }
}

/// A finalized but unsigned transaction, opaque to the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTx {
    /// Serialized transaction body as produced by the chain client.
    pub bytes: Vec<u8>,
}

/// A fully signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTx {
    /// Serialized signed transaction.
    pub bytes: Vec<u8>,
}

/// A signed message produced by an agent for challenge-response login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    /// Signature bytes.
    pub signature: Vec<u8>,
    /// Public key material the signature verifies against.
    pub key: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rad() -> AssetClass {
        AssetClass::new(vec![0xAB; 28], b"RAD".to_vec())
    }

    fn rad_lookalike() -> AssetClass {
        // Same name, different policy.
        AssetClass::new(vec![0xCD; 28], b"RAD".to_vec())
    }

    #[test]
    fn test_unit_round_trip() {
        let asset = rad();
        let unit = asset.unit();
        assert_eq!(unit.len(), 56 + 6);
        assert_eq!(AssetClass::from_unit(&unit), Some(asset));
    }

    #[test]
    fn test_unit_rejects_lovelace_and_short_units() {
        assert_eq!(AssetClass::from_unit(LOVELACE_UNIT), None);
        assert_eq!(AssetClass::from_unit("abcdef"), None);
    }

    #[test]
    fn test_from_hex_validates_policy_length() {
        assert!(AssetClass::from_hex("abcd", "524144").is_err());
        let asset = AssetClass::from_hex(&"ab".repeat(28), "524144").unwrap();
        assert_eq!(asset.asset_name(), b"RAD");
    }

    #[test]
    fn test_total_empty_holdings_is_zero() {
        assert_eq!(asset_total(&[], &rad()), 0);
    }

    #[test]
    fn test_total_without_target_asset_is_zero() {
        let holdings = vec![
            Utxo {
                tx_hash: TxHash("aa".into()),
                output_index: 0,
                value: Value::lovelace(2_000_000),
            },
            Utxo {
                tx_hash: TxHash("bb".into()),
                output_index: 1,
                value: Value::lovelace(1_000_000).with_asset(rad_lookalike(), 500),
            },
        ];
        // The lookalike has a distinct policy id and must contribute nothing.
        assert_eq!(asset_total(&holdings, &rad()), 0);
    }

    #[test]
    fn test_total_is_order_independent() {
        let a = Utxo {
            tx_hash: TxHash("aa".into()),
            output_index: 0,
            value: Value::lovelace(1).with_asset(rad(), 300),
        };
        let b = Utxo {
            tx_hash: TxHash("bb".into()),
            output_index: 0,
            value: Value::lovelace(2),
        };
        let c = Utxo {
            tx_hash: TxHash("cc".into()),
            output_index: 2,
            value: Value::lovelace(3).with_asset(rad(), 200),
        };

        let forward = vec![a.clone(), b.clone(), c.clone()];
        let reversed = vec![c, b, a];
        assert_eq!(asset_total(&forward, &rad()), 500);
        assert_eq!(asset_total(&forward, &rad()), asset_total(&reversed, &rad()));
    }

    #[test]
    fn test_payment_request_fixes_min_lovelace() {
        let request = PaymentRequest::new(
            Address::from("addr_test1qz"),
            PlutusData::text("darcshub"),
            rad(),
            100,
        );
        assert_eq!(request.lovelace, MIN_LOVELACE);
        assert_eq!(request.quantity, 100);
    }
}
