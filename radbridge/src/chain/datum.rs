//! Structured on-chain data attached to payment outputs.

/// A structured value attachable to a transaction output as an inline datum.
///
/// Only the shapes the bridge actually emits are modeled: a
/// constructor-tagged record and a raw byte string. Wire serialization is
/// the chain client's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlutusData {
    /// A constructor application: tag plus ordered fields.
    Constr {
        /// Constructor tag.
        tag: u64,
        /// Constructor fields, in order.
        fields: Vec<PlutusData>,
    },
    /// A raw byte string.
    Bytes(Vec<u8>),
}

impl PlutusData {
    /// Encode free text as the bridge's payment datum: constructor zero
    /// with a single byte-string field holding the UTF-8 bytes.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Constr {
            tag: 0,
            fields: vec![Self::Bytes(value.as_bytes().to_vec())],
        }
    }
}
