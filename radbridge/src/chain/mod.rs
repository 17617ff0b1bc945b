//! Chain client abstraction and ledger value types.
//!
//! The [`Chain`] trait is the seam behind which transaction construction
//! and cryptographic verification live. The bridge treats both as a trusted
//! black box: it hands over inputs, a change address, and a
//! [`PaymentRequest`], and gets back an opaque finalized transaction.

use async_trait::async_trait;

use crate::error::ChainResult;

pub mod datum;
pub mod types;

pub use datum::PlutusData;
pub use types::{
    Address, AssetClass, PaymentRequest, SignedMessage, SignedTx, TxHash, UnsignedTx, Utxo, Value,
    asset_total, LOVELACE_UNIT, MIN_LOVELACE,
};

/// Trait for chain clients.
///
/// Implementations own fee computation, input selection, serialization, and
/// signature verification. Budget and input-selection failures surface as
/// the corresponding [`crate::error::ChainError`] variants so the outcome
/// classifier can map them without string matching.
#[async_trait]
pub trait Chain: Send + Sync {
    /// Get the chain client name, for logs.
    fn name(&self) -> &'static str;

    /// Build and finalize an unsigned payment transaction.
    ///
    /// The transaction pays `request.to` one output carrying the inline
    /// datum, the base amount, and the asset quantity; fees and input
    /// selection draw on `inputs` with change to `change_address`. The
    /// requested quantity is not pre-validated against the available
    /// balance.
    async fn build_payment(
        &self,
        inputs: &[Utxo],
        change_address: &Address,
        request: &PaymentRequest,
    ) -> ChainResult<UnsignedTx>;

    /// Verify a signed message against an address and payload.
    fn verify_message(&self, address: &Address, payload: &[u8], signed: &SignedMessage) -> bool;
}
