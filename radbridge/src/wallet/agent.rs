//! The signing-agent seam.

use async_trait::async_trait;

use crate::chain::{Address, SignedMessage, SignedTx, UnsignedTx};
use crate::error::AgentResult;

/// Trait for wallet-style signing agents.
///
/// An agent custodies keys and prompts its user for consent; the bridge
/// never sees key material. A user refusal surfaces as
/// [`crate::error::AgentError::Declined`]; agents that only relay free text
/// should use [`crate::error::AgentError::Other`] with the text unchanged
/// so the outcome classifier can still recognize it.
#[async_trait]
pub trait WalletAgent: Send + Sync {
    /// Get the agent's current receiving address.
    async fn address(&self) -> AgentResult<Address>;

    /// Sign an arbitrary payload bound to an address.
    async fn sign_message(&self, address: &Address, payload: &[u8]) -> AgentResult<SignedMessage>;

    /// Sign a finalized transaction.
    async fn sign_tx(&self, tx: &UnsignedTx) -> AgentResult<SignedTx>;
}
