//! Ledger data providers.
//!
//! A [`LedgerProvider`] answers the three data-plane questions the bridge
//! has for the ledger: what does an address hold, take this signed
//! transaction, and is that transaction visible yet. [`BlockfrostClient`]
//! is the HTTP implementation; tests use in-memory stand-ins.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::chain::{Address, SignedTx, TxHash, Utxo};
use crate::error::{ProviderError, ProviderResult};

mod blockfrost;

pub use blockfrost::{BlockfrostClient, BLOCKFROST_MAINNET_URL, BLOCKFROST_PREVIEW_URL};

/// Trait for ledger data providers.
#[async_trait]
pub trait LedgerProvider: Send + Sync {
    /// Get the provider name, for logs.
    fn name(&self) -> &'static str;

    /// Fetch the full current holdings set at an address.
    ///
    /// An address the ledger has never seen holds nothing; that is an empty
    /// vector, not an error.
    async fn utxos_at(&self, address: &Address) -> ProviderResult<Vec<Utxo>>;

    /// Submit a signed transaction and return its hash.
    ///
    /// Acceptance here is the single durability point: once this returns,
    /// the transaction exists regardless of what confirmation polling sees.
    async fn submit(&self, tx: &SignedTx) -> ProviderResult<TxHash>;

    /// Whether the ledger reports the transaction as recorded.
    async fn tx_confirmed(&self, hash: &TxHash) -> ProviderResult<bool>;
}

/// How the post-submission confirmation wait is paced and bounded.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationPolicy {
    /// Delay between confirmation checks.
    pub interval: Duration,
    /// Total time to wait before giving up.
    pub timeout: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(180),
        }
    }
}

/// Poll a provider until it reports the transaction as recorded.
///
/// Provider errors during polling are treated as transient and retried on
/// the next tick; only the policy timeout ends the wait, with
/// [`ProviderError::ConfirmationTimeout`].
pub async fn await_confirmation(
    provider: &dyn LedgerProvider,
    hash: &TxHash,
    policy: &ConfirmationPolicy,
) -> ProviderResult<()> {
    let started = Instant::now();
    let deadline = started + policy.timeout;

    loop {
        match provider.tx_confirmed(hash).await {
            Ok(true) => {
                debug!(tx = %hash, elapsed = ?started.elapsed(), "transaction confirmed");
                return Ok(());
            }
            Ok(false) => {}
            Err(e) => {
                warn!(tx = %hash, error = %e, "confirmation check failed, retrying");
            }
        }

        if Instant::now() + policy.interval > deadline {
            return Err(ProviderError::ConfirmationTimeout {
                waited_secs: started.elapsed().as_secs(),
            });
        }
        tokio::time::sleep(policy.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Confirms after a fixed number of checks; `usize::MAX` never confirms.
    struct CountingLedger {
        checks: AtomicUsize,
        confirm_after: usize,
    }

    #[async_trait]
    impl LedgerProvider for CountingLedger {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn utxos_at(&self, _address: &Address) -> ProviderResult<Vec<Utxo>> {
            Ok(Vec::new())
        }

        async fn submit(&self, _tx: &SignedTx) -> ProviderResult<TxHash> {
            Ok(TxHash("deadbeef".into()))
        }

        async fn tx_confirmed(&self, _hash: &TxHash) -> ProviderResult<bool> {
            let seen = self.checks.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(seen >= self.confirm_after)
        }
    }

    fn fast_policy() -> ConfirmationPolicy {
        ConfirmationPolicy {
            interval: Duration::from_millis(5),
            timeout: Duration::from_millis(100),
        }
    }

    #[tokio::test]
    async fn test_confirmation_after_a_few_polls() {
        let ledger = CountingLedger {
            checks: AtomicUsize::new(0),
            confirm_after: 3,
        };
        let hash = TxHash("aa".into());
        await_confirmation(&ledger, &hash, &fast_policy())
            .await
            .unwrap();
        assert_eq!(ledger.checks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_confirmation_times_out() {
        let ledger = CountingLedger {
            checks: AtomicUsize::new(0),
            confirm_after: usize::MAX,
        };
        let hash = TxHash("aa".into());
        let err = await_confirmation(&ledger, &hash, &fast_policy())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ConfirmationTimeout { .. }));
    }
}
