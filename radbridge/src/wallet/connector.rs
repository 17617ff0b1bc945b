//! Agent identifiers, registration, and the connect operation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::agent::WalletAgent;
use crate::error::{AgentError, AgentResult};

/// The finite set of supported signing agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedAgent {
    /// Nami browser wallet.
    Nami,
    /// Eternl browser wallet.
    Eternl,
    /// Flint browser wallet.
    Flint,
    /// GeroWallet.
    Gero,
    /// Typhon wallet.
    Typhon,
    /// Yoroi wallet.
    Yoroi,
    /// Lace wallet.
    Lace,
}

impl SupportedAgent {
    /// All supported agent identifiers.
    pub const ALL: [Self; 7] = [
        Self::Nami,
        Self::Eternl,
        Self::Flint,
        Self::Gero,
        Self::Typhon,
        Self::Yoroi,
        Self::Lace,
    ];

    /// The identifier string used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nami => "nami",
            Self::Eternl => "eternl",
            Self::Flint => "flint",
            Self::Gero => "gero",
            Self::Typhon => "typhon",
            Self::Yoroi => "yoroi",
            Self::Lace => "lace",
        }
    }
}

impl fmt::Display for SupportedAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedAgent {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|agent| agent.as_str() == s)
            .ok_or_else(|| AgentError::Unsupported(s.to_string()))
    }
}

/// A connected agent: the acknowledged identifier plus the live handle.
///
/// Exactly one of these is bound at a time; a later successful connect
/// replaces the binding and invalidates this one.
#[derive(Clone)]
pub struct ConnectedAgent {
    /// The identifier the caller connected with, echoed back on success.
    pub id: SupportedAgent,
    /// Handle to the underlying agent.
    pub handle: Arc<dyn WalletAgent>,
}

impl fmt::Debug for ConnectedAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectedAgent")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Registry of agent implementations supplied by the embedding host.
///
/// Capability discovery and negotiation happen outside the bridge; the host
/// registers whatever agents it found, and `connect` hands out handles.
#[derive(Default)]
pub struct AgentDirectory {
    agents: RwLock<HashMap<SupportedAgent, Arc<dyn WalletAgent>>>,
}

impl fmt::Debug for AgentDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentDirectory").finish_non_exhaustive()
    }
}

impl AgentDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent implementation under its identifier.
    ///
    /// Registering the same identifier again replaces the previous handle.
    pub async fn register(&self, id: SupportedAgent, agent: Arc<dyn WalletAgent>) {
        self.agents.write().await.insert(id, agent);
        info!(agent = %id, "agent registered");
    }

    /// Identifiers with a registered implementation.
    pub async fn installed(&self) -> Vec<SupportedAgent> {
        let agents = self.agents.read().await;
        Self::ordered_ids(&agents)
    }

    /// Connect to an agent by its wire identifier.
    pub async fn connect(&self, id: &str) -> AgentResult<ConnectedAgent> {
        let id: SupportedAgent = id.parse()?;
        let agents = self.agents.read().await;
        let handle = agents
            .get(&id)
            .cloned()
            .ok_or_else(|| AgentError::NotInstalled(id.to_string()))?;
        debug!(agent = %id, "agent connected");
        Ok(ConnectedAgent { id, handle })
    }

    fn ordered_ids(agents: &HashMap<SupportedAgent, Arc<dyn WalletAgent>>) -> Vec<SupportedAgent> {
        SupportedAgent::ALL
            .into_iter()
            .filter(|id| agents.contains_key(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{Address, SignedMessage, SignedTx, UnsignedTx};
    use async_trait::async_trait;

    struct NullAgent;

    #[async_trait]
    impl WalletAgent for NullAgent {
        async fn address(&self) -> AgentResult<Address> {
            Ok(Address::from("addr_test1null"))
        }

        async fn sign_message(
            &self,
            _address: &Address,
            _payload: &[u8],
        ) -> AgentResult<SignedMessage> {
            Err(AgentError::Declined)
        }

        async fn sign_tx(&self, _tx: &UnsignedTx) -> AgentResult<SignedTx> {
            Err(AgentError::Declined)
        }
    }

    #[test]
    fn test_id_round_trip() {
        for id in SupportedAgent::ALL {
            assert_eq!(id.as_str().parse::<SupportedAgent>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_id_is_unsupported() {
        let err = "metamask".parse::<SupportedAgent>().unwrap_err();
        assert!(matches!(err, AgentError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_connect_registered_agent() {
        let directory = AgentDirectory::new();
        directory
            .register(SupportedAgent::Nami, Arc::new(NullAgent))
            .await;

        let connected = directory.connect("nami").await.unwrap();
        assert_eq!(connected.id, SupportedAgent::Nami);
        assert_eq!(directory.installed().await, vec![SupportedAgent::Nami]);
    }

    #[tokio::test]
    async fn test_connect_supported_but_absent_agent() {
        let directory = AgentDirectory::new();
        let err = directory.connect("eternl").await.unwrap_err();
        assert!(matches!(err, AgentError::NotInstalled(_)));
    }
}
