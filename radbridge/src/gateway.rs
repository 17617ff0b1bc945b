//! Gateway service running the bridge event loop.
//!
//! The gateway owns the resolved network values, the agent directory, the
//! chain client, and the ledger provider, and processes bus requests one at
//! a time. Sequential dispatch is deliberate: it serializes privileged
//! operations (sign, submit) against the single agent binding, so two
//! in-flight signing prompts cannot interleave.
//!
//! Every inbound request produces exactly one terminal outbound event;
//! failures are converted at this boundary and never propagate past it.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::bus::EventBus;
use crate::chain::{Chain, PaymentRequest, PlutusData, TxHash, asset_total};
use crate::config::NetworkValues;
use crate::error::{AgentError, Result};
use crate::events::{BridgeEvent, BridgeRequest};
use crate::outcome::{SubmitOutcome, classify};
use crate::providers::{ConfirmationPolicy, LedgerProvider, await_confirmation};
use crate::wallet::{AgentDirectory, ConnectedAgent};

/// Fixed challenge payload signed during login.
///
/// Not bound to a nonce or timestamp; a captured signature would verify
/// again on replay. Kept as-is rather than silently hardened.
pub const LOGIN_PAYLOAD: &[u8] = b"darcs hub login";

/// Values handed to the UI when it boots.
#[derive(Debug, Clone, Serialize)]
pub struct StartupFlags {
    /// Wire identifiers of agents with a registered implementation.
    #[serde(rename = "walletsInstalledAndEnabledStrings")]
    pub wallets_installed_and_enabled: Vec<String>,
    /// Subdomain prefix of the hub the UI should link against.
    #[serde(rename = "networkSubdomain")]
    pub network_subdomain: String,
}

/// Gateway service that runs the bridge.
pub struct BridgeGateway {
    values: NetworkValues,
    bus: EventBus,
    directory: AgentDirectory,
    chain: Arc<dyn Chain>,
    provider: Arc<dyn LedgerProvider>,
    confirmation: ConfirmationPolicy,
    agent: RwLock<Option<ConnectedAgent>>,
}

impl fmt::Debug for BridgeGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeGateway")
            .field("values", &self.values)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

impl BridgeGateway {
    /// Create a builder.
    #[must_use]
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// Get a reference to the event bus.
    #[must_use]
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Get a reference to the agent directory.
    #[must_use]
    pub const fn directory(&self) -> &AgentDirectory {
        &self.directory
    }

    /// Get the resolved network values.
    #[must_use]
    pub const fn values(&self) -> &NetworkValues {
        &self.values
    }

    /// Flags for the UI at boot: installed agents and the hub subdomain.
    pub async fn startup_flags(&self) -> StartupFlags {
        StartupFlags {
            wallets_installed_and_enabled: self
                .directory
                .installed()
                .await
                .iter()
                .map(ToString::to_string)
                .collect(),
            network_subdomain: self.values.subdomain.clone(),
        }
    }

    /// Run the gateway loop until every request handle is dropped.
    pub async fn run(&self) -> Result<()> {
        info!(
            network = %self.values.network,
            chain = self.chain.name(),
            provider = self.provider.name(),
            "bridge gateway started"
        );

        while let Some(request) = self.bus.consume_request().await {
            self.dispatch(request).await;
        }

        info!("bridge gateway stopped");
        Ok(())
    }

    /// Handle one request and publish its single terminal event.
    async fn dispatch(&self, request: BridgeRequest) {
        let event = match request {
            BridgeRequest::ConnectWallet(id) => self.handle_connect(&id).await,
            BridgeRequest::Login => match self.login().await {
                Ok(verified) => BridgeEvent::Login(verified),
                Err(e) => {
                    warn!(error = %e, "login failed");
                    BridgeEvent::Login(false)
                }
            },
            BridgeRequest::QueryBalance => match self.asset_balance().await {
                Ok(total) => BridgeEvent::AssetBalance(total),
                // Aggregation failures share the connection-failure
                // sentinel; the UI treats both as "reconnect your wallet".
                Err(e) => {
                    warn!(error = %e, "balance query failed");
                    BridgeEvent::connection_err()
                }
            },
            BridgeRequest::SubmitPayment { address, quantity } => {
                match self.submit_payment(&address, quantity).await {
                    Ok(hash) => BridgeEvent::PaymentOutcome(SubmitOutcome::Submitted(hash)),
                    Err(e) => {
                        warn!(error = %e, "payment failed");
                        BridgeEvent::PaymentOutcome(classify(&e))
                    }
                }
            }
        };
        self.bus.publish_event(event).await;
    }

    /// Connect an agent and bind it, replacing any previous binding.
    async fn handle_connect(&self, id: &str) -> BridgeEvent {
        match self.directory.connect(id).await {
            Ok(connected) => {
                info!(agent = %connected.id, "wallet connected");
                if let Some(previous) = self.agent.write().await.replace(connected) {
                    debug!(agent = %previous.id, "previous binding replaced");
                }
                BridgeEvent::WalletConnection(id.to_string())
            }
            Err(e) => {
                warn!(agent = id, error = %e, "wallet connection failed");
                BridgeEvent::connection_err()
            }
        }
    }

    /// Challenge-response login: sign the fixed payload, verify the result.
    async fn login(&self) -> Result<bool> {
        let agent = self.bound_agent().await?;
        let address = agent.handle.address().await?;
        let signed = agent.handle.sign_message(&address, LOGIN_PAYLOAD).await?;
        let verified = self.chain.verify_message(&address, LOGIN_PAYLOAD, &signed);
        debug!(agent = %agent.id, verified, "login challenge verified");
        Ok(verified)
    }

    /// Aggregate the configured asset across the agent's current holdings.
    async fn asset_balance(&self) -> Result<u128> {
        let agent = self.bound_agent().await?;
        let address = agent.handle.address().await?;
        let holdings = self.provider.utxos_at(&address).await?;
        let total = asset_total(&holdings, &self.values.asset);
        debug!(address = %address, total, "asset balance aggregated");
        Ok(total)
    }

    /// Build, sign, submit, and await confirmation of a payment.
    async fn submit_payment(&self, datum_text: &str, quantity: u64) -> Result<TxHash> {
        let agent = self.bound_agent().await?;
        let change_address = agent.handle.address().await?;
        let inputs = self.provider.utxos_at(&change_address).await?;

        let request = PaymentRequest::new(
            self.values.prize_address.clone(),
            PlutusData::text(datum_text),
            self.values.asset.clone(),
            u128::from(quantity),
        );

        let unsigned = self
            .chain
            .build_payment(&inputs, &change_address, &request)
            .await?;
        let signed = agent.handle.sign_tx(&unsigned).await?;

        // Submission is the durability point; the confirmation wait below
        // is purely observational.
        let hash = self.provider.submit(&signed).await?;
        info!(tx = %hash, "payment submitted, awaiting confirmation");
        await_confirmation(self.provider.as_ref(), &hash, &self.confirmation).await?;
        Ok(hash)
    }

    /// The currently bound agent, cloned out of the binding slot.
    async fn bound_agent(&self) -> Result<ConnectedAgent> {
        Ok(self
            .agent
            .read()
            .await
            .clone()
            .ok_or(AgentError::NotConnected)?)
    }
}

/// Builder for creating a [`BridgeGateway`].
#[derive(Default)]
pub struct GatewayBuilder {
    values: Option<NetworkValues>,
    chain: Option<Arc<dyn Chain>>,
    provider: Option<Arc<dyn LedgerProvider>>,
    confirmation: ConfirmationPolicy,
    bus: Option<EventBus>,
}

impl fmt::Debug for GatewayBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayBuilder")
            .field("values", &self.values)
            .field("confirmation", &self.confirmation)
            .finish_non_exhaustive()
    }
}

impl GatewayBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolved network values.
    #[must_use]
    pub fn values(mut self, values: NetworkValues) -> Self {
        self.values = Some(values);
        self
    }

    /// Set the chain client.
    #[must_use]
    pub fn chain(mut self, chain: Arc<dyn Chain>) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Set the ledger provider.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LedgerProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the confirmation polling policy.
    #[must_use]
    pub const fn confirmation(mut self, policy: ConfirmationPolicy) -> Self {
        self.confirmation = policy;
        self
    }

    /// Use an existing event bus instead of a fresh one.
    #[must_use]
    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Build the gateway.
    ///
    /// # Panics
    ///
    /// Panics if network values, chain client, or ledger provider are not
    /// set.
    #[must_use]
    pub fn build(self) -> BridgeGateway {
        BridgeGateway {
            values: self.values.expect("network values are required"),
            bus: self.bus.unwrap_or_default(),
            directory: AgentDirectory::new(),
            chain: self.chain.expect("chain client is required"),
            provider: self.provider.expect("ledger provider is required"),
            confirmation: self.confirmation,
            agent: RwLock::new(None),
        }
    }
}
