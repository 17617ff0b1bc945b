//! Radbridge - event-channel bridge between a hub UI, wallet-style signing
//! agents, and a ledger data provider.
//!
//! The bridge exposes four asynchronous operations — connect, login, query
//! balance, submit payment — as request/response event pairs, and collapses
//! agent and ledger failures into a small closed set of outcome codes the
//! UI can branch on.
//!
//! # Architecture
//!
//! ```text
//! UI channel
//!   │  BridgeRequest ▼            ▲ BridgeEvent
//!   └── EventBus ──► BridgeGateway
//!                       ├── AgentDirectory ─► WalletAgent (sign)
//!                       ├── Chain            (build payment, verify)
//!                       └── LedgerProvider   (holdings, submit, confirm)
//! ```
//!
//! - **Events** ([`events`]) - Typed request/response pairs, wire-compatible
//!   with the existing UI port vocabulary
//! - **Bus** ([`bus`]) - Async queue in, broadcast out
//! - **Gateway** ([`gateway`]) - Sequential dispatch loop; one terminal
//!   event per request
//! - **Wallet** ([`wallet`]) - Signing-agent seam and connect/bind logic
//! - **Chain** ([`chain`]) - Ledger value types and the transaction
//!   construction/verification seam
//! - **Providers** ([`providers`]) - Ledger data access and confirmation
//!   polling
//! - **Outcome** ([`outcome`]) - Failure classification into stable codes
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use radbridge::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let values = NetworkValues::resolve(&BridgeSettings::from_env()?)?;
//!     let provider = BlockfrostClient::new(&values.endpoint, &values.project_id);
//!
//!     let gateway = BridgeGateway::builder()
//!         .values(values)
//!         .chain(my_chain_client)
//!         .provider(Arc::new(provider))
//!         .build();
//!
//!     gateway.directory().register(SupportedAgent::Nami, my_agent).await;
//!     gateway.run().await
//! }
//! ```
//!
//! # Logging
//!
//! The crate emits structured `tracing` events and never installs a
//! subscriber; initialize one in the embedding host
//! (`tracing_subscriber::fmt::init()` is enough).

// Core modules
pub mod bus;
pub mod chain;
pub mod config;
pub mod error;
pub mod events;
pub mod gateway;
pub mod outcome;
pub mod providers;
pub mod wallet;

/// Prelude module for convenient imports.
pub mod prelude {
    // Error types (centralized)
    pub use crate::error::{
        AgentError, AgentResult, BridgeError, BusError, BusResult, ChainError, ChainResult,
        ConfigError, ConfigResult, ProviderError, ProviderResult, Result,
    };

    // Bus
    pub use crate::bus::{BusStats, EventBus, RequestHandle};

    // Chain
    pub use crate::chain::{
        Address, AssetClass, Chain, PaymentRequest, PlutusData, SignedMessage, SignedTx, TxHash,
        UnsignedTx, Utxo, Value, asset_total, LOVELACE_UNIT, MIN_LOVELACE,
    };

    // Config
    pub use crate::config::{BridgeSettings, NetworkSelector, NetworkValues};

    // Events
    pub use crate::events::{BridgeEvent, BridgeRequest, CONNECT_ERR};

    // Gateway
    pub use crate::gateway::{BridgeGateway, GatewayBuilder, StartupFlags, LOGIN_PAYLOAD};

    // Outcome
    pub use crate::outcome::{SubmitOutcome, classify, classify_message};

    // Providers
    pub use crate::providers::{
        BlockfrostClient, ConfirmationPolicy, LedgerProvider, await_confirmation,
        BLOCKFROST_MAINNET_URL, BLOCKFROST_PREVIEW_URL,
    };

    // Wallet
    pub use crate::wallet::{AgentDirectory, ConnectedAgent, SupportedAgent, WalletAgent};
}
