//! Signing-agent abstractions.
//!
//! The bridge never holds keys. It talks to wallet-style agents through the
//! [`WalletAgent`] trait: fetch a receiving address, sign a login payload,
//! sign a finalized transaction. The [`AgentDirectory`] maps the finite set
//! of supported agent identifiers to host-registered implementations, and
//! `connect` binds one of them at a time.

mod agent;
mod connector;

pub use agent::WalletAgent;
pub use connector::{AgentDirectory, ConnectedAgent, SupportedAgent};
