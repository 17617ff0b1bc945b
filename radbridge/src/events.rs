//! Typed events for the UI-facing channel.
//!
//! Each inbound request has exactly one outbound response event. Wire names
//! keep the port vocabulary the embedding UI already speaks, so a serialized
//! event round-trips against the existing front end unmodified.

use serde::{Deserialize, Serialize};

use crate::outcome::SubmitOutcome;

/// Sentinel carried by a wallet-connection event when anything about the
/// connect failed; the cause is not preserved past the bridge boundary.
pub const CONNECT_ERR: &str = "err";

/// An inbound request from the UI to the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload")]
pub enum BridgeRequest {
    /// Connect a signing agent by identifier.
    #[serde(rename = "connectWallet")]
    ConnectWallet(String),

    /// Run challenge-response login against the connected agent.
    #[serde(rename = "login")]
    Login,

    /// Query the connected agent's balance of the configured asset.
    #[serde(rename = "getAmountOfRad")]
    QueryBalance,

    /// Submit a payment carrying the given text as inline datum.
    #[serde(rename = "submitAddressAndSendRAD")]
    SubmitPayment {
        /// Free text embedded in the payment's inline datum.
        address: String,
        /// Requested asset quantity.
        quantity: u64,
    },
}

/// An outbound terminal event from the bridge to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "port", content = "payload")]
pub enum BridgeEvent {
    /// Connect acknowledgement: the agent identifier, or [`CONNECT_ERR`].
    #[serde(rename = "receiveWalletConnection")]
    WalletConnection(String),

    /// Login verification result.
    #[serde(rename = "receiveLogin")]
    Login(bool),

    /// Total balance of the configured asset.
    #[serde(rename = "receiveAmountOfRad")]
    AssetBalance(u128),

    /// Payment outcome: transaction hash, outcome code, or raw failure.
    #[serde(rename = "receiveSubmitAddressAndSendRAD")]
    PaymentOutcome(SubmitOutcome),
}

impl BridgeEvent {
    /// The connection-failure event.
    #[must_use]
    pub fn connection_err() -> Self {
        Self::WalletConnection(CONNECT_ERR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_names() {
        let json = serde_json::to_string(&BridgeRequest::ConnectWallet("nami".into())).unwrap();
        assert_eq!(json, r#"{"port":"connectWallet","payload":"nami"}"#);

        let json = serde_json::to_string(&BridgeRequest::SubmitPayment {
            address: "darcshub/repo".into(),
            quantity: 100,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"port":"submitAddressAndSendRAD","payload":{"address":"darcshub/repo","quantity":100}}"#
        );
    }

    #[test]
    fn test_request_round_trip() {
        let json = r#"{"port":"getAmountOfRad"}"#;
        let request: BridgeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, BridgeRequest::QueryBalance);
    }

    #[test]
    fn test_event_wire_names() {
        let json = serde_json::to_string(&BridgeEvent::AssetBalance(500)).unwrap();
        assert_eq!(json, r#"{"port":"receiveAmountOfRad","payload":500}"#);

        let json = serde_json::to_string(&BridgeEvent::connection_err()).unwrap();
        assert_eq!(json, r#"{"port":"receiveWalletConnection","payload":"err"}"#);
    }

    #[test]
    fn test_outcome_event_is_a_plain_string() {
        let event = BridgeEvent::PaymentOutcome(SubmitOutcome::Declined);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"port":"receiveSubmitAddressAndSendRAD","payload":"Declined"}"#
        );
    }
}
