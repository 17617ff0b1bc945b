//! Unified error types for the bridge.
//!
//! Every collaborator seam (signing agent, chain client, ledger provider,
//! event bus, configuration) gets its own error enum, and all of them
//! convert into the top-level [`BridgeError`]. Nothing is thrown past the
//! gateway boundary: handlers catch these and emit terminal outcome events.

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for bridge operations.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Signing agent error.
    #[error("agent: {0}")]
    Agent(#[from] AgentError),

    /// Chain client error.
    #[error("chain: {0}")]
    Chain(#[from] ChainError),

    /// Ledger provider error.
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    /// Event bus error.
    #[error("bus: {0}")]
    Bus(#[from] BusError),

    /// Configuration error.
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// Serialization error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal error.
    #[error("{0}")]
    Internal(String),
}

impl BridgeError {
    /// Create an internal error.
    #[inline]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

// ============================================================================
// Signing Agent Errors
// ============================================================================

/// Error type for signing-agent operations.
///
/// `Declined` renders as the canonical agent refusal text so that the
/// substring classifier stays compatible with agents that only surface
/// free-text errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AgentError {
    /// The identifier does not name a supported agent.
    #[error("unsupported agent: {0}")]
    Unsupported(String),

    /// The agent is supported but no implementation is registered.
    #[error("agent not installed: {0}")]
    NotInstalled(String),

    /// No agent is currently connected.
    #[error("no agent connected")]
    NotConnected,

    /// The user refused to sign.
    #[error("user declined sign tx")]
    Declined,

    /// Fetching the receiving address failed.
    #[error("address fetch failed: {0}")]
    Address(String),

    /// A signing call failed.
    #[error("sign failed: {0}")]
    Sign(String),

    /// Anything else the agent surfaced as free text.
    #[error("{0}")]
    Other(String),
}

/// Result type for signing-agent operations.
pub type AgentResult<T> = std::result::Result<T, AgentError>;

// ============================================================================
// Chain Client Errors
// ============================================================================

/// Error type for the chain client (transaction construction, verification).
///
/// The budget and input-selection variants render as the canonical texts the
/// underlying tooling emits, keeping the classifier's substring fallback and
/// the typed path in agreement.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainError {
    /// The wallet cannot cover outputs plus fees.
    #[error("Over budget")]
    OverBudget,

    /// Input selection ran out of candidate inputs.
    #[error("InputsExhaustedError")]
    InputsExhausted,

    /// Collateral input selection hit the protocol limit.
    #[error("Max collateral inputs reached")]
    MaxCollateralInputs,

    /// Transaction construction failed for another reason.
    #[error("build failed: {0}")]
    Build(String),

    /// Anything else the chain client surfaced as free text.
    #[error("{0}")]
    Other(String),
}

/// Result type for chain client operations.
pub type ChainResult<T> = std::result::Result<T, ChainError>;

// ============================================================================
// Ledger Provider Errors
// ============================================================================

/// Error type for ledger data provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP transport error.
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// A response could not be decoded into the expected shape.
    #[error("decode: {0}")]
    Decode(String),

    /// The submitted transaction was not observed within the allowed window.
    #[error("confirmation timed out after {waited_secs}s")]
    ConfirmationTimeout {
        /// Seconds waited before giving up.
        waited_secs: u64,
    },
}

impl ProviderError {
    /// Create a decode error.
    #[inline]
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

/// Result type for ledger provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

// ============================================================================
// Event Bus Errors
// ============================================================================

/// Error type for event bus operations.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// Failed to send a request: the consumer side is gone.
    #[error("request channel closed")]
    RequestsClosed,

    /// Failed to publish an event: the broadcast side is gone.
    #[error("event channel closed")]
    EventsClosed,
}

/// Result type for event bus operations.
pub type BusResult<T> = std::result::Result<T, BusError>;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Error type for configuration resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Missing required value.
    #[error("missing: {0}")]
    Missing(String),

    /// Invalid value.
    #[error("invalid: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create a missing value error.
    #[inline]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Create an invalid value error.
    #[inline]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let agent_err = AgentError::NotConnected;
        let bridge_err: BridgeError = agent_err.into();
        assert!(matches!(bridge_err, BridgeError::Agent(_)));

        let chain_err = ChainError::OverBudget;
        let bridge_err: BridgeError = chain_err.into();
        assert!(matches!(bridge_err, BridgeError::Chain(_)));
    }

    #[test]
    fn test_canonical_display_texts() {
        assert_eq!(AgentError::Declined.to_string(), "user declined sign tx");
        assert_eq!(ChainError::OverBudget.to_string(), "Over budget");
        assert_eq!(
            ChainError::InputsExhausted.to_string(),
            "InputsExhaustedError"
        );
        assert_eq!(
            ChainError::MaxCollateralInputs.to_string(),
            "Max collateral inputs reached"
        );
    }
}
