//! Terminal outcome codes for payment submission, and the failure
//! classifier that produces them.
//!
//! The classifier prefers typed error variants and falls back to the fixed
//! substring taxonomy downstream UIs already branch on. The four patterns
//! and their priority order are a compatibility surface: do not reorder.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::chain::TxHash;
use crate::error::{AgentError, BridgeError, ChainError, ProviderError};

/// Substring patterns checked against stringified failures, first match
/// wins.
const PATTERNS: [(&str, fn() -> SubmitOutcome); 4] = [
    ("user declined sign tx", || SubmitOutcome::Declined),
    ("Over budget", || SubmitOutcome::OverBudget),
    ("InputsExhaustedError", || SubmitOutcome::InputsExhausted),
    ("Max collateral inputs reached", || {
        SubmitOutcome::MaxCollateralInputs
    }),
];

/// The terminal result of a payment submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The transaction was submitted and confirmed.
    Submitted(TxHash),
    /// The user refused to sign.
    Declined,
    /// The wallet cannot cover outputs plus fees.
    OverBudget,
    /// Input selection ran out of candidate inputs.
    InputsExhausted,
    /// Collateral input selection hit the protocol limit.
    MaxCollateralInputs,
    /// Submission succeeded but the ledger did not confirm in time.
    ConfirmationTimedOut,
    /// None of the known shapes matched; the raw failure text, unchanged.
    Unclassified(String),
}

impl SubmitOutcome {
    /// The string carried on the wire: the transaction hash on success, the
    /// outcome code name otherwise, or the raw failure text unchanged.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Submitted(hash) => &hash.0,
            Self::Declined => "Declined",
            Self::OverBudget => "OverBudget",
            Self::InputsExhausted => "InputsExhausted",
            Self::MaxCollateralInputs => "MaxCollateralInputs",
            Self::ConfirmationTimedOut => "ConfirmationTimedOut",
            Self::Unclassified(raw) => raw,
        }
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for SubmitOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

/// Classify a bridge failure into a terminal submission outcome.
///
/// Typed variants map directly; everything else goes through
/// [`classify_message`] on its rendered text.
#[must_use]
pub fn classify(error: &BridgeError) -> SubmitOutcome {
    match error {
        BridgeError::Agent(AgentError::Declined) => SubmitOutcome::Declined,
        BridgeError::Chain(ChainError::OverBudget) => SubmitOutcome::OverBudget,
        BridgeError::Chain(ChainError::InputsExhausted) => SubmitOutcome::InputsExhausted,
        BridgeError::Chain(ChainError::MaxCollateralInputs) => SubmitOutcome::MaxCollateralInputs,
        BridgeError::Provider(ProviderError::ConfirmationTimeout { .. }) => {
            SubmitOutcome::ConfirmationTimedOut
        }
        other => classify_message(&other.to_string()),
    }
}

/// Classify free failure text by the fixed substring taxonomy.
///
/// Patterns are tested in priority order and the first match wins; text
/// matching none of them passes through unclassified and unchanged.
#[must_use]
pub fn classify_message(message: &str) -> SubmitOutcome {
    for (pattern, outcome) in PATTERNS {
        if message.contains(pattern) {
            return outcome();
        }
    }
    SubmitOutcome::Unclassified(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_pattern_matches() {
        assert_eq!(
            classify_message("user declined sign tx: account 0"),
            SubmitOutcome::Declined
        );
        assert_eq!(
            classify_message("Uncaught: Over budget (fee 180000)"),
            SubmitOutcome::OverBudget
        );
        assert_eq!(
            classify_message("InputsExhaustedError at selection"),
            SubmitOutcome::InputsExhausted
        );
        assert_eq!(
            classify_message("Max collateral inputs reached (3)"),
            SubmitOutcome::MaxCollateralInputs
        );
    }

    #[test]
    fn test_priority_is_by_rule_not_position() {
        // "Over budget" appears first in the text; the declined rule still
        // wins because it is tested first.
        let text = "Over budget after user declined sign tx";
        assert_eq!(classify_message(text), SubmitOutcome::Declined);
    }

    #[test]
    fn test_unmatched_text_passes_through_unchanged() {
        let text = "ScriptFailure: evaluation budget exceeded";
        assert_eq!(
            classify_message(text),
            SubmitOutcome::Unclassified(text.to_string())
        );
    }

    #[test]
    fn test_typed_variants_short_circuit() {
        assert_eq!(
            classify(&BridgeError::Agent(AgentError::Declined)),
            SubmitOutcome::Declined
        );
        assert_eq!(
            classify(&BridgeError::Chain(ChainError::MaxCollateralInputs)),
            SubmitOutcome::MaxCollateralInputs
        );
        assert_eq!(
            classify(&BridgeError::Provider(ProviderError::ConfirmationTimeout {
                waited_secs: 180
            })),
            SubmitOutcome::ConfirmationTimedOut
        );
    }

    #[test]
    fn test_free_text_agent_error_still_classifies() {
        let err = BridgeError::Agent(AgentError::Other(
            "user declined sign tx: cancelled in popup".into(),
        ));
        assert_eq!(classify(&err), SubmitOutcome::Declined);
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(SubmitOutcome::Declined.as_wire(), "Declined");
        assert_eq!(
            SubmitOutcome::Submitted(TxHash("abc123".into())).as_wire(),
            "abc123"
        );
        let raw = SubmitOutcome::Unclassified("boom".into());
        assert_eq!(serde_json::to_string(&raw).unwrap(), "\"boom\"");
    }
}
