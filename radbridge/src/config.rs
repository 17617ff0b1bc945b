//! Startup configuration: network selection and resolved values.
//!
//! A [`NetworkSelector`] plus a handful of settings resolve once, at
//! process start, into immutable [`NetworkValues`]. Nothing here is
//! re-read or mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chain::{Address, AssetClass};
use crate::error::{ConfigError, ConfigResult};
use crate::providers::{BLOCKFROST_MAINNET_URL, BLOCKFROST_PREVIEW_URL};

/// Hex identity of the default asset name (`"RAD"`).
const DEFAULT_ASSET_NAME_HEX: &str = "524144";

/// Deployment network selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkSelector {
    /// The main network.
    #[default]
    Mainnet,
    /// The preview test network.
    Preview,
}

impl NetworkSelector {
    /// The ledger provider endpoint for this network.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Mainnet => BLOCKFROST_MAINNET_URL,
            Self::Preview => BLOCKFROST_PREVIEW_URL,
        }
    }

    /// The hub subdomain prefix handed to the UI at startup.
    #[must_use]
    pub const fn subdomain(self) -> &'static str {
        match self {
            Self::Mainnet => "",
            Self::Preview => "preview.",
        }
    }
}

impl fmt::Display for NetworkSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => f.write_str("mainnet"),
            Self::Preview => f.write_str("preview"),
        }
    }
}

impl FromStr for NetworkSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("mainnet") {
            Ok(Self::Mainnet)
        } else if s.eq_ignore_ascii_case("preview") {
            Ok(Self::Preview)
        } else {
            Err(ConfigError::invalid(format!("unknown network: {s}")))
        }
    }
}

/// Raw startup settings, before resolution.
#[derive(Debug, Clone, Default)]
pub struct BridgeSettings {
    /// Which network to run against.
    pub network: NetworkSelector,
    /// Ledger provider credential.
    pub project_id: Option<String>,
    /// Destination address payments go to.
    pub prize_address: Option<String>,
    /// Hex policy id of the target asset.
    pub policy_id: Option<String>,
    /// Hex asset name of the target asset; defaults to `"RAD"`.
    pub asset_name: Option<String>,
}

impl BridgeSettings {
    /// Read settings from the environment.
    ///
    /// Variables: `RADBRIDGE_NETWORK`, `BLOCKFROST_PROJECT_ID`,
    /// `RADBRIDGE_PRIZE_ADDRESS`, `RADBRIDGE_POLICY_ID`,
    /// `RADBRIDGE_ASSET_NAME`. An unset network falls back to mainnet.
    pub fn from_env() -> ConfigResult<Self> {
        let network = match std::env::var("RADBRIDGE_NETWORK") {
            Ok(value) => value.parse()?,
            Err(_) => NetworkSelector::default(),
        };
        Ok(Self {
            network,
            project_id: std::env::var("BLOCKFROST_PROJECT_ID").ok(),
            prize_address: std::env::var("RADBRIDGE_PRIZE_ADDRESS").ok(),
            policy_id: std::env::var("RADBRIDGE_POLICY_ID").ok(),
            asset_name: std::env::var("RADBRIDGE_ASSET_NAME").ok(),
        })
    }
}

/// Immutable values resolved once at startup.
#[derive(Debug, Clone)]
pub struct NetworkValues {
    /// The selected network.
    pub network: NetworkSelector,
    /// Ledger provider endpoint URL.
    pub endpoint: String,
    /// Hub subdomain prefix for the UI.
    pub subdomain: String,
    /// Ledger provider credential.
    pub project_id: String,
    /// Destination address payments go to.
    pub prize_address: Address,
    /// The asset the bridge aggregates and pays.
    pub asset: AssetClass,
}

impl NetworkValues {
    /// Resolve settings into concrete values.
    pub fn resolve(settings: &BridgeSettings) -> ConfigResult<Self> {
        let project_id = settings
            .project_id
            .clone()
            .ok_or_else(|| ConfigError::missing("project id"))?;
        let prize_address = settings
            .prize_address
            .clone()
            .ok_or_else(|| ConfigError::missing("prize address"))?;
        let policy_id = settings
            .policy_id
            .as_deref()
            .ok_or_else(|| ConfigError::missing("asset policy id"))?;
        let asset_name = settings
            .asset_name
            .as_deref()
            .unwrap_or(DEFAULT_ASSET_NAME_HEX);

        let asset = AssetClass::from_hex(policy_id, asset_name).map_err(ConfigError::invalid)?;

        Ok(Self {
            network: settings.network,
            endpoint: settings.network.endpoint().to_string(),
            subdomain: settings.network.subdomain().to_string(),
            project_id,
            prize_address: Address(prize_address),
            asset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> BridgeSettings {
        BridgeSettings {
            network: NetworkSelector::Preview,
            project_id: Some("previewabc123".into()),
            prize_address: Some("addr_test1prize".into()),
            policy_id: Some("ab".repeat(28)),
            asset_name: None,
        }
    }

    #[test]
    fn test_selector_parse_matches_deploy_spelling() {
        assert_eq!("Mainnet".parse::<NetworkSelector>().unwrap(), NetworkSelector::Mainnet);
        assert_eq!("preview".parse::<NetworkSelector>().unwrap(), NetworkSelector::Preview);
        assert!("testnet".parse::<NetworkSelector>().is_err());
    }

    #[test]
    fn test_resolve_preview_values() {
        let values = NetworkValues::resolve(&settings()).unwrap();
        assert_eq!(values.endpoint, BLOCKFROST_PREVIEW_URL);
        assert_eq!(values.subdomain, "preview.");
        assert_eq!(values.asset.asset_name(), b"RAD");
    }

    #[test]
    fn test_resolve_requires_credential() {
        let mut incomplete = settings();
        incomplete.project_id = None;
        assert!(matches!(
            NetworkValues::resolve(&incomplete),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_policy() {
        let mut bad = settings();
        bad.policy_id = Some("xyz".into());
        assert!(matches!(
            NetworkValues::resolve(&bad),
            Err(ConfigError::Invalid(_))
        ));
    }
}
