use std::collections::BTreeMap;

use ethers::types::Address;
use serde::{Deserialize, Serialize};
use warpstack_cli_types::{DomainId, TokenMetadata, TokenStandard};

use crate::{traits::FileConfigTrait, validation::ConfigValidationError};

/// A directed router edge: the router address another chain should have
/// enrolled for a given destination domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRouterEntry {
    pub address: String,
}

/// Declared intent for one chain's router (the target side of the
/// reconciliation). Authored by hand or by the deploy wizard; never mutated
/// by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRouterConfig {
    #[serde(rename = "type")]
    pub standard: TokenStandard,
    pub owner: Address,
    /// Collateral token address; required for collateral-like standards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,
    /// Opaque ISM config, passed through to the deployer untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interchain_security_module: Option<serde_json::Value>,
    /// Opaque hook config, passed through to the deployer untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<serde_json::Value>,
    /// Explicit remote-router overrides, keyed by destination domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_routers: Option<BTreeMap<DomainId, RemoteRouterEntry>>,
    /// Explicit destination-gas overrides, keyed by destination domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_gas: Option<BTreeMap<DomainId, String>>,
    /// Gas override applied to every destination that has no explicit entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
}

impl TokenRouterConfig {
    /// Explicit metadata carried by this config, if complete enough to
    /// anchor a route (decimals is the hard requirement).
    pub fn explicit_metadata(&self) -> Option<TokenMetadata> {
        let decimals = self.decimals?;
        Some(TokenMetadata {
            name: self.name.clone()?,
            symbol: self.symbol.clone()?,
            decimals,
            total_supply: self.total_supply.clone(),
        })
    }

    /// Overwrites this config's metadata fields with the route-wide derived
    /// tuple. Extensions inherit metadata; they never redefine it.
    pub fn apply_metadata(&mut self, metadata: &TokenMetadata) {
        self.name = Some(metadata.name.clone());
        self.symbol = Some(metadata.symbol.clone());
        self.decimals = Some(metadata.decimals);
        self.total_supply = metadata.total_supply.clone();
    }
}

/// The target topology: one router intent per chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarpDeployConfig {
    pub chains: BTreeMap<String, TokenRouterConfig>,
}

impl WarpDeployConfig {
    /// Schema validation, run before the engine ever sees the data.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.chains.is_empty() {
            return Err(ConfigValidationError::new(
                "<root>",
                "deploy config must declare at least one chain",
            ));
        }
        for (chain, config) in &self.chains {
            if config.owner == Address::zero() {
                return Err(ConfigValidationError::new(
                    format!("{chain}.owner"),
                    "owner must not be the zero address",
                ));
            }
            match config.standard {
                TokenStandard::Collateral | TokenStandard::CollateralVault => {
                    if config.token.is_none() {
                        return Err(ConfigValidationError::new(
                            format!("{chain}.token"),
                            format!(
                                "{} routers require a collateral token address",
                                config.standard
                            ),
                        ));
                    }
                }
                TokenStandard::Native => {}
                TokenStandard::Synthetic => {
                    if config.token.is_some() {
                        return Err(ConfigValidationError::new(
                            format!("{chain}.token"),
                            "synthetic routers must not declare a collateral token",
                        ));
                    }
                }
            }
            if let Some(decimals) = config.decimals {
                if decimals > 77 {
                    return Err(ConfigValidationError::new(
                        format!("{chain}.decimals"),
                        "decimals out of range",
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn chain_names(&self) -> Vec<String> {
        self.chains.keys().cloned().collect()
    }

    pub fn get(&self, chain: &str) -> Option<&TokenRouterConfig> {
        self.chains.get(chain)
    }
}

impl FileConfigTrait for WarpDeployConfig {}
