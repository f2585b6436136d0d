use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use warpstack_cli_types::TokenStandard;

use crate::{consts::CONNECTION_SEPARATOR, traits::FileConfigTrait};

/// An edge to another router in the same route, encoded as
/// `<chain>|<router address>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConnection {
    pub token: String,
}

impl TokenConnection {
    pub fn new(chain_name: &str, address: &str) -> Self {
        Self {
            token: format!("{chain_name}{CONNECTION_SEPARATOR}{address}"),
        }
    }

    pub fn chain_name(&self) -> Option<&str> {
        self.token.split(CONNECTION_SEPARATOR).next()
    }
}

/// The observed state of one chain's router, derived from chain reads.
/// Refreshed on every run; never cached across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarpCoreToken {
    pub chain_name: String,
    pub standard: TokenStandard,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Deployed router address (or denom on non-EVM chains).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_or_denom: Option<String>,
    /// Underlying collateral token, for collateral-like routers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collateral_address_or_denom: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<TokenConnection>,
}

/// The observed topology of a whole route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarpCoreConfig {
    pub tokens: Vec<WarpCoreToken>,
}

impl WarpCoreConfig {
    pub fn chain_names(&self) -> BTreeSet<String> {
        self.tokens
            .iter()
            .map(|token| token.chain_name.clone())
            .collect()
    }

    /// Deployed router address per chain. Tokens without an address (never
    /// produced by a successful deployment) are skipped.
    pub fn router_addresses(&self) -> BTreeMap<String, String> {
        self.tokens
            .iter()
            .filter_map(|token| {
                token
                    .address_or_denom
                    .as_ref()
                    .map(|addr| (token.chain_name.clone(), addr.clone()))
            })
            .collect()
    }

    pub fn token_for_chain(&self, chain: &str) -> Option<&WarpCoreToken> {
        self.tokens.iter().find(|token| token.chain_name == chain)
    }

    /// Rebuilds full-mesh connections: every token links to every other
    /// token in the route. Called after the token list changes.
    pub fn connect_all(&mut self) {
        let endpoints: Vec<(String, String)> = self
            .tokens
            .iter()
            .filter_map(|token| {
                token
                    .address_or_denom
                    .as_ref()
                    .map(|addr| (token.chain_name.clone(), addr.clone()))
            })
            .collect();

        for token in &mut self.tokens {
            token.connections = endpoints
                .iter()
                .filter(|(chain, _)| *chain != token.chain_name)
                .map(|(chain, addr)| TokenConnection::new(chain, addr))
                .collect();
        }
    }
}

impl FileConfigTrait for WarpCoreConfig {}
