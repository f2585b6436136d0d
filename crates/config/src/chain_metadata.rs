use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;
use warpstack_cli_types::{DomainId, TokenMetadata};
use xshell::Shell;

use crate::traits::{FileConfigTrait, ReadConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeToken {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Static metadata for one chain: identifiers and connection info.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainMetadata {
    pub domain_id: DomainId,
    pub chain_id: u64,
    pub rpc_url: Url,
    /// Core mailbox contract routers attach to; required when deploying
    /// new routers on this chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_token: Option<NativeToken>,
}

/// Chain registry loaded once at startup and immutable thereafter. The
/// reconciliation engine only reads from it; route state never flows back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainMetadataStore {
    chains: BTreeMap<String, ChainMetadata>,
}

impl ChainMetadataStore {
    pub fn load(shell: &Shell, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::read(shell, path)
    }

    pub fn get(&self, chain: &str) -> anyhow::Result<&ChainMetadata> {
        self.chains
            .get(chain)
            .with_context(|| format!("Chain `{chain}` not found in chain metadata registry"))
    }

    pub fn chain_name_by_domain(&self, domain: DomainId) -> anyhow::Result<&str> {
        self.chains
            .iter()
            .find(|(_, meta)| meta.domain_id == domain)
            .map(|(name, _)| name.as_str())
            .with_context(|| format!("No chain with domain id {domain} in metadata registry"))
    }

    pub fn chain_names(&self) -> Vec<String> {
        self.chains.keys().cloned().collect()
    }

    pub fn native_token_metadata(&self, chain: &str) -> Option<TokenMetadata> {
        let native = self.chains.get(chain)?.native_token.as_ref()?;
        Some(TokenMetadata::new(
            native.name.clone(),
            native.symbol.clone(),
            native.decimals,
        ))
    }

}

impl FileConfigTrait for ChainMetadataStore {}
