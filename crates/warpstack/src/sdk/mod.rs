use std::collections::BTreeMap;

use async_trait::async_trait;
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use warpstack_cli_config::{RemoteRouterEntry, TokenRouterConfig, WarpCoreConfig};
use warpstack_cli_types::{DomainId, TokenMetadata};

mod evm_provider;
mod evm_updater;
mod forge_deployer;
mod registry_persister;

pub use evm_provider::EvmChainProvider;
pub use evm_updater::EvmRouterUpdater;
pub use forge_deployer::ForgeRouterDeployer;
pub use registry_persister::RegistryRoutePersister;

/// A transaction computed by the diff engine, not yet submitted. Grouped by
/// numeric chain id before submission; chain names are resolved only at
/// report time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransaction {
    pub chain_id: u64,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// Outcome of one submitted transaction, recorded in receipt artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedTransaction {
    pub tx_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

/// One chain's fully reconciled target: the declared config plus the
/// computed remote-router and destination-gas maps the chain should
/// converge to.
#[derive(Debug, Clone)]
pub struct MaterializedRouterConfig {
    pub config: TokenRouterConfig,
    pub router_address: String,
    pub remote_routers: BTreeMap<DomainId, RemoteRouterEntry>,
    pub destination_gas: BTreeMap<DomainId, String>,
}

/// Narrow seam over the chain-client layer: identifier resolution, token
/// metadata reads, and ordered batch submission.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Chains reachable from `chain`, per the provider's chain registry.
    fn remote_chains(&self, chain: &str) -> anyhow::Result<Vec<String>>;
    fn domain_id(&self, chain: &str) -> anyhow::Result<DomainId>;
    fn chain_id(&self, chain: &str) -> anyhow::Result<u64>;
    fn chain_name_by_id(&self, chain_id: u64) -> anyhow::Result<String>;
    /// Address of the signer configured for `chain`.
    fn signer_address(&self, chain: &str) -> anyhow::Result<Address>;
    /// Metadata of the chain's native gas token, when known.
    fn native_token(&self, chain: &str) -> Option<TokenMetadata>;
    async fn token_metadata(&self, chain: &str, token: Address) -> anyhow::Result<TokenMetadata>;
    /// Submits a batch for one chain, preserving order within the batch.
    async fn send_transactions(
        &self,
        chain_id: u64,
        txs: &[PendingTransaction],
    ) -> anyhow::Result<Vec<SubmittedTransaction>>;
}

/// Seam over contract deployment. Opaque beyond returning a router address
/// per newly deployed chain.
#[async_trait]
pub trait RouterDeployer: Send + Sync {
    async fn deploy(
        &self,
        configs: &BTreeMap<String, TokenRouterConfig>,
    ) -> anyhow::Result<BTreeMap<String, String>>;
}

/// Seam over the per-chain update-transaction builder: given one chain's
/// materialized target, returns the minimal transaction list required to
/// converge it. Empty when the chain already matches.
#[async_trait]
pub trait RouterUpdater: Send + Sync {
    async fn update(
        &self,
        chain: &str,
        target: &MaterializedRouterConfig,
    ) -> anyhow::Result<Vec<PendingTransaction>>;
}

/// Seam over the registry that persists the canonical route state.
pub trait RoutePersister: Send + Sync {
    fn persist(&self, config: &WarpCoreConfig) -> anyhow::Result<()>;
}
