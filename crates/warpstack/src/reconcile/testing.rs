//! Shared in-memory collaborator doubles for the reconciliation tests.

use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;
use ethers::types::{Address, U256};
use warpstack_cli_config::{TokenRouterConfig, WarpCoreConfig};
use warpstack_cli_types::{DomainId, TokenMetadata, TokenStandard};

use crate::sdk::{
    ChainProvider, MaterializedRouterConfig, PendingTransaction, RouterDeployer, RouterUpdater,
    RoutePersister, SubmittedTransaction,
};

pub(crate) fn addr(n: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = n;
    Address::from(bytes)
}

pub(crate) fn router_config(standard: TokenStandard) -> TokenRouterConfig {
    TokenRouterConfig {
        standard,
        owner: addr(0xaa),
        token: standard.is_collateral_like().then(|| addr(0xbb)),
        name: None,
        symbol: None,
        decimals: None,
        total_supply: None,
        interchain_security_module: None,
        hook: None,
        remote_routers: None,
        destination_gas: None,
        gas: None,
    }
}

pub(crate) fn pending_tx(chain_id: u64, note: &str) -> PendingTransaction {
    PendingTransaction {
        chain_id,
        to: addr(0x11),
        data: vec![0x01, 0x02].into(),
        value: U256::zero(),
        annotation: Some(note.to_string()),
    }
}

#[derive(Default)]
pub(crate) struct MockProvider {
    // chain name -> (domain id, chain id)
    chains: BTreeMap<String, (DomainId, u64)>,
    token_metadata: Option<TokenMetadata>,
    native_token: Option<TokenMetadata>,
    // chain ids whose first N sends fail before succeeding
    flaky_sends: Mutex<BTreeMap<u64, usize>>,
    // chain ids whose sends always fail
    broken_chains: BTreeSet<u64>,
    pub(crate) sent: Mutex<Vec<(u64, Vec<PendingTransaction>)>>,
}

impl MockProvider {
    pub(crate) fn with_chains(mut self, chains: &[(&str, u32, u64)]) -> Self {
        self.chains = chains
            .iter()
            .map(|(name, domain, id)| (name.to_string(), (DomainId(*domain), *id)))
            .collect();
        self
    }

    pub(crate) fn with_token_metadata(mut self, metadata: TokenMetadata) -> Self {
        self.token_metadata = Some(metadata);
        self
    }

    pub(crate) fn with_native_token(mut self, metadata: TokenMetadata) -> Self {
        self.native_token = Some(metadata);
        self
    }

    pub(crate) fn with_flaky_send(self, chain_id: u64, failures: usize) -> Self {
        self.flaky_sends.lock().unwrap().insert(chain_id, failures);
        self
    }

    pub(crate) fn with_broken_chain(mut self, chain_id: u64) -> Self {
        self.broken_chains.insert(chain_id);
        self
    }

    pub(crate) fn sent_batches(&self) -> Vec<(u64, Vec<PendingTransaction>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainProvider for MockProvider {
    fn remote_chains(&self, chain: &str) -> anyhow::Result<Vec<String>> {
        Ok(self
            .chains
            .keys()
            .filter(|name| name.as_str() != chain)
            .cloned()
            .collect())
    }

    fn domain_id(&self, chain: &str) -> anyhow::Result<DomainId> {
        self.chains
            .get(chain)
            .map(|(domain, _)| *domain)
            .ok_or_else(|| anyhow::anyhow!("unknown chain {chain}"))
    }

    fn chain_id(&self, chain: &str) -> anyhow::Result<u64> {
        self.chains
            .get(chain)
            .map(|(_, id)| *id)
            .ok_or_else(|| anyhow::anyhow!("unknown chain {chain}"))
    }

    fn chain_name_by_id(&self, chain_id: u64) -> anyhow::Result<String> {
        self.chains
            .iter()
            .find(|(_, (_, id))| *id == chain_id)
            .map(|(name, _)| name.clone())
            .ok_or_else(|| anyhow::anyhow!("unknown chain id {chain_id}"))
    }

    fn signer_address(&self, _chain: &str) -> anyhow::Result<Address> {
        Ok(addr(0xaa))
    }

    fn native_token(&self, _chain: &str) -> Option<TokenMetadata> {
        self.native_token.clone()
    }

    async fn token_metadata(
        &self,
        chain: &str,
        _token: Address,
    ) -> anyhow::Result<TokenMetadata> {
        self.token_metadata
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no token metadata on {chain}"))
    }

    async fn send_transactions(
        &self,
        chain_id: u64,
        txs: &[PendingTransaction],
    ) -> anyhow::Result<Vec<SubmittedTransaction>> {
        if self.broken_chains.contains(&chain_id) {
            anyhow::bail!("rpc unreachable for chain id {chain_id}");
        }
        {
            let mut flaky = self.flaky_sends.lock().unwrap();
            if let Some(remaining) = flaky.get_mut(&chain_id) {
                if *remaining > 0 {
                    *remaining -= 1;
                    anyhow::bail!("transient rpc error for chain id {chain_id}");
                }
            }
        }
        self.sent
            .lock()
            .unwrap()
            .push((chain_id, txs.to_vec()));
        Ok(txs
            .iter()
            .enumerate()
            .map(|(index, _)| SubmittedTransaction {
                tx_hash: format!("0xhash{chain_id}{index}"),
                block_number: Some(1),
            })
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct MockDeployer {
    addresses: BTreeMap<String, String>,
    pub(crate) calls: Mutex<Vec<Vec<String>>>,
}

impl MockDeployer {
    pub(crate) fn with_addresses(mut self, addresses: &[(&str, &str)]) -> Self {
        self.addresses = addresses
            .iter()
            .map(|(chain, address)| (chain.to_string(), address.to_string()))
            .collect();
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RouterDeployer for MockDeployer {
    async fn deploy(
        &self,
        configs: &BTreeMap<String, TokenRouterConfig>,
    ) -> anyhow::Result<BTreeMap<String, String>> {
        self.calls
            .lock()
            .unwrap()
            .push(configs.keys().cloned().collect());
        configs
            .keys()
            .map(|chain| {
                self.addresses
                    .get(chain)
                    .map(|address| (chain.clone(), address.clone()))
                    .ok_or_else(|| anyhow::anyhow!("no deployment scripted for {chain}"))
            })
            .collect()
    }
}

#[derive(Default)]
pub(crate) struct MockUpdater {
    // scripted responses per chain, popped per call; default is empty (converged).
    scripts: Mutex<BTreeMap<String, VecDeque<Result<Vec<PendingTransaction>, String>>>>,
    pub(crate) seen: Mutex<Vec<(String, MaterializedRouterConfig)>>,
}

impl MockUpdater {
    pub(crate) fn script(self, chain: &str, response: Result<Vec<PendingTransaction>, &str>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(chain.to_string())
            .or_default()
            .push_back(response.map_err(|err| err.to_string()));
        self
    }

    pub(crate) fn seen_targets(&self) -> Vec<(String, MaterializedRouterConfig)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouterUpdater for MockUpdater {
    async fn update(
        &self,
        chain: &str,
        target: &MaterializedRouterConfig,
    ) -> anyhow::Result<Vec<PendingTransaction>> {
        self.seen
            .lock()
            .unwrap()
            .push((chain.to_string(), target.clone()));
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(chain)
            .and_then(|queue| queue.pop_front());
        match scripted {
            Some(Ok(txs)) => Ok(txs),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Default)]
pub(crate) struct MockPersister {
    pub(crate) persisted: Mutex<Vec<WarpCoreConfig>>,
}

impl MockPersister {
    pub(crate) fn persist_count(&self) -> usize {
        self.persisted.lock().unwrap().len()
    }
}

impl RoutePersister for MockPersister {
    fn persist(&self, config: &WarpCoreConfig) -> anyhow::Result<()> {
        self.persisted.lock().unwrap().push(config.clone());
        Ok(())
    }
}
