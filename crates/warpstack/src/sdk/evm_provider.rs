use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use ethers::types::{Address, TransactionRequest, H256};
use warpstack_cli_common::ethereum::{
    create_ethers_client, fetch_erc20_metadata, send_ordered_batch, EthersClient,
};
use warpstack_cli_config::ChainMetadataStore;
use warpstack_cli_types::{DomainId, TokenMetadata};

use super::{ChainProvider, PendingTransaction, SubmittedTransaction};

/// Ethers-backed provider over the immutable chain metadata store. One
/// signing client per chain, created eagerly for the chains of the route.
pub struct EvmChainProvider {
    store: ChainMetadataStore,
    clients: BTreeMap<String, EthersClient>,
}

impl EvmChainProvider {
    pub fn new(
        store: ChainMetadataStore,
        private_key: H256,
        chains: &[String],
    ) -> anyhow::Result<Self> {
        let mut clients = BTreeMap::new();
        for chain in chains {
            let meta = store.get(chain)?;
            let client = create_ethers_client(
                private_key,
                meta.rpc_url.to_string(),
                Some(meta.chain_id),
            )?;
            clients.insert(chain.clone(), client);
        }
        Ok(Self { store, clients })
    }

    pub fn client(&self, chain: &str) -> anyhow::Result<EthersClient> {
        self.clients
            .get(chain)
            .cloned()
            .with_context(|| format!("No client configured for chain `{chain}`"))
    }
}

#[async_trait]
impl ChainProvider for EvmChainProvider {
    fn remote_chains(&self, chain: &str) -> anyhow::Result<Vec<String>> {
        Ok(self
            .store
            .chain_names()
            .into_iter()
            .filter(|name| name != chain)
            .collect())
    }

    fn domain_id(&self, chain: &str) -> anyhow::Result<DomainId> {
        Ok(self.store.get(chain)?.domain_id)
    }

    fn chain_id(&self, chain: &str) -> anyhow::Result<u64> {
        Ok(self.store.get(chain)?.chain_id)
    }

    fn chain_name_by_id(&self, chain_id: u64) -> anyhow::Result<String> {
        self.clients
            .keys()
            .find(|name| {
                self.store
                    .get(name)
                    .map(|meta| meta.chain_id == chain_id)
                    .unwrap_or(false)
            })
            .cloned()
            .with_context(|| format!("No configured chain with chain id {chain_id}"))
    }

    fn signer_address(&self, chain: &str) -> anyhow::Result<Address> {
        Ok(self.client(chain)?.address())
    }

    fn native_token(&self, chain: &str) -> Option<TokenMetadata> {
        self.store.native_token_metadata(chain)
    }

    async fn token_metadata(&self, chain: &str, token: Address) -> anyhow::Result<TokenMetadata> {
        let client = self.client(chain)?;
        fetch_erc20_metadata(client, token)
            .await
            .with_context(|| format!("Failed to read token metadata on `{chain}`"))
    }

    async fn send_transactions(
        &self,
        chain_id: u64,
        txs: &[PendingTransaction],
    ) -> anyhow::Result<Vec<SubmittedTransaction>> {
        let chain = self.chain_name_by_id(chain_id)?;
        let client = self.client(&chain)?;
        let requests = txs
            .iter()
            .map(|tx| {
                TransactionRequest::new()
                    .to(tx.to)
                    .data(tx.data.clone())
                    .value(tx.value)
            })
            .collect();
        let receipts = send_ordered_batch(client, requests).await?;
        Ok(receipts
            .into_iter()
            .map(|receipt| SubmittedTransaction {
                tx_hash: format!("{:?}", receipt.transaction_hash),
                block_number: receipt.block_number.map(|block| block.as_u64()),
            })
            .collect())
    }
}
