use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use ethers::{
    contract::abigen,
    types::{Address, H256, U256},
};
use warpstack_cli_common::ethereum::parse_address;
use warpstack_cli_types::DomainId;

use super::{
    ChainProvider, EvmChainProvider, MaterializedRouterConfig, PendingTransaction, RouterUpdater,
};

abigen!(
    TokenRouter,
    r"[
        function routers(uint32 domain) external view returns (bytes32)
        function destinationGas(uint32 domain) external view returns (uint256)
        function owner() external view returns (address)
        function enrollRemoteRouters(uint32[] domains, bytes32[] addresses) external
        function setDestinationGas(uint32[] domains, uint256[] gas) external
        function transferOwnership(address newOwner) external
    ]"
);

/// Router addresses are enrolled as 32-byte values; EVM addresses are
/// left-padded into the low 20 bytes.
fn router_bytes32(address: Address) -> H256 {
    H256::from(address)
}

/// Computes the minimal transaction list converging one chain's router to
/// its materialized target: enrollments for drifted remote routers, gas
/// updates for drifted destinations, and an ownership transfer last.
pub struct EvmRouterUpdater {
    provider: Arc<EvmChainProvider>,
}

impl EvmRouterUpdater {
    pub fn new(provider: Arc<EvmChainProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl RouterUpdater for EvmRouterUpdater {
    async fn update(
        &self,
        chain: &str,
        target: &MaterializedRouterConfig,
    ) -> anyhow::Result<Vec<PendingTransaction>> {
        let chain_id = self.provider.chain_id(chain)?;
        let router_address = parse_address(&target.router_address)?;
        let client = self.provider.client(chain)?;
        let router = TokenRouter::new(router_address, client);

        let mut enroll_domains: Vec<u32> = Vec::new();
        let mut enroll_routers: Vec<[u8; 32]> = Vec::new();
        let mut gas_domains: Vec<u32> = Vec::new();
        let mut gas_values: Vec<U256> = Vec::new();

        for (domain, entry) in &target.remote_routers {
            let desired = router_bytes32(parse_address(&entry.address)?);
            let current = router
                .routers(domain.as_u32())
                .call()
                .await
                .with_context(|| format!("routers({domain}) read failed on `{chain}`"))?;
            if H256::from(current) != desired {
                enroll_domains.push(domain.as_u32());
                enroll_routers.push(desired.into());
            }
        }

        for (domain, amount) in &target.destination_gas {
            let desired = U256::from_dec_str(amount)
                .with_context(|| format!("Invalid gas amount `{amount}` for domain {domain}"))?;
            let current = router
                .destination_gas(domain.as_u32())
                .call()
                .await
                .with_context(|| format!("destinationGas({domain}) read failed on `{chain}`"))?;
            if current != desired {
                gas_domains.push(domain.as_u32());
                gas_values.push(desired);
            }
        }

        let mut txs = Vec::new();
        if !enroll_domains.is_empty() {
            let annotation = annotate_enrollments(chain, &enroll_domains);
            let call = router.enroll_remote_routers(enroll_domains, enroll_routers);
            txs.push(PendingTransaction {
                chain_id,
                to: router_address,
                data: call.calldata().context("enrollRemoteRouters encode failed")?,
                value: U256::zero(),
                annotation: Some(annotation),
            });
        }
        if !gas_domains.is_empty() {
            let annotation = format!(
                "Set destination gas on {chain} for domains {:?}",
                gas_domains
            );
            let call = router.set_destination_gas(gas_domains, gas_values);
            txs.push(PendingTransaction {
                chain_id,
                to: router_address,
                data: call.calldata().context("setDestinationGas encode failed")?,
                value: U256::zero(),
                annotation: Some(annotation),
            });
        }

        let current_owner = router
            .owner()
            .call()
            .await
            .with_context(|| format!("owner() read failed on `{chain}`"))?;
        if current_owner != target.config.owner {
            let call = router.transfer_ownership(target.config.owner);
            txs.push(PendingTransaction {
                chain_id,
                to: router_address,
                data: call.calldata().context("transferOwnership encode failed")?,
                value: U256::zero(),
                annotation: Some(format!(
                    "Transfer ownership of {chain} router to {:?}",
                    target.config.owner
                )),
            });
        }

        Ok(txs)
    }
}

fn annotate_enrollments(chain: &str, domains: &[u32]) -> String {
    let listed = domains
        .iter()
        .map(|domain| DomainId(*domain).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Enroll remote routers on {chain} for domains [{listed}]")
}
