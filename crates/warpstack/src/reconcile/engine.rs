use std::collections::{BTreeMap, BTreeSet};

use futures::future::join_all;
use warpstack_cli_common::logger;
use warpstack_cli_config::{TokenRouterConfig, WarpCoreConfig, WarpCoreToken, WarpDeployConfig};
use warpstack_cli_types::DomainId;

use super::{
    error::{ChainFailure, ReconcileError},
    gas::reconcile_router_and_gas_maps,
    merge::merge_all_routers,
    metadata::{apply_metadata_to_extensions, derive_token_metadata},
    topology::split_topology,
};
use crate::sdk::{
    ChainProvider, MaterializedRouterConfig, PendingTransaction, RouterDeployer, RouterUpdater,
    RoutePersister,
};

/// Result of one reconciliation pass: the (possibly extended) core config,
/// the flat transaction list needed to converge the route, and any
/// chain-scoped failures that were captured along the way.
#[derive(Debug)]
pub struct ReconcilePlan {
    pub core: WarpCoreConfig,
    /// Whether the core config changed (extension deployed) and was persisted.
    pub core_updated: bool,
    pub transactions: Vec<PendingTransaction>,
    pub failures: Vec<ChainFailure>,
}

impl ReconcilePlan {
    /// True when the run touched nothing: no extension, no transactions,
    /// no failures.
    pub fn is_no_op(&self) -> bool {
        !self.core_updated && self.transactions.is_empty() && self.failures.is_empty()
    }
}

/// The diff-and-converge engine. Takes a declared target topology and an
/// observed one, deploys routers for net-new chains, and computes the
/// minimal per-chain update set for the rest.
///
/// Concurrent runs against the same route are not safe; the persisted core
/// config has no locking and operators must serialize invocations.
pub struct WarpApplyEngine<'a> {
    provider: &'a dyn ChainProvider,
    deployer: &'a dyn RouterDeployer,
    updater: &'a dyn RouterUpdater,
    persister: &'a dyn RoutePersister,
}

impl<'a> WarpApplyEngine<'a> {
    pub fn new(
        provider: &'a dyn ChainProvider,
        deployer: &'a dyn RouterDeployer,
        updater: &'a dyn RouterUpdater,
        persister: &'a dyn RoutePersister,
    ) -> Self {
        Self {
            provider,
            deployer,
            updater,
            persister,
        }
    }

    pub async fn run(
        &self,
        target: &WarpDeployConfig,
        observed: &WarpCoreConfig,
    ) -> Result<ReconcilePlan, ReconcileError> {
        target.validate()?;

        let target_set: BTreeSet<String> = target.chains.keys().cloned().collect();
        let observed_set = observed.chain_names();
        let split = split_topology(&target_set, &observed_set)?;

        let mut core = observed.clone();
        let mut core_updated = false;
        // Effective targets: the declared configs, with derived metadata
        // spread onto extension chains once it is known.
        let mut effective: BTreeMap<String, TokenRouterConfig> = target.chains.clone();

        let routers = if split.extension.is_empty() {
            // True no-op path for the deployment stage: no writes, no
            // chain calls, the previously persisted config is reused.
            observed.router_addresses()
        } else {
            let existing_targets: BTreeMap<String, TokenRouterConfig> = split
                .existing
                .iter()
                .filter_map(|chain| {
                    target
                        .chains
                        .get(chain)
                        .map(|config| (chain.clone(), config.clone()))
                })
                .collect();
            // Metadata comes from the chains that already carry it. On a
            // fresh route everything is an extension and the whole target
            // is in scope.
            let metadata_scope = if existing_targets.is_empty() {
                target.chains.clone()
            } else {
                existing_targets
            };
            let metadata = derive_token_metadata(&metadata_scope, self.provider).await?;

            let mut extension_configs: BTreeMap<String, TokenRouterConfig> = split
                .extension
                .iter()
                .filter_map(|chain| {
                    target
                        .chains
                        .get(chain)
                        .map(|config| (chain.clone(), config.clone()))
                })
                .collect();
            apply_metadata_to_extensions(&mut extension_configs, &metadata);
            for (chain, config) in &extension_configs {
                effective.insert(chain.clone(), config.clone());
            }

            logger::info(format!(
                "Extending warp route to new chain(s): {}",
                split
                    .extension
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
            let deployed = self
                .deployer
                .deploy(&extension_configs)
                .await
                .map_err(ReconcileError::Other)?;

            let routers = merge_all_routers(&observed.router_addresses(), &deployed);
            for (chain, config) in &extension_configs {
                core.tokens.push(extension_token(chain, config, &deployed)?);
            }
            core.connect_all();
            self.persister.persist(&core).map_err(ReconcileError::Other)?;
            core_updated = true;
            routers
        };

        let (transactions, failures) = self
            .compute_updates(&effective, &routers)
            .await;

        Ok(ReconcilePlan {
            core,
            core_updated,
            transactions,
            failures,
        })
    }

    /// Computes each chain's update transactions independently. One chain's
    /// failure is captured and must not cancel or abort its siblings.
    async fn compute_updates(
        &self,
        effective: &BTreeMap<String, TokenRouterConfig>,
        routers: &BTreeMap<String, String>,
    ) -> (Vec<PendingTransaction>, Vec<ChainFailure>) {
        let tasks = effective.keys().map(|chain| {
            let chain = chain.clone();
            async move {
                let result = self
                    .compute_chain_update(&chain, effective, routers)
                    .await;
                (chain, result)
            }
        });

        let mut transactions = Vec::new();
        let mut failures = Vec::new();
        for (chain, result) in join_all(tasks).await {
            match result {
                Ok(txs) => transactions.extend(txs),
                Err(error) => {
                    logger::error(format!("Failed to reconcile `{chain}`: {error:#}"));
                    failures.push(ChainFailure::new(chain, error));
                }
            }
        }
        (transactions, failures)
    }

    async fn compute_chain_update(
        &self,
        chain: &str,
        effective: &BTreeMap<String, TokenRouterConfig>,
        routers: &BTreeMap<String, String>,
    ) -> anyhow::Result<Vec<PendingTransaction>> {
        let router_address = routers
            .get(chain)
            .ok_or_else(|| anyhow::anyhow!("no deployed router recorded for `{chain}`"))?
            .clone();

        let remote_chains = self.provider.remote_chains(chain)?;
        let mut domain_ids: BTreeMap<String, DomainId> = BTreeMap::new();
        for remote in &remote_chains {
            // Remote chains outside this route's metadata are simply not
            // valid destinations.
            if let Ok(domain) = self.provider.domain_id(remote) {
                domain_ids.insert(remote.clone(), domain);
            }
        }

        let (remote_routers, destination_gas) =
            reconcile_router_and_gas_maps(chain, &remote_chains, &domain_ids, routers, effective);

        let config = effective
            .get(chain)
            .ok_or_else(|| anyhow::anyhow!("no target config for `{chain}`"))?
            .clone();
        let materialized = MaterializedRouterConfig {
            config,
            router_address,
            remote_routers,
            destination_gas,
        };
        self.updater.update(chain, &materialized).await
    }
}

fn extension_token(
    chain: &str,
    config: &TokenRouterConfig,
    deployed: &BTreeMap<String, String>,
) -> Result<WarpCoreToken, ReconcileError> {
    let address = deployed.get(chain).ok_or_else(|| {
        ReconcileError::Other(anyhow::anyhow!(
            "deployer returned no address for `{chain}`"
        ))
    })?;
    Ok(WarpCoreToken {
        chain_name: chain.to_string(),
        standard: config.standard,
        name: config.name.clone().unwrap_or_default(),
        symbol: config.symbol.clone().unwrap_or_default(),
        decimals: config.decimals.unwrap_or_default(),
        address_or_denom: Some(address.clone()),
        collateral_address_or_denom: config.token.map(|token| format!("{token:?}")),
        connections: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use warpstack_cli_types::{TokenMetadata, TokenStandard};

    use super::*;
    use crate::reconcile::testing::{
        pending_tx, router_config, MockDeployer, MockPersister, MockProvider, MockUpdater,
    };

    fn deploy_config(entries: &[(&str, TokenStandard)]) -> WarpDeployConfig {
        WarpDeployConfig {
            chains: entries
                .iter()
                .map(|(chain, standard)| (chain.to_string(), router_config(*standard)))
                .collect(),
        }
    }

    fn observed_token(chain: &str, address: &str) -> WarpCoreToken {
        WarpCoreToken {
            chain_name: chain.to_string(),
            standard: TokenStandard::Collateral,
            name: "Ether".into(),
            symbol: "ETH".into(),
            decimals: 18,
            address_or_denom: Some(address.to_string()),
            collateral_address_or_denom: None,
            connections: Vec::new(),
        }
    }

    #[tokio::test]
    async fn extension_deploys_only_missing_chains_and_persists_full_mesh() {
        let target = deploy_config(&[
            ("ethereum", TokenStandard::Collateral),
            ("arbitrum", TokenStandard::Synthetic),
        ]);
        let observed = WarpCoreConfig {
            tokens: vec![observed_token("ethereum", "0xaaaa")],
        };

        let provider = MockProvider::default()
            .with_chains(&[("ethereum", 1, 1), ("arbitrum", 42161, 42161)])
            .with_token_metadata(TokenMetadata::new("Ether", "ETH", 18));
        let deployer = MockDeployer::default().with_addresses(&[("arbitrum", "0xbbbb")]);
        let updater = MockUpdater::default();
        let persister = MockPersister::default();

        let engine = WarpApplyEngine::new(&provider, &deployer, &updater, &persister);
        let plan = engine.run(&target, &observed).await.unwrap();

        // Only the net-new chain is deployed.
        let calls = deployer.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![vec!["arbitrum".to_string()]]);

        // The persisted core lists both tokens with one connection each.
        assert!(plan.core_updated);
        assert_eq!(persister.persist_count(), 1);
        assert_eq!(plan.core.tokens.len(), 2);
        for token in &plan.core.tokens {
            assert_eq!(token.connections.len(), 1);
        }

        // The extension inherited the route metadata.
        let arbitrum = plan.core.token_for_chain("arbitrum").unwrap();
        assert_eq!(arbitrum.symbol, "ETH");
        assert_eq!(arbitrum.decimals, 18);
        assert_eq!(arbitrum.address_or_denom.as_deref(), Some("0xbbbb"));

        // Both chains saw a materialized target with one remote entry.
        for (chain, materialized) in updater.seen_targets() {
            assert_eq!(materialized.remote_routers.len(), 1, "chain {chain}");
        }
    }

    #[tokio::test]
    async fn converged_route_is_a_true_no_op() {
        let target = deploy_config(&[
            ("ethereum", TokenStandard::Collateral),
            ("arbitrum", TokenStandard::Synthetic),
        ]);
        let observed = WarpCoreConfig {
            tokens: vec![
                observed_token("ethereum", "0xaaaa"),
                observed_token("arbitrum", "0xbbbb"),
            ],
        };

        let provider = MockProvider::default()
            .with_chains(&[("ethereum", 1, 1), ("arbitrum", 42161, 42161)]);
        let deployer = MockDeployer::default();
        let updater = MockUpdater::default();
        let persister = MockPersister::default();

        let engine = WarpApplyEngine::new(&provider, &deployer, &updater, &persister);
        let plan = engine.run(&target, &observed).await.unwrap();

        assert!(plan.is_no_op());
        assert_eq!(deployer.call_count(), 0);
        assert_eq!(persister.persist_count(), 0);
        assert!(plan.transactions.is_empty());
    }

    #[tokio::test]
    async fn unenrollment_fails_fast_before_any_chain_is_touched() {
        let target = deploy_config(&[("ethereum", TokenStandard::Collateral)]);
        let observed = WarpCoreConfig {
            tokens: vec![
                observed_token("ethereum", "0xaaaa"),
                observed_token("arbitrum", "0xbbbb"),
            ],
        };

        let provider = MockProvider::default()
            .with_chains(&[("ethereum", 1, 1), ("arbitrum", 42161, 42161)]);
        let deployer = MockDeployer::default();
        let updater = MockUpdater::default();
        let persister = MockPersister::default();

        let engine = WarpApplyEngine::new(&provider, &deployer, &updater, &persister);
        let err = engine.run(&target, &observed).await.unwrap_err();

        assert!(matches!(err, ReconcileError::UnsupportedOperation(_)));
        assert_eq!(deployer.call_count(), 0);
        assert!(updater.seen_targets().is_empty());
        assert_eq!(persister.persist_count(), 0);
    }

    #[tokio::test]
    async fn invalid_target_is_rejected_before_any_chain_is_touched() {
        let mut target = deploy_config(&[("ethereum", TokenStandard::Collateral)]);
        target.chains.get_mut("ethereum").unwrap().token = None;
        let observed = WarpCoreConfig::default();

        let provider = MockProvider::default().with_chains(&[("ethereum", 1, 1)]);
        let deployer = MockDeployer::default();
        let updater = MockUpdater::default();
        let persister = MockPersister::default();

        let engine = WarpApplyEngine::new(&provider, &deployer, &updater, &persister);
        let err = engine.run(&target, &observed).await.unwrap_err();

        assert!(matches!(err, ReconcileError::ConfigValidation(_)));
        assert_eq!(deployer.call_count(), 0);
        assert!(updater.seen_targets().is_empty());
        assert_eq!(persister.persist_count(), 0);
    }

    #[tokio::test]
    async fn one_chain_failure_does_not_abort_siblings() {
        let target = deploy_config(&[
            ("ethereum", TokenStandard::Collateral),
            ("arbitrum", TokenStandard::Synthetic),
        ]);
        let observed = WarpCoreConfig {
            tokens: vec![
                observed_token("ethereum", "0xaaaa"),
                observed_token("arbitrum", "0xbbbb"),
            ],
        };

        let provider = MockProvider::default()
            .with_chains(&[("ethereum", 1, 1), ("arbitrum", 42161, 42161)]);
        let deployer = MockDeployer::default();
        let updater = MockUpdater::default()
            .script("ethereum", Err("rpc exploded"))
            .script("arbitrum", Ok(vec![pending_tx(42161, "enroll")]));
        let persister = MockPersister::default();

        let engine = WarpApplyEngine::new(&provider, &deployer, &updater, &persister);
        let plan = engine.run(&target, &observed).await.unwrap();

        assert_eq!(plan.failures.len(), 1);
        assert_eq!(plan.failures[0].chain, "ethereum");
        assert_eq!(plan.transactions.len(), 1);
        assert_eq!(plan.transactions[0].chain_id, 42161);
    }

    #[tokio::test]
    async fn second_run_against_converged_state_is_idempotent() {
        let target = deploy_config(&[
            ("ethereum", TokenStandard::Collateral),
            ("arbitrum", TokenStandard::Synthetic),
        ]);
        let observed = WarpCoreConfig {
            tokens: vec![
                observed_token("ethereum", "0xaaaa"),
                observed_token("arbitrum", "0xbbbb"),
            ],
        };

        let provider = MockProvider::default()
            .with_chains(&[("ethereum", 1, 1), ("arbitrum", 42161, 42161)]);
        let deployer = MockDeployer::default();
        // First run still has drift; once applied the chain reads as
        // converged and the scripted queue falls through to empty.
        let updater = MockUpdater::default().script("ethereum", Ok(vec![pending_tx(1, "gas")]));
        let persister = MockPersister::default();

        let engine = WarpApplyEngine::new(&provider, &deployer, &updater, &persister);
        let first = engine.run(&target, &observed).await.unwrap();
        assert_eq!(first.transactions.len(), 1);

        let second = engine.run(&target, &observed).await.unwrap();
        assert!(second.transactions.is_empty());
        assert!(second.is_no_op());
    }

    #[tokio::test]
    async fn three_chain_route_materializes_full_mesh_remote_routers() {
        let target = deploy_config(&[
            ("a", TokenStandard::Collateral),
            ("b", TokenStandard::Synthetic),
            ("c", TokenStandard::Synthetic),
        ]);
        let observed = WarpCoreConfig {
            tokens: vec![
                observed_token("a", "0x1"),
                observed_token("b", "0x2"),
                observed_token("c", "0x3"),
            ],
        };

        let provider =
            MockProvider::default().with_chains(&[("a", 1, 1), ("b", 2, 2), ("c", 3, 3)]);
        let deployer = MockDeployer::default();
        let updater = MockUpdater::default();
        let persister = MockPersister::default();

        let engine = WarpApplyEngine::new(&provider, &deployer, &updater, &persister);
        engine.run(&target, &observed).await.unwrap();

        let seen = updater.seen_targets();
        assert_eq!(seen.len(), 3);
        for (chain, materialized) in seen {
            assert_eq!(materialized.remote_routers.len(), 2, "chain {chain}");
            let own_domain = provider.domain_id(&chain).unwrap();
            assert!(!materialized.remote_routers.contains_key(&own_domain));
        }
    }
}
