use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use ethers::types::H256;
use serde::Deserialize;
use warpstack_cli_common::{logger, spinner::Spinner};
use warpstack_cli_config::{ChainMetadataStore, TokenRouterConfig};
use warpstack_cli_types::TokenStandard;
use xshell::{cmd, Shell};

use super::RouterDeployer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForgeCreateOutput {
    deployed_to: String,
    transaction_hash: Option<String>,
}

/// Deploys router contracts for extension chains by shelling out to
/// `forge create`, one chain at a time.
pub struct ForgeRouterDeployer {
    contracts_path: PathBuf,
    store: ChainMetadataStore,
    private_key: H256,
}

impl ForgeRouterDeployer {
    pub fn new(contracts_path: PathBuf, store: ChainMetadataStore, private_key: H256) -> Self {
        Self {
            contracts_path,
            store,
            private_key,
        }
    }

    fn contract_for(standard: TokenStandard) -> &'static str {
        match standard {
            TokenStandard::Native => "HypNative",
            TokenStandard::Collateral => "HypERC20Collateral",
            TokenStandard::CollateralVault => "HypERC4626Collateral",
            TokenStandard::Synthetic => "HypERC20",
        }
    }

    fn constructor_args(config: &TokenRouterConfig, mailbox: &str) -> anyhow::Result<Vec<String>> {
        let args = match config.standard {
            TokenStandard::Native => vec![mailbox.to_string()],
            TokenStandard::Collateral | TokenStandard::CollateralVault => {
                let token = config
                    .token
                    .context("Collateral router requires a token address")?;
                vec![format!("{token:?}"), mailbox.to_string()]
            }
            TokenStandard::Synthetic => vec![
                config.decimals.unwrap_or(18).to_string(),
                mailbox.to_string(),
            ],
        };
        Ok(args)
    }

    fn deploy_one(
        &self,
        shell: &Shell,
        chain: &str,
        config: &TokenRouterConfig,
    ) -> anyhow::Result<String> {
        let meta = self.store.get(chain)?;
        let mailbox = meta
            .mailbox
            .as_deref()
            .with_context(|| format!("Chain `{chain}` has no mailbox configured"))?;

        let contract = Self::contract_for(config.standard);
        let rpc_url = meta.rpc_url.to_string();
        let private_key = format!("{:?}", self.private_key);
        let constructor_args = Self::constructor_args(config, mailbox)?;

        let _dir_guard = shell.push_dir(&self.contracts_path);
        let output = cmd!(
            shell,
            "forge create {contract} --rpc-url {rpc_url} --private-key {private_key} --json --constructor-args {constructor_args...}"
        )
        .read()
        .with_context(|| format!("forge create failed for `{chain}`"))?;

        // forge prints compiler noise before the JSON payload; the result
        // object is the last line.
        let json_line = output
            .lines()
            .rev()
            .find(|line| line.trim_start().starts_with('{'))
            .with_context(|| format!("No JSON output from forge create on `{chain}`"))?;
        let parsed: ForgeCreateOutput = serde_json::from_str(json_line)
            .with_context(|| format!("Malformed forge create output on `{chain}`"))?;
        if let Some(tx_hash) = &parsed.transaction_hash {
            logger::info(format!(
                "Deployed {contract} on {chain} at {} (tx {tx_hash})",
                parsed.deployed_to
            ));
        }
        Ok(parsed.deployed_to)
    }
}

#[async_trait]
impl RouterDeployer for ForgeRouterDeployer {
    async fn deploy(
        &self,
        configs: &BTreeMap<String, TokenRouterConfig>,
    ) -> anyhow::Result<BTreeMap<String, String>> {
        let shell = Shell::new()?;
        let mut deployed = BTreeMap::new();
        for (chain, config) in configs {
            let spinner = Spinner::new(&format!("Deploying router on {chain}..."));
            match self.deploy_one(&shell, chain, config) {
                Ok(address) => {
                    spinner.finish();
                    deployed.insert(chain.clone(), address);
                }
                Err(err) => {
                    spinner.fail();
                    return Err(err);
                }
            }
        }
        Ok(deployed)
    }
}
