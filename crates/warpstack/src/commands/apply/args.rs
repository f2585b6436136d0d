use std::path::PathBuf;

use clap::Parser;
use ethers::types::H256;
use warpstack_cli_common::Prompt;
use warpstack_cli_config::{CHAINS_FILE, WARP_DEPLOY_FILE};

use crate::messages::{
    MSG_CHAINS_HELP, MSG_CHAINS_PROMPT, MSG_CONTRACTS_HELP, MSG_CORE_CONFIG_HELP,
    MSG_DEPLOY_CONFIG_HELP, MSG_DEPLOY_CONFIG_PROMPT, MSG_PRIVATE_KEY_HELP,
    MSG_PRIVATE_KEY_PROMPT, MSG_RECEIPTS_DIR_HELP, MSG_REGISTRY_HELP, MSG_STRATEGY_HELP,
    MSG_STRICT_HELP,
};

const DEFAULT_CONTRACTS_PATH: &str = "./contracts";

#[derive(Debug, Parser)]
pub struct ApplyArgs {
    #[clap(long, help = MSG_DEPLOY_CONFIG_HELP)]
    pub config: Option<PathBuf>,
    #[clap(long, help = MSG_CORE_CONFIG_HELP)]
    pub warp: Option<PathBuf>,
    #[clap(long, help = MSG_CHAINS_HELP)]
    pub chains: Option<PathBuf>,
    #[clap(long, help = MSG_STRATEGY_HELP)]
    pub strategy: Option<PathBuf>,
    #[clap(long, default_value = ".", help = MSG_REGISTRY_HELP)]
    pub registry: PathBuf,
    #[clap(long, help = MSG_CONTRACTS_HELP)]
    pub contracts: Option<PathBuf>,
    #[clap(long, help = MSG_RECEIPTS_DIR_HELP)]
    pub receipts_dir: Option<PathBuf>,
    #[clap(long, help = MSG_PRIVATE_KEY_HELP)]
    pub private_key: Option<H256>,
    #[clap(long, help = MSG_STRICT_HELP)]
    pub strict: bool,
}

#[derive(Debug)]
pub struct ApplyArgsFinal {
    pub config: PathBuf,
    pub warp: Option<PathBuf>,
    pub chains: PathBuf,
    pub strategy: Option<PathBuf>,
    pub registry: PathBuf,
    pub contracts: PathBuf,
    pub receipts_dir: Option<PathBuf>,
    pub private_key: H256,
    pub strict: bool,
}

impl ApplyArgs {
    pub fn fill_values_with_prompt(self) -> ApplyArgsFinal {
        let config = self.config.unwrap_or_else(|| {
            Prompt::new(MSG_DEPLOY_CONFIG_PROMPT)
                .default(WARP_DEPLOY_FILE)
                .ask()
        });

        let chains = self.chains.unwrap_or_else(|| {
            Prompt::new(MSG_CHAINS_PROMPT).default(CHAINS_FILE).ask()
        });

        let private_key = self
            .private_key
            .unwrap_or_else(|| Prompt::new(MSG_PRIVATE_KEY_PROMPT).ask());

        let contracts = self
            .contracts
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTRACTS_PATH));

        ApplyArgsFinal {
            config,
            warp: self.warp,
            chains,
            strategy: self.strategy,
            registry: self.registry,
            contracts,
            receipts_dir: self.receipts_dir,
            private_key,
            strict: self.strict,
        }
    }
}
