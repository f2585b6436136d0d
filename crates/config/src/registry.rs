use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use xshell::Shell;

use crate::{
    consts::{AUTOGENERATED_COMMENT, RECEIPTS_DIR, WARP_ROUTES_PATH},
    core::WarpCoreConfig,
    traits::{ReadConfig, SaveConfigWithComment},
};

/// File-backed registry holding the canonical core config of every known
/// warp route, keyed by token symbol and the set of chains it spans.
#[derive(Debug, Clone)]
pub struct WarpRouteRegistry {
    root: PathBuf,
}

impl WarpRouteRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Stable route identifier: symbol plus the sorted chain list.
    pub fn route_id(symbol: &str, chains: &[String]) -> String {
        let mut sorted = chains.to_vec();
        sorted.sort();
        format!("{}-{}", symbol.to_uppercase(), sorted.join("-"))
    }

    pub fn warp_route_path(&self, route_id: &str) -> PathBuf {
        self.root
            .join(WARP_ROUTES_PATH)
            .join(format!("{route_id}-config.yaml"))
    }

    pub fn receipts_dir(&self) -> PathBuf {
        self.root.join(RECEIPTS_DIR)
    }

    /// Persists a route's core config. The write replaces the whole file;
    /// the registry is the single shared artifact between runs, so callers
    /// must serialize concurrent reconciliations externally.
    pub fn add_warp_route(
        &self,
        shell: &Shell,
        config: &WarpCoreConfig,
    ) -> anyhow::Result<PathBuf> {
        let symbol = config
            .tokens
            .first()
            .map(|token| token.symbol.clone())
            .context("Cannot persist a warp route with no tokens")?;
        let chains: Vec<String> = config.chain_names().into_iter().collect();
        let path = self.warp_route_path(&Self::route_id(&symbol, &chains));
        if let Some(parent) = path.parent() {
            shell.create_dir(parent)?;
        }
        config.save_with_comment(shell, &path, AUTOGENERATED_COMMENT)?;
        Ok(path)
    }

    pub fn read_warp_route(
        &self,
        shell: &Shell,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<WarpCoreConfig> {
        WarpCoreConfig::read(shell, path)
    }

    /// Router address per chain for one route, read from its persisted core
    /// config.
    pub fn get_chain_addresses(
        &self,
        shell: &Shell,
        route_id: &str,
    ) -> anyhow::Result<BTreeMap<String, String>> {
        let config = self.read_warp_route(shell, self.warp_route_path(route_id))?;
        Ok(config.router_addresses())
    }
}
