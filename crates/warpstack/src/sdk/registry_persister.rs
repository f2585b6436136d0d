use warpstack_cli_common::logger;
use warpstack_cli_config::{WarpCoreConfig, WarpRouteRegistry};
use xshell::Shell;

use super::RoutePersister;

/// Persists the canonical route state into the local registry layout.
pub struct RegistryRoutePersister {
    registry: WarpRouteRegistry,
}

impl RegistryRoutePersister {
    pub fn new(registry: WarpRouteRegistry) -> Self {
        Self { registry }
    }
}

impl RoutePersister for RegistryRoutePersister {
    fn persist(&self, config: &WarpCoreConfig) -> anyhow::Result<()> {
        let shell = Shell::new()?;
        let path = self.registry.add_warp_route(&shell, config)?;
        logger::info(format!("Updated warp route config at {}", path.display()));
        Ok(())
    }
}
