use std::collections::BTreeMap;

use warpstack_cli_common::logger;
use warpstack_cli_config::TokenRouterConfig;
use warpstack_cli_types::{TokenMetadata, TokenStandard};

use super::error::ReconcileError;
use crate::sdk::ChainProvider;

/// Derives the route-wide token metadata tuple from the given chains.
///
/// When extending a route the scope must be the existing chains only: the
/// extension inherits metadata, it never redefines it. Source priority per
/// chain, explicit config first:
///   1. explicit name/symbol/decimals on any chain's config,
///   2. an on-chain ERC-20 read of a collateral-like chain's token,
///   3. the native-token metadata of a native chain.
///
/// Fails with `MissingTokenMetadata` if no chain in scope yields decimals;
/// downstream gas and collateral math depends on it.
pub async fn derive_token_metadata(
    scope: &BTreeMap<String, TokenRouterConfig>,
    provider: &dyn ChainProvider,
) -> Result<TokenMetadata, ReconcileError> {
    for config in scope.values() {
        if let Some(metadata) = config.explicit_metadata() {
            return Ok(metadata);
        }
    }

    for (chain, config) in scope {
        if !config.standard.is_collateral_like() {
            continue;
        }
        if let Some(token) = config.token {
            match provider.token_metadata(chain, token).await {
                Ok(metadata) => return Ok(metadata),
                Err(err) => {
                    // Another collateral chain may still supply metadata;
                    // only the total absence of a source is fatal.
                    logger::warn(format!(
                        "Could not read token metadata from `{chain}`: {err:#}"
                    ));
                }
            }
        }
    }

    for (chain, config) in scope {
        if config.standard == TokenStandard::Native {
            if let Some(metadata) = provider.native_token(chain) {
                return Ok(metadata);
            }
        }
    }

    Err(ReconcileError::MissingTokenMetadata(format!(
        "no chain in [{}] provides token decimals",
        scope.keys().cloned().collect::<Vec<_>>().join(", ")
    )))
}

/// Spreads the derived metadata onto every extension config, overwriting
/// whatever partial metadata they declared.
pub fn apply_metadata_to_extensions(
    extensions: &mut BTreeMap<String, TokenRouterConfig>,
    metadata: &TokenMetadata,
) {
    for config in extensions.values_mut() {
        config.apply_metadata(metadata);
    }
}
