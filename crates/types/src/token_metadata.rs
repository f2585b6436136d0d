use serde::{Deserialize, Serialize};

/// Shared token metadata that every router in a warp route must agree on.
///
/// Derived once per route from a collateral-like chain (see the metadata
/// derivation in the reconciliation engine) and spread onto every other
/// chain's config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply: None,
        }
    }
}
