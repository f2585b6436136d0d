use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Token standard of a warp router on a single chain.
///
/// Collateral-like standards hold an existing asset and carry authoritative
/// token metadata; synthetic routers mint a mirror token and must inherit
/// their metadata from a collateral-like chain in the same route.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TokenStandard {
    /// The chain's native gas token locked as collateral.
    Native,
    /// An ERC-20 locked as collateral.
    Collateral,
    /// An ERC-4626 vault share locked as collateral.
    CollateralVault,
    /// A synthetic token minted and burned by the router.
    Synthetic,
}

/// Default gas overhead charged for messages destined to a router of the
/// given standard. Synthetic transfers mint on delivery and cost more than
/// collateral releases.
const GAS_NATIVE: u64 = 44_000;
const GAS_COLLATERAL: u64 = 68_000;
const GAS_COLLATERAL_VAULT: u64 = 72_000;
const GAS_SYNTHETIC: u64 = 64_000;

impl TokenStandard {
    pub fn is_collateral_like(&self) -> bool {
        matches!(
            self,
            TokenStandard::Native | TokenStandard::Collateral | TokenStandard::CollateralVault
        )
    }

    /// Protocol-defined destination gas overhead for this standard, used when
    /// the deploy config does not specify an explicit per-destination value.
    pub fn default_destination_gas(&self) -> u64 {
        match self {
            TokenStandard::Native => GAS_NATIVE,
            TokenStandard::Collateral => GAS_COLLATERAL,
            TokenStandard::CollateralVault => GAS_COLLATERAL_VAULT,
            TokenStandard::Synthetic => GAS_SYNTHETIC,
        }
    }
}
