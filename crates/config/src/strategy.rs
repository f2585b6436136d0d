use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};
use warpstack_cli_types::SubmitterType;

use crate::traits::FileConfigTrait;

/// Per-chain submission strategy entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitterStrategy {
    #[serde(rename = "type", default)]
    pub submitter_type: SubmitterType,
    /// Safe address, required for the gnosisSafe submitter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_address: Option<String>,
    /// Output path for the file submitter; defaults to the receipts dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_path: Option<PathBuf>,
}

/// Optional strategy file mapping chain names to submitters. Chains without
/// an entry fall back to direct RPC submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainSubmissionStrategy {
    pub chains: BTreeMap<String, SubmitterStrategy>,
}

impl ChainSubmissionStrategy {
    pub fn resolve(&self, chain: &str) -> SubmitterStrategy {
        self.chains.get(chain).cloned().unwrap_or_default()
    }
}

impl FileConfigTrait for ChainSubmissionStrategy {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_chain_defaults_to_json_rpc() {
        let strategy: ChainSubmissionStrategy = serde_yaml::from_str(
            r#"
ethereum:
  type: gnosisSafe
  safeAddress: "0x00000000000000000000000000000000000000cc"
"#,
        )
        .unwrap();
        assert_eq!(
            strategy.resolve("ethereum").submitter_type,
            SubmitterType::GnosisSafe
        );
        assert_eq!(
            strategy.resolve("arbitrum").submitter_type,
            SubmitterType::JsonRpc
        );
    }
}
