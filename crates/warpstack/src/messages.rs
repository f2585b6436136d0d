use ethers::types::Address;

use crate::reconcile::ChainFailure;

/// Autocomplete messages
pub(super) fn msg_generate_autocomplete_file(filename: &str) -> String {
    format!("Generating completion file: {filename}")
}
pub(super) const MSG_OUTRO_AUTOCOMPLETE_GENERATION: &str =
    "Autocompletion file correctly generated";

/// Apply messages
pub(super) const MSG_APPLY_INTRO: &str = "Reconciling warp route";
pub(super) const MSG_DEPLOY_CONFIG_HELP: &str = "Path to the warp deploy (target) config";
pub(super) const MSG_CORE_CONFIG_HELP: &str =
    "Path to the warp core config of the deployed route; omit for a fresh deployment";
pub(super) const MSG_CHAINS_HELP: &str = "Path to the chain metadata file";
pub(super) const MSG_STRATEGY_HELP: &str = "Path to the per-chain submission strategy file";
pub(super) const MSG_REGISTRY_HELP: &str = "Registry root directory for route artifacts";
pub(super) const MSG_CONTRACTS_HELP: &str = "Path to the router contracts workspace";
pub(super) const MSG_RECEIPTS_DIR_HELP: &str =
    "Directory for submission receipts; defaults to <registry>/receipts";
pub(super) const MSG_PRIVATE_KEY_HELP: &str = "Deployer private key";
pub(super) const MSG_STRICT_HELP: &str = "Exit non-zero when any chain fails to reconcile";
pub(super) const MSG_DEPLOY_CONFIG_PROMPT: &str = "Where is the warp deploy config located?";
pub(super) const MSG_CHAINS_PROMPT: &str = "Where is the chain metadata file located?";
pub(super) const MSG_PRIVATE_KEY_PROMPT: &str = "Private key of the deployer account";
pub(super) const MSG_FRESH_ROUTE: &str =
    "No existing warp core config found, deploying the route from scratch";
pub(super) const MSG_NO_UPDATES_NEEDED: &str =
    "Configuration is the same as target, no updates needed";
pub(super) const MSG_COMPUTING_UPDATES_SPINNER: &str = "Computing router updates...";
pub(super) const MSG_FAILED_CHAINS_TITLE: &str = "Failed chains";
pub(super) const MSG_STRICT_FAILURES_ERR: &str =
    "Reconciliation left one or more chains unconverged";

pub(super) fn msg_deployer_account(address: Address) -> String {
    format!("Submitting with deployer account {address:?}")
}

pub(super) fn msg_applied_outro(submitted_chains: usize, failed_chains: usize) -> String {
    if failed_chains == 0 {
        format!("Warp route reconciled across {submitted_chains} chain(s)")
    } else {
        format!(
            "Warp route partially reconciled: {submitted_chains} chain(s) updated, \
             {failed_chains} chain(s) failed"
        )
    }
}

pub(super) fn msg_failure_table(failures: &[ChainFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{}: {:#}", failure.chain, failure.error))
        .collect::<Vec<_>>()
        .join("\n")
}
