/// Default deploy (target) config file name.
pub const WARP_DEPLOY_FILE: &str = "warp-deploy.yaml";
/// Default chain metadata registry file name.
pub const CHAINS_FILE: &str = "chains.yaml";
/// Directory where submission receipts are written.
pub const RECEIPTS_DIR: &str = "receipts";
/// Registry subdirectory holding persisted warp route core configs.
pub const WARP_ROUTES_PATH: &str = "deployments/warp_routes";

/// Separator between chain name and router address in a connection token id.
pub const CONNECTION_SEPARATOR: &str = "|";

pub const AUTOGENERATED_COMMENT: &str =
    "This file is autogenerated by warpstack. Do not edit manually.";
