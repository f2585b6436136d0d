use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How a chain's transaction batch gets submitted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SubmitterType {
    /// Sign and broadcast directly over RPC.
    #[default]
    JsonRpc,
    /// Emit a Safe multisig proposal payload for out-of-band execution.
    GnosisSafe,
    /// Write the batch to a JSON file for offline signing.
    File,
}
