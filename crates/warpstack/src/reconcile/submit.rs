use std::{collections::BTreeMap, path::PathBuf, time::Duration};

use chrono::Utc;
use serde::Serialize;
use warpstack_cli_common::{files::save_json_file, logger, retry::retry};
use warpstack_cli_config::ChainSubmissionStrategy;
use warpstack_cli_types::SubmitterType;
use xshell::Shell;

use super::error::ChainFailure;
use crate::sdk::{ChainProvider, PendingTransaction, SubmittedTransaction};

const SUBMIT_ATTEMPTS: usize = 5;
const SUBMIT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Groups a flat transaction list into per-chain batches, keyed by numeric
/// chain id. Order within each batch is preserved; enroll transactions must
/// land before gas updates.
pub fn group_by_chain(
    transactions: Vec<PendingTransaction>,
) -> BTreeMap<u64, Vec<PendingTransaction>> {
    let mut groups: BTreeMap<u64, Vec<PendingTransaction>> = BTreeMap::new();
    for tx in transactions {
        groups.entry(tx.chain_id).or_default().push(tx);
    }
    groups
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionReceipt<'a> {
    chain: &'a str,
    chain_id: u64,
    submitter: String,
    transactions: &'a [PendingTransaction],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    results: Vec<SubmittedTransaction>,
}

/// Safe proposal payload, written instead of broadcasting. Shaped for the
/// Safe Transaction Builder import format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SafeProposal<'a> {
    safe_address: &'a str,
    chain_id: u64,
    transactions: &'a [PendingTransaction],
}

#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub receipts: Vec<PathBuf>,
    pub failures: Vec<ChainFailure>,
}

/// Routes each chain's batch to its configured submitter. Direct RPC
/// batches are retried with a constant backoff; Safe and file submitters
/// only emit payload artifacts. A chain's failure never stops the
/// remaining chains.
pub struct TransactionDispatcher<'a> {
    shell: &'a Shell,
    provider: &'a dyn ChainProvider,
    strategy: ChainSubmissionStrategy,
    receipts_dir: PathBuf,
}

impl<'a> TransactionDispatcher<'a> {
    pub fn new(
        shell: &'a Shell,
        provider: &'a dyn ChainProvider,
        strategy: ChainSubmissionStrategy,
        receipts_dir: PathBuf,
    ) -> Self {
        Self {
            shell,
            provider,
            strategy,
            receipts_dir,
        }
    }

    pub async fn dispatch(&self, transactions: Vec<PendingTransaction>) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        for (chain_id, batch) in group_by_chain(transactions) {
            // Names are only needed for reporting; an unknown id still
            // gets its batch submitted under a synthetic label.
            let chain = self
                .provider
                .chain_name_by_id(chain_id)
                .unwrap_or_else(|_| format!("chain-{chain_id}"));
            match self.dispatch_chain(&chain, chain_id, &batch).await {
                Ok(receipt) => outcome.receipts.push(receipt),
                Err(error) => {
                    logger::error(format!("Submission failed for `{chain}`: {error:#}"));
                    outcome.failures.push(ChainFailure::new(chain, error));
                }
            }
        }
        outcome
    }

    async fn dispatch_chain(
        &self,
        chain: &str,
        chain_id: u64,
        batch: &[PendingTransaction],
    ) -> anyhow::Result<PathBuf> {
        let strategy = self.strategy.resolve(chain);
        match strategy.submitter_type {
            SubmitterType::JsonRpc => {
                let description = format!("submit {} transaction(s) to {chain}", batch.len());
                let results = retry(&description, SUBMIT_ATTEMPTS, SUBMIT_RETRY_DELAY, || {
                    self.provider.send_transactions(chain_id, batch)
                })
                .await?;
                logger::info(format!(
                    "Submitted {} transaction(s) to {chain}",
                    results.len()
                ));
                self.write_receipt(chain, chain_id, SubmitterType::JsonRpc, batch, results)
            }
            SubmitterType::GnosisSafe => {
                let safe_address = strategy.safe_address.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("gnosisSafe submitter for `{chain}` has no safeAddress")
                })?;
                let proposal = SafeProposal {
                    safe_address,
                    chain_id,
                    transactions: batch,
                };
                let path = self.receipt_path(chain, SubmitterType::GnosisSafe);
                save_json_file(self.shell, &path, &proposal)?;
                logger::info(format!(
                    "Wrote Safe proposal for `{chain}` to {}",
                    path.display()
                ));
                Ok(path)
            }
            SubmitterType::File => {
                let path = strategy
                    .out_path
                    .clone()
                    .unwrap_or_else(|| self.receipt_path(chain, SubmitterType::File));
                if let Some(parent) = path.parent() {
                    self.shell.create_dir(parent)?;
                }
                save_json_file(self.shell, &path, batch)?;
                logger::info(format!(
                    "Wrote transaction batch for `{chain}` to {}",
                    path.display()
                ));
                Ok(path)
            }
        }
    }

    fn write_receipt(
        &self,
        chain: &str,
        chain_id: u64,
        submitter: SubmitterType,
        batch: &[PendingTransaction],
        results: Vec<SubmittedTransaction>,
    ) -> anyhow::Result<PathBuf> {
        let receipt = SubmissionReceipt {
            chain,
            chain_id,
            submitter: submitter.to_string(),
            transactions: batch,
            results,
        };
        let path = self.receipt_path(chain, submitter);
        save_json_file(self.shell, &path, &receipt)?;
        Ok(path)
    }

    fn receipt_path(&self, chain: &str, submitter: SubmitterType) -> PathBuf {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ");
        self.receipts_dir
            .join(format!("{chain}-{submitter}-{timestamp}.json"))
    }
}
