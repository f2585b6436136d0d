use std::sync::Arc;

use anyhow::Context;
use warpstack_cli_common::{logger, spinner::Spinner};
use warpstack_cli_config::{
    traits::ReadConfig, ChainMetadataStore, ChainSubmissionStrategy, WarpCoreConfig,
    WarpDeployConfig, WarpRouteRegistry,
};
use xshell::Shell;

use crate::{
    messages::{
        msg_applied_outro, msg_deployer_account, msg_failure_table, MSG_APPLY_INTRO,
        MSG_COMPUTING_UPDATES_SPINNER, MSG_FAILED_CHAINS_TITLE, MSG_FRESH_ROUTE,
        MSG_NO_UPDATES_NEEDED, MSG_STRICT_FAILURES_ERR,
    },
    reconcile::{TransactionDispatcher, WarpApplyEngine},
    sdk::{
        ChainProvider, EvmChainProvider, EvmRouterUpdater, ForgeRouterDeployer,
        RegistryRoutePersister,
    },
};

pub mod args;

use args::ApplyArgs;

pub async fn run(shell: &Shell, args: ApplyArgs) -> anyhow::Result<()> {
    let args = args.fill_values_with_prompt();
    logger::intro(MSG_APPLY_INTRO);

    let target = WarpDeployConfig::read(shell, &args.config)?;

    let observed = match &args.warp {
        Some(path) => WarpCoreConfig::read(shell, path)?,
        None => {
            logger::info(MSG_FRESH_ROUTE);
            WarpCoreConfig::default()
        }
    };

    let store = ChainMetadataStore::load(shell, &args.chains)?;
    let strategy = match &args.strategy {
        Some(path) => ChainSubmissionStrategy::read(shell, path)?,
        None => ChainSubmissionStrategy::default(),
    };

    let route_chains: Vec<String> = target.chains.keys().cloned().collect();
    let provider = Arc::new(
        EvmChainProvider::new(store.clone(), args.private_key, &route_chains)
            .context("Failed to initialize chain clients")?,
    );
    if let Some(chain) = route_chains.first() {
        logger::info(msg_deployer_account(provider.signer_address(chain)?));
    }
    let updater = EvmRouterUpdater::new(provider.clone());
    let deployer = ForgeRouterDeployer::new(args.contracts.clone(), store, args.private_key);
    let registry = WarpRouteRegistry::new(&args.registry);
    let persister = RegistryRoutePersister::new(registry.clone());

    let engine = WarpApplyEngine::new(provider.as_ref(), &deployer, &updater, &persister);
    let spinner = Spinner::new(MSG_COMPUTING_UPDATES_SPINNER);
    let plan = match engine.run(&target, &observed).await {
        Ok(plan) => {
            spinner.finish();
            plan
        }
        Err(err) => {
            spinner.fail();
            return Err(err.into());
        }
    };

    if plan.is_no_op() {
        logger::outro(MSG_NO_UPDATES_NEEDED);
        return Ok(());
    }

    let receipts_dir = args
        .receipts_dir
        .unwrap_or_else(|| registry.receipts_dir());
    shell.create_dir(&receipts_dir)?;

    let dispatcher =
        TransactionDispatcher::new(shell, provider.as_ref(), strategy, receipts_dir);
    let outcome = dispatcher.dispatch(plan.transactions).await;

    let mut failures = plan.failures;
    failures.extend(outcome.failures);

    if !failures.is_empty() {
        logger::new_empty_line();
        logger::note(MSG_FAILED_CHAINS_TITLE, msg_failure_table(&failures));
        if args.strict {
            anyhow::bail!(MSG_STRICT_FAILURES_ERR);
        }
    }

    logger::outro(msg_applied_outro(outcome.receipts.len(), failures.len()));
    Ok(())
}
