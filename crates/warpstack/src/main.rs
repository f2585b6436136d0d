use clap::{command, Parser, Subcommand};
use warpstack_cli_common::{
    config::{init_global_config, GlobalConfig},
    logger,
};
use xshell::Shell;

use crate::commands::{apply::args::ApplyArgs, autocomplete::AutocompleteArgs};

mod commands;
mod messages;
mod reconcile;
mod sdk;

#[derive(Parser, Debug)]
#[command(
    name = "warpstack",
    version,
    about = "Warp route reconciliation toolkit",
    long_about = None
)]
pub struct Warpstack {
    #[command(subcommand)]
    command: WarpstackSubcommands,
    #[clap(flatten)]
    global: WarpstackGlobalArgs,
}

#[derive(Subcommand, Debug)]
pub enum WarpstackSubcommands {
    /// Converge a deployed warp route onto its declared target topology
    Apply(ApplyArgs),
    /// Create shell autocompletion files
    Autocomplete(AutocompleteArgs),
}

#[derive(Parser, Debug)]
#[clap(next_help_heading = "Global options")]
struct WarpstackGlobalArgs {
    /// Verbose mode
    #[clap(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    human_panic::setup_panic!();

    let args = Warpstack::parse();
    init_global_config(GlobalConfig {
        verbose: args.global.verbose,
    });

    let shell = Shell::new()?;
    match run_subcommand(args.command, &shell).await {
        Ok(()) => Ok(()),
        Err(error) => {
            log_error(error);
            std::process::exit(1);
        }
    }
}

async fn run_subcommand(command: WarpstackSubcommands, shell: &Shell) -> anyhow::Result<()> {
    match command {
        WarpstackSubcommands::Apply(args) => commands::apply::run(shell, args).await,
        WarpstackSubcommands::Autocomplete(args) => commands::autocomplete::run(args),
    }
}

fn log_error(error: anyhow::Error) {
    logger::error(format!("{error:#}"));
    logger::new_empty_line();
}
