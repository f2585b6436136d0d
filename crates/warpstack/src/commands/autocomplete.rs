use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Generator};
use warpstack_cli_common::logger;

use crate::messages::{msg_generate_autocomplete_file, MSG_OUTRO_AUTOCOMPLETE_GENERATION};

#[derive(Debug, Parser)]
pub struct AutocompleteArgs {
    /// The shell to generate the autocomplete script for
    #[arg(long = "generate", value_enum)]
    pub generator: clap_complete::Shell,
    /// The out directory to write the autocomplete script to
    #[arg(short, long, default_value = "./")]
    pub out: PathBuf,
}

pub fn run(args: AutocompleteArgs) -> anyhow::Result<()> {
    let filename = autocomplete_file_name(&args.generator);
    let path = args.out.join(filename);

    logger::info(msg_generate_autocomplete_file(
        path.to_str().context("Failed to convert path to string")?,
    ));

    let file = File::create(&path).context("Failed to create file")?;
    let mut writer = BufWriter::new(file);
    generate_completions(args.generator, &mut writer)?;
    logger::outro(MSG_OUTRO_AUTOCOMPLETE_GENERATION);
    Ok(())
}

pub fn generate_completions<G: Generator>(gen: G, buf: &mut dyn Write) -> anyhow::Result<()> {
    let mut cmd = crate::Warpstack::command();
    let cmd_name = cmd.get_name().to_string();
    generate(gen, &mut cmd, cmd_name, buf);
    Ok(())
}

pub fn autocomplete_file_name(shell: &clap_complete::Shell) -> &'static str {
    match shell {
        clap_complete::Shell::Bash => "warpstack.sh",
        clap_complete::Shell::Fish => "warpstack.fish",
        clap_complete::Shell::Zsh => "_warpstack.zsh",
        _ => "warpstack.sh",
    }
}
