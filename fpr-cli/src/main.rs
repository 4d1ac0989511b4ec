//! FPR CLI - Command line tool for routing fish through dam outlets.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "fpr-cli",
    version,
    about = "Dam outlet fish passage routing toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: fpr_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    fpr_cmd::run(cli.command)
}
