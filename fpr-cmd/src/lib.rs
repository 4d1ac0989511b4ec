//! Command implementations for the FPR CLI.
//!
//! Provides subcommands for routing a daily series through the outlet
//! fish-distribution engine and for checking a parameter bundle.

use clap::Subcommand;

pub mod distribute;
pub mod validate;

#[derive(Subcommand)]
pub enum Command {
    /// Distribute each day's approaching fish among the dam outlets
    Distribute {
        /// JSON parameter bundle (structure, route effectiveness, routing)
        #[arg(short = 'p', long)]
        params: String,

        /// Daily hydrology CSV
        #[arg(short = 'd', long)]
        daily: String,

        /// Output path for per-day distribution CSV
        #[arg(short = 'o', long)]
        output: String,

        /// Also write allocated flows, flow shares and route effectiveness
        #[arg(long)]
        verbose: bool,

        /// Route days one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Check a parameter bundle without routing any days
    Validate {
        /// JSON parameter bundle
        #[arg(short = 'p', long)]
        params: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Distribute {
            params,
            daily,
            output,
            verbose,
            sequential,
        } => distribute::run_distribute(&params, &daily, &output, verbose, sequential),
        Command::Validate { params } => validate::run_validate(&params),
    }
}
