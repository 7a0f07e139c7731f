mod classify;
mod normalize;
mod providers;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Report;

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    match &cli.command {
        Command::Normalize(args) => normalize::run(args).await,
        Command::Classify(args) => classify::run(args),
        Command::Providers => providers::run(),
    }
}
