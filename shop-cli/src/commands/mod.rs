// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use crate::error::ShopCliResult;

mod accounts;
mod deploy;
mod votes;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the addresses of the configured accounts
    Accounts(accounts::Args),
    /// Deploy the token, the collection and the sale
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Walk through minting, delegation and past votes of a token
    #[clap(visible_alias = "v")]
    Votes(votes::Args),
}

pub async fn exec(cmd: Command, config: &Path) -> ShopCliResult {
    match cmd {
        Command::Accounts(args) => accounts::exec(args, config),
        Command::Deploy(args) => deploy::exec(args, config).await,
        Command::Votes(args) => votes::exec(args, config).await,
    }
}
