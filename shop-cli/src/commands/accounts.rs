// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use shop_tools::Accounts;

use crate::{common_args::NetworkArgs, error::ShopCliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    network: NetworkArgs,
}

pub fn exec(args: Args, config: &Path) -> ShopCliResult {
    let (_, network) = args.network.load(config)?;
    let accounts = Accounts::from_network(&network)?;
    for address in accounts.addresses() {
        println!("{address}");
    }
    Ok(())
}
