// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use alloy::primitives::Address;
use shop_tools::{bindings::IMyToken, connect, scenario::votes, Accounts, Deployer};

use crate::{
    common_args::{DeployerArgs, NetworkArgs},
    error::ShopCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Use an already deployed token instead of deploying a fresh one
    #[arg(long)]
    token: Option<Address>,

    #[command(flatten)]
    network: NetworkArgs,
    #[command(flatten)]
    deployer: DeployerArgs,
}

pub async fn exec(args: Args, config: &Path) -> ShopCliResult {
    let (config, network) = args.network.load(config)?;
    Accounts::from_network(&network)?.require(3)?;
    let conn = connect(&network).await?;

    let address = match args.token {
        Some(address) => {
            println!("Using token contract at {address}\n");
            address
        }
        None => {
            let deployment = Deployer::builder()
                .rpc(network.url.clone())
                .dir(config.contracts_dir.join("my-token"))
                .private_key(conn.accounts.default_private_key())
                .stylus_deployer(args.deployer.deployer_address)
                .constructor_args(Some(vec![]))
                .build()
                .deploy_async()
                .await?;
            println!("Token contract deployed at {}\n", deployment.address);
            deployment.address
        }
    };

    let token = IMyToken::new(address, conn.provider.clone());
    // A fresh token has no history before its deployment
    let since = match args.token {
        Some(_) => 1,
        None => token.clock().call().await.map_err(shop_tools::Error::from)?,
    };
    let report = votes::run(&conn, &token, since).await?;
    log::debug!("{report:?}");
    Ok(())
}
