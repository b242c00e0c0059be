// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use alloy::primitives::U256;
use shop_tools::{
    connect,
    fixture::{TEST_PRICE, TEST_RATIO},
    ShopFixture,
};

use crate::{
    common_args::{DeployerArgs, NetworkArgs},
    error::ShopCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Payment tokens issued per wei
    #[arg(long, default_value_t = U256::from(TEST_RATIO))]
    ratio: U256,
    /// NFT price in payment tokens
    #[arg(long, default_value_t = U256::from(TEST_PRICE))]
    price: U256,

    #[command(flatten)]
    network: NetworkArgs,
    #[command(flatten)]
    deployer: DeployerArgs,
}

pub async fn exec(args: Args, config: &Path) -> ShopCliResult {
    let (config, network) = args.network.load(config)?;
    let conn = connect(&network).await?;
    let fixture = ShopFixture::deploy(
        &conn,
        &config.contracts_dir,
        args.deployer.deployer_address,
        args.ratio,
        args.price,
    )
    .await?;

    println!("MyToken deployed at {}", fixture.token_address());
    println!("MyNFT deployed at {}", fixture.nft_address());
    println!(
        "TokenSale deployed at {} (ratio {}, price {})",
        fixture.sale_address(),
        args.ratio,
        args.price
    );
    Ok(())
}
