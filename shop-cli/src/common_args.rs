// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use alloy::primitives::Address;
use shop_tools::{config::LOCALHOST, Network, ShopConfig};

#[derive(Debug, clap::Args)]
pub struct NetworkArgs {
    /// Name of the network to use
    #[arg(long, default_value = LOCALHOST)]
    pub network: String,
}

impl NetworkArgs {
    pub fn load(&self, config: &Path) -> shop_tools::Result<(ShopConfig, Network)> {
        let config = ShopConfig::load(config)?;
        let network = config.network(&self.network)?;
        log::debug!("using network {} at {}", network.name, network.url);
        Ok((config, network))
    }
}

#[derive(Debug, clap::Args)]
pub struct DeployerArgs {
    /// The Stylus deployer contract, when the network does not use the default one
    #[arg(long, value_name = "DEPLOYER_ADDRESS")]
    pub deployer_address: Option<Address>,
}
