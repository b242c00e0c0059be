// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use alloy::{
    primitives::{Address, U256},
    providers::DynProvider,
};

use crate::{
    bindings::{
        IMyNft::{self, IMyNftInstance},
        IMyToken::{self, IMyTokenInstance},
        ITokenSale::{self, ITokenSaleInstance},
    },
    confirm, Connection, Deployer, Deployment, Result,
};

pub const TEST_RATIO: u64 = 100;
pub const TEST_PRICE: u64 = 10;
/// 10 ether.
pub const TEST_ETH_PAYMENT_SIZE: U256 = U256::from_limbs([10_000_000_000_000_000_000, 0, 0, 0]);

const TOKEN_CRATE: &str = "my-token";
const NFT_CRATE: &str = "my-nft";
const SALE_CRATE: &str = "token-sale";

/// The three shop contracts, deployed and wired together.
#[derive(Clone)]
pub struct ShopFixture {
    pub token: IMyTokenInstance<DynProvider>,
    pub nft: IMyNftInstance<DynProvider>,
    pub sale: ITokenSaleInstance<DynProvider>,
    pub token_deployment: Deployment,
    pub nft_deployment: Deployment,
    pub sale_deployment: Deployment,
}

impl ShopFixture {
    /// Deploys `MyToken`, `MyNFT` and `TokenSale(ratio, price, token, nft)` from
    /// the default account, then lets the sale mint on both contracts.
    pub async fn deploy(
        conn: &Connection,
        contracts_dir: &Path,
        stylus_deployer: Option<Address>,
        ratio: U256,
        price: U256,
    ) -> Result<Self> {
        let deployer = |name: &str, args: Vec<String>| {
            Deployer::builder()
                .rpc(conn.network.url.clone())
                .dir(contracts_dir.join(name))
                .private_key(conn.accounts.default_private_key())
                .stylus_deployer(stylus_deployer)
                .constructor_args(Some(args))
                .build()
        };

        let token_deployment = deployer(TOKEN_CRATE, vec![]).deploy_async().await?;
        let nft_deployment = deployer(NFT_CRATE, vec![]).deploy_async().await?;
        let sale_deployment = deployer(
            SALE_CRATE,
            vec![
                ratio.to_string(),
                price.to_string(),
                token_deployment.address.to_string(),
                nft_deployment.address.to_string(),
            ],
        )
        .deploy_async()
        .await?;

        let provider = conn.provider.clone();
        let fixture = Self {
            token: IMyToken::new(token_deployment.address, provider.clone()),
            nft: IMyNft::new(nft_deployment.address, provider.clone()),
            sale: ITokenSale::new(sale_deployment.address, provider),
            token_deployment,
            nft_deployment,
            sale_deployment,
        };

        let minter = fixture.token.MINTER_ROLE().call().await?;
        let sale = fixture.sale_address();
        confirm(fixture.token.grantRole(minter, sale).send().await?).await?;
        confirm(fixture.nft.grantRole(minter, sale).send().await?).await?;
        log::info!("granted the minter role on token and collection to the sale at {sale}");

        Ok(fixture)
    }

    /// Deploys with [`TEST_RATIO`] and [`TEST_PRICE`].
    pub async fn deploy_for_tests(
        conn: &Connection,
        contracts_dir: &Path,
        stylus_deployer: Option<Address>,
    ) -> Result<Self> {
        Self::deploy(
            conn,
            contracts_dir,
            stylus_deployer,
            U256::from(TEST_RATIO),
            U256::from(TEST_PRICE),
        )
        .await
    }

    pub fn token_address(&self) -> Address {
        *self.token.address()
    }

    pub fn nft_address(&self) -> Address {
        *self.nft.address()
    }

    pub fn sale_address(&self) -> Address {
        *self.sale.address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_size_is_ten_ether() {
        let ether = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(TEST_ETH_PAYMENT_SIZE, U256::from(10u64) * ether);
    }
}
