// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

#[cfg(feature = "integration-tests")]
mod integration_test {
    use alloy::primitives::{FixedBytes, U256};
    use eyre::Result;
    use my_nft::{erc721::Erc721Params, MyNftParams};
    use shop_access::MINTER_ROLE;
    use shop_tools::{
        bindings::IMyNft,
        confirm, connect,
        devnet::{addresses::STYLUS_DEPLOYER, Node},
        Deployer,
    };

    #[tokio::test]
    async fn mint_transfer_burn() -> Result<()> {
        let node = Node::new().await?;
        let conn = connect(&node.network(2).await?).await?;
        let owner = conn.accounts.default_address();
        let alice = conn.accounts.address(1).ok_or_else(|| eyre::eyre!("no alice"))?;
        let bob = conn.accounts.address(2).ok_or_else(|| eyre::eyre!("no bob"))?;

        println!("Deploying collection to Nitro ({})...", node.rpc());
        let deployment = Deployer::builder()
            .rpc(node.rpc())
            .dir(env!("CARGO_MANIFEST_DIR"))
            .private_key(conn.accounts.default_private_key())
            .stylus_deployer(Some(STYLUS_DEPLOYER))
            .constructor_args(Some(vec![]))
            .build()
            .deploy_async()
            .await?;
        let nft = IMyNft::new(deployment.address, conn.provider.clone());

        assert_eq!(nft.name().call().await?, MyNftParams::NAME);
        assert_eq!(nft.symbol().call().await?, MyNftParams::SYMBOL);
        assert!(nft.hasRole(FixedBytes(MINTER_ROLE), owner).call().await?);

        let id = U256::from(42);
        confirm(nft.safeMint(alice, id).send().await?).await?;
        assert_eq!(nft.ownerOf(id).call().await?, alice);
        assert_eq!(nft.totalSupply().call().await?, U256::from(1));
        assert_eq!(
            nft.tokenURI(id).call().await?,
            "https://my-nft-metadata.com/42.json"
        );

        // Only minters mint, and ids are unique
        assert!(nft.safeMint(alice, U256::from(1)).from(alice).send().await.is_err());
        assert!(nft.safeMint(bob, id).send().await.is_err());

        confirm(nft.transferFrom(alice, bob, id).from(alice).send().await?).await?;
        assert_eq!(nft.ownerOf(id).call().await?, bob);

        // Strangers cannot burn
        assert!(nft.burn(id).from(alice).send().await.is_err());
        confirm(nft.burn(id).from(bob).send().await?).await?;
        assert!(nft.ownerOf(id).call().await.is_err());
        assert_eq!(nft.totalSupply().call().await?, U256::ZERO);
        Ok(())
    }
}
