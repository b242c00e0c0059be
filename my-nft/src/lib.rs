// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

// Only run this as a WASM if the export-abi feature is not set.
#![cfg_attr(not(any(feature = "export-abi", test)), no_main)]
extern crate alloc;

pub mod erc721;

use crate::erc721::{Erc721, Erc721Params};
use alloc::{format, string::String, vec::Vec};
use alloy_primitives::{Address, FixedBytes, U256};
use shop_access::{AccessControl, DEFAULT_ADMIN_ROLE, MINTER_ROLE};
use stylus_sdk::prelude::*;

/// Immutable definitions
pub struct MyNftParams;
impl Erc721Params for MyNftParams {
    const NAME: &'static str = "MyNFT";
    const SYMBOL: &'static str = "NFT";

    fn token_uri(token_id: U256) -> String {
        format!("https://my-nft-metadata.com/{token_id}.json")
    }
}

sol_storage! {
    #[entrypoint]
    pub struct MyNft {
        #[borrow]
        Erc721<MyNftParams> erc721;
        #[borrow]
        AccessControl access;
    }
}

#[public]
#[inherit(Erc721<MyNftParams>, AccessControl)]
impl MyNft {
    #[constructor]
    pub fn constructor(&mut self) {
        let deployer = self.vm().tx_origin();
        self.access
            .grant_role_unchecked(FixedBytes(DEFAULT_ADMIN_ROLE), deployer);
        self.access
            .grant_role_unchecked(FixedBytes(MINTER_ROLE), deployer);
    }

    /// Mints `token_id` to `to`; the caller needs the minter role.
    pub fn safe_mint(&mut self, to: Address, token_id: U256) -> Result<(), Vec<u8>> {
        self.access.only_role(FixedBytes(MINTER_ROLE))?;
        Erc721::<MyNftParams>::safe_mint(self, to, token_id)?;
        Ok(())
    }

    /// Burns `token_id`; the caller must own it or be approved for it.
    pub fn burn(&mut self, token_id: U256) -> Result<(), Vec<u8>> {
        self.erc721.burn(token_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::erc721::Erc721Error;
    use alloy_primitives::address;
    use alloy_sol_types::{sol, SolCall, SolValue};
    use stylus_sdk::testing::*;

    sol! {
        function onERC721Received(address operator, address from, uint256 token_id, bytes data) external returns (bytes4);
    }

    const DEPLOYER: Address = address!("0x00000000000000000000000000000000000000d1");
    const SALE: Address = address!("0x0000000000000000000000000000000000005a1e");
    const ALICE: Address = address!("0x00000000000000000000000000000000000000a1");

    fn deploy() -> (TestVM, MyNft) {
        let vm = TestVM::new();
        vm.set_sender(DEPLOYER);
        let mut nft = MyNft::from(&vm);
        nft.constructor();
        (vm, nft)
    }

    #[test]
    fn metadata() {
        let (_vm, nft) = deploy();
        assert_eq!(Erc721::<MyNftParams>::name().unwrap(), "MyNFT");
        assert_eq!(Erc721::<MyNftParams>::symbol().unwrap(), "NFT");
        assert!(nft.erc721.token_uri(U256::from(1)).is_err());
    }

    #[test]
    fn only_minters_mint() {
        let (vm, mut nft) = deploy();
        let id = U256::from(7);

        vm.set_sender(SALE);
        assert!(nft.safe_mint(ALICE, id).is_err());

        vm.set_sender(DEPLOYER);
        nft.access.grant_role(FixedBytes(MINTER_ROLE), SALE).unwrap();

        vm.set_sender(SALE);
        nft.safe_mint(ALICE, id).unwrap();
        assert_eq!(nft.erc721.owner_of(id).unwrap(), ALICE);
        assert_eq!(nft.erc721.total_supply().unwrap(), U256::from(1));
        assert_eq!(
            nft.erc721.token_uri(id).unwrap(),
            "https://my-nft-metadata.com/7.json"
        );
        assert!(nft.safe_mint(ALICE, id).is_err());
    }

    #[test]
    fn safe_mint_to_contract_checks_receiver() {
        let (vm, mut nft) = deploy();
        let receiver = address!("0x00000000000000000000000000000000000000cc");
        vm.set_code(receiver, vec![0x60, 0x00]);

        let call = onERC721ReceivedCall {
            operator: DEPLOYER,
            from: Address::ZERO,
            token_id: U256::from(1),
            data: Default::default(),
        }
        .abi_encode();
        let accepted = FixedBytes::<4>::from(0x150b7a02_u32.to_be_bytes());
        vm.mock_call(receiver, call, U256::ZERO, Ok(accepted.abi_encode()));
        nft.safe_mint(receiver, U256::from(1)).unwrap();
        assert_eq!(nft.erc721.owner_of(U256::from(1)).unwrap(), receiver);

        let call = onERC721ReceivedCall {
            operator: DEPLOYER,
            from: Address::ZERO,
            token_id: U256::from(2),
            data: Default::default(),
        }
        .abi_encode();
        let refused = FixedBytes::<4>::from(0xdeadbeef_u32.to_be_bytes());
        vm.mock_call(receiver, call, U256::ZERO, Ok(refused.abi_encode()));
        let err = Erc721::<MyNftParams>::safe_mint(&mut nft, receiver, U256::from(2)).unwrap_err();
        assert!(matches!(err, Erc721Error::ReceiverRefused(_)));
    }

    #[test]
    fn owner_burns() {
        let (vm, mut nft) = deploy();
        let id = U256::from(11);
        nft.safe_mint(ALICE, id).unwrap();

        assert!(nft.burn(id).is_err());

        vm.set_sender(ALICE);
        nft.burn(id).unwrap();
        assert!(nft.erc721.owner_of(id).is_err());
        assert_eq!(nft.erc721.balance_of(ALICE).unwrap(), U256::ZERO);
        assert_eq!(nft.erc721.total_supply().unwrap(), U256::ZERO);
    }
}
