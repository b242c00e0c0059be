// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

// Only run this as a WASM if the export-abi feature is not set.
#![cfg_attr(not(any(feature = "export-abi", test)), no_main)]
extern crate alloc;

pub mod checkpoints;
pub mod erc20;

use crate::erc20::{Erc20, Erc20Params};
use alloc::vec::Vec;
use alloy_primitives::{Address, FixedBytes, B256, U256};
use shop_access::{AccessControl, DEFAULT_ADMIN_ROLE, MINTER_ROLE};
use stylus_sdk::prelude::*;

/// Minted at deployment to the deployer and again to the token contract itself.
pub const INITIAL_SUPPLY: u64 = 10 * 10u64.pow(8);

/// Immutable definitions
pub struct MyTokenParams;
impl Erc20Params for MyTokenParams {
    const NAME: &'static str = "MyToken";
    const SYMBOL: &'static str = "MTK";
    const DECIMALS: u8 = 18;
}

#[storage]
#[entrypoint]
pub struct MyToken {
    #[borrow]
    erc20: Erc20<MyTokenParams>,
    #[borrow]
    access: AccessControl,
}

#[public]
#[inherit(Erc20<MyTokenParams>, AccessControl)]
impl MyToken {
    /// Makes the deploying account admin and minter, and seeds the initial supply.
    #[constructor]
    pub fn constructor(&mut self) -> Result<(), Vec<u8>> {
        // Deployment goes through a factory contract, so the deployer is the tx origin.
        let deployer = self.vm().tx_origin();
        self.access
            .grant_role_unchecked(FixedBytes(DEFAULT_ADMIN_ROLE), deployer);
        self.access
            .grant_role_unchecked(FixedBytes(MINTER_ROLE), deployer);

        let supply = U256::from(INITIAL_SUPPLY);
        self.erc20.mint(deployer, supply)?;
        let this = self.vm().contract_address();
        self.erc20.mint(this, supply)?;
        Ok(())
    }

    #[selector(name = "MINTER_ROLE")]
    pub fn minter_role() -> B256 {
        FixedBytes(MINTER_ROLE)
    }

    /// Mints `amount` tokens to `to`; the caller needs the minter role.
    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), Vec<u8>> {
        self.access.only_role(FixedBytes(MINTER_ROLE))?;
        self.erc20.mint(to, amount)?;
        Ok(())
    }

    /// Burns `amount` of the caller's tokens.
    pub fn burn(&mut self, amount: U256) -> Result<(), Vec<u8>> {
        let owner = self.vm().msg_sender();
        self.erc20.burn(owner, amount)?;
        Ok(())
    }

    /// Burns `amount` of `account`'s tokens out of the caller's allowance.
    pub fn burn_from(&mut self, account: Address, amount: U256) -> Result<(), Vec<u8>> {
        let spender = self.vm().msg_sender();
        self.erc20.spend_allowance(account, spender, amount)?;
        self.erc20.burn(account, amount)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::erc20::DelegateChanged;
    use alloy_primitives::address;
    use alloy_sol_types::SolEvent;
    use stylus_sdk::testing::*;

    const DEPLOYER: Address = address!("0x00000000000000000000000000000000000000d1");
    const ALICE: Address = address!("0x00000000000000000000000000000000000000a1");
    const BOB: Address = address!("0x00000000000000000000000000000000000000b2");
    const TOKEN: Address = address!("0x0000000000000000000000000000000000000c01");

    fn deploy() -> (TestVM, MyToken) {
        let vm = TestVM::new();
        vm.set_sender(DEPLOYER);
        vm.set_contract_address(TOKEN);
        vm.set_block_number(1);
        let mut token = MyToken::from(&vm);
        token.constructor().unwrap();
        (vm, token)
    }

    #[test]
    fn constructor_seeds_supply_and_roles() {
        let (_vm, token) = deploy();
        let initial = U256::from(INITIAL_SUPPLY);

        assert_eq!(token.erc20.total_supply(), initial * U256::from(2));
        assert_eq!(token.erc20.balance_of(DEPLOYER), initial);
        assert_eq!(token.erc20.balance_of(TOKEN), initial);
        assert!(token.access.has_role(FixedBytes(MINTER_ROLE), DEPLOYER));
        assert!(token.access.has_role(FixedBytes(DEFAULT_ADMIN_ROLE), DEPLOYER));
    }

    #[test]
    fn metadata() {
        assert_eq!(Erc20::<MyTokenParams>::name(), "MyToken");
        assert_eq!(Erc20::<MyTokenParams>::symbol(), "MTK");
        assert_eq!(Erc20::<MyTokenParams>::decimals(), 18);
    }

    #[test]
    fn only_minters_mint() {
        let (vm, mut token) = deploy();

        vm.set_sender(ALICE);
        assert!(token.mint(ALICE, U256::from(5)).is_err());

        vm.set_sender(DEPLOYER);
        token.access.grant_role(FixedBytes(MINTER_ROLE), ALICE).unwrap();

        vm.set_sender(ALICE);
        token.mint(BOB, U256::from(5)).unwrap();
        assert_eq!(token.erc20.balance_of(BOB), U256::from(5));
    }

    #[test]
    fn transfer_moves_balance() {
        let (vm, mut token) = deploy();
        vm.set_sender(DEPLOYER);

        assert!(token.erc20.transfer(ALICE, U256::from(400)).unwrap());
        assert_eq!(token.erc20.balance_of(ALICE), U256::from(400));
        assert_eq!(
            token.erc20.balance_of(DEPLOYER),
            U256::from(INITIAL_SUPPLY - 400)
        );

        vm.set_sender(ALICE);
        assert!(token.erc20.transfer(BOB, U256::from(401)).is_err());
        assert!(token.erc20.transfer(Address::ZERO, U256::from(1)).is_err());
    }

    #[test]
    fn burn_from_spends_allowance() {
        let (vm, mut token) = deploy();
        let supply = token.erc20.total_supply();

        vm.set_sender(DEPLOYER);
        token.erc20.approve(ALICE, U256::from(300));

        vm.set_sender(ALICE);
        assert!(token.burn_from(DEPLOYER, U256::from(301)).is_err());
        token.burn_from(DEPLOYER, U256::from(100)).unwrap();

        assert_eq!(token.erc20.allowance(DEPLOYER, ALICE), U256::from(200));
        assert_eq!(token.erc20.total_supply(), supply - U256::from(100));
        assert_eq!(
            token.erc20.balance_of(DEPLOYER),
            U256::from(INITIAL_SUPPLY - 100)
        );
    }

    #[test]
    fn transfer_from_with_allowance() {
        let (vm, mut token) = deploy();

        vm.set_sender(DEPLOYER);
        token.erc20.approve(ALICE, U256::from(50));

        vm.set_sender(ALICE);
        token
            .erc20
            .transfer_from(DEPLOYER, BOB, U256::from(50))
            .unwrap();
        assert_eq!(token.erc20.balance_of(BOB), U256::from(50));
        assert_eq!(token.erc20.allowance(DEPLOYER, ALICE), U256::ZERO);
        assert!(token
            .erc20
            .transfer_from(DEPLOYER, BOB, U256::from(1))
            .is_err());
    }

    #[test]
    fn votes_follow_delegation_and_transfers() {
        let (vm, mut token) = deploy();
        let mint_value = U256::from(10);

        vm.set_block_number(2);
        vm.set_sender(DEPLOYER);
        token.mint(ALICE, mint_value).unwrap();
        assert_eq!(token.erc20.get_votes(ALICE), U256::ZERO);

        vm.set_block_number(3);
        vm.set_sender(ALICE);
        token.erc20.delegate(ALICE);
        assert_eq!(token.erc20.delegates(ALICE), ALICE);
        assert_eq!(token.erc20.get_votes(ALICE), mint_value);

        vm.set_block_number(4);
        token.erc20.transfer(BOB, U256::from(5)).unwrap();
        assert_eq!(token.erc20.get_votes(ALICE), U256::from(5));
        assert_eq!(token.erc20.get_votes(BOB), U256::ZERO);

        vm.set_block_number(5);
        vm.set_sender(BOB);
        token.erc20.delegate(BOB);
        assert_eq!(token.erc20.get_votes(BOB), U256::from(5));

        vm.set_block_number(6);
        let past = |block: u64| token.erc20.get_past_votes(ALICE, U256::from(block)).unwrap();
        assert_eq!(past(2), U256::ZERO);
        assert_eq!(past(3), mint_value);
        assert_eq!(past(4), U256::from(5));
        assert_eq!(past(5), U256::from(5));
        assert_eq!(token.erc20.num_checkpoints(ALICE), 2);
        assert_eq!(token.erc20.checkpoints(ALICE, 0).unwrap(), (3, mint_value));
        assert!(token.erc20.checkpoints(ALICE, 2).is_err());
    }

    #[test]
    fn mint_and_burn_move_delegated_votes() {
        let (vm, mut token) = deploy();
        let initial_supply = U256::from(2 * INITIAL_SUPPLY);

        vm.set_block_number(2);
        vm.set_sender(ALICE);
        token.erc20.delegate(ALICE);
        assert_eq!(token.erc20.get_votes(ALICE), U256::ZERO);

        vm.set_block_number(3);
        vm.set_sender(DEPLOYER);
        token.mint(ALICE, U256::from(100)).unwrap();
        assert_eq!(token.erc20.get_votes(ALICE), U256::from(100));

        vm.set_block_number(4);
        vm.set_sender(ALICE);
        assert!(token.burn(U256::from(101)).is_err());
        token.burn(U256::from(40)).unwrap();
        assert_eq!(token.erc20.balance_of(ALICE), U256::from(60));
        assert_eq!(token.erc20.get_votes(ALICE), U256::from(60));

        vm.set_block_number(5);
        let votes = |block: u64| token.erc20.get_past_votes(ALICE, U256::from(block)).unwrap();
        assert_eq!(votes(2), U256::ZERO);
        assert_eq!(votes(3), U256::from(100));
        assert_eq!(votes(4), U256::from(60));

        let supply = |block: u64| token.erc20.get_past_total_supply(U256::from(block)).unwrap();
        assert_eq!(supply(2), initial_supply);
        assert_eq!(supply(3), initial_supply + U256::from(100));
        assert_eq!(supply(4), initial_supply + U256::from(60));
        assert_eq!(token.erc20.total_supply(), initial_supply + U256::from(60));
    }

    #[test]
    fn mint_rejects_supply_overflow() {
        let (vm, mut token) = deploy();
        let supply = token.erc20.total_supply();
        vm.set_sender(DEPLOYER);

        let err = token.mint(ALICE, U256::MAX).unwrap_err();
        let expected: Vec<u8> = erc20::Erc20Error::SupplyOverflow(erc20::SupplyOverflow {
            supply,
            value: U256::MAX,
        })
        .into();
        assert_eq!(err, expected);
        assert_eq!(token.erc20.total_supply(), supply);
        assert_eq!(token.erc20.balance_of(ALICE), U256::ZERO);
    }

    #[test]
    fn past_lookups_reject_current_block() {
        let (vm, token) = deploy();
        vm.set_block_number(7);

        assert!(token.erc20.get_past_votes(ALICE, U256::from(7)).is_err());
        assert!(token.erc20.get_past_total_supply(U256::from(8)).is_err());
        assert_eq!(
            token.erc20.get_past_total_supply(U256::from(6)).unwrap(),
            U256::from(2 * INITIAL_SUPPLY)
        );
        assert_eq!(token.erc20.get_past_total_supply(U256::ZERO).unwrap(), U256::ZERO);
    }

    #[test]
    fn delegation_in_same_block_overwrites_checkpoint() {
        let (vm, mut token) = deploy();
        vm.set_sender(DEPLOYER);
        token.erc20.delegate(DEPLOYER);
        token.erc20.delegate(ALICE);

        assert_eq!(token.erc20.get_votes(DEPLOYER), U256::ZERO);
        assert_eq!(token.erc20.num_checkpoints(DEPLOYER), 1);
        assert_eq!(token.erc20.get_votes(ALICE), U256::from(INITIAL_SUPPLY));

        let delegate_changed = vm
            .get_emitted_logs()
            .iter()
            .filter(|(topics, _)| topics[0] == DelegateChanged::SIGNATURE_HASH)
            .count();
        assert_eq!(delegate_changed, 2);
    }
}
