// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! ERC-20 with vote delegation.
//!
//! The eponymous [`Erc20`] type provides the standard token methods together with
//! the ERC-5805 voting surface: balances only count as voting power once their
//! holder delegates, and every balance movement moves voting units between the
//! delegates of the two parties. The clock is the block number.
//!
//! Token metadata is configured through the [`Erc20Params`] trait.

use alloc::string::String;
use alloy_primitives::{Address, U256};
use alloy_sol_types::sol;
use core::marker::PhantomData;
use stylus_sdk::{
    prelude::*,
    storage::{StorageAddress, StorageMap, StorageU256},
};

use crate::checkpoints::Trace;

pub trait Erc20Params {
    /// Immutable token name
    const NAME: &'static str;

    /// Immutable token symbol
    const SYMBOL: &'static str;

    /// Immutable token decimals
    const DECIMALS: u8;
}

/// Reported by `CLOCK_MODE()`.
pub const CLOCK_MODE: &str = "mode=blocknumber&from=default";

#[storage]
pub struct Erc20<T: Erc20Params> {
    /// Maps users to balances
    balances: StorageMap<Address, StorageU256>,
    /// Maps users to a mapping of each spender's allowance
    allowances: StorageMap<Address, StorageMap<Address, StorageU256>>,
    /// The total supply of the token
    total_supply: StorageU256,
    /// Maps users to the account voting on their behalf
    delegates: StorageMap<Address, StorageAddress>,
    /// Voting power history per delegate
    delegate_checkpoints: StorageMap<Address, Trace>,
    /// Total supply history
    total_supply_checkpoints: Trace,
    phantom: PhantomData<T>,
}

sol! {
    event Transfer(address indexed from, address indexed to, uint256 value);
    event Approval(address indexed owner, address indexed spender, uint256 value);
    event DelegateChanged(address indexed delegator, address indexed from_delegate, address indexed to_delegate);
    event DelegateVotesChanged(address indexed delegate, uint256 previous_votes, uint256 new_votes);

    #[derive(Debug)]
    error InsufficientBalance(address from, uint256 have, uint256 want);
    #[derive(Debug)]
    error InsufficientAllowance(address owner, address spender, uint256 have, uint256 want);
    #[derive(Debug)]
    error InvalidReceiver(address receiver);
    #[derive(Debug)]
    error ERC5805FutureLookup(uint256 timepoint, uint64 clock);
    #[derive(Debug)]
    error CheckpointOutOfBounds(address account, uint32 pos);
    #[derive(Debug)]
    error SupplyOverflow(uint256 supply, uint256 value);
}

#[derive(SolidityError, Debug)]
pub enum Erc20Error {
    InsufficientBalance(InsufficientBalance),
    InsufficientAllowance(InsufficientAllowance),
    InvalidReceiver(InvalidReceiver),
    ERC5805FutureLookup(ERC5805FutureLookup),
    CheckpointOutOfBounds(CheckpointOutOfBounds),
    SupplyOverflow(SupplyOverflow),
}

// Helpers used by the public methods and by the token contract.
impl<T: Erc20Params> Erc20<T> {
    /// Moves `value` tokens from `from` to `to`, neither of which may be zero.
    pub fn _transfer(&mut self, from: Address, to: Address, value: U256) -> Result<(), Erc20Error> {
        if to.is_zero() {
            return Err(Erc20Error::InvalidReceiver(InvalidReceiver { receiver: to }));
        }
        self.update(from, to, value)
    }

    /// Mints `value` tokens to `to`
    pub fn mint(&mut self, to: Address, value: U256) -> Result<(), Erc20Error> {
        if to.is_zero() {
            return Err(Erc20Error::InvalidReceiver(InvalidReceiver { receiver: to }));
        }
        self.update(Address::ZERO, to, value)
    }

    /// Burns `value` tokens from `from`
    pub fn burn(&mut self, from: Address, value: U256) -> Result<(), Erc20Error> {
        self.update(from, Address::ZERO, value)
    }

    /// Consumes `value` of the allowance `owner` gave to `spender`.
    pub fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
    ) -> Result<(), Erc20Error> {
        let mut owner_allowances = self.allowances.setter(owner);
        let mut allowance = owner_allowances.setter(spender);
        let old_allowance = allowance.get();
        if old_allowance == U256::MAX {
            return Ok(());
        }
        if old_allowance < value {
            return Err(Erc20Error::InsufficientAllowance(InsufficientAllowance {
                owner,
                spender,
                have: old_allowance,
                want: value,
            }));
        }
        allowance.set(old_allowance - value);
        Ok(())
    }

    /// Single path for every balance change. The zero address stands for
    /// minting (as `from`) and burning (as `to`).
    ///
    /// Balances and voting units never exceed the total supply, so bounding
    /// the supply on mint bounds every other addition below.
    fn update(&mut self, from: Address, to: Address, value: U256) -> Result<(), Erc20Error> {
        if from.is_zero() {
            let supply = self.total_supply.get();
            let new_supply = supply
                .checked_add(value)
                .ok_or(Erc20Error::SupplyOverflow(SupplyOverflow { supply, value }))?;
            self.total_supply.set(new_supply);
        } else {
            let mut from_balance = self.balances.setter(from);
            let old_from_balance = from_balance.get();
            if old_from_balance < value {
                return Err(Erc20Error::InsufficientBalance(InsufficientBalance {
                    from,
                    have: old_from_balance,
                    want: value,
                }));
            }
            from_balance.set(old_from_balance - value);
        }

        if to.is_zero() {
            self.total_supply.set(self.total_supply.get() - value);
        } else {
            let mut to_balance = self.balances.setter(to);
            let new_to_balance = to_balance.get() + value;
            to_balance.set(new_to_balance);
        }

        self.vm().log(Transfer { from, to, value });

        if from.is_zero() || to.is_zero() {
            let block = self.clock();
            let supply = self.total_supply.get();
            self.total_supply_checkpoints.push(block, supply);
        }
        self.move_delegate_votes(self.delegates.get(from), self.delegates.get(to), value);
        Ok(())
    }

    fn move_delegate_votes(&mut self, src: Address, dst: Address, amount: U256) {
        if src == dst || amount.is_zero() {
            return;
        }
        let block = self.clock();
        if !src.is_zero() {
            let mut trace = self.delegate_checkpoints.setter(src);
            let latest = trace.latest();
            let (previous_votes, new_votes) = trace.push(block, latest - amount);
            self.vm().log(DelegateVotesChanged {
                delegate: src,
                previous_votes,
                new_votes,
            });
        }
        if !dst.is_zero() {
            let mut trace = self.delegate_checkpoints.setter(dst);
            let latest = trace.latest();
            let (previous_votes, new_votes) = trace.push(block, latest + amount);
            self.vm().log(DelegateVotesChanged {
                delegate: dst,
                previous_votes,
                new_votes,
            });
        }
    }

    fn require_past(&self, timepoint: U256) -> Result<u64, Erc20Error> {
        let clock = self.clock();
        if timepoint >= U256::from(clock) {
            return Err(Erc20Error::ERC5805FutureLookup(ERC5805FutureLookup {
                timepoint,
                clock,
            }));
        }
        Ok(timepoint.to::<u64>())
    }
}

#[public]
impl<T: Erc20Params> Erc20<T> {
    /// Immutable token name
    pub fn name() -> String {
        T::NAME.into()
    }

    /// Immutable token symbol
    pub fn symbol() -> String {
        T::SYMBOL.into()
    }

    /// Immutable token decimals
    pub fn decimals() -> u8 {
        T::DECIMALS
    }

    /// Total supply of tokens
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get()
    }

    /// Balance of `owner`
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(owner)
    }

    /// Transfers `value` tokens from the caller to `to`
    pub fn transfer(&mut self, to: Address, value: U256) -> Result<bool, Erc20Error> {
        self._transfer(self.vm().msg_sender(), to, value)?;
        Ok(true)
    }

    /// Transfers `value` tokens from `from` to `to`
    /// (the caller must be able to spend at least `value` tokens from `from`)
    pub fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Erc20Error> {
        self.spend_allowance(from, self.vm().msg_sender(), value)?;
        self._transfer(from, to, value)?;
        Ok(true)
    }

    /// Lets `spender` move up to `value` of the caller's tokens
    pub fn approve(&mut self, spender: Address, value: U256) -> bool {
        let owner = self.vm().msg_sender();
        self.allowances.setter(owner).insert(spender, value);
        self.vm().log(Approval {
            owner,
            spender,
            value,
        });
        true
    }

    /// Returns the allowance of `spender` on `owner`'s tokens
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.getter(owner).get(spender)
    }

    /// Current block number, the clock for every checkpoint.
    pub fn clock(&self) -> u64 {
        self.vm().block_number()
    }

    #[selector(name = "CLOCK_MODE")]
    pub fn clock_mode() -> String {
        CLOCK_MODE.into()
    }

    /// Account voting with `account`'s balance, zero when undelegated.
    pub fn delegates(&self, account: Address) -> Address {
        self.delegates.get(account)
    }

    /// Makes `delegatee` vote with the caller's balance.
    pub fn delegate(&mut self, delegatee: Address) {
        let delegator = self.vm().msg_sender();
        let from_delegate = self.delegates.get(delegator);
        self.delegates.insert(delegator, delegatee);
        self.vm().log(DelegateChanged {
            delegator,
            from_delegate,
            to_delegate: delegatee,
        });
        let units = self.balances.get(delegator);
        self.move_delegate_votes(from_delegate, delegatee, units);
    }

    pub fn get_votes(&self, account: Address) -> U256 {
        self.delegate_checkpoints.getter(account).latest()
    }

    /// Votes `account` had at the end of block `timepoint`, which must be in the past.
    pub fn get_past_votes(&self, account: Address, timepoint: U256) -> Result<U256, Erc20Error> {
        let block = self.require_past(timepoint)?;
        Ok(self.delegate_checkpoints.getter(account).upper_lookup(block))
    }

    /// Total supply at the end of block `timepoint`, which must be in the past.
    pub fn get_past_total_supply(&self, timepoint: U256) -> Result<U256, Erc20Error> {
        let block = self.require_past(timepoint)?;
        Ok(self.total_supply_checkpoints.upper_lookup(block))
    }

    pub fn num_checkpoints(&self, account: Address) -> u32 {
        self.delegate_checkpoints.getter(account).len() as u32
    }

    /// The `pos`-th checkpoint of `account`, as `(block, votes)`.
    pub fn checkpoints(&self, account: Address, pos: u32) -> Result<(u64, U256), Erc20Error> {
        self.delegate_checkpoints
            .getter(account)
            .at(pos as usize)
            .ok_or(Erc20Error::CheckpointOutOfBounds(CheckpointOutOfBounds {
                account,
                pos,
            }))
    }
}
