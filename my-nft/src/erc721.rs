// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! ERC-721 with caller-chosen token ids.
//!
//! [`Erc721`] provides the standard methods and is meant to be inherited by the
//! collection contract, which decides who may mint. Token ids are picked by the
//! minter, so `total_supply` counts live tokens instead of handing out the next id.
//!
//! Name, symbol and token URI come from the [`Erc721Params`] trait.

use alloc::{string::String, vec, vec::Vec};
use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::sol;
use core::{borrow::BorrowMut, marker::PhantomData};
use stylus_sdk::stylus_core::calls::Call;
use stylus_sdk::{abi::Bytes, prelude::*};

pub trait Erc721Params {
    /// Immutable NFT name.
    const NAME: &'static str;

    /// Immutable NFT symbol.
    const SYMBOL: &'static str;

    /// The NFT's Uniform Resource Identifier.
    fn token_uri(token_id: U256) -> String;
}

sol_storage! {
    pub struct Erc721<T> {
        /// Token id to owner map
        mapping(uint256 => address) owners;
        /// User to balance map
        mapping(address => uint256) balances;
        /// Token id to approved user map
        mapping(uint256 => address) token_approvals;
        /// User to operator map (the operator can manage all NFTs of the owner)
        mapping(address => mapping(address => bool)) operator_approvals;
        /// Number of tokens in existence
        uint256 total_supply;
        PhantomData<T> phantom;
    }
}

sol! {
    event Transfer(address indexed from, address indexed to, uint256 indexed token_id);
    event Approval(address indexed owner, address indexed approved, uint256 indexed token_id);
    event ApprovalForAll(address indexed owner, address indexed operator, bool approved);

    // Token id has not been minted, or it has been burned
    #[derive(Debug)]
    error InvalidTokenId(uint256 token_id);
    // The specified address is not the owner of the specified token id
    #[derive(Debug)]
    error NotOwner(address from, uint256 token_id, address real_owner);
    // The specified address does not have allowance to spend the specified token id
    #[derive(Debug)]
    error NotApproved(address owner, address spender, uint256 token_id);
    // Attempt to transfer token id to the Zero address
    #[derive(Debug)]
    error TransferToZero(uint256 token_id);
    // The receiver address refused to receive the specified token id
    #[derive(Debug)]
    error ReceiverRefused(address receiver, uint256 token_id, bytes4 returned);
    // Attempt to mint a token id that already has an owner
    #[derive(Debug)]
    error TokenAlreadyMinted(uint256 token_id);
}

#[derive(SolidityError, Debug)]
pub enum Erc721Error {
    InvalidTokenId(InvalidTokenId),
    NotOwner(NotOwner),
    NotApproved(NotApproved),
    TransferToZero(TransferToZero),
    ReceiverRefused(ReceiverRefused),
    TokenAlreadyMinted(TokenAlreadyMinted),
}

sol_interface! {
    interface IERC721TokenReceiver {
        function onERC721Received(address operator, address from, uint256 token_id, bytes data) external returns(bytes4);
    }
}

/// Returned by `onERC721Received` when the receiver accepts the token.
const ERC721_TOKEN_RECEIVER_ID: u32 = 0x150b7a02;

impl<T: Erc721Params> Erc721<T> {
    /// Fails unless `msg_sender` is the owner of `token_id`, its approved
    /// account, or an operator of its owner. `from` must be the owner.
    pub fn require_authorized_to_spend(
        &self,
        from: Address,
        token_id: U256,
    ) -> Result<(), Erc721Error> {
        let owner = self.owner_of(token_id)?;
        if from != owner {
            return Err(Erc721Error::NotOwner(NotOwner {
                from,
                token_id,
                real_owner: owner,
            }));
        }

        let msg_sender = self.vm().msg_sender();
        if msg_sender == owner
            || self.operator_approvals.getter(owner).get(msg_sender)
            || msg_sender == self.token_approvals.get(token_id)
        {
            return Ok(());
        }

        Err(Erc721Error::NotApproved(NotApproved {
            owner,
            spender: msg_sender,
            token_id,
        }))
    }

    /// Moves `token_id` from `from` to `to`, where the zero address on either
    /// side stands for minting and burning. Checks ownership only.
    pub fn transfer(
        &mut self,
        token_id: U256,
        from: Address,
        to: Address,
    ) -> Result<(), Erc721Error> {
        let mut owner = self.owners.setter(token_id);
        let previous_owner = owner.get();
        if previous_owner != from {
            return Err(Erc721Error::NotOwner(NotOwner {
                from,
                token_id,
                real_owner: previous_owner,
            }));
        }
        owner.set(to);

        if from.is_zero() {
            self.total_supply.set(self.total_supply.get() + U256::from(1));
        } else {
            let mut from_balance = self.balances.setter(from);
            let balance = from_balance.get() - U256::from(1);
            from_balance.set(balance);
        }

        if to.is_zero() {
            self.total_supply.set(self.total_supply.get() - U256::from(1));
        } else {
            let mut to_balance = self.balances.setter(to);
            let balance = to_balance.get() + U256::from(1);
            to_balance.set(balance);
        }

        self.token_approvals.delete(token_id);

        self.vm().log(Transfer { from, to, token_id });
        Ok(())
    }

    /// Calls `onERC721Received` on `to` when it is a contract.
    fn call_receiver<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        token_id: U256,
        from: Address,
        to: Address,
        data: Vec<u8>,
    ) -> Result<(), Erc721Error> {
        if storage.borrow().vm().code_size(to) == 0 {
            return Ok(());
        }
        let msg_sender = storage.borrow().vm().msg_sender();
        let context = Call::new_mutating(storage);
        let receiver = IERC721TokenReceiver::new(to);
        let received = receiver
            .on_erc_721_received(
                storage.borrow_mut().vm(),
                context,
                msg_sender,
                from,
                token_id,
                data.into(),
            )
            .map_err(|_e| {
                Erc721Error::ReceiverRefused(ReceiverRefused {
                    receiver: receiver.address,
                    token_id,
                    returned: FixedBytes(0_u32.to_be_bytes()),
                })
            })?
            .0;

        if u32::from_be_bytes(received) != ERC721_TOKEN_RECEIVER_ID {
            return Err(Erc721Error::ReceiverRefused(ReceiverRefused {
                receiver: receiver.address,
                token_id,
                returned: FixedBytes(received),
            }));
        }
        Ok(())
    }

    /// Transfers and calls `onERC721Received`
    pub fn safe_transfer<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        token_id: U256,
        from: Address,
        to: Address,
        data: Vec<u8>,
    ) -> Result<(), Erc721Error> {
        storage.borrow_mut().transfer(token_id, from, to)?;
        Self::call_receiver(storage, token_id, from, to, data)
    }

    /// Creates `token_id` owned by `to`.
    pub fn mint(&mut self, to: Address, token_id: U256) -> Result<(), Erc721Error> {
        if to.is_zero() {
            return Err(Erc721Error::TransferToZero(TransferToZero { token_id }));
        }
        if !self.owners.get(token_id).is_zero() {
            return Err(Erc721Error::TokenAlreadyMinted(TokenAlreadyMinted {
                token_id,
            }));
        }
        self.transfer(token_id, Address::ZERO, to)
    }

    /// Mints, then checks that a contract `to` accepts the token.
    pub fn safe_mint<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        to: Address,
        token_id: U256,
    ) -> Result<(), Erc721Error> {
        storage.borrow_mut().mint(to, token_id)?;
        Self::call_receiver(storage, token_id, Address::ZERO, to, vec![])
    }

    /// Destroys `token_id`; the caller must be allowed to spend it.
    pub fn burn(&mut self, token_id: U256) -> Result<(), Erc721Error> {
        let owner = self.owner_of(token_id)?;
        self.require_authorized_to_spend(owner, token_id)?;
        self.transfer(token_id, owner, Address::ZERO)
    }
}

#[public]
impl<T: Erc721Params> Erc721<T> {
    /// Immutable NFT name.
    pub fn name() -> Result<String, Erc721Error> {
        Ok(T::NAME.into())
    }

    /// Immutable NFT symbol.
    pub fn symbol() -> Result<String, Erc721Error> {
        Ok(T::SYMBOL.into())
    }

    /// The NFT's Uniform Resource Identifier.
    #[selector(name = "tokenURI")]
    pub fn token_uri(&self, token_id: U256) -> Result<String, Erc721Error> {
        self.owner_of(token_id)?;
        Ok(T::token_uri(token_id))
    }

    /// Gets the number of NFTs owned by an account.
    pub fn balance_of(&self, owner: Address) -> Result<U256, Erc721Error> {
        Ok(self.balances.get(owner))
    }

    /// Gets the owner of the NFT, if it exists.
    pub fn owner_of(&self, token_id: U256) -> Result<Address, Erc721Error> {
        let owner = self.owners.get(token_id);
        if owner.is_zero() {
            return Err(Erc721Error::InvalidTokenId(InvalidTokenId { token_id }));
        }
        Ok(owner)
    }

    /// Number of NFTs currently in existence.
    pub fn total_supply(&self) -> Result<U256, Erc721Error> {
        Ok(self.total_supply.get())
    }

    #[selector(name = "safeTransferFrom")]
    pub fn safe_transfer_from_with_data<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<(), Erc721Error> {
        if to.is_zero() {
            return Err(Erc721Error::TransferToZero(TransferToZero { token_id }));
        }
        storage
            .borrow_mut()
            .require_authorized_to_spend(from, token_id)?;

        Self::safe_transfer(storage, token_id, from, to, data.0.to_vec())
    }

    /// Overload of `safeTransferFrom` without receiver data.
    #[selector(name = "safeTransferFrom")]
    pub fn safe_transfer_from<S: TopLevelStorage + BorrowMut<Self>>(
        storage: &mut S,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Erc721Error> {
        Self::safe_transfer_from_with_data(storage, from, to, token_id, Bytes(vec![].into()))
    }

    pub fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Erc721Error> {
        if to.is_zero() {
            return Err(Erc721Error::TransferToZero(TransferToZero { token_id }));
        }
        self.require_authorized_to_spend(from, token_id)?;
        self.transfer(token_id, from, to)
    }

    /// Grants an account the ability to manage one of the sender's NFTs.
    pub fn approve(&mut self, approved: Address, token_id: U256) -> Result<(), Erc721Error> {
        let owner = self.owner_of(token_id)?;

        let msg_sender = self.vm().msg_sender();
        if msg_sender != owner && !self.operator_approvals.getter(owner).get(msg_sender) {
            return Err(Erc721Error::NotApproved(NotApproved {
                owner,
                spender: msg_sender,
                token_id,
            }));
        }
        self.token_approvals.insert(token_id, approved);

        self.vm().log(Approval {
            approved,
            owner,
            token_id,
        });
        Ok(())
    }

    /// Grants an account the ability to manage all of the sender's NFTs.
    pub fn set_approval_for_all(
        &mut self,
        operator: Address,
        approved: bool,
    ) -> Result<(), Erc721Error> {
        let owner = self.vm().msg_sender();
        self.operator_approvals
            .setter(owner)
            .insert(operator, approved);

        self.vm().log(ApprovalForAll {
            owner,
            operator,
            approved,
        });
        Ok(())
    }

    pub fn get_approved(&self, token_id: U256) -> Result<Address, Erc721Error> {
        Ok(self.token_approvals.get(token_id))
    }

    pub fn is_approved_for_all(
        &self,
        owner: Address,
        operator: Address,
    ) -> Result<bool, Erc721Error> {
        Ok(self.operator_approvals.getter(owner).get(operator))
    }

    /// ERC-165 support for ERC-721 and its metadata extension.
    pub fn supports_interface(interface: FixedBytes<4>) -> Result<bool, Erc721Error> {
        const IERC165: u32 = 0x01ffc9a7;
        const IERC721: u32 = 0x80ac58cd;
        const IERC721_METADATA: u32 = 0x5b5e139f;

        Ok(matches!(
            u32::from_be_bytes(interface.0),
            IERC165 | IERC721 | IERC721_METADATA
        ))
    }
}
