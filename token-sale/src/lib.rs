// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Shop front for the payment token and the NFT collection.
//!
//! ETH buys payment tokens at a fixed `ratio` (token units per wei) and
//! payment tokens buy NFTs at a fixed `price`. Half of every NFT price goes to
//! the owner pool, the other half is paid back when the NFT is redeemed.
//!
//! The sale needs the minter role on both the token and the NFT contract.

// Only run this as a WASM if the export-abi feature is not set.
#![cfg_attr(not(any(feature = "export-abi", test)), no_main)]
extern crate alloc;

use alloc::vec::Vec;
use alloy_primitives::{Address, U256};
use alloy_sol_types::sol;
use stylus_sdk::{call::transfer::transfer_eth, prelude::*};

sol_interface! {
    interface IPaymentToken {
        function mint(address to, uint256 amount) external;
        function burnFrom(address account, uint256 amount) external;
        function transfer(address to, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }

    interface ICollection {
        function safeMint(address to, uint256 token_id) external;
        function burn(uint256 token_id) external;
        function transferFrom(address from, address to, uint256 token_id) external;
    }
}

sol_storage! {
    #[entrypoint]
    pub struct TokenSale {
        /// Payment token units issued per wei
        uint256 ratio;
        /// NFT price in payment token units
        uint256 price;
        address token;
        address nft;
        address owner;
        /// Payment tokens the owner may withdraw
        uint256 owner_pool;
        /// NFTs minted by this sale and not yet redeemed
        mapping(uint256 => bool) sold;
    }
}

sol! {
    event TokensBought(address indexed buyer, uint256 paid, uint256 amount);
    event TokensReturned(address indexed seller, uint256 amount, uint256 refund);
    event NftBought(address indexed buyer, uint256 indexed token_id, uint256 price);
    event NftRedeemed(address indexed seller, uint256 indexed token_id, uint256 refund);
    event Withdrawn(address indexed owner, uint256 amount);

    #[derive(Debug)]
    error InvalidRatio();
    #[derive(Debug)]
    error Unauthorized(address account);
    #[derive(Debug)]
    error InsufficientEth(uint256 have, uint256 want);
    #[derive(Debug)]
    error InsufficientPool(uint256 pool, uint256 want);
    #[derive(Debug)]
    error PaymentFailed(address token, address from, uint256 amount);
    #[derive(Debug)]
    error PurchaseOverflow(uint256 paid, uint256 ratio);
    #[derive(Debug)]
    error PoolOverflow(uint256 pool, uint256 share);
    #[derive(Debug)]
    error NotSold(uint256 token_id);
}

#[derive(SolidityError, Debug)]
pub enum TokenSaleError {
    InvalidRatio(InvalidRatio),
    Unauthorized(Unauthorized),
    InsufficientEth(InsufficientEth),
    InsufficientPool(InsufficientPool),
    PaymentFailed(PaymentFailed),
    PurchaseOverflow(PurchaseOverflow),
    PoolOverflow(PoolOverflow),
    NotSold(NotSold),
}

impl TokenSale {
    fn payment_token(&self) -> IPaymentToken {
        IPaymentToken::new(self.token.get())
    }

    fn collection(&self) -> ICollection {
        ICollection::new(self.nft.get())
    }

    /// Share of an NFT price that is not refunded on redemption.
    fn pool_share(&self) -> U256 {
        self.price.get() / U256::from(2)
    }
}

#[public]
impl TokenSale {
    #[constructor]
    pub fn constructor(
        &mut self,
        ratio: U256,
        price: U256,
        token: Address,
        nft: Address,
    ) -> Result<(), TokenSaleError> {
        if ratio.is_zero() {
            return Err(TokenSaleError::InvalidRatio(InvalidRatio {}));
        }
        self.ratio.set(ratio);
        self.price.set(price);
        self.token.set(token);
        self.nft.set(nft);
        self.owner.set(self.vm().tx_origin());
        Ok(())
    }

    pub fn ratio(&self) -> U256 {
        self.ratio.get()
    }

    pub fn price(&self) -> U256 {
        self.price.get()
    }

    pub fn token(&self) -> Address {
        self.token.get()
    }

    pub fn nft(&self) -> Address {
        self.nft.get()
    }

    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    pub fn owner_pool(&self) -> U256 {
        self.owner_pool.get()
    }

    /// Mints `msg_value * ratio` payment tokens to the caller.
    #[payable]
    pub fn buy(&mut self) -> Result<(), Vec<u8>> {
        let buyer = self.vm().msg_sender();
        let paid = self.vm().msg_value();
        let ratio = self.ratio.get();
        let amount = paid
            .checked_mul(ratio)
            .ok_or(TokenSaleError::PurchaseOverflow(PurchaseOverflow { paid, ratio }))?;

        let token = self.payment_token();
        let context = Call::new_mutating(self);
        token.mint(self.vm(), context, buyer, amount)?;

        self.vm().log(TokensBought { buyer, paid, amount });
        Ok(())
    }

    /// Burns `amount` of the caller's payment tokens and refunds `amount / ratio` wei.
    ///
    /// The caller must have approved the sale for `amount` beforehand.
    pub fn return_token(&mut self, amount: U256) -> Result<(), Vec<u8>> {
        let seller = self.vm().msg_sender();
        let refund = amount / self.ratio.get();
        let have = self.vm().balance(self.vm().contract_address());
        if have < refund {
            return Err(TokenSaleError::InsufficientEth(InsufficientEth { have, want: refund }).into());
        }

        let token = self.payment_token();
        let context = Call::new_mutating(self);
        token.burn_from(self.vm(), context, seller, amount)?;
        transfer_eth(self.vm(), seller, refund)?;

        self.vm().log(TokensReturned {
            seller,
            amount,
            refund,
        });
        Ok(())
    }

    /// Charges `price` payment tokens and mints NFT `token_id` to the caller.
    #[selector(name = "buyNFT")]
    pub fn buy_nft(&mut self, token_id: U256) -> Result<(), Vec<u8>> {
        let buyer = self.vm().msg_sender();
        let this = self.vm().contract_address();
        let price = self.price.get();
        let pool = self.owner_pool.get();
        let share = self.pool_share();
        let new_pool = pool
            .checked_add(share)
            .ok_or(TokenSaleError::PoolOverflow(PoolOverflow { pool, share }))?;

        let token = self.payment_token();
        let context = Call::new_mutating(self);
        if !token.transfer_from(self.vm(), context, buyer, this, price)? {
            return Err(TokenSaleError::PaymentFailed(PaymentFailed {
                token: token.address,
                from: buyer,
                amount: price,
            })
            .into());
        }

        let nft = self.collection();
        let context = Call::new_mutating(self);
        nft.safe_mint(self.vm(), context, buyer, token_id)?;

        self.owner_pool.set(new_pool);
        self.sold.insert(token_id, true);

        self.vm().log(NftBought {
            buyer,
            token_id,
            price,
        });
        Ok(())
    }

    /// Takes NFT `token_id` back, burns it and refunds the part of its price
    /// that did not go to the owner pool. Only NFTs bought here are accepted.
    ///
    /// The caller must have approved the sale for the NFT beforehand.
    #[selector(name = "burnNFT")]
    pub fn burn_nft(&mut self, token_id: U256) -> Result<(), Vec<u8>> {
        if !self.sold.get(token_id) {
            return Err(TokenSaleError::NotSold(NotSold { token_id }).into());
        }
        self.sold.insert(token_id, false);

        let seller = self.vm().msg_sender();
        let this = self.vm().contract_address();
        let refund = self.price.get() - self.pool_share();

        let nft = self.collection();
        let context = Call::new_mutating(self);
        nft.transfer_from(self.vm(), context, seller, this, token_id)?;
        let context = Call::new_mutating(self);
        nft.burn(self.vm(), context, token_id)?;

        let token = self.payment_token();
        let context = Call::new_mutating(self);
        if !token.transfer(self.vm(), context, seller, refund)? {
            return Err(TokenSaleError::PaymentFailed(PaymentFailed {
                token: token.address,
                from: this,
                amount: refund,
            })
            .into());
        }

        self.vm().log(NftRedeemed {
            seller,
            token_id,
            refund,
        });
        Ok(())
    }

    /// Sends `amount` payment tokens from the owner pool to the owner.
    pub fn withdraw(&mut self, amount: U256) -> Result<(), Vec<u8>> {
        let owner = self.owner.get();
        let caller = self.vm().msg_sender();
        if caller != owner {
            return Err(TokenSaleError::Unauthorized(Unauthorized { account: caller }).into());
        }
        let pool = self.owner_pool.get();
        if amount > pool {
            return Err(TokenSaleError::InsufficientPool(InsufficientPool { pool, want: amount }).into());
        }
        self.owner_pool.set(pool - amount);

        let token = self.payment_token();
        let context = Call::new_mutating(self);
        if !token.transfer(self.vm(), context, owner, amount)? {
            return Err(TokenSaleError::PaymentFailed(PaymentFailed {
                token: token.address,
                from: self.vm().contract_address(),
                amount,
            })
            .into());
        }

        self.vm().log(Withdrawn { owner, amount });
        Ok(())
    }
}
