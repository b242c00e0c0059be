// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tooling around the NFT shop contracts: network selection, wallets,
//! deployment through `cargo stylus`, and the scripted walkthroughs used by the
//! `nft-shop` binary and the integration tests.

pub mod accounts;
pub mod bindings;
pub mod config;
pub mod deployer;
#[cfg(feature = "devnet")]
pub mod devnet;
pub(crate) mod error;
pub mod fixture;
pub mod receipt;
pub mod scenario;

pub use accounts::{connect, Accounts, Connection};
pub use config::{Network, ShopConfig};
pub use deployer::{Deployer, Deployment};
pub use error::{Error, Result};
pub use fixture::ShopFixture;
pub use receipt::{confirm, TxSummary};
