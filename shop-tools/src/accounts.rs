// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    hex,
    network::EthereumWallet,
    primitives::{Address, B256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};

use crate::{config::Network, Error, Result};

/// The signers configured for a network, in configuration order. Never empty.
#[derive(Debug, Clone)]
pub struct Accounts {
    signers: Vec<PrivateKeySigner>,
}

/// Parses a hex encoded private key, with or without the `0x` prefix.
pub fn parse_signer(key: &str) -> Option<PrivateKeySigner> {
    let bytes: B256 = key.trim().parse().ok()?;
    PrivateKeySigner::from_bytes(&bytes).ok()
}

impl Accounts {
    pub fn from_network(network: &Network) -> Result<Self> {
        if network.accounts.is_empty() {
            return Err(Error::NoAccounts(network.name.clone()));
        }
        let signers = network
            .accounts
            .iter()
            .enumerate()
            .map(|(index, key)| parse_signer(key).ok_or(Error::InvalidPrivateKey { index }))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { signers })
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(PrivateKeySigner::address).collect()
    }

    pub fn address(&self, index: usize) -> Option<Address> {
        self.signers.get(index).map(PrivateKeySigner::address)
    }

    /// The account transactions are sent from unless `from` says otherwise.
    pub fn default_address(&self) -> Address {
        self.signers[0].address()
    }

    /// Hex private key of the default account, as `cargo stylus` expects it.
    pub fn default_private_key(&self) -> String {
        hex::encode(self.signers[0].to_bytes())
    }

    /// Fails unless at least `needed` accounts are configured.
    pub fn require(&self, needed: usize) -> Result<()> {
        if self.len() < needed {
            return Err(Error::NotEnoughAccounts {
                needed,
                available: self.len(),
            });
        }
        Ok(())
    }

    /// A wallet able to sign for every account, defaulting to the first one.
    pub fn wallet(&self) -> EthereumWallet {
        let mut wallet = EthereumWallet::new(self.signers[0].clone());
        for signer in &self.signers[1..] {
            wallet.register_signer(signer.clone());
        }
        wallet
    }
}

/// A provider for a network together with the accounts it signs for.
#[derive(Clone)]
pub struct Connection {
    pub network: Network,
    pub accounts: Accounts,
    pub provider: DynProvider,
}

/// Connects to `network` with a wallet holding every configured account.
pub async fn connect(network: &Network) -> Result<Connection> {
    let accounts = Accounts::from_network(network)?;
    let provider = ProviderBuilder::new()
        .wallet(accounts.wallet())
        .connect(&network.url)
        .await?;

    if let Some(expected) = network.chain_id {
        let actual = provider.get_chain_id().await?;
        if actual != expected {
            return Err(Error::ChainIdMismatch {
                network: network.name.clone(),
                expected,
                actual,
            });
        }
    }
    log::debug!(
        "connected to {} ({}) with {} accounts",
        network.name,
        network.url,
        accounts.len()
    );

    Ok(Connection {
        network: network.clone(),
        accounts,
        provider: provider.erased(),
    })
}
