// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::TxHash;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("from utf8 error: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),
    #[error("toml deserialize error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("contract error: {0}")]
    Contract(#[from] alloy::contract::Error),
    #[error("pending transaction error: {0}")]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),

    #[error("unknown network `{0}`")]
    UnknownNetwork(String),
    #[error("network `{0}` has no usable accounts")]
    NoAccounts(String),
    #[error("invalid private key for account #{index}")]
    InvalidPrivateKey { index: usize },
    #[error("network `{network}` expects chain id {expected}, but the endpoint reports {actual}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("transaction {0} has no receipt")]
    MissingReceipt(TxHash),
    #[error("needs {needed} accounts, but only {available} are configured")]
    NotEnoughAccounts { needed: usize, available: usize },

    #[error("cargo stylus {command} failed: {stderr}")]
    CommandFailure { command: String, stderr: String },
    #[error("failed to extract {0} from the deployment output")]
    DeployOutput(&'static str),
}
