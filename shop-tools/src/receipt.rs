// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;

use alloy::{
    network::{Ethereum, ReceiptResponse},
    primitives::{TxHash, U256},
    providers::PendingTransactionBuilder,
};

use crate::{Error, Result};

/// What the harness keeps from a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxSummary {
    pub hash: TxHash,
    pub gas_used: u64,
    pub effective_gas_price: u128,
    pub block_number: u64,
}

impl TxSummary {
    pub fn from_receipt(receipt: &impl ReceiptResponse) -> Result<Self> {
        let hash = receipt.transaction_hash();
        let block_number = receipt.block_number().ok_or(Error::MissingReceipt(hash))?;
        Ok(Self {
            hash,
            gas_used: receipt.gas_used(),
            effective_gas_price: receipt.effective_gas_price(),
            block_number,
        })
    }

    /// Wei paid for gas.
    pub fn fee(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.effective_gas_price)
    }
}

impl fmt::Display for TxSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (block {}, gas {} @ {} wei)",
            self.hash, self.block_number, self.gas_used, self.effective_gas_price
        )
    }
}

/// Waits until `pending` is mined and fails if it reverted.
pub async fn confirm(pending: PendingTransactionBuilder<Ethereum>) -> Result<TxSummary> {
    let hash = *pending.tx_hash();
    log::debug!("waiting for {hash}");
    let receipt = pending.get_receipt().await?;
    if !receipt.status() {
        return Err(Error::Reverted(hash));
    }
    let summary = TxSummary::from_receipt(&receipt)?;
    log::debug!("confirmed {summary}");
    Ok(summary)
}
