// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    primitives::{Address, U256},
    providers::DynProvider,
};

use crate::{bindings::IMyToken::IMyTokenInstance, confirm, Connection, Result};

/// 10 ether worth of base units.
pub const MINT_VALUE: U256 = U256::from_limbs([10_000_000_000_000_000_000, 0, 0, 0]);

/// Every number the walkthrough printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VotesReport {
    pub acc1: Address,
    pub acc2: Address,
    pub acc1_balance: U256,
    pub acc1_votes_before_delegating: U256,
    pub acc1_votes_after_delegating: U256,
    pub acc1_votes_after_transfer: U256,
    pub acc2_votes_after_transfer: U256,
    pub acc2_votes_after_delegating: U256,
    /// `(timepoint, votes)` of acc1, newest first.
    pub acc1_past_votes: Vec<(u64, U256)>,
}

/// Timepoints to query past votes for: from `clock - 1` down to `since`,
/// never below 1.
pub fn past_timepoints(clock: u64, since: u64) -> impl Iterator<Item = u64> {
    let lowest = since.max(1);
    (lowest..clock).rev()
}

/// Mints to the second account, delegates, transfers half to the third
/// account and prints how voting power moves along.
///
/// Past votes are walked in the token's own clock, down to `since` (usually
/// the clock right after the token was deployed). On Arbitrum chains that
/// clock follows the L1 block number rather than the L2 one.
pub async fn run(
    conn: &Connection,
    token: &IMyTokenInstance<DynProvider>,
    since: u64,
) -> Result<VotesReport> {
    conn.accounts.require(3)?;
    let addresses = conn.accounts.addresses();
    let (acc1, acc2) = (addresses[1], addresses[2]);
    let mut report = VotesReport {
        acc1,
        acc2,
        ..Default::default()
    };

    let mint = confirm(token.mint(acc1, MINT_VALUE).send().await?).await?;
    log::debug!("mint: {mint}");
    println!("Minted {MINT_VALUE} decimal units to account {acc1}\n");

    report.acc1_balance = token.balanceOf(acc1).call().await?;
    println!(
        "Account {acc1} has {} decimal units of MyToken\n",
        report.acc1_balance
    );

    report.acc1_votes_before_delegating = token.getVotes(acc1).call().await?;
    println!(
        "Account {acc1} has {} units of voting power before self delegating\n",
        report.acc1_votes_before_delegating
    );

    let delegate = confirm(token.delegate(acc1).from(acc1).send().await?).await?;
    log::debug!("delegate: {delegate}");
    report.acc1_votes_after_delegating = token.getVotes(acc1).call().await?;
    println!(
        "Account {acc1} has {} units of voting power after self delegating\n",
        report.acc1_votes_after_delegating
    );

    let half = MINT_VALUE / U256::from(2);
    let transfer = confirm(token.transfer(acc2, half).from(acc1).send().await?).await?;
    log::debug!("transfer: {transfer}");
    report.acc1_votes_after_transfer = token.getVotes(acc1).call().await?;
    println!(
        "Account {acc1} has {} units of voting power after transferring\n",
        report.acc1_votes_after_transfer
    );
    report.acc2_votes_after_transfer = token.getVotes(acc2).call().await?;
    println!(
        "Account {acc2} has {} units of voting power after receiving a transfer\n",
        report.acc2_votes_after_transfer
    );

    let delegate = confirm(token.delegate(acc2).from(acc2).send().await?).await?;
    log::debug!("delegate: {delegate}");
    report.acc2_votes_after_delegating = token.getVotes(acc2).call().await?;
    println!(
        "Account {acc2} has {} units of voting power after self delegating\n",
        report.acc2_votes_after_delegating
    );

    let clock = token.clock().call().await?;
    for block in past_timepoints(clock, since) {
        let votes = token.getPastVotes(acc1, U256::from(block)).call().await?;
        println!("Account {acc1} had {votes} units of voting power at block {block}\n");
        report.acc1_past_votes.push((block, votes));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn past_timepoints_walk_down_to_deployment() {
        assert_eq!(past_timepoints(10, 7).collect::<Vec<_>>(), vec![9, 8, 7]);
    }

    #[test]
    fn past_timepoints_stop_at_one() {
        assert_eq!(past_timepoints(4, 0).collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(past_timepoints(1, 0).count(), 0);
        assert_eq!(past_timepoints(5, 5).count(), 0);
    }

    #[test]
    fn mint_value_is_ten_ether() {
        assert_eq!(MINT_VALUE.to_string(), "10000000000000000000");
    }
}
