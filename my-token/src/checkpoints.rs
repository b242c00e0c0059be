// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Block-indexed history of a single value.
//!
//! A [`Trace`] stores `(block, value)` pairs in increasing block order. Writing
//! twice in the same block overwrites the last entry, so every block appears at
//! most once and the history can be binary searched.

use alloy_primitives::{U256, U64};
use stylus_sdk::{
    prelude::*,
    storage::{StorageU256, StorageU64, StorageVec},
};

#[storage]
pub struct Checkpoint {
    block: StorageU64,
    value: StorageU256,
}

#[storage]
pub struct Trace {
    checkpoints: StorageVec<Checkpoint>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Checkpoint at `pos`, as `(block, value)`.
    pub fn at(&self, pos: usize) -> Option<(u64, U256)> {
        let checkpoint = self.checkpoints.getter(pos)?;
        Some((checkpoint.block.get().to::<u64>(), checkpoint.value.get()))
    }

    /// Most recent value, zero when nothing was recorded yet.
    pub fn latest(&self) -> U256 {
        self.len()
            .checked_sub(1)
            .and_then(|pos| self.at(pos))
            .map_or(U256::ZERO, |(_, value)| value)
    }

    /// Records `value` at `block` and returns `(previous, new)`.
    ///
    /// `block` must not be lower than the last recorded block.
    pub fn push(&mut self, block: u64, value: U256) -> (U256, U256) {
        let previous = self.latest();
        let len = self.len();
        if len > 0 {
            if let Some(mut last) = self.checkpoints.setter(len - 1) {
                let last_block = last.block.get().to::<u64>();
                debug_assert!(last_block <= block, "checkpoint inserted out of order");
                if last_block == block {
                    last.value.set(value);
                    return (previous, value);
                }
            }
        }
        let mut checkpoint = self.checkpoints.grow();
        checkpoint.block.set(U64::from(block));
        checkpoint.value.set(value);
        (previous, value)
    }

    /// Value in effect at the end of `block`: the last checkpoint at or before it.
    pub fn upper_lookup(&self, block: u64) -> U256 {
        let mut low = 0;
        let mut high = self.len();
        while low < high {
            let mid = low + (high - low) / 2;
            match self.at(mid) {
                Some((mid_block, _)) if mid_block > block => high = mid,
                _ => low = mid + 1,
            }
        }
        high.checked_sub(1)
            .and_then(|pos| self.at(pos))
            .map_or(U256::ZERO, |(_, value)| value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use stylus_sdk::testing::*;

    #[test]
    fn empty_trace_reads_zero() {
        let vm = TestVM::new();
        let trace = Trace::from(&vm);

        assert!(trace.is_empty());
        assert_eq!(trace.latest(), U256::ZERO);
        assert_eq!(trace.upper_lookup(100), U256::ZERO);
        assert_eq!(trace.at(0), None);
    }

    #[test]
    fn same_block_overwrites() {
        let vm = TestVM::new();
        let mut trace = Trace::from(&vm);

        assert_eq!(trace.push(5, U256::from(10)), (U256::ZERO, U256::from(10)));
        assert_eq!(trace.push(5, U256::from(7)), (U256::from(10), U256::from(7)));

        assert_eq!(trace.len(), 1);
        assert_eq!(trace.at(0), Some((5, U256::from(7))));
    }

    #[test]
    fn lookup_finds_last_checkpoint_at_or_before() {
        let vm = TestVM::new();
        let mut trace = Trace::from(&vm);
        trace.push(2, U256::from(100));
        trace.push(5, U256::from(50));
        trace.push(9, U256::from(75));

        assert_eq!(trace.upper_lookup(1), U256::ZERO);
        assert_eq!(trace.upper_lookup(2), U256::from(100));
        assert_eq!(trace.upper_lookup(4), U256::from(100));
        assert_eq!(trace.upper_lookup(5), U256::from(50));
        assert_eq!(trace.upper_lookup(8), U256::from(50));
        assert_eq!(trace.upper_lookup(1_000), U256::from(75));
        assert_eq!(trace.latest(), U256::from(75));
    }
}
