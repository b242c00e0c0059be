// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Sequential walkthroughs against deployed contracts. Each step waits for its
//! receipt before the next read.

pub mod votes;

pub use votes::VotesReport;
