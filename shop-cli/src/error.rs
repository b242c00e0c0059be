// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

pub type ShopCliResult = Result<(), ShopCliError>;

#[derive(Debug)]
pub struct ShopCliError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl ShopCliError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for ShopCliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for ShopCliError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for ShopCliError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

/// Exit status for problems with the network configuration or its accounts,
/// matching the status clap uses for usage errors.
pub const CONFIG_EXIT_STATUS: u8 = 2;

/// Exit status for failures while talking to the chain or running tools.
pub const FAILURE_EXIT_STATUS: u8 = 1;

fn exit_status(err: &shop_tools::Error) -> u8 {
    use shop_tools::Error::*;
    match err {
        TomlDeserialize(_)
        | UnknownNetwork(_)
        | NoAccounts(_)
        | InvalidPrivateKey { .. }
        | ChainIdMismatch { .. }
        | NotEnoughAccounts { .. } => CONFIG_EXIT_STATUS,
        _ => FAILURE_EXIT_STATUS,
    }
}

impl From<shop_tools::Error> for ShopCliError {
    fn from(err: shop_tools::Error) -> Self {
        let exit_code = ExitCode::from(exit_status(&err));
        Self {
            error: err.into(),
            exit_code,
        }
    }
}
