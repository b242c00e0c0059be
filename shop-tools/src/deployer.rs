// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{path::PathBuf, process::Command, sync::LazyLock};

use alloy::primitives::{Address, TxHash};
use regex::Regex;
use typed_builder::TypedBuilder;

use crate::{Error, Result};

static COLOR_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[ABCDHJKSTfGmsu]").unwrap());

/// A contract deployed by [`Deployer::deploy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Defines the configuration for deploying one of the contract crates.
/// After setting the parameters, call `Deployer::deploy` to perform the deployment.
#[derive(Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct Deployer {
    #[builder(!default)]
    rpc: String,

    /// Directory of the contract crate.
    #[builder(!default)]
    dir: PathBuf,

    #[builder(!default)]
    private_key: String,

    stylus_deployer: Option<Address>,

    /// Ether sent to the constructor, as accepted by `cargo stylus`.
    constructor_value: Option<String>,

    /// Constructor arguments; `Some(vec![])` still runs an argument-less constructor.
    constructor_args: Option<Vec<String>>,
}

impl Deployer {
    /// Deploys and activates the contract, running its constructor.
    pub fn deploy(&self) -> Result<Deployment> {
        log::info!("deploying {}", self.dir.display());
        let out = call(&self.dir, "deploy", self.deploy_args())?;
        let deployment = parse_deploy_output(&out)?;
        log::info!(
            "deployed {} at {} (tx {})",
            self.dir.display(),
            deployment.address,
            deployment.tx_hash
        );
        Ok(deployment)
    }

    /// Runs [`Deployer::deploy`] on tokio's blocking pool, so the async
    /// runtime keeps driving other tasks while `cargo stylus` builds.
    pub async fn deploy_async(self) -> Result<Deployment> {
        tokio::task::spawn_blocking(move || self.deploy()).await?
    }

    fn deploy_args(&self) -> Vec<String> {
        let mut deploy_args: Vec<String> = vec![
            "--no-verify".to_owned(),
            "-e".to_owned(),
            self.rpc.to_owned(),
            "--private-key".to_owned(),
            self.private_key.to_owned(),
        ];
        if let Some(args) = &self.constructor_args {
            if let Some(value) = &self.constructor_value {
                deploy_args.push("--constructor-value".to_owned());
                deploy_args.push(value.to_owned());
            }
            if let Some(deployer) = &self.stylus_deployer {
                deploy_args.push("--deployer-address".to_owned());
                deploy_args.push(deployer.to_string());
            }
            // Must add the args at the end
            deploy_args.push("--constructor-args".to_owned());
            deploy_args.extend_from_slice(args);
        }
        deploy_args
    }
}

/// Extracts the contract address and deployment hash from `cargo stylus deploy` output.
pub fn parse_deploy_output(s: &str) -> Result<Deployment> {
    let mut address = None;
    let mut tx_hash = None;
    for line in s.lines() {
        if let Some((_, rest)) = line.split_once("deployed code at address: ") {
            address = Some(rest.trim());
        } else if let Some((_, rest)) = line.split_once("deployment tx hash: ") {
            tx_hash = Some(rest.trim());
        }
    }
    let address = address
        .and_then(|address| address.parse().ok())
        .ok_or(Error::DeployOutput("deployed address"))?;
    let tx_hash = tx_hash
        .and_then(|hash| hash.parse().ok())
        .ok_or(Error::DeployOutput("deployment tx hash"))?;
    Ok(Deployment { address, tx_hash })
}

fn call<I: IntoIterator<Item = String>>(dir: &PathBuf, func: &str, args: I) -> Result<String> {
    let output = Command::new("cargo")
        .current_dir(dir)
        .arg("stylus")
        .arg(func)
        .args(args)
        .output()?;
    if !output.status.success() {
        let stderr = String::from_utf8(output.stderr)
            .map(strip_color)
            .unwrap_or("failed to decode error".to_owned());
        return Err(Error::CommandFailure {
            command: func.to_owned(),
            stderr,
        });
    }
    Ok(String::from_utf8(output.stdout).map(strip_color)?)
}

fn strip_color(s: impl Into<String>) -> String {
    COLOR_CODE.replace_all(s.into().as_str(), "").into_owned()
}
