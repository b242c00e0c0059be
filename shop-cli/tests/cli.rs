// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

const DEVNET_ADDRESS: &str = "0x3f1Eae7D46d88F08fc2F8ed27FCb2AB183EB2d0E";
const SECOND_ADDRESS: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

const CONFIG: &str = r#"
[networks.pair]
url = "http://localhost:8547"
accounts = [
    "b6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659",
    "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
]

[networks.offline]
url = "http://127.0.0.1:9"
chain_id = 412346
accounts = [
    "b6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659",
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
]

[networks.unset]
url = "http://localhost:8547"
accounts = ["${NFT_SHOP_TEST_UNSET_KEY}"]
"#;

fn config_dir() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.toml");
    fs::write(&path, CONFIG).unwrap();
    (dir, path)
}

fn nft_shop() -> Command {
    Command::cargo_bin("nft-shop").unwrap()
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

fn stderr_of_failure(cmd: &mut Command, status: i32) -> String {
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(status), "{output:?}");
    String::from_utf8(output.stderr).unwrap()
}

#[test]
fn accounts_lists_configured_addresses() {
    let (_dir, config) = config_dir();
    let stdout = stdout_of(nft_shop().arg("accounts").arg("--config").arg(&config).args([
        "--network",
        "pair",
    ]));
    let lines: Vec<String> = stdout.lines().map(str::to_lowercase).collect();
    assert_eq!(
        lines,
        vec![DEVNET_ADDRESS.to_lowercase(), SECOND_ADDRESS.to_lowercase()]
    );
}

#[test]
fn accounts_defaults_to_localhost() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = stdout_of(
        nft_shop()
            .arg("accounts")
            .arg("--config")
            .arg(dir.path().join("missing.toml")),
    );
    assert_eq!(stdout.trim().to_lowercase(), DEVNET_ADDRESS.to_lowercase());
}

#[test]
fn unknown_network_fails() {
    let (_dir, config) = config_dir();
    let stderr = stderr_of_failure(
        nft_shop()
            .arg("accounts")
            .arg("--config")
            .arg(&config)
            .args(["--network", "mainnet"]),
        2,
    );
    assert!(stderr.contains("unknown network `mainnet`"), "{stderr}");
}

#[test]
fn network_without_keys_fails() {
    let (_dir, config) = config_dir();
    let stderr = stderr_of_failure(
        nft_shop()
            .env_remove("NFT_SHOP_TEST_UNSET_KEY")
            .arg("accounts")
            .arg("--config")
            .arg(&config)
            .args(["--network", "unset"]),
        2,
    );
    assert!(stderr.contains("has no usable accounts"), "{stderr}");
}

#[test]
fn votes_needs_three_accounts() {
    let (_dir, config) = config_dir();
    let stderr = stderr_of_failure(
        nft_shop()
            .arg("votes")
            .arg("--config")
            .arg(&config)
            .args(["--network", "pair"]),
        2,
    );
    assert!(stderr.contains("needs 3 accounts"), "{stderr}");
}

#[test]
fn unreachable_endpoint_fails_with_one() {
    let (_dir, config) = config_dir();
    let stderr = stderr_of_failure(
        nft_shop()
            .arg("votes")
            .arg("--config")
            .arg(&config)
            .args(["--network", "offline"]),
        1,
    );
    assert!(stderr.contains("rpc error"), "{stderr}");
}
