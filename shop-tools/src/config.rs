// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network configuration.
//!
//! Networks are read from a TOML file (`shop.toml` by default):
//!
//! ```toml
//! [networks.sepolia]
//! url = "https://eth-sepolia.g.alchemy.com/v2/${ALCHEMY_API_KEY}"
//! accounts = ["${MUNZY_TEST_PRIVATE_KEY}", "${ACCOUNT1_PRIVATE_KEY}"]
//! ```
//!
//! `${VAR}` placeholders are expanded from the environment when a network is
//! selected, after loading the `.env` file next to the configuration. A
//! `localhost` network pointing at a local Nitro dev node is always available.

use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "shop.toml";

/// Name of the built-in network.
pub const LOCALHOST: &str = "localhost";

/// The default endpoint for connections to a Stylus-enabled Arbitrum node.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8547";

/// Prefunded chain owner key of the Nitro dev node.
pub const DEVNET_PRIVATE_KEY: &str =
    "b6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659";

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// A network entry as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    pub url: String,
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl NetworkConfig {
    fn localhost() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_owned(),
            accounts: vec![DEVNET_PRIVATE_KEY.to_owned()],
            chain_id: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShopConfig {
    /// Directory holding the contract crates, relative to the configuration file.
    #[serde(default = "default_contracts_dir")]
    pub contracts_dir: PathBuf,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

fn default_contracts_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            contracts_dir: default_contracts_dir(),
            networks: BTreeMap::new(),
        }
    }
}

/// A network ready to connect to, with every placeholder expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub name: String,
    pub url: String,
    /// Hex encoded private keys, the first one is the default sender.
    pub accounts: Vec<String>,
    pub chain_id: Option<u64>,
}

impl ShopConfig {
    /// Loads `.env` and the configuration at `path`.
    ///
    /// A missing file is not an error: only `localhost` is available then.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dir = path.parent().unwrap_or(Path::new("."));
        match dotenv::from_path(dir.join(".env")) {
            Ok(()) => log::debug!("loaded environment from {}", dir.join(".env").display()),
            Err(err) => log::debug!("no .env loaded: {err}"),
        }

        if !path.exists() {
            log::debug!("{} not found, using built-in networks", path.display());
            return Ok(Self::default());
        }
        let mut config = Self::from_toml(&fs::read_to_string(path)?)?;
        if config.contracts_dir.is_relative() {
            config.contracts_dir = dir.join(&config.contracts_dir);
        }
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Names of every selectable network, `localhost` included.
    pub fn network_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.networks.keys().cloned().collect();
        if !self.networks.contains_key(LOCALHOST) {
            names.push(LOCALHOST.to_owned());
        }
        names
    }

    /// Selects a network, expanding placeholders from the process environment.
    pub fn network(&self, name: &str) -> Result<Network> {
        self.network_with(name, |var| env::var(var).ok())
    }

    /// Selects a network, expanding placeholders with `lookup`.
    pub fn network_with(
        &self,
        name: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Network> {
        let entry = match self.networks.get(name) {
            Some(entry) => entry.clone(),
            None if name == LOCALHOST => NetworkConfig::localhost(),
            None => return Err(Error::UnknownNetwork(name.to_owned())),
        };

        let mut accounts = Vec::with_capacity(entry.accounts.len());
        for (index, account) in entry.accounts.iter().enumerate() {
            let key = expand(account, &lookup);
            if key.trim().is_empty() {
                log::warn!("network `{name}`: account #{index} ({account}) is empty, skipping");
                continue;
            }
            accounts.push(key.trim().to_owned());
        }

        Ok(Network {
            name: name.to_owned(),
            url: expand(&entry.url, &lookup),
            accounts,
            chain_id: entry.chain_id,
        })
    }
}

/// Replaces every `${VAR}` with its value, or with nothing when unset.
fn expand(text: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    ENV_PLACEHOLDER
        .replace_all(text, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const CONFIG: &str = r#"
[networks.sepolia]
url = "https://eth-sepolia.g.alchemy.com/v2/${ALCHEMY_API_KEY}"
accounts = ["${MUNZY_TEST_PRIVATE_KEY}", "${ACCOUNT1_PRIVATE_KEY}"]

[networks.baseSepolia]
url = "https://base-sepolia.g.alchemy.com/v2/${ALCHEMY_API_KEY}"
accounts = ["${MUNZY_TEST_PRIVATE_KEY}"]
chain_id = 84532
"#;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn expands_placeholders() {
        let config = ShopConfig::from_toml(CONFIG).unwrap();
        let lookup = vars(&[
            ("ALCHEMY_API_KEY", "secret"),
            ("MUNZY_TEST_PRIVATE_KEY", "0xaa"),
            ("ACCOUNT1_PRIVATE_KEY", "bb"),
        ]);

        let sepolia = config.network_with("sepolia", lookup).unwrap();
        assert_eq!(sepolia.url, "https://eth-sepolia.g.alchemy.com/v2/secret");
        assert_eq!(sepolia.accounts, vec!["0xaa", "bb"]);
        assert_eq!(sepolia.chain_id, None);
    }

    #[test]
    fn unset_accounts_are_dropped() {
        let config = ShopConfig::from_toml(CONFIG).unwrap();
        let lookup = vars(&[("ACCOUNT1_PRIVATE_KEY", "bb")]);

        let sepolia = config.network_with("sepolia", lookup).unwrap();
        assert_eq!(sepolia.url, "https://eth-sepolia.g.alchemy.com/v2/");
        assert_eq!(sepolia.accounts, vec!["bb"]);
    }

    #[test]
    fn keeps_chain_id() {
        let config = ShopConfig::from_toml(CONFIG).unwrap();
        let base = config.network_with("baseSepolia", vars(&[])).unwrap();
        assert_eq!(base.chain_id, Some(84532));
        assert!(base.accounts.is_empty());
    }

    #[test]
    fn localhost_is_built_in() {
        let config = ShopConfig::default();
        let local = config.network_with(LOCALHOST, vars(&[])).unwrap();
        assert_eq!(local.url, DEFAULT_ENDPOINT);
        assert_eq!(local.accounts, vec![DEVNET_PRIVATE_KEY]);
        assert_eq!(config.network_names(), vec![LOCALHOST]);
    }

    #[test]
    fn unknown_network() {
        let config = ShopConfig::from_toml(CONFIG).unwrap();
        let err = config.network_with("mainnet", vars(&[])).unwrap_err();
        assert!(matches!(err, Error::UnknownNetwork(name) if name == "mainnet"));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(ShopConfig::from_toml("[networks.x]\nurl = \"u\"\nkey = 1\n").is_err());
    }

    #[test]
    fn load_resolves_contracts_dir_and_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let missing = ShopConfig::load(&path).unwrap();
        assert!(missing.networks.is_empty());

        fs::write(&path, "contracts_dir = \"contracts\"\n").unwrap();
        let config = ShopConfig::load(&path).unwrap();
        assert_eq!(config.contracts_dir, dir.path().join("contracts"));
    }
}
