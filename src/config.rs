use serde::Deserialize;
use std::{path::Path, time::Duration};

use crate::{
    executor::typedefs::ExecutorSettings,
    onchain::{
        constants::{ACCOUNT_RESERVE_XRP, BASE_FEE_DROPS},
        typedefs::Network,
    },
    recipients::list::DEFAULT_MAX_RECIPIENTS,
    xaman_api::typedefs::PayloadSettings,
};

const CONFIG_FILE_PATH: &str = "data/config.toml";

const DEFAULT_XAMAN_API_URL: &str = "https://xumm.app/api/v1/platform";
const DEFAULT_RESULTS_DIR: &str = "data/results";

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    #[serde(default)]
    pub network: Network,
    /// Overrides the public node of `network`.
    #[serde(default)]
    pub xrpl_rpc_url: Option<String>,
    #[serde(default = "default_xaman_api_url")]
    pub xaman_api_url: String,
    pub xaman_api_key: String,
    pub xaman_api_secret: String,
    #[serde(default = "default_tx_delay_secs")]
    pub tx_delay_secs: f64,
    #[serde(default = "default_sign_timeout_secs")]
    pub sign_timeout_secs: u64,
    #[serde(default = "default_payload_poll_interval_secs")]
    pub payload_poll_interval_secs: u64,
    #[serde(default = "default_max_recipients")]
    pub max_recipients: usize,
    #[serde(default = "default_check_trust_lines")]
    pub check_trust_lines: bool,
    #[serde(default = "default_fee_drops_per_tx")]
    pub fee_drops_per_tx: u64,
    #[serde(default = "default_account_reserve_xrp")]
    pub account_reserve_xrp: f64,
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

fn default_xaman_api_url() -> String {
    DEFAULT_XAMAN_API_URL.to_string()
}

fn default_tx_delay_secs() -> f64 {
    1.0
}

fn default_sign_timeout_secs() -> u64 {
    300
}

fn default_payload_poll_interval_secs() -> u64 {
    2
}

fn default_max_recipients() -> usize {
    DEFAULT_MAX_RECIPIENTS
}

fn default_check_trust_lines() -> bool {
    true
}

fn default_fee_drops_per_tx() -> u64 {
    BASE_FEE_DROPS
}

fn default_account_reserve_xrp() -> f64 {
    ACCOUNT_RESERVE_XRP
}

fn default_results_dir() -> String {
    DEFAULT_RESULTS_DIR.to_string()
}

impl Config {
    async fn read_from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let cfg_str = tokio::fs::read_to_string(path).await?;
        Self::parse(&cfg_str)
    }

    fn parse(cfg_str: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(cfg_str)?;

        if !(config.tx_delay_secs.is_finite() && config.tx_delay_secs >= 0.0) {
            eyre::bail!("TX_DELAY_SECS must be a non-negative number")
        }
        if config.max_recipients == 0 {
            eyre::bail!("MAX_RECIPIENTS must be positive")
        }
        if config.payload_poll_interval_secs == 0 {
            eyre::bail!("PAYLOAD_POLL_INTERVAL_SECS must be positive")
        }
        if !(config.account_reserve_xrp.is_finite() && config.account_reserve_xrp >= 0.0) {
            eyre::bail!("ACCOUNT_RESERVE_XRP must be a non-negative number")
        }

        Ok(config)
    }

    pub async fn read_default() -> eyre::Result<Self> {
        Self::read_from_file(CONFIG_FILE_PATH)
            .await
            .inspect_err(|e| tracing::error!("Failed to load `{CONFIG_FILE_PATH}`: {e}"))
    }

    pub fn rpc_url(&self) -> &str {
        self.xrpl_rpc_url
            .as_deref()
            .unwrap_or(self.network.default_rpc_url())
    }

    pub fn payload_settings(&self) -> PayloadSettings {
        PayloadSettings::new(
            Duration::from_secs(self.payload_poll_interval_secs),
            Duration::from_secs(self.sign_timeout_secs),
        )
    }

    pub fn executor_settings(&self) -> ExecutorSettings {
        ExecutorSettings {
            tx_delay: Duration::from_secs_f64(self.tx_delay_secs),
            sign_timeout: Duration::from_secs(self.sign_timeout_secs),
            check_trust_lines: self.check_trust_lines,
            fee_drops: self.fee_drops_per_tx,
            reserve_xrp: self.account_reserve_xrp,
        }
    }
}
