//! Resolved settings for one CLI invocation.
//!
//! Precedence: built-in defaults, then the `--config` file, then flags and
//! environment variables.

use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};
use solana_sdk::pubkey::Pubkey;
use tagsum_core::config::{validate_config, CoreConfig};
use tagsum_extract::MetadataExtractor;
use tagsum_solana_client::validate_network;
use tracing::debug;

use crate::args::Cli;
use crate::solana::wallet;

pub struct Context {
    pub config: CoreConfig,
    pub program_id: Pubkey,
    keypair: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => CoreConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CoreConfig::default(),
        };
        apply_overrides(&mut config, cli);
        validate_config(&config)?;
        url::Url::parse(&config.network.rpc_url)
            .map_err(|e| anyhow!("invalid rpc url {}: {e}", config.network.rpc_url))?;
        let program_id = validate_network(&config.network)?;

        debug!(rpc = %config.network.rpc_url, program = %program_id, "resolved settings");

        Ok(Self {
            config,
            program_id,
            keypair: cli.keypair.clone(),
        })
    }

    pub fn keypair_path(&self) -> Result<PathBuf> {
        match &self.keypair {
            Some(p) => Ok(p.clone()),
            None => wallet::default_keypair_path(),
        }
    }

    pub fn extractor(&self) -> MetadataExtractor {
        MetadataExtractor::from_config(&self.config.extraction)
    }
}

fn apply_overrides(config: &mut CoreConfig, cli: &Cli) {
    if let Some(url) = &cli.rpc_url {
        config.network.rpc_url = url.clone();
    }
    if let Some(id) = &cli.program_id {
        config.network.program_id = id.clone();
    }
    if let Some(key) = &cli.groq_api_key {
        config.extraction.api_key = Some(key.clone());
    }
}

/// Parse an optional wallet argument.
pub fn parse_wallet(s: &str) -> Result<Pubkey> {
    s.trim()
        .parse::<Pubkey>()
        .map_err(|e| anyhow!("invalid wallet pubkey {s}: {e}"))
}
