use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use solana_sdk::signature::{read_keypair_file, Keypair};

/// `~/.config/solana/id.json`, the Solana CLI default.
pub fn default_keypair_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .ok_or_else(|| anyhow!("cannot locate home directory; pass --keypair"))?;
    Ok(PathBuf::from(home).join(".config").join("solana").join("id.json"))
}

pub fn load_keypair(path: &Path) -> Result<Arc<Keypair>> {
    let kp = read_keypair_file(path)
        .map_err(|e| anyhow!("failed to read keypair {}: {e}", path.display()))?;
    Ok(Arc::new(kp))
}
