use std::io;

use anyhow::Result;
use serde::Serialize;
use tagsum_core::hashing::normalize_transaction_hash;
use tagsum_core::validation::validate_transaction_hash;
use tagsum_solana_client::pda;
use termcolor::WriteColor;

use crate::context::Context;
use crate::output::{self, field, Render};
use crate::solana::client;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    pub address: String,
    pub bump: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeriveOut {
    pub program_id: String,
    pub transaction_hash: String,
    /// Hex of the 8-byte Keccak seed.
    pub hash_seed: String,
    pub wallet: String,
    pub store: Derived,
    pub record: Derived,
}

impl Render for DeriveOut {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        field(w, "program", &self.program_id)?;
        field(w, "wallet", &self.wallet)?;
        field(w, "hash seed", &self.hash_seed)?;
        field(w, "store", format!("{} (bump {})", self.store.address, self.store.bump))?;
        field(w, "record", format!("{} (bump {})", self.record.address, self.record.bump))
    }
}

pub fn run(ctx: &Context, hash: &str, wallet: Option<&str>) -> Result<()> {
    let hash = normalize_transaction_hash(hash)?;
    validate_transaction_hash(&hash, &ctx.config.limits)?;
    let owner = client::wallet_or_signer(ctx, wallet)?;

    let pdas = pda::pdas_for_summary(&ctx.program_id, &hash, &owner);
    output::print(&DeriveOut {
        program_id: ctx.program_id.to_string(),
        hash_seed: hex::encode(&pda::summary_hash_seed(&hash)),
        transaction_hash: hash,
        wallet: owner.to_string(),
        store: Derived {
            address: pdas.store.0.to_string(),
            bump: pdas.store.1,
        },
        record: Derived {
            address: pdas.record.0.to_string(),
            bump: pdas.record.1,
        },
    })
}
