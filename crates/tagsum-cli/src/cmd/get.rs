use std::io;

use anyhow::{Context as _, Result};
use serde::Serialize;
use tagsum_core::hashing::normalize_transaction_hash;
use tagsum_solana_client::TaggedSummary;
use termcolor::WriteColor;

use crate::context::Context;
use crate::output::{self, field, Render};
use crate::render;
use crate::solana::client;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOut {
    pub address: String,
    pub found: bool,
    pub record: Option<TaggedSummary>,
}

impl Render for GetOut {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        field(w, "address", &self.address)?;
        match &self.record {
            Some(r) => render::record(w, r),
            None => field(w, "record", "not found"),
        }
    }
}

pub async fn run(ctx: &Context, hash: &str, wallet: Option<&str>) -> Result<()> {
    let hash = normalize_transaction_hash(hash)?;
    let owner = client::wallet_or_signer(ctx, wallet)?;
    let chain = client::read_only(ctx);

    let record = chain
        .get_record(&hash, &owner)
        .await
        .context("fetching record failed")?;
    output::print(&GetOut {
        address: chain.summary_address(&hash, &owner).to_string(),
        found: record.is_some(),
        record,
    })
}
