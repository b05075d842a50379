use std::io;

use anyhow::{Context as _, Result};
use serde::Serialize;
use tagsum_solana_client::TaggedSummary;
use termcolor::WriteColor;

use crate::context::Context;
use crate::output::{self, Render};
use crate::render;
use crate::solana::client;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOut {
    /// `None` for an unfiltered listing.
    pub wallet: Option<String>,
    pub count: usize,
    pub records: Vec<TaggedSummary>,
}

impl Render for ListOut {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        if self.records.is_empty() {
            return writeln!(w, "no records");
        }
        for (i, r) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            render::record(w, r)?;
        }
        Ok(())
    }
}

pub async fn run(ctx: &Context, wallet: Option<&str>, all: bool) -> Result<()> {
    let chain = client::read_only(ctx);
    let pb = output::spinner("scanning program accounts");
    let (wallet, records) = if all {
        (None, chain.list_all_records().await)
    } else {
        let owner = client::wallet_or_signer(ctx, wallet)?;
        (Some(owner.to_string()), chain.list_records_for_student(&owner).await)
    };
    pb.finish_and_clear();

    let records = records.context("listing records failed")?;
    output::print(&ListOut {
        wallet,
        count: records.len(),
        records,
    })
}
