use std::io;

use anyhow::{Context as _, Result};
use serde::Serialize;
use termcolor::WriteColor;

use crate::context::Context;
use crate::output::{self, field, Render};
use crate::solana::client;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOut {
    pub address: String,
    pub initialized: bool,
    pub authority: Option<String>,
    pub total_summaries: Option<u64>,
}

impl Render for StoreOut {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        field(w, "address", &self.address)?;
        match (&self.authority, self.total_summaries) {
            (Some(a), Some(n)) => {
                field(w, "authority", a)?;
                field(w, "total summaries", n)
            }
            _ => field(w, "status", "not initialized (run `tagsum init`)"),
        }
    }
}

pub async fn run(ctx: &Context) -> Result<()> {
    let chain = client::read_only(ctx);
    let store = chain.get_store().await.context("fetching store failed")?;
    output::print(&StoreOut {
        address: chain.store_address().to_string(),
        initialized: store.is_some(),
        authority: store.as_ref().map(|s| s.authority.to_string()),
        total_summaries: store.map(|s| s.total_summaries),
    })
}
