use std::io;

use anyhow::{Context as _, Result};
use serde::Serialize;
use tagsum_solana_client::InitOutcome;
use termcolor::WriteColor;

use crate::context::Context;
use crate::output::{self, field, Render};
use crate::solana::client;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOut {
    pub store: String,
    pub outcome: InitOutcome,
}

impl Render for InitOut {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        field(w, "store", &self.store)?;
        match &self.outcome {
            InitOutcome::AlreadyInitialized => field(w, "status", "already initialized"),
            InitOutcome::Initialized(sig) => {
                field(w, "status", "initialized")?;
                field(w, "signature", sig)
            }
        }
    }
}

pub async fn run(ctx: &Context) -> Result<()> {
    let chain = client::signing(ctx)?;
    let pb = output::spinner("initializing summary store");
    let outcome = chain.ensure_store_initialized().await;
    pb.finish_and_clear();

    output::print(&InitOut {
        store: chain.store_address().to_string(),
        outcome: outcome.context("store initialization failed")?,
    })
}
