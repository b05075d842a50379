use std::io;

use anyhow::{Context as _, Result};
use serde::Serialize;
use tagsum_core::hashing::{
    normalize_transaction_hash, random_transaction_hash, transaction_hash_for,
};
use tagsum_core::model::AiProcessingResult;
use tagsum_solana_client::SubmitReceipt;
use termcolor::WriteColor;
use tracing::warn;

use crate::context::Context;
use crate::output::{self, field, Render};
use crate::render;
use crate::solana::client;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOut {
    pub receipt: SubmitReceipt,
    pub result: AiProcessingResult,
    pub fallback: bool,
}

impl Render for SubmitOut {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        field(w, "signature", &self.receipt.signature)?;
        field(w, "address", &self.receipt.address)?;
        field(w, "transaction", &self.receipt.transaction_hash)?;
        render::ai_result(w, &self.result)?;
        if self.fallback {
            field(w, "note", "extraction failed; the default result was stored")?;
        }
        Ok(())
    }
}

/// Where the transaction hash for a submission comes from.
pub enum HashSource {
    Given(String),
    Random,
    /// sha256 of the description.
    Description,
}

pub async fn run(ctx: &Context, description: &str, hash: HashSource, no_init: bool) -> Result<()> {
    let transaction_hash = match hash {
        HashSource::Given(h) => normalize_transaction_hash(&h)?,
        HashSource::Random => random_transaction_hash(),
        HashSource::Description => transaction_hash_for(description),
    };
    let chain = client::signing(ctx)?;

    let pb = output::spinner("analyzing transaction");
    let extraction = ctx.extractor().extract_detailed(description).await;
    if extraction.is_fallback() {
        warn!("submitting fallback extraction result");
    }

    pb.set_message("submitting to chain");
    let submitted = if no_init {
        chain.submit(&extraction.result, &transaction_hash).await
    } else {
        chain.submit_with_store(&extraction.result, &transaction_hash).await
    };
    pb.finish_and_clear();

    let receipt = submitted.context("submission failed")?;
    output::print(&SubmitOut {
        receipt,
        fallback: extraction.is_fallback(),
        result: extraction.result,
    })
}
