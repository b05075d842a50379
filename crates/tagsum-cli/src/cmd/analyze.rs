use std::io;

use anyhow::Result;
use serde::Serialize;
use tagsum_core::validation::validate_all;
use tagsum_extract::{Extraction, ExtractionSource};
use termcolor::WriteColor;

use crate::context::Context;
use crate::output::{self, field, Render};
use crate::render;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOut {
    #[serde(flatten)]
    pub extraction: Extraction,
    /// Rule codes the result violates; empty when it can be submitted as is.
    pub violations: Vec<String>,
}

impl Render for AnalyzeOut {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        render::ai_result(w, &self.extraction.result)?;
        match &self.extraction.source {
            ExtractionSource::Provider { name } => field(w, "source", name)?,
            ExtractionSource::Fallback { provider, reason } => {
                field(w, "source", format!("fallback ({provider} failed: {reason})"))?
            }
        }
        if !self.violations.is_empty() {
            field(w, "violations", self.violations.join(", "))?;
        }
        Ok(())
    }
}

pub async fn run(ctx: &Context, description: &str) -> Result<()> {
    let extractor = ctx.extractor();
    let pb = output::spinner("analyzing transaction");
    let extraction = extractor.extract_detailed(description).await;
    pb.finish_and_clear();

    let violations = validate_all(&extraction.result, &ctx.config.limits)
        .iter()
        .map(|v| v.code().to_string())
        .collect();
    output::print(&AnalyzeOut { extraction, violations })
}
