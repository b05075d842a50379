use std::fs;
use std::io;
use std::path::Path;

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use tagsum_core::model::AiProcessingResult;
use tagsum_core::validation::validate_all;
use termcolor::WriteColor;

use crate::context::Context;
use crate::output::{self, Render};

#[derive(Debug, Serialize)]
pub struct Violation {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateOut {
    pub ok: bool,
    pub violations: Vec<Violation>,
}

impl Render for ValidateOut {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        if self.ok {
            return output::status(w, true, "result is valid");
        }
        for v in &self.violations {
            output::status(w, false, &format!("{}: {}", v.code, v.message))?;
        }
        Ok(())
    }
}

pub fn run(ctx: &Context, file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file).map_err(|e| anyhow!("reading {}: {e}", file.display()))?;
    let result: AiProcessingResult =
        serde_json::from_str(&raw).map_err(|e| anyhow!("invalid result json: {e}"))?;

    let violations: Vec<Violation> = validate_all(&result, &ctx.config.limits)
        .into_iter()
        .map(|v| Violation {
            code: v.code(),
            message: v.to_string(),
        })
        .collect();
    let count = violations.len();
    output::print(&ValidateOut {
        ok: count == 0,
        violations,
    })?;

    if count > 0 {
        bail!("{count} validation rule(s) violated");
    }
    Ok(())
}
