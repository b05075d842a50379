use std::io;

use anyhow::Result;
use serde::Serialize;
use tagsum_solana_client::{LedgerConnection, RpcLedger};
use termcolor::WriteColor;

use crate::context::Context;
use crate::output::{self, Render};
use crate::solana::wallet;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    /// Failing optional checks do not fail the report.
    pub required: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

impl Render for DoctorOut {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        for c in &self.checks {
            let suffix = if c.required { "" } else { " (optional)" };
            output::status(w, c.ok, &format!("{}{suffix}: {}", c.name, c.detail))?;
        }
        Ok(())
    }
}

fn check(name: &str, required: bool, outcome: std::result::Result<String, String>) -> Check {
    let (ok, detail) = match outcome {
        Ok(d) => (true, d),
        Err(d) => (false, d),
    };
    Check {
        name: name.to_string(),
        ok,
        required,
        detail,
    }
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut checks = Vec::new();

    checks.push(check(
        "config",
        true,
        Ok(format!(
            "rpc {} ({}), program {}",
            ctx.config.network.rpc_url,
            ctx.config.network.commitment.as_str(),
            ctx.program_id
        )),
    ));

    let keypair = ctx
        .keypair_path()
        .and_then(|p| wallet::load_keypair(&p).map(|_| p))
        .map(|p| format!("readable at {}", p.display()))
        .map_err(|e| e.to_string());
    checks.push(check("keypair", true, keypair));

    let ledger = RpcLedger::from_config(&ctx.config.network);
    let rpc = ledger
        .get_latest_blockhash()
        .await
        .map(|h| format!("{} reachable, latest blockhash {h}", ledger.url()))
        .map_err(|e| e.to_string());
    let rpc_ok = rpc.is_ok();
    checks.push(check("rpc", true, rpc));

    if rpc_ok {
        let program = match ledger.get_account(&ctx.program_id).await {
            Ok(Some(acc)) if acc.executable => Ok("deployed".to_string()),
            Ok(Some(_)) => Err("account exists but is not executable".to_string()),
            Ok(None) => Err("not found on this cluster".to_string()),
            Err(e) => Err(e.to_string()),
        };
        checks.push(check("program", true, program));
    }

    let groq = match &ctx.config.extraction.api_key {
        Some(k) if !k.trim().is_empty() => Ok(format!("configured for {}", ctx.config.extraction.model)),
        _ => Err("GROQ_API_KEY not set; the offline heuristic will be used".to_string()),
    };
    checks.push(check("groq api key", false, groq));

    checks.push(check(
        "solana cli",
        false,
        if which_ok("solana") {
            Ok("found on PATH".to_string())
        } else {
            Err("not found (needed only for airdrops and deploys)".to_string())
        },
    ));

    let ok = checks.iter().all(|c| c.ok || !c.required);
    output::print(&DoctorOut { ok, checks })?;
    Ok(())
}

fn which_ok(cmd: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths).any(|p| {
                p.join(cmd).exists() || (cfg!(windows) && p.join(format!("{cmd}.exe")).exists())
            })
        })
        .unwrap_or(false)
}
