use std::sync::Arc;

use anyhow::Result;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signer;
use tagsum_solana_client::{ProviderBundle, RpcLedger, SummaryChainClient};

use crate::context::Context;
use crate::solana::wallet;

fn bundle(ctx: &Context) -> ProviderBundle {
    let ledger = RpcLedger::from_config(&ctx.config.network);
    ProviderBundle::new(Arc::new(ledger), ctx.program_id)
}

/// Client without a signer, for reads.
pub fn read_only(ctx: &Context) -> SummaryChainClient {
    SummaryChainClient::with_limits(bundle(ctx), ctx.config.limits.clone())
}

/// Client signing with the configured keypair.
pub fn signing(ctx: &Context) -> Result<SummaryChainClient> {
    let kp = wallet::load_keypair(&ctx.keypair_path()?)?;
    Ok(SummaryChainClient::with_limits(
        bundle(ctx).with_signer(kp),
        ctx.config.limits.clone(),
    ))
}

/// The explicit wallet, else the keypair's pubkey.
pub fn wallet_or_signer(ctx: &Context, wallet: Option<&str>) -> Result<Pubkey> {
    match wallet {
        Some(w) => crate::context::parse_wallet(w),
        None => Ok(wallet::load_keypair(&ctx.keypair_path()?)?.pubkey()),
    }
}
