use anyhow::Result;

use crate::args::{Cli, Command};
use crate::context::Context;
use submit::HashSource;

mod analyze;
mod derive;
mod doctor;
mod get;
mod init;
mod list;
mod store;
mod submit;
mod validate;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;
    match cli.command {
        Command::Analyze { description } => analyze::run(&ctx, &description).await,
        Command::Submit {
            description,
            hash,
            random_hash,
            no_init,
        } => {
            let hash = match (hash, random_hash) {
                (_, true) => HashSource::Random,
                (Some(h), false) => HashSource::Given(h),
                (None, false) => HashSource::Description,
            };
            submit::run(&ctx, &description, hash, no_init).await
        }
        Command::Init => init::run(&ctx).await,
        Command::Get { hash, wallet } => get::run(&ctx, &hash, wallet.as_deref()).await,
        Command::List { wallet, all } => list::run(&ctx, wallet.as_deref(), all).await,
        Command::Store => store::run(&ctx).await,
        Command::Derive { hash, wallet } => derive::run(&ctx, &hash, wallet.as_deref()),
        Command::Validate { file } => validate::run(&ctx, &file),
        Command::Doctor => doctor::run(&ctx).await,
    }
}
