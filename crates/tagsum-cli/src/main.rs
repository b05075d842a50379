use anyhow::Result;
use clap::Parser;

mod args;
mod cmd;
mod context;
mod logging;
mod output;
mod render;
mod solana;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = args::Cli::parse();
    logging::init(cli.log_json)?;
    output::init(cli.json);

    cmd::dispatch(cli).await
}
