use clap::Parser;

use crate::cli::Cli;
use crate::error::AppError;
use crate::util::Context;

mod cli;
mod commands;
mod config;
mod error;
mod util;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let ctx = Context::load(&args.data_dir)?;
    args.command.run(&ctx).await?;

    Ok(())
}
