use clap::Subcommand;

use crate::util::Context;
use crate::AppError;

mod arena;
mod chests;
mod profile;
mod tag;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Profile(profile::Profile),
    Member(profile::Member),
    SetTag(tag::SetTag),
    GetTag(tag::GetTag),
    Validate(tag::Validate),
    Arena(arena::Arena),
    Chests(chests::Chests),
}

impl Commands {
    pub async fn run(&self, ctx: &Context) -> Result<(), AppError> {
        match self {
            Commands::Profile(cmd) => cmd.run(ctx).await,
            Commands::Member(cmd) => cmd.run(ctx).await,
            Commands::SetTag(cmd) => cmd.run(ctx),
            Commands::GetTag(cmd) => cmd.run(ctx),
            Commands::Validate(cmd) => cmd.run(),
            Commands::Arena(cmd) => cmd.run(ctx),
            Commands::Chests(cmd) => cmd.run(ctx).await,
        }
    }
}
