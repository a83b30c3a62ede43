use crate::util::Context;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "arena", about = "Show the arena reached at a trophy count")]
pub struct Arena {
    #[clap(value_parser, help = "Trophy count")]
    trophies: u32,
}

impl Arena {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let tiers = ctx.tiers().ok_or_else(|| {
            AppError::ArenasNotFound(ctx.arenas_path().display().to_string())
        })?;
        match tiers.resolve(self.trophies) {
            Some(entry) => {
                println!("{}", tiers.describe(self.trophies));
                println!("League {} ({})", entry.league(), entry.emoji_name());
            }
            None => println!("No arena for {} trophies.", self.trophies),
        }
        Ok(())
    }
}
