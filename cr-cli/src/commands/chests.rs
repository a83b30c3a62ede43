use crate::util::{expect_resolved, render_chests, Context};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "chests", about = "Show a player's upcoming chests")]
pub struct Chests {
    #[clap(value_parser, help = "Player tag, with or without the leading #")]
    tag: String,
}

impl Chests {
    pub async fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let resolver = ctx.resolver()?;
        let result = expect_resolved(resolver.resolve(&self.tag).await)?;
        print!("{}", render_chests(&result));
        Ok(())
    }
}
