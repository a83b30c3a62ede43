use crate::util::{expect_resolved, render_profile, Context};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "profile", about = "Show a player's profile by tag")]
pub struct Profile {
    #[clap(value_parser, help = "Player tag, with or without the leading #")]
    tag: String,
}

impl Profile {
    pub async fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let resolver = ctx.resolver()?;
        let result = expect_resolved(resolver.resolve(&self.tag).await)?;
        print!("{}", render_profile(&result, ctx.tiers().as_ref()));
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "member", about = "Show the profile of a member's saved tag")]
pub struct Member {
    #[clap(value_parser, help = "Member name used with set-tag")]
    member: String,
}

impl Member {
    pub async fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let tag = ctx
            .members()?
            .tag_of(&self.member)
            .cloned()
            .ok_or_else(|| AppError::MemberNotFound(self.member.clone()))?;

        let resolver = ctx.resolver()?;
        let result = expect_resolved(resolver.resolve_tag(&tag).await)?;
        print!("{}", render_profile(&result, ctx.tiers().as_ref()));
        Ok(())
    }
}
