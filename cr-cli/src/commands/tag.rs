use data_tag::PlayerTag;

use crate::util::Context;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "set-tag", about = "Save a player tag for a member")]
pub struct SetTag {
    #[clap(value_parser, help = "Member name")]
    member: String,
    #[clap(value_parser, help = "Player tag, with or without the leading #")]
    tag: String,
}

impl SetTag {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let tag = checked_tag(&self.tag)?;
        let mut members = ctx.members()?;
        members.set(&self.member, tag.clone())?;
        println!("Saved #{} for {}.", tag, self.member);
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "get-tag", about = "Print the player tag saved for a member")]
pub struct GetTag {
    #[clap(value_parser, help = "Member name")]
    member: String,
}

impl GetTag {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let members = ctx.members()?;
        let tag = members
            .tag_of(&self.member)
            .ok_or_else(|| AppError::MemberNotFound(self.member.clone()))?;
        println!("#{}", tag);
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "validate", about = "Check a player tag against the tag alphabet")]
pub struct Validate {
    #[clap(value_parser, help = "Player tag, with or without the leading #")]
    tag: String,
}

impl Validate {
    pub fn run(&self) -> Result<(), AppError> {
        let tag = checked_tag(&self.tag)?;
        println!("#{} is a valid tag.", tag);
        Ok(())
    }
}

fn checked_tag(raw: &str) -> Result<PlayerTag, AppError> {
    let tag = PlayerTag::canonicalize(raw);
    let validation = tag.validate();
    if validation.valid {
        Ok(tag)
    } else {
        Err(AppError::InvalidTag(validation.error_message()))
    }
}
