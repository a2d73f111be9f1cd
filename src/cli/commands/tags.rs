use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_success};
use crate::cli::Context;
use crate::types::Id;

#[derive(Subcommand)]
pub enum TagCommands {
    #[command(about = "List tags")]
    List,

    #[command(about = "Create a tag")]
    Add {
        #[arg(help = "Tag name")]
        name: String,
    },

    #[command(about = "Delete a tag")]
    Delete {
        #[arg(help = "Tag ID")]
        id: String,
    },
}

pub async fn handle(cmd: TagCommands, ctx: &Context) -> anyhow::Result<()> {
    let api = ctx.require_session()?;

    match cmd {
        TagCommands::List => {
            let tags = api.list_tags().await?;
            output_collection(&ctx.output, "tags", "No tags yet", &tags, |tag| {
                format!("{:>6}  {}", tag.id, tag.name)
            })
        }
        TagCommands::Add { name } => {
            let tag = api.create_tag(&name).await?;
            output_success(
                &ctx.output,
                &format!("Tag '{}' created with ID {}", tag.name, tag.id),
                Some(json!({ "tag": tag })),
            )
        }
        TagCommands::Delete { id } => {
            let id = Id::from(id);
            api.delete_tag(&id).await?;
            output_success(&ctx.output, &format!("Tag {} deleted", id), None)
        }
    }
}
