use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_item, output_success};
use crate::cli::Context;
use crate::types::Id;

#[derive(Subcommand)]
pub enum ListCommands {
    #[command(about = "List contact lists")]
    List,

    #[command(about = "Show a contact list and its members")]
    Show {
        #[arg(help = "List ID")]
        id: String,
    },

    #[command(about = "Create a contact list")]
    Add {
        #[arg(help = "List name")]
        name: String,
    },
}

pub async fn handle(cmd: ListCommands, ctx: &Context) -> anyhow::Result<()> {
    let api = ctx.require_session()?;

    match cmd {
        ListCommands::List => {
            let lists = api.list_lists().await?;
            output_collection(&ctx.output, "lists", "No contact lists yet", &lists, |list| {
                format!("{:>6}  {}", list.id, list.name)
            })
        }
        ListCommands::Show { id } => {
            let list = api.get_list(&Id::from(id)).await?;
            let mut lines = vec![format!("{} (ID {}), {} contacts", list.name, list.id, list.contacts.len())];
            lines.extend(
                list.contacts
                    .iter()
                    .map(|c| format!("  {:>6}  {}  {}", c.id, c.name, c.number)),
            );
            output_item(&ctx.output, "list", &list, lines)
        }
        ListCommands::Add { name } => {
            let list = api.create_list(&name).await?;
            output_success(
                &ctx.output,
                &format!("List '{}' created with ID {}", list.name, list.id),
                Some(json!({ "list": list })),
            )
        }
    }
}
