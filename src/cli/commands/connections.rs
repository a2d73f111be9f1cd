use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_success};
use crate::cli::Context;
use crate::types::{Id, NewConnection};

#[derive(Subcommand)]
pub enum ConnectionCommands {
    #[command(about = "List gateway connections")]
    List,

    #[command(about = "Register a gateway connection")]
    Add {
        #[arg(help = "Connection name")]
        name: String,
        #[arg(help = "Gateway API URL")]
        api_url: String,
        #[arg(help = "Gateway instance name")]
        instance_name: String,
        #[arg(long, help = "Gateway API key (will prompt if not provided)")]
        api_key: Option<String>,
    },

    #[command(about = "Delete a gateway connection")]
    Delete {
        #[arg(help = "Connection ID")]
        id: String,
    },
}

pub async fn handle(cmd: ConnectionCommands, ctx: &Context) -> anyhow::Result<()> {
    let api = ctx.require_session()?;

    match cmd {
        ConnectionCommands::List => {
            let connections = api.list_connections().await?;
            output_collection(
                &ctx.output,
                "connections",
                "No connections configured",
                &connections,
                |c| format!("{:>6}  {}  {} ({})", c.id, c.name, c.api_url, c.instance_name),
            )
        }
        ConnectionCommands::Add { name, api_url, instance_name, api_key } => {
            let api_key = crate::cli::utils::prompt_if_missing(api_key, "API key")?;
            let connection = api
                .create_connection(&NewConnection { name, api_url, api_key, instance_name })
                .await?;
            output_success(
                &ctx.output,
                &format!("Connection '{}' created with ID {}", connection.name, connection.id),
                Some(json!({ "connection": connection })),
            )
        }
        ConnectionCommands::Delete { id } => {
            let id = Id::from(id);
            api.delete_connection(&id).await?;
            output_success(&ctx.output, &format!("Connection {} deleted", id), None)
        }
    }
}
