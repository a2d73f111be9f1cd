use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_item, output_success};
use crate::cli::Context;
use crate::types::{CampaignDraft, CampaignLog, Id, DEFAULT_MESSAGES_PER_MINUTE};

#[derive(Subcommand)]
pub enum CampaignCommands {
    #[command(about = "List campaigns")]
    List,

    #[command(about = "Create a draft campaign")]
    Create {
        #[arg(help = "Campaign name")]
        name: String,
        #[arg(long, help = "Message body")]
        message: String,
        #[arg(long, help = "Connection ID used to send")]
        connection: String,
        #[arg(long, help = "Target contact list ID")]
        list: Option<String>,
        #[arg(long = "tag", help = "Target tag ID (repeatable)")]
        tags: Vec<String>,
        #[arg(long, help = "Media URL attached to every message")]
        media_url: Option<String>,
        #[arg(long, help = "Media type: image, video, audio or document")]
        media_type: Option<String>,
        #[arg(long, default_value_t = DEFAULT_MESSAGES_PER_MINUTE, help = "Messages per minute")]
        rate: u32,
    },

    #[command(about = "Start sending a campaign")]
    Start {
        #[arg(help = "Campaign ID")]
        id: String,
    },

    #[command(about = "Pause a running campaign")]
    Pause {
        #[arg(help = "Campaign ID")]
        id: String,
    },

    #[command(about = "Delivery statistics")]
    Stats {
        #[arg(help = "Campaign ID")]
        id: String,
    },

    #[command(about = "Per-contact delivery log")]
    Logs {
        #[arg(help = "Campaign ID")]
        id: String,
        #[arg(long, help = "Filter by name, number or status")]
        search: Option<String>,
    },
}

pub async fn handle(cmd: CampaignCommands, ctx: &Context) -> anyhow::Result<()> {
    let api = ctx.require_session()?;

    match cmd {
        CampaignCommands::List => {
            let campaigns = api.list_campaigns().await?;
            output_collection(&ctx.output, "campaigns", "No campaigns yet", &campaigns, |c| {
                format!(
                    "{:>6}  {}  [{}]  {}/min",
                    c.id, c.name, c.status, c.messages_per_minute
                )
            })
        }
        CampaignCommands::Create {
            name,
            message,
            connection,
            list,
            tags,
            media_url,
            media_type,
            rate,
        } => {
            let mut draft = CampaignDraft::new(name, message, Id::from(connection));
            if let Some(url) = media_url {
                draft = draft.with_media(url, media_type);
            }
            draft.messages_per_minute = rate;
            draft.contact_list_id = list.filter(|l| !l.trim().is_empty()).map(Id::from);
            draft.target_tags_ids = tags.into_iter().map(Id::from).collect();

            api.create_campaign(&draft).await?;
            output_success(
                &ctx.output,
                &format!("Campaign '{}' created as draft", draft.name),
                Some(json!({ "campaign": draft })),
            )
        }
        CampaignCommands::Start { id } => {
            let id = Id::from(id);
            api.start_campaign(&id).await?;
            output_success(&ctx.output, &format!("Campaign {} started", id), None)
        }
        CampaignCommands::Pause { id } => {
            let id = Id::from(id);
            api.pause_campaign(&id).await?;
            output_success(&ctx.output, &format!("Campaign {} paused", id), None)
        }
        CampaignCommands::Stats { id } => {
            let stats = api.campaign_stats(&Id::from(id)).await?;
            output_item(
                &ctx.output,
                "stats",
                &stats,
                vec![
                    format!("Total:     {}", stats.total),
                    format!("Delivered: {} ({}%)", stats.delivered, stats.delivery_rate()),
                    format!("Read:      {} ({}%)", stats.read, stats.read_rate()),
                    format!("Failed:    {} ({}%)", stats.failed, stats.failure_rate()),
                ],
            )
        }
        CampaignCommands::Logs { id, search } => {
            let mut logs = api.campaign_logs(&Id::from(id)).await?;
            if let Some(term) = search.as_deref() {
                logs.retain(|log| log.matches(term));
            }
            output_collection(&ctx.output, "logs", "No log entries", &logs, log_line)
        }
    }
}

fn log_line(log: &CampaignLog) -> String {
    let mut line = format!(
        "{}  {}  {}  {}",
        log.created_at.as_deref().unwrap_or("-"),
        log.display_name(),
        log.display_number(),
        log.status.as_deref().unwrap_or("-"),
    );
    if let Some(error) = log.error_message.as_deref().filter(|e| !e.is_empty()) {
        line.push_str("  ");
        line.push_str(error);
    }
    line
}
