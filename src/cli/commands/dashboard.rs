use crate::cli::utils::output_item;
use crate::cli::Context;

pub async fn handle(ctx: &Context) -> anyhow::Result<()> {
    let api = ctx.require_session()?;
    let counts = api.dashboard().await;

    output_item(
        &ctx.output,
        "dashboard",
        &counts,
        vec![
            format!("Connections: {}", counts.connections),
            format!("Tags:        {}", counts.tags),
            format!("Contacts:    {}", counts.contacts),
            format!("Campaigns:   {}", counts.campaigns),
        ],
    )
}
