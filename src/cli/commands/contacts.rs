use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::{output_collection, output_success, read_stdin};
use crate::cli::{Context, OutputFormat};
use crate::forms::FormPhase;
use crate::import::ImportForm;
use crate::types::{Id, NewContact};

const PREVIEW_ROWS: usize = 3;

#[derive(Subcommand)]
pub enum ContactCommands {
    #[command(about = "List contacts")]
    List,

    #[command(about = "Create a contact")]
    Add {
        #[arg(help = "Contact name")]
        name: String,
        #[arg(help = "Phone number")]
        number: String,
        #[arg(long = "tag", help = "Tag ID to attach (repeatable)")]
        tags: Vec<String>,
    },

    #[command(about = "Delete a contact")]
    Delete {
        #[arg(help = "Contact ID")]
        id: String,
    },

    #[command(about = "Import contacts from CSV or JSON (--file, --payload, or stdin)")]
    Import {
        #[arg(long, help = "Read the payload from a .csv or .json file")]
        file: Option<PathBuf>,
        #[arg(long, conflicts_with = "file", help = "Payload given inline")]
        payload: Option<String>,
        #[arg(long = "tag", help = "Tag ID applied to every imported contact (repeatable)")]
        tags: Vec<String>,
        #[arg(long, help = "Contact list ID to add the contacts to")]
        list: Option<String>,
        #[arg(long, help = "Only show the first parsed rows, do not import")]
        preview: bool,
    },
}

pub async fn handle(cmd: ContactCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        ContactCommands::List => {
            let contacts = ctx.require_session()?.list_contacts().await?;
            output_collection(&ctx.output, "contacts", "No contacts yet", &contacts, |c| {
                let tags: Vec<&str> = c.tags.iter().map(|t| t.name.as_str()).collect();
                if tags.is_empty() {
                    format!("{:>6}  {}  {}", c.id, c.name, c.number)
                } else {
                    format!("{:>6}  {}  {}  [{}]", c.id, c.name, c.number, tags.join(", "))
                }
            })
        }
        ContactCommands::Add { name, number, tags } => {
            let contact = ctx
                .require_session()?
                .create_contact(&NewContact {
                    name,
                    number,
                    tag_ids: tags.into_iter().map(Id::from).collect(),
                })
                .await?;
            output_success(
                &ctx.output,
                &format!("Contact '{}' created with ID {}", contact.name, contact.id),
                Some(json!({ "contact": contact })),
            )
        }
        ContactCommands::Delete { id } => {
            let id = Id::from(id);
            ctx.require_session()?.delete_contact(&id).await?;
            output_success(&ctx.output, &format!("Contact {} deleted", id), None)
        }
        ContactCommands::Import { file, payload, tags, list, preview } => {
            let mut form = ImportForm::new();
            match (file, payload) {
                (Some(path), _) => form.load_file(&path)?,
                (None, Some(payload)) => form.set_text(payload),
                (None, None) => form.set_text(read_stdin()?),
            }
            for tag in tags {
                let id = Id::from(tag);
                if !form.tag_ids().contains(&id) {
                    form.toggle_tag(id);
                }
            }
            form.select_list(list.map(Id::from));

            let rows = form.preview(PREVIEW_ROWS);
            if preview {
                return output_collection(
                    &ctx.output,
                    "preview",
                    "Nothing to preview",
                    &rows,
                    |r| format!("{}  {}", r.name, r.number),
                );
            }
            if matches!(ctx.output, OutputFormat::Text) && !rows.is_empty() {
                println!("Preview:");
                for row in &rows {
                    println!("  {}  {}", row.name, row.number);
                }
            }

            let api = ctx.require_session()?;
            match form.submit(api).await {
                Some(FormPhase::Success(result)) => {
                    let summary = result.to_string();
                    output_success(
                        &ctx.output,
                        &format!("Contacts imported: {}", summary),
                        Some(json!({ "result": result })),
                    )
                }
                Some(FormPhase::Failed(failure)) => Err((*failure).into()),
                _ => Err(anyhow::anyhow!("Import did not complete")),
            }
        }
    }
}
