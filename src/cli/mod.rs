pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::auth::TokenHolder;
use crate::config::AppConfig;
use crate::error::ClientError;
use crate::import::ImportFailure;
use self::config::{SessionInfo, SessionStore};

#[derive(Parser)]
#[command(name = "campaign")]
#[command(about = "Campaign console - manage WhatsApp campaigns, contacts and tags")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, registration and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Overview of connections, tags, contacts and campaigns")]
    Dashboard,

    #[command(about = "Messaging gateway connections")]
    Connections {
        #[command(subcommand)]
        cmd: commands::connections::ConnectionCommands,
    },

    #[command(about = "Contact tags")]
    Tags {
        #[command(subcommand)]
        cmd: commands::tags::TagCommands,
    },

    #[command(about = "Contacts and bulk import")]
    Contacts {
        #[command(subcommand)]
        cmd: commands::contacts::ContactCommands,
    },

    #[command(about = "Contact lists")]
    Lists {
        #[command(subcommand)]
        cmd: commands::lists::ListCommands,
    },

    #[command(about = "Campaigns, their stats and delivery logs")]
    Campaigns {
        #[command(subcommand)]
        cmd: commands::campaigns::CampaignCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything a command handler needs
pub struct Context {
    pub output: OutputFormat,
    api: ApiClient,
    store: SessionStore,
}

impl Context {
    pub fn new(config: &AppConfig, output: OutputFormat) -> anyhow::Result<Self> {
        let store = SessionStore::from_config(config)?;
        Self::with_store(config, output, store)
    }

    pub fn with_store(
        config: &AppConfig,
        output: OutputFormat,
        store: SessionStore,
    ) -> anyhow::Result<Self> {
        let session = match store.load() {
            Ok(session) => session,
            Err(e) => {
                // Unusable session counts as logged out
                warn!("discarding unreadable session: {e:#}");
                store.clear()?;
                None
            }
        };
        let tokens = match session {
            Some(session) => TokenHolder::with_token(session.access_token),
            None => TokenHolder::new(),
        };
        let api = ApiClient::from_config(config, tokens)?;
        Ok(Self { output, api, store })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Guard for commands that need a logged-in operator
    pub fn require_session(&self) -> Result<&ApiClient, ClientError> {
        if self.api.tokens().is_present() {
            Ok(&self.api)
        } else {
            Err(ClientError::Unauthenticated)
        }
    }

    pub fn remember(&self, token: String, email: Option<String>) -> anyhow::Result<()> {
        self.store.save(&SessionInfo::new(token, email))
    }

    /// Drop the saved session once the in-memory token is gone
    pub fn sync_session(&self) -> anyhow::Result<()> {
        if !self.api.tokens().is_present() {
            debug!(dir = %self.store.dir().display(), "no token in memory, clearing saved session");
            self.store.clear()?;
        }
        Ok(())
    }
}

/// Machine-readable code for a command failure, when it has one
pub fn error_code(error: &anyhow::Error) -> Option<&'static str> {
    error
        .downcast_ref::<ClientError>()
        .map(ClientError::error_code)
        .or_else(|| error.downcast_ref::<ImportFailure>().map(ImportFailure::error_code))
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = Context::new(config, output_format)?;

    let outcome = match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx).await,
        Commands::Dashboard => commands::dashboard::handle(&ctx).await,
        Commands::Connections { cmd } => commands::connections::handle(cmd, &ctx).await,
        Commands::Tags { cmd } => commands::tags::handle(cmd, &ctx).await,
        Commands::Contacts { cmd } => commands::contacts::handle(cmd, &ctx).await,
        Commands::Lists { cmd } => commands::lists::handle(cmd, &ctx).await,
        Commands::Campaigns { cmd } => commands::campaigns::handle(cmd, &ctx).await,
    };

    let synced = ctx.sync_session();
    outcome?;
    synced
}
