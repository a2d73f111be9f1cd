use clap::Subcommand;
use serde_json::json;

use crate::auth::{LoginRequest, RegisterRequest};
use crate::cli::utils::{output_success, prompt_if_missing};
use crate::cli::{Context, OutputFormat};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the backend")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Register a new operator account and log in")]
    Register {
        #[arg(help = "First name")]
        first_name: String,
        #[arg(help = "Last name")]
        last_name: String,
        #[arg(help = "Phone number")]
        phone: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = prompt_if_missing(password, "Password")?;
            let credentials = LoginRequest { email: email.clone(), password };
            let token = ctx.api().login(&credentials).await?;
            ctx.remember(token, Some(email.clone()))?;
            output_success(
                &ctx.output,
                &format!("Logged in as {}", email),
                Some(json!({ "email": email })),
            )
        }
        AuthCommands::Register { first_name, last_name, phone, email, password } => {
            let password = prompt_if_missing(password, "Password")?;
            let request = RegisterRequest { first_name, last_name, phone, email: email.clone(), password };
            let token = ctx.api().register_and_login(&request).await?;
            ctx.remember(token, Some(email.clone()))?;
            output_success(
                &ctx.output,
                &format!("Registered and logged in as {}", email),
                Some(json!({ "email": email })),
            )
        }
        AuthCommands::Logout => {
            ctx.api().logout();
            ctx.store().clear()?;
            output_success(&ctx.output, "Logged out", None)
        }
        AuthCommands::Status => {
            let session = ctx.store().load()?;
            match (&ctx.output, session) {
                (OutputFormat::Json, session) => {
                    println!("{}", serde_json::to_string_pretty(&json!({
                        "authenticated": session.is_some(),
                        "email": session.as_ref().and_then(|s| s.email.clone()),
                        "saved_at": session.as_ref().map(|s| s.saved_at),
                        "server": ctx.api().base_url().as_str(),
                    }))?);
                }
                (OutputFormat::Text, Some(session)) => {
                    println!(
                        "Logged in as {} since {}",
                        session.email.as_deref().unwrap_or("unknown"),
                        session.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
                    );
                    println!("Server: {}", ctx.api().base_url());
                }
                (OutputFormat::Text, None) => {
                    println!("Not logged in");
                    println!("Server: {}", ctx.api().base_url());
                }
            }
            Ok(())
        }
    }
}
