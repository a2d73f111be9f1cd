use clap::Parser;
use campaign_manager::cli::utils::output_error;
use campaign_manager::cli::{error_code, Cli, OutputFormat};
use campaign_manager::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so CAMPAIGN_API_BASE_URL and friends apply
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();

    // Logs go to stderr so --json output stays parseable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = campaign_manager::cli::run(cli, &config).await {
        match output_format {
            OutputFormat::Json => {
                output_error(&output_format, &e.to_string(), error_code(&e))?;
            }
            OutputFormat::Text => match std::env::var("CLI_VERBOSE").as_deref() {
                Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
                _ => eprintln!("Error: {e}"),
            },
        }
        std::process::exit(1);
    }

    Ok(())
}
