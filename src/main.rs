mod cli;

use clap::Parser;
use cli::Args;
use dotenvy::dotenv;
use erp_schema::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible); logs go to stderr so stdout
    // stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal: DATABASE_URL can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Parse arguments and run the command
    let args = Args::parse();
    let output = args
        .command
        .run()
        .await
        .inspect_err(|e| error!("Command failed: {}", e))?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
