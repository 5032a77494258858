use chrono::NaiveDate;
use clap::Parser;
use commit_thief::{Config, Overrides};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Draw a year of GitHub contributions as an SVG, with a few commits being carried off.
#[derive(Parser, Debug)]
#[command(name = "commit_thief", version)]
struct Cli {
    /// GitHub login to chart (falls back to GITHUB_USERNAME, then `git config user.name`).
    #[arg(long)]
    user: Option<String>,

    /// Access token for the GraphQL API (falls back to TOKEN or GITHUB_TOKEN).
    #[arg(long)]
    token: Option<String>,

    /// GraphQL endpoint (falls back to GITHUB_GRAPHQL_URL).
    #[arg(long)]
    api_url: Option<String>,

    /// Directory for the SVG (falls back to OUTPUT_DIR).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// SVG filename (falls back to OUTPUT_FILE, then output.svg).
    #[arg(long)]
    output_file: Option<String>,

    /// Read `{"YYYY-MM-DD": count}` JSON instead of querying GitHub.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Reference date for the grid (defaults to today, UTC).
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Seed for the overlay selection.
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Self {
            user: cli.user,
            token: cli.token,
            api_url: cli.api_url,
            output_dir: cli.output_dir,
            output_file: cli.output_file,
            input: cli.input,
            today: cli.today,
            seed: cli.seed,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // A missing .env file is fine; values already in the environment win.
    if let Ok(path) = dotenvy::dotenv() {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = Config::from_env(Cli::parse().into())?;
    let path = commit_thief::run(&config).await?;
    info!("svg ready at {}", path.display());

    Ok(())
}
