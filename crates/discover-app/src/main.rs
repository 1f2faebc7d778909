//! discover - headless Discover saved query list
//!
//! Loads a page of saved queries from a JSON payload, renders the list, and
//! can delete or duplicate a query against an in-memory store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use discover_app::{CliNavigator, logging, render_list};
use discover_core::{ClickEvent, Location, Organization, parse_saved_queries};
use discover_services::{
    InMemorySavedQueryService, MutationOutcome, QueryListController, QueryListProps,
};
use discover_settings::DiscoverSettings;

#[derive(Parser)]
#[command(name = "discover")]
#[command(version)]
#[command(about = "Browse and manage Discover saved queries")]
struct Cli {
    /// JSON array of saved queries as returned by the API
    #[arg(long, env = "DISCOVER_PAYLOAD")]
    payload: Option<PathBuf>,

    /// Pagination `Link` descriptor for the payload page
    #[arg(long, default_value = "", env = "DISCOVER_PAGE_LINKS")]
    links: String,

    /// Organization slug
    #[arg(long, default_value = "sentry")]
    org: String,

    #[arg(long, default_value = "1")]
    org_id: String,

    /// Organization feature flags, repeatable
    #[arg(long = "feature")]
    features: Vec<String>,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Verbose console logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render the list
    List,
    /// Delete a saved query, then render the refreshed list
    Delete { id: String },
    /// Duplicate a saved query, then render the refreshed list
    Duplicate { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = if cli.verbose {
        logging::LoggingConfig::development()
    } else {
        logging::LoggingConfig::production()
    };
    if let Err(e) = logging::init(config) {
        // Logging is not available yet
        eprintln!("FATAL: Failed to initialize logging: {e:#}");
        std::process::exit(1);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting discover");

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.settings {
        Some(path) => DiscoverSettings::load_from(path)?,
        None => DiscoverSettings::load()?,
    };
    let organization = Organization::new(cli.org_id, cli.org.as_str()).with_features(cli.features);

    let payload = match &cli.payload {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read payload {}", path.display()))?;
            serde_json::from_str(&content).with_context(|| "Failed to parse payload JSON")?
        }
        None => serde_json::Value::Array(Vec::new()),
    };

    // The store lists newest first; seed oldest first so it matches the payload
    let mut seed = parse_saved_queries(&payload);
    seed.reverse();
    let service = Arc::new(InMemorySavedQueryService::new().with_queries(&organization, seed));
    let navigator = Arc::new(CliNavigator::new());

    let location = Location::bare(format!("/organizations/{}/discover/queries/", cli.org));
    let props = QueryListProps::new(organization.clone(), location)
        .with_saved_queries(service.list(&organization))
        .with_page_links(cli.links);
    let mut controller =
        QueryListController::new(props, service.clone(), navigator.clone()).with_settings(settings);

    let outcome = match cli.command.unwrap_or(Commands::List) {
        Commands::List => None,
        Commands::Delete { id } => {
            let view = find_view(&controller, &id)?;
            Some(controller.handle_delete(&view, &mut ClickEvent::new()).await?)
        }
        Commands::Duplicate { id } => {
            let view = find_view(&controller, &id)?;
            Some(
                controller
                    .handle_duplicate(&view, &mut ClickEvent::new())
                    .await?,
            )
        }
    };

    if outcome == Some(MutationOutcome::Completed) {
        if let Some(location) = navigator.take() {
            controller.set_props(
                QueryListProps::new(organization.clone(), location)
                    .with_saved_queries(service.list(&organization)),
            );
        }
    }

    print!(
        "{}",
        render_list(
            &controller.items(),
            &controller.pagination(),
            &controller.settings().list
        )
    );
    Ok(())
}

fn find_view(controller: &QueryListController, id: &str) -> Result<discover_core::QueryView> {
    match controller
        .items()
        .into_iter()
        .find(|item| item.view.id() == Some(id))
    {
        Some(item) => Ok(item.view),
        None => bail!("No saved query with id {id} on this page"),
    }
}
