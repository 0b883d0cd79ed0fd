//! KBC Writer CLI - provisions Keboola GoodData writers
//! Hosts the writer lifecycle and tracks provisioned writers in a local state file

mod state;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kbc_writer_core::application::{GoodDataWriterResource, Provisioner, ResourceLifecycle};
use kbc_writer_core::domain::{ProvisionedResource, ProvisioningRequest, DEFAULT_AUTH_TOKEN};
use kbc_writer_infra_http::{KbcClient, KbcConfig};
use state::{StateStore, DEFAULT_STATE_PATH};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "kbc-writer")]
#[command(about = "Provision GoodData writers in Keboola Connection", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// State file tracking provisioned writers
    #[arg(long, env = "KBC_WRITER_STATE", default_value = DEFAULT_STATE_PATH)]
    state_file: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a writer (project creation job + configuration registration)
    Create {
        /// Writer name; the writer id is derived from it
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// GoodData auth token used for the backing project
        #[arg(long, default_value = DEFAULT_AUTH_TOKEN)]
        auth_token: String,
    },

    /// Show a tracked writer
    Show {
        /// Assigned writer id
        id: String,
    },

    /// List tracked writers
    List,

    /// Update the declared name/description of a tracked writer
    Update {
        /// Assigned writer id
        id: String,

        #[arg(short, long)]
        name: String,

        /// New description; the stored one is kept when omitted
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Stop tracking a writer (no remote deletion)
    Delete {
        /// Assigned writer id
        id: String,
    },
}

#[derive(Tabled)]
struct WriterRow {
    id: String,
    name: String,
    writer_id: String,
    description: String,
}

impl From<&ProvisionedResource> for WriterRow {
    fn from(r: &ProvisionedResource) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            writer_id: r.writer_id.to_string(),
            description: r.description.clone(),
        }
    }
}

fn init_logging() {
    let log_format =
        std::env::var("KBC_WRITER_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kbc_writer=info"));

    // Logs go to stderr; stdout carries command output
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Wire the Keboola client into the writer lifecycle
fn writer_resource() -> Result<GoodDataWriterResource> {
    let config = KbcConfig::from_env().context("Keboola connection is not configured")?;
    let client = Arc::new(KbcClient::new(config)?);
    let provisioner = Provisioner::new(client.clone(), client);

    Ok(GoodDataWriterResource::new(provisioner))
}

/// Declared state for an update; an omitted description keeps the tracked one
fn update_request(
    name: String,
    description: Option<String>,
    tracked: &ProvisionedResource,
) -> ProvisioningRequest {
    let description = description.unwrap_or_else(|| tracked.description.clone());
    ProvisioningRequest::new(name).with_description(description)
}

fn print_resources<'a>(resources: impl IntoIterator<Item = &'a ProvisionedResource>) {
    let rows: Vec<WriterRow> = resources.into_iter().map(WriterRow::from).collect();
    println!("{}", Table::new(rows));
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    info!("kbc-writer v{}", VERSION);

    let store = StateStore::open(&cli.state_file);
    let mut state = store.load()?;

    match cli.command {
        Commands::Create {
            name,
            description,
            auth_token,
        } => {
            let req = ProvisioningRequest::new(name)
                .with_description(description)
                .with_auth_token(auth_token);

            let resource = writer_resource()?
                .create(&req)
                .await
                .with_context(|| format!("Failed to create writer '{}'", req.name))?;

            state.put(resource.clone());
            store.save(&state)?;

            println!("{}", "✓ Writer created successfully".green().bold());
            println!();
            print_resources([&resource]);
        }

        Commands::Show { id } => {
            let tracked = state.get(&id)?;
            let resource = writer_resource()?.read(tracked).await?;
            print_resources([&resource]);
        }

        Commands::List => {
            if state.resources.is_empty() {
                println!("{}", "No writers tracked".yellow());
            } else {
                print_resources(state.resources.values());
            }
        }

        Commands::Update {
            id,
            name,
            description,
        } => {
            let tracked = state.get(&id)?.clone();
            let req = update_request(name, description, &tracked);

            let resource = writer_resource()?.update(&req, &tracked).await?;

            state.put(resource.clone());
            store.save(&state)?;

            println!("{}", format!("✓ Writer {} updated", id).green().bold());
            print_resources([&resource]);
        }

        Commands::Delete { id } => {
            let tracked = state.get(&id)?.clone();
            writer_resource()?.delete(&tracked).await?;

            state.remove(&id);
            store.save(&state)?;

            println!("{}", format!("✓ Writer {} no longer tracked", id).green().bold());
            println!(
                "  {} the writer and its GoodData project remain in Keboola",
                "note:".yellow()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use kbc_writer_core::domain::WriterId;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_defaults() {
        let cli = Cli::try_parse_from(["kbc-writer", "create", "--name", "Sales Data"]).unwrap();
        match cli.command {
            Commands::Create {
                name,
                description,
                auth_token,
            } => {
                assert_eq!(name, "Sales Data");
                assert_eq!(description, "");
                assert_eq!(auth_token, "keboola_demo");
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_update_requires_name() {
        assert!(Cli::try_parse_from(["kbc-writer", "update", "12345"]).is_err());
    }

    fn tracked() -> ProvisionedResource {
        ProvisionedResource {
            id: "12345".to_string(),
            name: "Sales Data".to_string(),
            description: "Quarterly sales".to_string(),
            writer_id: WriterId::from_name("Sales Data"),
        }
    }

    #[test]
    fn test_update_without_description_keeps_stored_one() {
        let cli =
            Cli::try_parse_from(["kbc-writer", "update", "12345", "--name", "Sales EU"]).unwrap();
        let Commands::Update {
            name, description, ..
        } = cli.command
        else {
            panic!("expected update");
        };
        assert_eq!(description, None);

        let req = update_request(name, description, &tracked());
        assert_eq!(req.name, "Sales EU");
        assert_eq!(req.description, "Quarterly sales");
    }

    #[test]
    fn test_update_with_description_replaces_stored_one() {
        let cli = Cli::try_parse_from([
            "kbc-writer", "update", "12345", "--name", "Sales", "--description", "",
        ])
        .unwrap();
        let Commands::Update {
            name, description, ..
        } = cli.command
        else {
            panic!("expected update");
        };

        let req = update_request(name, description, &tracked());
        assert_eq!(req.description, "");
    }
}
