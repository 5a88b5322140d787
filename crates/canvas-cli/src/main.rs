//! canvasctl
//!
//! Command-line interface for the canvas discovery daemon

use std::path::PathBuf;

use canvas_api::{InstanceRecord, InventoryDocument};
use canvas_client::DiscoveryClient;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

mod tag_env;

#[derive(Parser)]
#[command(name = "canvasctl")]
#[command(about = "Query the canvas discovery daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon base URL
    #[arg(long, default_value = "http://localhost:8880", global = true)]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the daemon answers
    Ping,
    /// Public IP of the primary load balancer
    #[command(name = "primary-ip")]
    PrimaryIp,
    /// List known instances
    Instances {
        /// Only list instances with this role
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
        /// Print the raw inventory document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch the daemon's verbose logging
    Verbose {
        #[arg(value_enum)]
        mode: Toggle,
    },
    /// Daemon and poller health
    Health,
    /// Render an instance's tags as shell `export` lines
    #[command(name = "tag-env")]
    TagEnv {
        /// Instance to render
        #[arg(long)]
        instance_id: String,
        /// Append to this file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Loadbalancer,
    Webmachine,
    Riak,
}

impl RoleArg {
    fn key(self) -> &'static str {
        match self {
            RoleArg::Loadbalancer => "loadbalancer",
            RoleArg::Webmachine => "webmachine",
            RoleArg::Riak => "riak",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = DiscoveryClient::new(&cli.url)?;

    match cli.command {
        Commands::Ping => {
            println!("{}", client.ping().await?);
        }
        Commands::PrimaryIp => {
            println!("{}", client.primary_load_balancer_ip().await?);
        }
        Commands::Instances { role, json } => {
            let doc = client.all_instances().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", render_instances(&doc, role));
            }
        }
        Commands::Verbose { mode } => {
            let message = client
                .set_verbose_logging(matches!(mode, Toggle::On))
                .await?;
            println!("{message}");
        }
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Commands::TagEnv {
            instance_id,
            output,
        } => {
            let doc = client.all_instances().await?;
            let record = doc
                .find(&instance_id)
                .ok_or_else(|| eyre::eyre!("instance {instance_id} not found in inventory"))?;
            let exports = tag_env::render_exports(&record.tags);
            match output {
                Some(path) => {
                    tag_env::append_to(&path, &exports)?;
                    tracing::info!(
                        path = %path.display(),
                        tags = record.tags.len(),
                        "appended exports"
                    );
                }
                None => print!("{exports}"),
            }
        }
    }

    Ok(())
}

/// One tab-separated line per instance: role, id, state, public and private IP
fn render_instances(doc: &InventoryDocument, role: Option<RoleArg>) -> String {
    let mut out = String::new();
    for (key, record) in doc.iter() {
        if role.is_some_and(|r| r.key() != key) {
            continue;
        }
        out.push_str(&instance_line(key, record));
        out.push('\n');
    }
    out
}

fn instance_line(role: &str, record: &InstanceRecord) -> String {
    format!(
        "{role}\t{}\t{}\t{}\t{}",
        record.id,
        record.activation_state,
        record.public_ip.as_deref().unwrap_or("-"),
        record.private_ip.as_deref().unwrap_or("-"),
    )
}
