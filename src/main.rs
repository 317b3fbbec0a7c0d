// src/main.rs
use chrono::Utc;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use mediaserver_caps::{
    Config, Server, ServerFeature, ServerStorage, ServerType, StorageError, VersionStatus,
};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "servers", about = "Inspect saved Jellyfin and Emby servers")]
struct Cli {
    /// Saved server list (defaults to SERVER_STORE_PATH or servers.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List saved servers, most recently used first
    List,
    /// Save a new server
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        version: Option<String>,
        #[arg(long = "type", default_value = "jellyfin")]
        server_type: ServerType,
    },
    /// Forget a saved server
    Remove { id: Uuid },
    /// Show which optional features a server offers
    Features { id: Uuid },
    /// Mark a server as used now
    Touch { id: Uuid },
}

fn status_label(status: VersionStatus) -> &'static str {
    match status {
        VersionStatus::Unknown => "unknown",
        VersionStatus::Unsupported => "unsupported",
        VersionStatus::Outdated => "outdated",
        VersionStatus::Supported => "supported",
    }
}

fn main() -> Result<(), StorageError> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = Config::from_env();
    let policy = config.version_policy();
    let path = cli.store.unwrap_or_else(|| config.server_store_path.clone());
    let storage = ServerStorage::load(config, &path)?;

    match cli.command {
        Command::List => {
            for server in storage.get_servers() {
                let features: Vec<String> = server
                    .feature_support()
                    .supported_features()
                    .iter()
                    .map(|f| f.to_string())
                    .collect();
                println!(
                    "{}  {:<20} {:<8} {:<10} {:<11} {}  [{}]",
                    server.id,
                    server.name,
                    server.server_type,
                    server.version.as_deref().unwrap_or("-"),
                    status_label(server.version_status(&policy)),
                    server.address,
                    features.join(", ")
                );
            }
        }
        Command::Add { name, address, version, server_type } => {
            let mut server = Server::new(name, address).with_server_type(server_type);
            server.version = version;
            if server.version.is_some() && server.server_version().is_none() {
                log::warn!(
                    "Version {:?} is not recognised, server will be treated as unknown",
                    server.version
                );
            }
            let id = server.id;
            storage.add_server(server)?;
            storage.save(&path)?;
            info!("Added server {}", id);
            println!("{}", id);
        }
        Command::Remove { id } => {
            let removed = storage.remove_server(&id).ok_or(StorageError::ServerNotFound(id))?;
            storage.save(&path)?;
            info!("Removed server {} ({})", removed.name, removed.address);
        }
        Command::Features { id } => {
            let server = storage.get_server(&id).ok_or(StorageError::ServerNotFound(id))?;
            let status = status_label(server.version_status(&policy));
            println!("{} ({}, version {})", server.name, server.server_type, status);
            for feature in ServerFeature::ALL {
                let mark = if server.supports(feature) { "yes" } else { "no" };
                println!("  {:<16} {}", feature.label(), mark);
            }
        }
        Command::Touch { id } => {
            storage.touch_server(&id, Utc::now())?;
            storage.save(&path)?;
        }
    }

    Ok(())
}
