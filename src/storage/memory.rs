// src/storage/memory.rs
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};
use std::cmp::Reverse;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use uuid::Uuid;
use crate::config::{Config, VersionPolicy};
use crate::error::StorageError;
use crate::models::feature::ServerFeatureSupport;
use crate::models::server::{Server, ServerInfo};

/// A server chosen for use, with its capability table resolved once.
#[derive(Clone)]
pub struct SelectedServer {
    pub server: Server,
    pub features: &'static dyn ServerFeatureSupport,
    /// Version check against the store's own policy.
    pub version_supported: bool,
}

pub struct ServerStorage {
    servers: DashMap<Uuid, Server>,
    current: RwLock<Option<Uuid>>,
    // Held across the capacity check and the insert.
    adding: Mutex<()>,
    policy: VersionPolicy,
    config: Config,
}

impl ServerStorage {
    pub fn new(config: Config) -> Self {
        Self {
            servers: DashMap::new(),
            current: RwLock::new(None),
            adding: Mutex::new(()),
            policy: config.version_policy(),
            config,
        }
    }

    /// Reads a saved list written by [`ServerStorage::save`]. A missing file
    /// gives an empty store.
    pub fn load(config: Config, path: &Path) -> Result<Self, StorageError> {
        let storage = Self::new(config);

        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No server store at {}, starting empty", path.display());
                return Ok(storage);
            }
            Err(e) => return Err(e.into()),
        };

        let servers: Vec<Server> = serde_json::from_slice(&data)?;
        info!("Loaded {} saved servers from {}", servers.len(), path.display());
        if servers.len() > storage.config.max_saved_servers {
            warn!(
                "Server store holds {} servers, more than the configured maximum of {}",
                servers.len(),
                storage.config.max_saved_servers
            );
        }
        for server in servers {
            storage.servers.insert(server.id, server);
        }
        Ok(storage)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let servers = self.get_servers();
        let json = serde_json::to_vec_pretty(&servers)?;
        fs::write(path, json)?;
        debug!("Saved {} servers to {}", servers.len(), path.display());
        Ok(())
    }

    pub fn add_server(&self, server: Server) -> Result<(), StorageError> {
        let _guard = self.adding.lock();
        let is_new = !self.servers.contains_key(&server.id);
        if is_new && self.servers.len() >= self.config.max_saved_servers {
            return Err(StorageError::LimitReached(self.config.max_saved_servers));
        }

        debug!("Saving server {} ({}) at {}", server.name, server.id, server.address);
        self.servers.insert(server.id, server);
        Ok(())
    }

    pub fn get_server(&self, id: &Uuid) -> Option<Server> {
        self.servers.get(id).map(|r| r.value().clone())
    }

    /// Most recently used first.
    pub fn get_servers(&self) -> Vec<Server> {
        let mut servers: Vec<Server> = self.servers.iter().map(|r| r.value().clone()).collect();
        servers.sort_by(|a, b| {
            Reverse(a.date_last_accessed)
                .cmp(&Reverse(b.date_last_accessed))
                .then_with(|| a.name.cmp(&b.name))
        });
        servers
    }

    pub fn update_server_info(&self, id: &Uuid, info: ServerInfo) -> Result<Server, StorageError> {
        let mut entry = self.servers.get_mut(id).ok_or(StorageError::ServerNotFound(*id))?;
        entry.apply_info(info);
        debug!("Refreshed server {} (version {:?})", id, entry.version);
        Ok(entry.value().clone())
    }

    pub fn touch_server(&self, id: &Uuid, now: DateTime<Utc>) -> Result<(), StorageError> {
        let mut entry = self.servers.get_mut(id).ok_or(StorageError::ServerNotFound(*id))?;
        entry.touch(now);
        Ok(())
    }

    pub fn remove_server(&self, id: &Uuid) -> Option<Server> {
        let removed = self.servers.remove(id).map(|(_, server)| server);
        if removed.is_some() {
            let mut current = self.current.write();
            if current.as_ref() == Some(id) {
                *current = None;
            }
            debug!("Removed server {}", id);
        }
        removed
    }

    pub fn select_server(&self, id: &Uuid) -> Result<SelectedServer, StorageError> {
        self.touch_server(id, Utc::now())?;
        let server = self.get_server(id).ok_or(StorageError::ServerNotFound(*id))?;
        *self.current.write() = Some(*id);

        let selected = self.selected(server);
        if !selected.version_supported {
            warn!(
                "Selected server {} reports unsupported version {:?}",
                selected.server.name, selected.server.version
            );
        }
        Ok(selected)
    }

    pub fn current_server(&self) -> Option<SelectedServer> {
        let id = (*self.current.read())?;
        self.get_server(&id).map(|server| self.selected(server))
    }

    pub fn version_policy(&self) -> &VersionPolicy {
        &self.policy
    }

    fn selected(&self, server: Server) -> SelectedServer {
        SelectedServer {
            features: server.feature_support(),
            version_supported: server.version_supported_with(&self.policy),
            server,
        }
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
