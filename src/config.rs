use std::env;
use std::path::PathBuf;
use lazy_static::lazy_static;
use log::warn;
use crate::models::server::ServerType;
use crate::models::version::ServerVersion;

pub const JELLYFIN_MINIMUM_VERSION: ServerVersion = ServerVersion::new(10, 9, 0);
pub const JELLYFIN_RECOMMENDED_VERSION: ServerVersion = ServerVersion::new(10, 10, 0);
pub const EMBY_MINIMUM_VERSION: ServerVersion = ServerVersion::with_build(4, 8, 0, 0);
pub const EMBY_RECOMMENDED_VERSION: ServerVersion = ServerVersion::with_build(4, 8, 10, 0);

lazy_static! {
    static ref GLOBAL_POLICY: VersionPolicy = Config::from_env().version_policy();
}

/// Per-server-type version thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPolicy {
    pub jellyfin_minimum: ServerVersion,
    pub jellyfin_recommended: ServerVersion,
    pub emby_minimum: ServerVersion,
    pub emby_recommended: ServerVersion,
}

impl Default for VersionPolicy {
    fn default() -> Self {
        Self {
            jellyfin_minimum: JELLYFIN_MINIMUM_VERSION,
            jellyfin_recommended: JELLYFIN_RECOMMENDED_VERSION,
            emby_minimum: EMBY_MINIMUM_VERSION,
            emby_recommended: EMBY_RECOMMENDED_VERSION,
        }
    }
}

impl VersionPolicy {
    /// Policy read from the environment on first use.
    pub fn global() -> &'static VersionPolicy {
        &GLOBAL_POLICY
    }

    pub fn minimum_version(&self, server_type: ServerType) -> ServerVersion {
        match server_type {
            ServerType::Jellyfin => self.jellyfin_minimum,
            ServerType::Emby => self.emby_minimum,
        }
    }

    pub fn recommended_version(&self, server_type: ServerType) -> ServerVersion {
        match server_type {
            ServerType::Jellyfin => self.jellyfin_recommended,
            ServerType::Emby => self.emby_recommended,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    // Version gating
    pub jellyfin_minimum_version: ServerVersion,
    pub jellyfin_recommended_version: ServerVersion,
    pub emby_minimum_version: ServerVersion,
    pub emby_recommended_version: ServerVersion,

    // Saved server list
    pub max_saved_servers: usize,
    pub server_store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jellyfin_minimum_version: JELLYFIN_MINIMUM_VERSION,
            jellyfin_recommended_version: JELLYFIN_RECOMMENDED_VERSION,
            emby_minimum_version: EMBY_MINIMUM_VERSION,
            emby_recommended_version: EMBY_RECOMMENDED_VERSION,
            max_saved_servers: 32,
            server_store_path: PathBuf::from("servers.json"),
        }
    }
}

fn version_var(name: &str, default: ServerVersion) -> ServerVersion {
    match env::var(name) {
        Ok(raw) => ServerVersion::parse(&raw).unwrap_or_else(|| {
            warn!("Ignoring {}={:?}, not a server version; using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            jellyfin_minimum_version: version_var(
                "JELLYFIN_MINIMUM_VERSION",
                defaults.jellyfin_minimum_version,
            ),

            jellyfin_recommended_version: version_var(
                "JELLYFIN_RECOMMENDED_VERSION",
                defaults.jellyfin_recommended_version,
            ),

            emby_minimum_version: version_var(
                "EMBY_MINIMUM_VERSION",
                defaults.emby_minimum_version,
            ),

            emby_recommended_version: version_var(
                "EMBY_RECOMMENDED_VERSION",
                defaults.emby_recommended_version,
            ),

            max_saved_servers: env::var("MAX_SAVED_SERVERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_saved_servers),

            server_store_path: env::var("SERVER_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.server_store_path),
        }
    }

    pub fn version_policy(&self) -> VersionPolicy {
        VersionPolicy {
            jellyfin_minimum: self.jellyfin_minimum_version,
            jellyfin_recommended: self.jellyfin_recommended_version,
            emby_minimum: self.emby_minimum_version,
            emby_recommended: self.emby_recommended_version,
        }
    }
}
