// src/models/server.rs
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

use crate::config::VersionPolicy;
use crate::models::feature::{feature_support, ServerFeature, ServerFeatureSupport};
use crate::models::version::ServerVersion;

/// Backend protocol family spoken by a server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    #[default]
    Jellyfin,
    Emby,
}

impl ServerType {
    pub fn feature_support(self) -> &'static dyn ServerFeatureSupport {
        feature_support(self)
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jellyfin => f.pad("Jellyfin"),
            Self::Emby => f.pad("Emby"),
        }
    }
}

impl FromStr for ServerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jellyfin" => Ok(Self::Jellyfin),
            "emby" => Ok(Self::Emby),
            other => Err(format!("Unknown server type: {}", other)),
        }
    }
}

/// Identity of a saved server. Everything else on [`Server`] may drift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServerKey {
    pub id: Uuid,
    pub address: String,
}

/// Where a server's version stands against a [`VersionPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    /// No version reported yet, or it could not be parsed.
    Unknown,
    Unsupported,
    /// Usable, but below the recommended version.
    Outdated,
    Supported,
}

/// Public system information returned by a server probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerInfo {
    #[serde(rename = "ServerName", default)]
    pub server_name: Option<String>,
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
    #[serde(rename = "LoginDisclaimer", default)]
    pub login_disclaimer: Option<String>,
    #[serde(rename = "SplashscreenEnabled", default)]
    pub splashscreen_enabled: Option<bool>,
    #[serde(rename = "StartupWizardCompleted", default)]
    pub startup_wizard_completed: Option<bool>,
}

fn default_true() -> bool {
    true
}

fn never_accessed() -> DateTime<Utc> {
    DateTime::<Utc>::MIN_UTC
}

/// A remembered connection target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub login_disclaimer: Option<String>,
    #[serde(default)]
    pub splashscreen_enabled: bool,
    #[serde(default = "default_true")]
    pub setup_completed: bool,
    #[serde(default = "never_accessed", with = "chrono::serde::ts_milliseconds")]
    pub date_last_accessed: DateTime<Utc>,
    #[serde(default)]
    pub server_type: ServerType,
}

impl Server {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            version: None,
            login_disclaimer: None,
            splashscreen_enabled: false,
            setup_completed: true,
            date_last_accessed: never_accessed(),
            server_type: ServerType::default(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_server_type(mut self, server_type: ServerType) -> Self {
        self.server_type = server_type;
        self
    }

    pub fn key(&self) -> ServerKey {
        ServerKey {
            id: self.id,
            address: self.address.clone(),
        }
    }

    pub fn server_version(&self) -> Option<ServerVersion> {
        self.version.as_deref().and_then(ServerVersion::parse)
    }

    /// Checked against the process-wide policy, see [`VersionPolicy::global`].
    pub fn version_supported(&self) -> bool {
        self.version_supported_with(VersionPolicy::global())
    }

    pub fn version_supported_with(&self, policy: &VersionPolicy) -> bool {
        match self.server_version() {
            Some(version) => version >= policy.minimum_version(self.server_type),
            None => false,
        }
    }

    pub fn version_status(&self, policy: &VersionPolicy) -> VersionStatus {
        let Some(version) = self.server_version() else {
            return VersionStatus::Unknown;
        };

        if version < policy.minimum_version(self.server_type) {
            VersionStatus::Unsupported
        } else if version < policy.recommended_version(self.server_type) {
            VersionStatus::Outdated
        } else {
            VersionStatus::Supported
        }
    }

    /// Three-way comparison against `target`. An unknown version is always
    /// `Less` (-1), whatever the target.
    pub fn compare_to(&self, target: &ServerVersion) -> Ordering {
        match self.server_version() {
            Some(version) => version.cmp(target),
            None => Ordering::Less,
        }
    }

    pub fn is_at_least(&self, target: &ServerVersion) -> bool {
        self.compare_to(target) != Ordering::Less
    }

    pub fn feature_support(&self) -> &'static dyn ServerFeatureSupport {
        self.server_type.feature_support()
    }

    pub fn supports(&self, feature: ServerFeature) -> bool {
        self.feature_support().is_supported(feature)
    }

    pub fn has_been_accessed(&self) -> bool {
        self.date_last_accessed > never_accessed()
    }

    /// Records a successful use. Never moves the timestamp backwards.
    /// Stored at millisecond precision, the precision it is saved with.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let now = now.trunc_subsecs(3);
        if now > self.date_last_accessed {
            self.date_last_accessed = now;
        }
    }

    /// Refreshes the server-reported fields from a probe result.
    pub fn apply_info(&mut self, info: ServerInfo) {
        if let Some(name) = info.server_name.filter(|name| !name.trim().is_empty()) {
            self.name = name;
        }
        self.version = info.version;
        self.login_disclaimer = info.login_disclaimer.filter(|text| !text.trim().is_empty());
        if let Some(enabled) = info.splashscreen_enabled {
            self.splashscreen_enabled = enabled;
        }
        if let Some(completed) = info.startup_wizard_completed {
            self.setup_completed = completed;
        }
    }
}

impl PartialEq for Server {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.address == other.address
    }
}

impl Eq for Server {}

impl Hash for Server {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.address.hash(state);
    }
}
