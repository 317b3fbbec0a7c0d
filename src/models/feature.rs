// src/models/feature.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::models::server::ServerType;

/// Optional capabilities a media server may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerFeature {
    QuickConnect,
    SyncPlay,
    WatchParty,
    MediaSegments,
    Trickplay,
    Lyrics,
    ClientLog,
}

impl ServerFeature {
    pub const ALL: [ServerFeature; 7] = [
        ServerFeature::QuickConnect,
        ServerFeature::SyncPlay,
        ServerFeature::WatchParty,
        ServerFeature::MediaSegments,
        ServerFeature::Trickplay,
        ServerFeature::Lyrics,
        ServerFeature::ClientLog,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::QuickConnect => "Quick Connect",
            Self::SyncPlay => "SyncPlay",
            Self::WatchParty => "Watch Party",
            Self::MediaSegments => "Media Segments",
            Self::Trickplay => "Trickplay",
            Self::Lyrics => "Lyrics",
            Self::ClientLog => "Client Logging",
        }
    }
}

impl fmt::Display for ServerFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Capability set of one backend. Implementations are fixed tables, the
/// server is never asked what it supports.
pub trait ServerFeatureSupport: Send + Sync {
    fn supported_features(&self) -> &'static [ServerFeature];

    fn is_supported(&self, feature: ServerFeature) -> bool {
        self.supported_features().contains(&feature)
    }

    fn feature_set(&self) -> HashSet<ServerFeature> {
        self.supported_features().iter().copied().collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JellyfinFeatureSupport;

impl ServerFeatureSupport for JellyfinFeatureSupport {
    fn supported_features(&self) -> &'static [ServerFeature] {
        &[
            ServerFeature::QuickConnect,
            ServerFeature::SyncPlay,
            ServerFeature::MediaSegments,
            ServerFeature::Trickplay,
            ServerFeature::Lyrics,
            ServerFeature::ClientLog,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbyFeatureSupport;

impl ServerFeatureSupport for EmbyFeatureSupport {
    fn supported_features(&self) -> &'static [ServerFeature] {
        &[ServerFeature::WatchParty, ServerFeature::Trickplay]
    }
}

static JELLYFIN: JellyfinFeatureSupport = JellyfinFeatureSupport;
static EMBY: EmbyFeatureSupport = EmbyFeatureSupport;

/// Resolves the capability table for a server type.
pub fn feature_support(server_type: ServerType) -> &'static dyn ServerFeatureSupport {
    match server_type {
        ServerType::Jellyfin => &JELLYFIN,
        ServerType::Emby => &EMBY,
    }
}
