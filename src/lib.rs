//! Server capability model for a Jellyfin/Emby TV client.
//!
//! Answers two questions about a saved [`Server`]: is its version usable at
//! all, and which optional features (SyncPlay, Trickplay, ...) can the UI
//! offer for it.

pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use config::{Config, VersionPolicy};
pub use error::StorageError;
pub use models::{
    feature_support, Server, ServerFeature, ServerFeatureSupport, ServerInfo, ServerKey, ServerType,
    ServerVersion, VersionStatus,
};
pub use storage::memory::{SelectedServer, ServerStorage};
