pub mod feature;
pub mod server;
pub mod version;

pub use feature::{
    feature_support, EmbyFeatureSupport, JellyfinFeatureSupport, ServerFeature,
    ServerFeatureSupport,
};
pub use server::{Server, ServerInfo, ServerKey, ServerType, VersionStatus};
pub use version::{ParseVersionError, ServerVersion};
