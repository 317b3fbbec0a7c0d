use chrono::{TimeZone, Utc};
use mediaserver_caps::{
    Config, Server, ServerFeature, ServerInfo, ServerStorage, ServerType, ServerVersion,
    StorageError, VersionPolicy, VersionStatus,
};
use std::cmp::Ordering;
use tempfile::TempDir;

fn config() -> Config {
    Config {
        max_saved_servers: 4,
        ..Config::default()
    }
}

#[test]
fn missing_store_loads_empty() {
    let dir = TempDir::new().unwrap();
    let storage = ServerStorage::load(config(), &dir.path().join("servers.json")).unwrap();
    assert!(storage.is_empty());
}

#[test]
fn saved_servers_survive_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("servers.json");

    let storage = ServerStorage::new(config());
    let mut jellyfin =
        Server::new("Living room", "http://192.168.1.20:8096").with_version("10.10.3");
    jellyfin.touch(Utc.with_ymd_and_hms(2024, 3, 2, 18, 30, 0).unwrap());
    let emby = Server::new("Cabin", "http://cabin.lan:8096")
        .with_server_type(ServerType::Emby)
        .with_version("4.8.10.0");
    storage.add_server(jellyfin.clone()).unwrap();
    storage.add_server(emby.clone()).unwrap();
    storage.save(&path).unwrap();

    let reloaded = ServerStorage::load(config(), &path).unwrap();
    assert_eq!(reloaded.len(), 2);

    let back = reloaded.get_server(&jellyfin.id).unwrap();
    assert_eq!(back, jellyfin);
    assert_eq!(back.name, jellyfin.name);
    assert_eq!(back.version, jellyfin.version);
    assert_eq!(back.date_last_accessed, jellyfin.date_last_accessed);
    assert!(back.setup_completed);

    let back = reloaded.get_server(&emby.id).unwrap();
    assert_eq!(back.server_type, ServerType::Emby);
    assert!(!back.has_been_accessed());
}

#[test]
fn corrupt_store_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("servers.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let err = ServerStorage::load(config(), &path).err().unwrap();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[test]
fn probe_then_select_flow() {
    let policy = VersionPolicy::default();
    let storage = ServerStorage::new(config());
    let server = Server::new("New server", "https://media.example.org");
    storage.add_server(server.clone()).unwrap();

    // Nothing is known about the server before the first probe.
    let stored = storage.get_server(&server.id).unwrap();
    assert_eq!(stored.version_status(&policy), VersionStatus::Unknown);
    assert_eq!(stored.compare_to(&ServerVersion::new(10, 0, 0)), Ordering::Less);

    let info: ServerInfo =
        serde_json::from_str(r#"{"ServerName":"Media","Version":"10.10.3"}"#).unwrap();
    let updated = storage.update_server_info(&server.id, info).unwrap();
    assert!(updated.version_supported_with(&policy));
    assert_eq!(updated, server);

    let selected = storage.select_server(&server.id).unwrap();
    assert_eq!(selected.server.name, "Media");
    assert!(selected.features.is_supported(ServerFeature::QuickConnect));
    assert!(!selected.features.is_supported(ServerFeature::WatchParty));
    assert!(storage.current_server().is_some());
}
