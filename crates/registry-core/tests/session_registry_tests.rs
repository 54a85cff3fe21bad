//! Session registry behavior tests
//!
//! Exercises the registry through its public API: registration and
//! validation, lookups, listing visibility, occupancy updates, and explicit
//! teardown.

use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

use matchpoint_registry_core::{RegistryConfig, RegistryError, SessionDescriptor, SessionRegistry};

fn registry() -> SessionRegistry {
    SessionRegistry::new(RegistryConfig::default())
}

fn descriptor(code: &str, host_name: &str) -> SessionDescriptor {
    SessionDescriptor {
        code: Some(code.to_string()),
        host_name: Some(host_name.to_string()),
        max_players: Some(4),
        ..Default::default()
    }
}

#[tokio::test]
async fn register_then_get_round_trips_all_fields() {
    let registry = registry();
    let before = Utc::now().timestamp();

    let descriptor: SessionDescriptor = serde_json::from_value(json!({
        "code": "ABCD",
        "host_name": "Alice",
        "max_players": 4,
        "current_players": 1,
        "is_private": false,
        "map": "glacier",
    }))
    .unwrap();
    let code = registry.register(descriptor).await.unwrap();
    assert_eq!(code, "ABCD");

    let session = registry.get("ABCD").await.unwrap();
    assert_eq!(session.host_name, "Alice");
    assert_eq!(session.max_players, Some(4));
    assert_eq!(session.current_players, 1);
    assert!(!session.is_private);
    assert_eq!(session.extra.get("map"), Some(&json!("glacier")));
    assert!(session.registered_at >= before);
    assert!(session.registered_at <= Utc::now().timestamp());
}

#[tokio::test]
async fn register_rejects_bad_descriptors() {
    let registry = registry();

    let mut no_host = descriptor("ABCD", "Alice");
    no_host.host_name = None;
    assert!(matches!(
        registry.register(no_host).await,
        Err(RegistryError::InvalidHostName)
    ));
    assert_eq!(registry.count().await, 0);
}

#[tokio::test]
async fn reregistration_replaces_the_stored_session() {
    let registry = registry();

    let first: SessionDescriptor = serde_json::from_value(json!({
        "code": "ABCD",
        "host_name": "Alice",
        "map": "glacier",
    }))
    .unwrap();
    registry.register(first).await.unwrap();

    let second: SessionDescriptor = serde_json::from_value(json!({
        "code": "ABCD",
        "host_name": "Bob",
        "mode": "ffa",
    }))
    .unwrap();
    registry.register(second).await.unwrap();

    let session = registry.get("ABCD").await.unwrap();
    assert_eq!(session.host_name, "Bob");
    assert_eq!(session.extra.get("mode"), Some(&json!("ffa")));
    // Wholesale replacement: nothing from the first registration lingers.
    assert_eq!(session.extra.get("map"), None);
    assert_eq!(registry.count().await, 1);
}

#[tokio::test]
async fn listing_returns_public_sessions_only() {
    let registry = registry();
    registry
        .register(descriptor("PUB1", "Alice"))
        .await
        .unwrap();

    let mut hidden = descriptor("PRIV", "Bob");
    hidden.is_private = Some(true);
    registry.register(hidden).await.unwrap();

    let mut listed = descriptor("PUB2", "Carol");
    listed.is_private = Some(false);
    registry.register(listed).await.unwrap();

    let mut codes: Vec<String> = registry
        .list_public()
        .await
        .into_iter()
        .map(|session| session.code)
        .collect();
    codes.sort();
    assert_eq!(codes, vec!["PUB1", "PUB2"]);

    // The private session is still reachable by code and still counted.
    assert!(registry.get("PRIV").await.is_ok());
    assert_eq!(registry.count().await, 3);
}

#[tokio::test]
async fn unknown_codes_are_not_found() {
    let registry = registry();

    for err in [
        registry.get("NOPE").await.unwrap_err(),
        registry.update_players("NOPE", 2).await.unwrap_err(),
        registry.unregister("NOPE").await.unwrap_err(),
    ] {
        match err {
            RegistryError::NotFound(code) => assert_eq!(code, "NOPE"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn unregister_removes_the_session() {
    let registry = registry();
    registry
        .register(descriptor("ABCD", "Alice"))
        .await
        .unwrap();

    registry.unregister("ABCD").await.unwrap();
    assert!(matches!(
        registry.get("ABCD").await,
        Err(RegistryError::NotFound(_))
    ));
    assert_eq!(registry.count().await, 0);

    // A second teardown of the same code reports the absence.
    assert!(matches!(
        registry.unregister("ABCD").await,
        Err(RegistryError::NotFound(_))
    ));
}

#[tokio::test]
async fn update_touches_only_the_player_count() {
    let registry = registry();
    let full: SessionDescriptor = serde_json::from_value(json!({
        "code": "ABCD",
        "host_name": "Alice",
        "max_players": 8,
        "region": "us-east",
    }))
    .unwrap();
    registry.register(full).await.unwrap();

    let before = registry.get("ABCD").await.unwrap();
    registry.update_players("ABCD", 5).await.unwrap();
    let after = registry.get("ABCD").await.unwrap();

    let mut expected = before.clone();
    expected.current_players = 5;
    assert_eq!(after, expected);
}

#[tokio::test]
async fn occupancy_is_stored_as_reported() {
    let registry = registry();
    registry
        .register(descriptor("ABCD", "Alice"))
        .await
        .unwrap();

    // Capacity is advisory; the registry does not cross-check the count.
    registry.update_players("ABCD", 50).await.unwrap();
    assert_eq!(registry.get("ABCD").await.unwrap().current_players, 50);
}

#[tokio::test]
async fn concurrent_registrations_all_land() {
    let registry = Arc::new(registry());

    let mut handles = Vec::new();
    for i in 0..32 {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move {
            let code = format!("GAME{:02}", i);
            registry.register(descriptor(&code, "Host")).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(registry.count().await, 32);
    assert_eq!(registry.list_public().await.len(), 32);
}
