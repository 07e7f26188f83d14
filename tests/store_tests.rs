// Store tests against a temp SQLite file

use hostwatch::models::{AgentStatus, UpdateAgent};
use hostwatch::store::Store;
use tempfile::TempDir;

async fn test_store() -> (Store, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let store = Store::connect(path.to_str().unwrap(), 2).await.unwrap();
    store.init().await.unwrap();
    (store, dir)
}

#[tokio::test]
async fn test_create_and_find_user() {
    let (store, _dir) = test_store().await;
    let user = store
        .create_user("alice", "alice@example.com", "hash")
        .await
        .unwrap();
    assert!(user.id > 0);

    let found = store
        .find_user_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(found.id, user.id);
    assert_eq!(found.username, "alice");
    assert_eq!(found.password_hash, "hash");

    assert!(
        store
            .find_user_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_duplicate_email_violates_unique_constraint() {
    let (store, _dir) = test_store().await;
    store
        .create_user("alice", "alice@example.com", "hash")
        .await
        .unwrap();
    let err = store
        .create_user("alice2", "alice@example.com", "hash2")
        .await;
    assert!(err.is_err());
}

#[tokio::test]
async fn test_user_profile_omits_password_hash() {
    let (store, _dir) = test_store().await;
    let user = store
        .create_user("alice", "alice@example.com", "hash")
        .await
        .unwrap();
    let profile = store.get_user_profile(user.id).await.unwrap().unwrap();
    assert_eq!(profile.email, "alice@example.com");
    assert_eq!(profile.created_at, user.created_at);

    assert!(store.get_user_profile(9_999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_agent_crud_roundtrip() {
    let (store, _dir) = test_store().await;
    let user = store
        .create_user("alice", "alice@example.com", "hash")
        .await
        .unwrap();

    let agent = store
        .create_agent(user.id, "web", "https://web.example.com", 60)
        .await
        .unwrap();
    assert_eq!(agent.status, AgentStatus::Active);

    let fetched = store.get_agent(agent.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "web");
    assert_eq!(fetched.interval, 60);
    assert_eq!(fetched.user_id, user.id);

    let updated = store
        .update_agent(
            agent.id,
            &UpdateAgent {
                status: Some(AgentStatus::Down),
                interval: Some(30),
                ..UpdateAgent::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, AgentStatus::Down);
    assert_eq!(updated.interval, 30);
    assert_eq!(updated.name, "web");

    assert!(store.delete_agent(agent.id).await.unwrap());
    assert!(store.get_agent(agent.id).await.unwrap().is_none());
    assert!(!store.delete_agent(agent.id).await.unwrap());
}

#[tokio::test]
async fn test_list_agents_is_scoped_and_newest_first() {
    let (store, _dir) = test_store().await;
    let alice = store
        .create_user("alice", "alice@example.com", "hash")
        .await
        .unwrap();
    let bob = store
        .create_user("bob", "bob@example.com", "hash")
        .await
        .unwrap();

    store
        .create_agent(alice.id, "first", "https://a", 60)
        .await
        .unwrap();
    store
        .create_agent(alice.id, "second", "https://b", 60)
        .await
        .unwrap();
    store
        .create_agent(bob.id, "other", "https://c", 60)
        .await
        .unwrap();

    let agents = store.list_agents(alice.id).await.unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].name, "second");
    assert_eq!(agents[1].name, "first");

    assert!(store.list_agents(9_999).await.unwrap().is_empty());
}
