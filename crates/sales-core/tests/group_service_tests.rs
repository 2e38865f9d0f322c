//! Group membership sync

mod common;

use common::Harness;
use sales_core::services::GroupInput;
use sales_core::DomainError;
use uuid::Uuid;

fn group_input(name: &str) -> GroupInput {
    GroupInput {
        name: name.to_string(),
        description: None,
    }
}

#[tokio::test]
async fn test_sync_replaces_and_dedups() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    let b = h.member("Baba").await;
    let c = h.member("Chiba").await;
    let group = h.groups.create(h.scope, group_input("Tokyo")).await.unwrap();

    let synced = h
        .groups
        .sync_members(h.scope, group.id, vec![a.id, b.id, a.id])
        .await
        .unwrap();
    assert_eq!(synced, vec![a.id, b.id]);

    h.groups.sync_members(h.scope, group.id, vec![c.id]).await.unwrap();
    let members = h.groups.members(h.tenant.id, group.id).await.unwrap();
    let ids: Vec<Uuid> = members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![c.id]);
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    let b = h.member("Baba").await;
    let group = h.groups.create(h.scope, group_input("Osaka")).await.unwrap();

    for _ in 0..3 {
        h.groups.sync_members(h.scope, group.id, vec![b.id, a.id]).await.unwrap();
    }

    let memberships = h.store.memberships.read().clone();
    assert_eq!(memberships.len(), 2);
    let listed = h.groups.list(h.tenant.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    let mut ids = listed[0].member_ids.clone();
    ids.sort();
    let mut expected = vec![a.id, b.id];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_sync_rejects_foreign_members() {
    let h = Harness::new();
    let other = Harness::new();
    let a = h.member("Aoki").await;
    let stranger = other.member("Stranger").await;
    // Make the stranger visible in the same store under another tenant
    h.store.members.write().push(stranger.clone());

    let group = h.groups.create(h.scope, group_input("Nagoya")).await.unwrap();
    h.groups.sync_members(h.scope, group.id, vec![a.id]).await.unwrap();

    let result = h.groups.sync_members(h.scope, group.id, vec![a.id, stranger.id]).await;
    assert!(matches!(result, Err(DomainError::ValidationError(_))));

    // the failed call left the previous membership untouched
    let ids = h.groups.members(h.tenant.id, group.id).await.unwrap();
    assert_eq!(ids.len(), 1);
}

#[tokio::test]
async fn test_sync_to_empty() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    let group = h.groups.create(h.scope, group_input("Fukuoka")).await.unwrap();
    h.groups.sync_members(h.scope, group.id, vec![a.id]).await.unwrap();
    h.groups.sync_members(h.scope, group.id, vec![]).await.unwrap();
    assert!(h.groups.members(h.tenant.id, group.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_group() {
    let h = Harness::new();
    let result = h.groups.sync_members(h.scope, Uuid::new_v4(), vec![]).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}
