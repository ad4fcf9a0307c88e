use async_trait::async_trait;
use std::fmt::Display;
use store_actor::{StoreActor, StoreEntity, StoreError};

/// A registration record with a unique email, used to exercise the full
/// store surface: insert, get, query, update, set, delete and the
/// unique-key index.
#[derive(Clone, Debug, PartialEq)]
struct Member {
    id: MemberId,
    name: String,
    email: String,
    active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct MemberId(String);

impl From<u32> for MemberId {
    fn from(id: u32) -> Self {
        Self(format!("member_{id}"))
    }
}

impl Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct MemberCreate {
    name: String,
    email: String,
}

#[derive(Debug)]
struct MemberUpdate {
    name: Option<String>,
}

#[derive(Debug)]
enum MemberAction {
    Deactivate,
}

#[derive(Debug)]
enum MemberFilter {
    Active,
    ByEmail(String),
}

#[derive(Debug, thiserror::Error)]
enum MemberError {
    #[error("name must not be empty")]
    EmptyName,
}

#[async_trait]
impl StoreEntity for Member {
    type Id = MemberId;
    type Create = MemberCreate;
    type Update = MemberUpdate;
    type Action = MemberAction;
    type ActionResult = bool;
    type Filter = MemberFilter;
    type Context = ();
    type Error = MemberError;

    fn from_create_params(id: MemberId, params: MemberCreate) -> Result<Self, MemberError> {
        if params.name.trim().is_empty() {
            return Err(MemberError::EmptyName);
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            active: true,
        })
    }

    fn matches(&self, filter: &MemberFilter) -> bool {
        match filter {
            MemberFilter::Active => self.active,
            MemberFilter::ByEmail(email) => self.email.eq_ignore_ascii_case(email),
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }

    async fn on_update(&mut self, update: MemberUpdate, _ctx: &()) -> Result<(), MemberError> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(MemberError::EmptyName);
            }
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: MemberAction, _ctx: &()) -> Result<bool, MemberError> {
        match action {
            MemberAction::Deactivate => {
                let changed = self.active;
                self.active = false;
                Ok(changed)
            }
        }
    }
}

fn member(name: &str, email: &str) -> MemberCreate {
    MemberCreate {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn unique_key_rejects_second_insert() {
    let (actor, client) = StoreActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    client.create(member("Ana", "ana@example.com")).await.unwrap();

    // Same key, different casing: still a conflict.
    let err = client
        .create(member("Impostor", "ANA@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(key) if key == "ana@example.com"));

    let hits = client
        .query(MemberFilter::ByEmail("ana@example.com".into()))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Ana");
}

#[tokio::test]
async fn delete_releases_unique_key() {
    let (actor, client) = StoreActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(member("Ana", "ana@example.com")).await.unwrap();
    client.delete(id).await.unwrap();

    // Key is free again after the delete.
    client.create(member("Ana II", "ana@example.com")).await.unwrap();
}

#[tokio::test]
async fn set_keeps_index_consistent() {
    let (actor, client) = StoreActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    let seeded = MemberId("member_root".to_string());
    client
        .set(seeded.clone(), member("Root", "root@example.com"))
        .await
        .unwrap();

    // Replacing the record under the same id re-points the key.
    client
        .set(seeded.clone(), member("Root", "root2@example.com"))
        .await
        .unwrap();

    // The old key is released by the replacement...
    client.create(member("Ana", "root@example.com")).await.unwrap();

    // ...and the new one is taken.
    let err = client
        .create(member("Impostor", "root2@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(_)));
}

#[tokio::test]
async fn query_filters_and_orders_by_id() {
    let (actor, client) = StoreActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    let a = client.create(member("Ana", "ana@example.com")).await.unwrap();
    let b = client.create(member("Ben", "ben@example.com")).await.unwrap();
    client.create(member("Cleo", "cleo@example.com")).await.unwrap();

    let deactivated = client
        .perform_action(MemberId("member_3".to_string()), MemberAction::Deactivate)
        .await
        .unwrap();
    assert!(deactivated);

    let active = client.query(MemberFilter::Active).await.unwrap();
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].id, a);
    assert_eq!(active[1].id, b);
}

#[tokio::test]
async fn store_lives_until_the_last_client_drops() {
    let (actor, client) = StoreActor::<Member>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let secondary = client.clone();
    drop(client);

    // The store is still alive while any client exists.
    assert!(secondary.get(MemberId::from(1)).await.unwrap().is_none());

    drop(secondary);
    handle.await.unwrap();
}
