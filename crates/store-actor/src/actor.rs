//! # Generic Store Actor
//!
//! [`StoreActor`] is the server half of a store: it owns the collection, the
//! unique-key index and the receiver end of the request channel, and
//! processes messages one at a time. Exclusive ownership of the state inside
//! a single task is what makes check-and-mutate operations atomic without a
//! `Mutex`.
//!
//! ## Operation notes
//!
//! * **Insert / Set** run `from_create_params`, then the `on_create` hook,
//!   then the unique-key check; nothing is stored if any step fails.
//! * **Update** is copy-on-write: the update hook runs against a clone and
//!   the clone replaces the stored record only after the hook and the
//!   uniqueness re-check both pass.
//! * **Query** evaluates the entity's filter over the whole collection and
//!   returns matches in id order.
//! * **Action** hands the record mutably to `handle_action`; the reply
//!   carries the action's typed result.

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that manages one entity collection.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: HashMap<T::Id, T>,
    unique: HashMap<String, T::Id>,
    next_id: u32,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates a store actor and its client.
    ///
    /// `buffer_size` is the request channel capacity; senders wait when it
    /// is full. The actor does nothing until [`StoreActor::run`] is spawned.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            unique: HashMap::new(),
            next_id: 1,
        };
        let client = StoreClient::new(sender);
        (actor, client)
    }

    /// True when `key` is already held by a record other than `id`.
    fn key_conflicts(&self, key: &str, id: &T::Id) -> bool {
        self.unique.get(key).is_some_and(|holder| holder != id)
    }

    fn reindex(&mut self, old_key: Option<String>, new_key: Option<String>, id: &T::Id) {
        if old_key != new_key {
            if let Some(old) = old_key {
                self.unique.remove(&old);
            }
        }
        if let Some(new) = new_key {
            self.unique.insert(new, id.clone());
        }
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is injected into each entity hook, which is how an actor
    /// created before its dependencies gets to use them.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { params, respond_to } => {
                    debug!(entity_type, ?params, "Insert");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;
                    let result = self.admit(id.clone(), params, &context).await;
                    match result {
                        Ok(()) => {
                            info!(entity_type, %id, size = self.store.len(), "Inserted");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Insert failed");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Query { filter, respond_to } => {
                    let mut hits: Vec<(&T::Id, &T)> = self
                        .store
                        .iter()
                        .filter(|(_, item)| item.matches(&filter))
                        .collect();
                    hits.sort_by(|(a, _), (b, _)| a.cmp(b));
                    let items: Vec<T> = hits.into_iter().map(|(_, item)| item.clone()).collect();
                    debug!(entity_type, ?filter, hits = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    // Copy-on-write: mutate a clone, commit only on success.
                    let old_key = current.unique_key();
                    let mut updated = current.clone();
                    if let Err(e) = updated.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    let new_key = updated.unique_key();
                    if let Some(key) = &new_key {
                        if self.key_conflicts(key, &id) {
                            warn!(entity_type, %id, key, "Update rejected: duplicate key");
                            let _ = respond_to.send(Err(StoreError::Duplicate(key.clone())));
                            continue;
                        }
                    }
                    self.reindex(old_key, new_key, &id);
                    self.store.insert(id.clone(), updated.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(updated));
                }
                StoreRequest::Set {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, "Set");
                    let result = self.admit(id.clone(), params, &context).await;
                    match result {
                        Ok(()) => {
                            info!(entity_type, %id, size = self.store.len(), "Set");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Set failed");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                            continue;
                        }
                        if let Some(item) = self.store.remove(&id) {
                            if let Some(key) = item.unique_key() {
                                self.unique.remove(&key);
                            }
                        }
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| StoreError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Shared insert/set path: construct, run `on_create`, enforce the
    /// unique key, then store (replacing any record already under `id`).
    async fn admit(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<(), StoreError> {
        let mut item = T::from_create_params(id.clone(), params)
            .map_err(|e| StoreError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| StoreError::EntityError(Box::new(e)))?;
        let new_key = item.unique_key();
        if let Some(key) = &new_key {
            if self.key_conflicts(key, &id) {
                return Err(StoreError::Duplicate(key.clone()));
            }
        }
        let old_key = self.store.get(&id).and_then(|prev| prev.unique_key());
        self.reindex(old_key, new_key, &id);
        self.store.insert(id, item);
        Ok(())
    }
}
