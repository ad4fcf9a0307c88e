//! # Store Messages
//!
//! Request envelopes exchanged between a [`StoreClient`](crate::StoreClient)
//! and its [`StoreActor`](crate::StoreActor). Each variant carries a oneshot
//! sender for the reply, so every call has exactly one response and a dropped
//! actor is observable as a closed channel.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// One-shot reply channel used by every request variant.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// The store's request vocabulary — one variant per persistence primitive.
///
/// The payload types come from the entity's associated types, so a
/// `StoreRequest<Product>` can only be built from product DTOs. `Set` is
/// create-or-replace under a caller-chosen id; everything else matches the
/// usual document-store surface.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Insert {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Query {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Set {
        id: T::Id,
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
