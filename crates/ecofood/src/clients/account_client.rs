//! # Account Client
//!
//! High-level API for the account store: registration, profile edits, the
//! admin panel's per-role listings, and the guarded company deletion.

use async_trait::async_trait;
use store_actor::{EntityClient, StoreClient, StoreError};
use tracing::{debug, instrument, warn};

use crate::account_actor::AccountError;
use crate::clients::ProductClient;
use crate::model::{
    Account, AccountCreate, AccountFilter, AccountId, AccountUpdate, Role,
};

/// Client for interacting with the account store.
///
/// Holds a [`ProductClient`] alongside the generic client: company deletion
/// has to consult the product store for dependents.
#[derive(Clone)]
pub struct AccountClient {
    inner: StoreClient<Account>,
    products: ProductClient,
}

impl AccountClient {
    pub fn new(inner: StoreClient<Account>, products: ProductClient) -> Self {
        Self { inner, products }
    }
}

#[async_trait]
impl EntityClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &StoreClient<Account> {
        &self.inner
    }

    fn map_error(e: StoreError) -> AccountError {
        match e {
            StoreError::NotFound(id) => AccountError::NotFound(id),
            StoreError::Duplicate(email) => AccountError::DuplicateEmail(email),
            StoreError::EntityError(inner) => match inner.downcast::<AccountError>() {
                Ok(err) => *err,
                Err(other) => AccountError::Store(other.to_string()),
            },
            other => AccountError::Store(other.to_string()),
        }
    }
}

impl AccountClient {
    /// Register an account. Fails with
    /// [`AccountError::DuplicateEmail`] when the email is already taken —
    /// the check and the insert are a single store message, so two
    /// concurrent registrations cannot both pass.
    #[instrument(skip(self, params), fields(email = %params.email, role = %params.role))]
    pub async fn register(&self, params: AccountCreate) -> Result<AccountId, AccountError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Create-or-replace an account under a fixed id (bootstrap admin
    /// provisioning).
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn put_account(
        &self,
        id: AccountId,
        params: AccountCreate,
    ) -> Result<AccountId, AccountError> {
        debug!("Sending request");
        self.inner.set(id, params).await.map_err(Self::map_error)
    }

    /// Edit a profile. Email and role cannot change.
    #[instrument(skip(self))]
    pub async fn update_account(
        &self,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Admin-panel listing: all accounts with a role.
    #[instrument(skip(self))]
    pub async fn accounts_by_role(&self, role: Role) -> Result<Vec<Account>, AccountError> {
        self.query(AccountFilter::ByRole(role)).await
    }

    /// Look up an account by registered email.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let mut hits = self.query(AccountFilter::ByEmail(email.to_string())).await?;
        Ok(hits.pop())
    }

    /// Accounts linked to a company.
    #[instrument(skip(self))]
    pub async fn linked_to_company(
        &self,
        company_id: AccountId,
    ) -> Result<Vec<Account>, AccountError> {
        self.query(AccountFilter::ByCompany(company_id)).await
    }

    /// Delete a company, refusing while dependents exist.
    ///
    /// Two dependency checks precede the delete: products still owned by
    /// the company, and accounts still linked to it. Either being non-empty
    /// fails the operation with every record unchanged.
    #[instrument(skip(self))]
    pub async fn delete_company(&self, id: AccountId) -> Result<(), AccountError> {
        let account = self
            .get(id.clone())
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;
        if account.role != Role::Company {
            return Err(AccountError::NotACompany(id.to_string()));
        }

        let products = self
            .products
            .products_by_company(id.clone())
            .await
            .map_err(|e| AccountError::Store(e.to_string()))?;
        if !products.is_empty() {
            warn!(company = %id, products = products.len(), "Deletion blocked");
            return Err(AccountError::CompanyHasProducts(products.len()));
        }

        let linked = self.linked_to_company(id.clone()).await?;
        if !linked.is_empty() {
            warn!(company = %id, linked = linked.len(), "Deletion blocked");
            return Err(AccountError::CompanyHasUsers(linked.len()));
        }

        self.delete(id).await
    }
}
