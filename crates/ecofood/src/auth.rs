//! # Identity & Session Layer
//!
//! In-process stand-in for the hosted authentication provider, exposing its
//! call contract: sign-up, sign-in, sign-out, email verification and
//! password reset, plus an observable "current session changed" stream.
//!
//! The account record itself lives in the account store — including the
//! email uniqueness constraint, which is enforced atomically there. This
//! layer owns only the credential table, the pending tokens and the current
//! session.
//!
//! Outgoing mail is modeled as an inspectable [`MailEvent`] outbox; a real
//! deployment would hand these to a mail transport.
//!
//! ## Session observable
//!
//! The current session is published through a [`tokio::sync::watch`]
//! channel. [`AuthService::subscribe`] returns a receiver that sees every
//! sign-in and sign-out; dropping the receiver is the whole teardown.

use std::collections::HashMap;
use std::sync::Mutex;

use store_actor::EntityClient;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::account_actor::AccountError;
use crate::clients::AccountClient;
use crate::model::{AccountCreate, AccountId, Role};
use crate::validate::{self, ValidationError};

/// A resolved session: who is signed in and as what.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub account_id: AccountId,
    pub email: String,
    pub role: Role,
}

/// Mail the provider would send, captured for inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum MailEvent {
    Verification { email: String, token: String },
    PasswordReset { email: String, token: String },
}

/// Errors surfaced by the identity layer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// The email is already registered.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// No credential exists for the email.
    #[error("Unknown email: {0}")]
    UnknownEmail(String),

    /// The password does not match.
    #[error("Wrong password")]
    WrongPassword,

    /// The email has not been verified yet.
    #[error("Email not verified: {0}")]
    EmailNotVerified(String),

    /// The verification or reset token is unknown or spent.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A field failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The account store failed.
    #[error("Account error: {0}")]
    Accounts(String),
}

struct Credential {
    account_id: AccountId,
    password: String,
    verified: bool,
}

enum TokenPurpose {
    Verify { email: String },
    Reset { email: String },
}

#[derive(Default)]
struct AuthState {
    credentials: HashMap<String, Credential>,
    tokens: HashMap<String, TokenPurpose>,
    outbox: Vec<MailEvent>,
    token_counter: u32,
}

/// The identity/session service.
pub struct AuthService {
    accounts: AccountClient,
    state: Mutex<AuthState>,
    session_tx: watch::Sender<Option<Session>>,
}

impl AuthService {
    pub fn new(accounts: AccountClient) -> Self {
        let (session_tx, _) = watch::channel(None);
        Self {
            accounts,
            state: Mutex::new(AuthState::default()),
            session_tx,
        }
    }

    /// Register a new account with a password.
    ///
    /// The account record is created first; its store enforces email
    /// uniqueness atomically, so of two concurrent sign-ups for one address
    /// exactly one reaches the credential table. A verification mail event
    /// is queued on success.
    #[instrument(skip(self, params, password), fields(email = %params.email))]
    pub async fn sign_up(
        &self,
        params: AccountCreate,
        password: &str,
    ) -> Result<AccountId, AuthError> {
        validate::password(password)?;
        let email = params.email.trim().to_lowercase();

        let account_id = self.accounts.register(params).await.map_err(|e| match e {
            AccountError::DuplicateEmail(email) => AuthError::EmailTaken(email),
            AccountError::Validation(v) => AuthError::Validation(v),
            other => AuthError::Accounts(other.to_string()),
        })?;

        {
            let mut state = self.state.lock().unwrap();
            state.credentials.insert(
                email.clone(),
                Credential {
                    account_id: account_id.clone(),
                    password: password.to_string(),
                    verified: false,
                },
            );
            let token = state.next_token("verify");
            state.tokens.insert(
                token.clone(),
                TokenPurpose::Verify {
                    email: email.clone(),
                },
            );
            state.outbox.push(MailEvent::Verification { email, token });
        }

        info!(%account_id, "Account registered, verification pending");
        Ok(account_id)
    }

    /// Confirm an email address with the token from the verification mail.
    pub fn verify_email(&self, token: &str) -> Result<(), AuthError> {
        let mut state = self.state.lock().unwrap();
        match state.tokens.remove(token) {
            Some(TokenPurpose::Verify { email }) => {
                if let Some(credential) = state.credentials.get_mut(&email) {
                    credential.verified = true;
                }
                info!(%email, "Email verified");
                Ok(())
            }
            Some(other) => {
                // Wrong token kind: put it back, report invalid.
                state.tokens.insert(token.to_string(), other);
                Err(AuthError::InvalidToken(token.to_string()))
            }
            None => Err(AuthError::InvalidToken(token.to_string())),
        }
    }

    /// Sign in and publish the new session.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim().to_lowercase();
        let account_id = {
            let state = self.state.lock().unwrap();
            let credential = state
                .credentials
                .get(&email)
                .ok_or_else(|| AuthError::UnknownEmail(email.clone()))?;
            if credential.password != password {
                warn!(%email, "Wrong password");
                return Err(AuthError::WrongPassword);
            }
            if !credential.verified {
                return Err(AuthError::EmailNotVerified(email.clone()));
            }
            credential.account_id.clone()
        };

        // The role lives on the account record, not the credential.
        let account = self
            .accounts
            .get(account_id.clone())
            .await
            .map_err(|e| AuthError::Accounts(e.to_string()))?
            .ok_or_else(|| AuthError::UnknownEmail(email.clone()))?;

        let session = Session {
            account_id,
            email,
            role: account.role,
        };
        self.session_tx.send_replace(Some(session.clone()));
        info!(account_id = %session.account_id, role = %session.role, "Signed in");
        Ok(session)
    }

    /// Sign out and publish the cleared session.
    pub fn sign_out(&self) {
        self.session_tx.send_replace(None);
        info!("Signed out");
    }

    /// The session as currently resolved.
    pub fn current_session(&self) -> Option<Session> {
        self.session_tx.borrow().clone()
    }

    /// Subscribe to session changes. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }

    /// Queue a password-reset mail for a registered email.
    pub fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim().to_lowercase();
        let mut state = self.state.lock().unwrap();
        if !state.credentials.contains_key(&email) {
            return Err(AuthError::UnknownEmail(email));
        }
        let token = state.next_token("reset");
        state.tokens.insert(
            token.clone(),
            TokenPurpose::Reset {
                email: email.clone(),
            },
        );
        state.outbox.push(MailEvent::PasswordReset { email, token });
        Ok(())
    }

    /// Set a new password with the token from the reset mail.
    pub fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        validate::password(new_password)?;
        let mut state = self.state.lock().unwrap();
        match state.tokens.remove(token) {
            Some(TokenPurpose::Reset { email }) => {
                match state.credentials.get_mut(&email) {
                    Some(credential) => {
                        credential.password = new_password.to_string();
                        info!(%email, "Password reset");
                        Ok(())
                    }
                    None => Err(AuthError::UnknownEmail(email)),
                }
            }
            Some(other) => {
                state.tokens.insert(token.to_string(), other);
                Err(AuthError::InvalidToken(token.to_string()))
            }
            None => Err(AuthError::InvalidToken(token.to_string())),
        }
    }

    /// Mail the provider has "sent" so far, oldest first.
    pub fn mail_outbox(&self) -> Vec<MailEvent> {
        self.state.lock().unwrap().outbox.clone()
    }
}

impl AuthState {
    fn next_token(&mut self, kind: &str) -> String {
        self.token_counter += 1;
        format!("{kind}-{}", self.token_counter)
    }
}
