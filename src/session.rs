//! Mock credential flow with an explicit, store-backed session.
//!
//! The session is a value: `login`/`signup` return it and callers pass
//! it to whatever needs identity. The only ambient piece is the
//! persisted `current_session` document, so a new process can pick up
//! where the last one signed in.
//!
//! Passwords are never stored. Any non-empty password unlocks an
//! existing account; this is a demo flow, not authentication.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::SessionError;
use crate::models::{UserAccount, UserRole};
use crate::store::{JsonStore, StoredRecord};

pub const USERS_COLLECTION: &str = "users";
const SESSION_DOCUMENT: &str = "current_session";

// Fixed demo administrator identity, materialized on first login.
const ADMIN_EMAIL: &str = "admin@rescuehub.com";
const ADMIN_PASSWORD: &str = "admin123";
const ADMIN_NAME: &str = "Admin User";

/// An authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: StoredRecord<UserAccount>,
    pub started_at: DateTime<Utc>,
}

/// Store-backed account and session management.
#[derive(Debug, Clone)]
pub struct SessionStore {
    store: JsonStore,
}

impl SessionStore {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Signs an existing account in. Empty fields are rejected before
    /// the store is consulted; an unknown email is `UserNotFound`.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        if email.is_empty() || password.is_empty() {
            return Err(SessionError::InvalidCredentials);
        }

        if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            let user = match self.find_user(email)? {
                Some(user) => user,
                None => {
                    info!("Session: materializing admin account on first login");
                    self.store.append(
                        USERS_COLLECTION,
                        UserAccount {
                            email: ADMIN_EMAIL.to_string(),
                            name: ADMIN_NAME.to_string(),
                            role: UserRole::Admin,
                        },
                    )?
                }
            };
            return self.open_session(user);
        }

        match self.find_user(email)? {
            Some(user) => self.open_session(user),
            None => Err(SessionError::UserNotFound(email.to_string())),
        }
    }

    /// Creates an account (default role: victim) and signs it in. Any
    /// previous account for the email is replaced.
    pub fn signup(&self, email: &str, password: &str, name: &str) -> Result<Session, SessionError> {
        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(SessionError::InvalidSignup);
        }

        let mut users = self.store.list::<UserAccount>(USERS_COLLECTION)?;
        users.retain(|u| u.record.email != email);
        self.store.replace(USERS_COLLECTION, &users)?;

        let user = self.store.append(
            USERS_COLLECTION,
            UserAccount {
                email: email.to_string(),
                name: name.to_string(),
                role: UserRole::Victim,
            },
        )?;
        self.open_session(user)
    }

    /// The persisted session, if a user is signed in.
    pub fn current(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.store.get_document(SESSION_DOCUMENT)?)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.delete_document(SESSION_DOCUMENT)?;
        info!("Session: signed out");
        Ok(())
    }

    /// Changes the signed-in user's role, rewriting both the account
    /// record and the persisted session. Returns the updated session
    /// value; the one passed in is stale afterwards.
    pub fn update_role(&self, session: &Session, role: UserRole) -> Result<Session, SessionError> {
        let mut users = self.store.list::<UserAccount>(USERS_COLLECTION)?;
        let mut found = false;
        for user in &mut users {
            if user.id == session.user.id {
                user.record.role = role;
                found = true;
            }
        }
        if !found {
            return Err(SessionError::UserNotFound(session.user.record.email.clone()));
        }
        self.store.replace(USERS_COLLECTION, &users)?;

        let mut updated = session.clone();
        updated.user.record.role = role;
        self.store.put_document(SESSION_DOCUMENT, &updated)?;
        info!(
            "Session: role for {} set to {}",
            updated.user.record.email,
            role.as_str()
        );
        Ok(updated)
    }

    fn open_session(&self, user: StoredRecord<UserAccount>) -> Result<Session, SessionError> {
        let session = Session {
            user,
            started_at: Utc::now(),
        };
        self.store.put_document(SESSION_DOCUMENT, &session)?;
        info!(
            "Session: {} signed in as {}",
            session.user.record.email,
            session.user.record.role.as_str()
        );
        Ok(session)
    }

    fn find_user(&self, email: &str) -> Result<Option<StoredRecord<UserAccount>>, SessionError> {
        let users = self.store.list::<UserAccount>(USERS_COLLECTION)?;
        Ok(users.into_iter().find(|u| u.record.email == email))
    }
}
