//! Session manager - the only writer of the authenticated identity
//!
//! The session is persisted under two keys (`authToken`, `currentUser`).
//! Both keys are written together and removed together; a restore that finds
//! anything else treats the store as logged out and clears it.

pub mod authz;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{LoginResponse, Role};
use crate::router::Tab;
use crate::store::KeyValueStore;

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "currentUser";

/// Identity of the logged-in user, as persisted under `currentUser`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            token: resp.token,
            user: SessionUser {
                id: resp.user_id,
                username: resp.username,
                role: resp.role,
            },
        }
    }
}

pub struct SessionManager {
    store: Box<dyn KeyValueStore>,
    current: Option<Session>,
}

impl SessionManager {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Load the persisted session, falling back to logged out on partial or corrupt data
    pub fn restore(&mut self) -> Option<&Session> {
        self.current = match self.read_persisted() {
            Ok(Some(session)) => {
                info!(user = %session.user.username, "restored persisted session");
                Some(session)
            }
            Ok(None) => None,
            Err(err) => {
                warn!("discarding persisted session: {err:#}");
                self.clear_persisted();
                None
            }
        };
        self.current.as_ref()
    }

    /// Adopt a successful login and persist both keys
    ///
    /// The in-memory session is kept even when persisting fails; the error
    /// is returned so the caller can tell the user the login will not survive
    /// a restart.
    pub fn establish(&mut self, resp: LoginResponse) -> Result<&Session> {
        let session = Session::from(resp);
        info!(user = %session.user.username, role = %session.user.role, "session established");
        let persisted = self.persist(&session);
        self.current = Some(session);
        persisted?;
        self.current
            .as_ref()
            .context("session vanished after establish")
    }

    /// Drop the session. Always succeeds; storage errors are only logged.
    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            info!(user = %session.user.username, "session cleared");
        }
        self.clear_persisted();
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|session| session.user.role)
    }

    pub fn can_access(&self, tab: Tab) -> bool {
        authz::permits(self.role(), tab)
    }

    fn read_persisted(&self) -> Result<Option<Session>> {
        let token = self.store.get(TOKEN_KEY)?;
        let user = self.store.get(USER_KEY)?;
        match (token, user) {
            (None, None) => Ok(None),
            (Some(token), Some(user)) => {
                if token.trim().is_empty() {
                    anyhow::bail!("empty {TOKEN_KEY}");
                }
                let user: SessionUser = serde_json::from_str(&user)
                    .with_context(|| format!("malformed {USER_KEY}"))?;
                Ok(Some(Session { token, user }))
            }
            (Some(_), None) => anyhow::bail!("{TOKEN_KEY} present without {USER_KEY}"),
            (None, Some(_)) => anyhow::bail!("{USER_KEY} present without {TOKEN_KEY}"),
        }
    }

    fn persist(&self, session: &Session) -> Result<()> {
        let user = serde_json::to_string(&session.user)?;
        let written = self
            .store
            .set(TOKEN_KEY, &session.token)
            .and_then(|_| self.store.set(USER_KEY, &user));
        if let Err(err) = written {
            self.clear_persisted();
            return Err(err.context("persist session"));
        }
        Ok(())
    }

    fn clear_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.store.remove(key) {
                warn!("failed to remove {key}: {err:#}");
            }
        }
    }
}
