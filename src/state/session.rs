//! Session store for the authenticated identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard reads it before every navigation and the CLI drives its actions.
//! The token is the single source of truth for "is a request authenticated";
//! `user` is a best-effort profile cache that may lag or be absent while a
//! token is set.
//!
//! PERSISTENCE
//! ===========
//! The session is persisted as one JSON object under a namespaced key in
//! durable storage. The HTTP adapter reads the token back from that entry,
//! so every change here is written through before the next request.
//!
//! Actions never navigate. They return a [`Navigation`] intent the router
//! applies.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::storage::{Storage, load_json, save_json};
use crate::models::User;
use crate::net::http::HttpClient;
use crate::router::{AppRoute, Navigation};
use crate::services::{auth, profile};

/// The persisted identity: both fields present when authenticated, both
/// absent when anonymous.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl Session {
    /// A non-empty token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Authenticated and the profile carries a display name.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_authenticated() && self.user.as_ref().is_some_and(|user| user.profile.is_complete())
    }
}

/// Shared handle to the session. Clones observe the same state.
#[derive(Clone)]
pub struct SessionStore {
    session: Arc<RwLock<Session>>,
    storage: Arc<dyn Storage>,
    key: String,
}

impl SessionStore {
    /// An anonymous store that persists under `key`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self { session: Arc::default(), storage, key: key.into() }
    }

    /// Load whatever session was persisted under `key`. Missing or corrupt
    /// entries yield an anonymous session.
    #[must_use]
    pub fn rehydrate(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let session = load_json::<Session>(storage.as_ref(), &key).unwrap_or_default();
        tracing::info!(
            authenticated = session.is_authenticated(),
            complete = session.is_complete(),
            "session rehydrated"
        );
        Self { session: Arc::new(RwLock::new(session)), storage, key }
    }

    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.session.read().await.token.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.session.read().await.user.clone()
    }

    /// Intent to leave for the backend's OAuth entry point.
    #[must_use]
    pub fn login_with_google(&self, client: &HttpClient) -> Navigation {
        let url = auth::google_login_url(client);
        tracing::info!(%url, "starting google login");
        Navigation::External(url)
    }

    /// Adopt `token` and load the matching user.
    ///
    /// The token is stored and persisted before the profile request, so it
    /// survives a failed fetch. On failure `user` stays unset and the error is
    /// only logged. Returns the onboarding route when the fetched profile has
    /// no name.
    pub async fn fetch_user(&self, client: &HttpClient, token: &str) -> Option<Navigation> {
        if token.is_empty() {
            tracing::warn!("fetch_user called without a token");
            return None;
        }

        self.adopt_token(token).await;

        let overview = match profile::fetch_my_profile(client).await {
            Ok(overview) => overview,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch user for session");
                return None;
            }
        };

        let mut session = self.session.write().await;
        if session.token.as_deref() != Some(token) {
            tracing::debug!("session changed during profile fetch; discarding user");
            return None;
        }
        let needs_profile = !overview.user.profile.is_complete();
        tracing::info!(user_id = overview.user.id, needs_profile, "session user loaded");
        session.user = Some(overview.user);
        self.persist(&session);

        needs_profile.then_some(Navigation::To(AppRoute::CreateProfile))
    }

    /// Store and persist `token`. A different token drops the cached user,
    /// which belonged to the previous identity.
    pub async fn adopt_token(&self, token: &str) {
        let mut session = self.session.write().await;
        if session.token.as_deref() != Some(token) {
            session.user = None;
        }
        session.token = Some(token.to_owned());
        self.persist(&session);
    }

    /// Replace the cached user, e.g. after a profile update.
    pub async fn set_user(&self, user: User) {
        let mut session = self.session.write().await;
        session.user = Some(user);
        self.persist(&session);
    }

    /// Clear memory and durable storage, then head to the login route.
    pub async fn logout(&self) -> Navigation {
        let mut session = self.session.write().await;
        *session = Session::default();
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::error!(error = %e, key = %self.key, "failed to clear persisted session");
        }
        tracing::info!("logged out");
        Navigation::To(AppRoute::Login)
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = save_json(self.storage.as_ref(), &self.key, session) {
            tracing::error!(error = %e, key = %self.key, "failed to persist session");
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
