//! Application context: everything a front end needs, wired once.
//!
//! LIFECYCLE
//! =========
//! `init` opens durable storage, rehydrates the session and builds the HTTP
//! adapter, selection and router around it. `teardown` logs out, clears the
//! selection and aborts requests still in flight. Nothing here is global;
//! front ends own the context and pass its parts where they are needed.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, RequestOptions};
use crate::router::{Navigation, Router};
use crate::state::course_selection::CourseSelection;
use crate::state::session::SessionStore;
use crate::state::storage::{FileStorage, Storage};

pub struct AppContext {
    config: ClientConfig,
    storage: Arc<dyn Storage>,
    base_client: HttpClient,
    client: HttpClient,
    cancel: CancellationToken,
    pub session: SessionStore,
    pub selection: CourseSelection,
    pub router: Router,
}

impl AppContext {
    /// Wire a context over the session file named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn init(config: ClientConfig) -> Result<Self, ApiError> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.session_file));
        Self::with_storage(config, storage)
    }

    /// Wire a context over caller-provided storage.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn with_storage(config: ClientConfig, storage: Arc<dyn Storage>) -> Result<Self, ApiError> {
        let session = SessionStore::rehydrate(storage.clone(), config.session_key.clone());
        let base_client = HttpClient::new(&config, storage.clone())?;
        let cancel = CancellationToken::new();
        let client = scoped(&base_client, &cancel);
        tracing::info!(base_url = %config.base_url, "application context ready");
        Ok(Self {
            router: Router::new(session.clone()),
            selection: CourseSelection::new(),
            config,
            storage,
            base_client,
            client,
            cancel,
            session,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Adapter whose requests are aborted by [`AppContext::teardown`].
    #[must_use]
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Adopt `token`, load its user and follow any resulting intent.
    pub async fn sign_in(&mut self, token: &str) -> Option<Navigation> {
        let next = self.session.fetch_user(&self.client, token).await;
        if let Some(navigation) = next.clone() {
            self.router.apply(navigation).await;
        }
        next
    }

    /// Log out, forget the selection and cancel outstanding requests. The
    /// context stays usable with a fresh cancellation scope.
    pub async fn teardown(&mut self) -> Navigation {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.client = scoped(&self.base_client, &self.cancel);

        let navigation = self.session.logout().await;
        self.selection.clear();
        self.router.apply(navigation.clone()).await;
        navigation
    }
}

fn scoped(client: &HttpClient, cancel: &CancellationToken) -> HttpClient {
    client.scoped(RequestOptions { cancel: Some(cancel.clone()), ..RequestOptions::default() })
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
