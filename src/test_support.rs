//! Test-only helpers: an in-process stub backend and a client wired to it.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::net::http::HttpClient;
use crate::state::session::Session;
use crate::state::storage::{MemoryStorage, Storage, save_json};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_backend(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub backend addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend failed");
    });
    format!("http://{addr}")
}

/// Config pointing at `base_url` with the default session key.
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url)
}

/// A client backed by fresh in-memory storage.
pub fn test_client(base_url: &str) -> (HttpClient, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let config = test_config(base_url);
    let client = HttpClient::new(&config, storage.clone()).expect("build client");
    (client, storage)
}

/// A client whose durable storage already holds `token`.
pub fn authed_client(base_url: &str, token: &str) -> (HttpClient, Arc<MemoryStorage>) {
    let (client, storage) = test_client(base_url);
    persist_token(storage.as_ref(), token);
    (client, storage)
}

/// Persist a session carrying only `token` under the default key.
pub fn persist_token(storage: &dyn Storage, token: &str) {
    let session = Session { user: None, token: Some(token.to_owned()) };
    save_json(storage, crate::config::DEFAULT_SESSION_KEY, &session).expect("persist token");
}
