//! Google OAuth entry and callback.

use serde_json::json;

use crate::models::OAuthIdentity;
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, Method, Payload, RequestOptions};
use crate::net::types::CallbackResponse;

pub const LOGIN_PATH: &str = "/auth/google/login";
pub const CALLBACK_PATH: &str = "/auth/google/callback";

/// Absolute URL of the backend's OAuth entry point. The caller navigates
/// there; no request is made.
#[must_use]
pub fn google_login_url(client: &HttpClient) -> String {
    client.url(LOGIN_PATH)
}

/// Hand a provider token to the backend and get the matching identity back.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn handle_google_callback(client: &HttpClient, token: &str) -> Result<OAuthIdentity, ApiError> {
    client
        .post::<CallbackResponse>(CALLBACK_PATH, Payload::Json(json!({ "token": token })))
        .await
        .map(OAuthIdentity::from)
        .inspect_err(|e| tracing::error!(error = %e, "google callback failed"))
}

/// Exchange an authorization code through the backend's redirect handler.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn exchange_code(client: &HttpClient, code: &str) -> Result<OAuthIdentity, ApiError> {
    let options = RequestOptions { query: vec![("code".to_owned(), code.to_owned())], ..RequestOptions::default() };
    client
        .request_json::<CallbackResponse>(Method::Get, CALLBACK_PATH, None, options)
        .await
        .map(OAuthIdentity::from)
        .inspect_err(|e| tracing::error!(error = %e, "authorization code exchange failed"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
