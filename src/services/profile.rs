//! Profile lookup and onboarding updates.

use crate::models::{ProfileDraft, ProfileOverview, User};
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, Payload};
use crate::net::types::{ProfileResponse, ProfileUpdateEnvelope};

pub const MY_PROFILE_PATH: &str = "/profile/me";

/// The token holder's user, profile, authored and enrolled courses.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_my_profile(client: &HttpClient) -> Result<ProfileOverview, ApiError> {
    client
        .get::<ProfileResponse>(MY_PROFILE_PATH)
        .await
        .map(ProfileOverview::from)
        .inspect_err(|e| tracing::error!(error = %e, "fetch my profile failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_profile(client: &HttpClient, user_id: u64) -> Result<ProfileOverview, ApiError> {
    client
        .get::<ProfileResponse>(&format!("/profile/{user_id}"))
        .await
        .map(ProfileOverview::from)
        .inspect_err(|e| tracing::error!(error = %e, user_id, "fetch profile failed"))
}

/// Create or replace the display name, optionally uploading a new image.
/// The backend keeps the previous image when none is sent.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn update_profile(client: &HttpClient, user_id: u64, draft: ProfileDraft) -> Result<User, ApiError> {
    let payload = Payload::form_with_file(
        vec![("name".to_owned(), draft.name)],
        draft.image.map(|image| ("image", image)),
    );
    client
        .put::<ProfileUpdateEnvelope>(&format!("/profile/{user_id}"), payload)
        .await
        .map(|envelope| User::from(envelope.user))
        .inspect_err(|e| tracing::error!(error = %e, user_id, "update profile failed"))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;
