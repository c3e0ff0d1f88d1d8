//! Course enrollment for the signed-in user.

use serde_json::json;

use crate::models::Enrollment;
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, Payload};
use crate::net::types::{EnrollmentEnvelope, EnrollmentsEnvelope};

/// Enroll the bearer of the current token in `course_id`. The returned
/// enrollment has no preloaded course.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged; enrolling twice is a
/// [`ApiError::Client`] with status 400.
pub async fn enroll(client: &HttpClient, course_id: u64) -> Result<Enrollment, ApiError> {
    client
        .post::<EnrollmentEnvelope>("/enroll", Payload::Json(json!({ "course_id": course_id })))
        .await
        .map(|envelope| Enrollment::from(envelope.enrollment))
        .inspect_err(|e| tracing::error!(error = %e, course_id, "enroll failed"))
}

/// Enrollments of `user_id`, each with its course preloaded.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_enrollments(client: &HttpClient, user_id: u64) -> Result<Vec<Enrollment>, ApiError> {
    client
        .get::<EnrollmentsEnvelope>(&format!("/enrollments/{user_id}"))
        .await
        .map(|envelope| {
            envelope
                .enrollments
                .unwrap_or_default()
                .into_iter()
                .map(Enrollment::from)
                .collect()
        })
        .inspect_err(|e| tracing::error!(error = %e, user_id, "fetch enrollments failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn cancel_enrollment(client: &HttpClient, id: u64) -> Result<(), ApiError> {
    client
        .delete(&format!("/enroll/{id}"))
        .await
        .inspect_err(|e| tracing::error!(error = %e, enrollment_id = id, "cancel enrollment failed"))
}

#[cfg(test)]
#[path = "enrollment_test.rs"]
mod enrollment_test;
