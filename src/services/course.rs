//! Course CRUD and progress.

use crate::models::{Course, CourseDraft, CourseProgress};
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, Payload};
use crate::net::types::{CourseEnvelope, CoursesEnvelope, ProgressResponse};

fn course_path(id: u64) -> String {
    format!("/courses/{id}")
}

/// Form fields for a create or update; multipart when an image is attached.
fn course_payload(draft: CourseDraft) -> Payload {
    let fields = vec![
        ("title".to_owned(), draft.title),
        ("description".to_owned(), draft.description),
    ];
    Payload::form_with_file(fields, draft.image.map(|image| ("image", image)))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_courses(client: &HttpClient) -> Result<Vec<Course>, ApiError> {
    client
        .get::<CoursesEnvelope>("/courses")
        .await
        .map(|envelope| {
            envelope
                .courses
                .unwrap_or_default()
                .into_iter()
                .map(Course::from)
                .collect()
        })
        .inspect_err(|e| tracing::error!(error = %e, "fetch courses failed"))
}

/// Course detail including preloaded lessons and owner.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_course(client: &HttpClient, id: u64) -> Result<Course, ApiError> {
    client
        .get::<CourseEnvelope>(&course_path(id))
        .await
        .map(|envelope| Course::from(envelope.course))
        .inspect_err(|e| tracing::error!(error = %e, course_id = id, "fetch course failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn create_course(client: &HttpClient, draft: CourseDraft) -> Result<Course, ApiError> {
    client
        .post::<CourseEnvelope>("/courses", course_payload(draft))
        .await
        .map(|envelope| Course::from(envelope.course))
        .inspect_err(|e| tracing::error!(error = %e, "create course failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn update_course(client: &HttpClient, id: u64, draft: CourseDraft) -> Result<Course, ApiError> {
    client
        .put::<CourseEnvelope>(&course_path(id), course_payload(draft))
        .await
        .map(|envelope| Course::from(envelope.course))
        .inspect_err(|e| tracing::error!(error = %e, course_id = id, "update course failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn delete_course(client: &HttpClient, id: u64) -> Result<(), ApiError> {
    client
        .delete(&course_path(id))
        .await
        .inspect_err(|e| tracing::error!(error = %e, course_id = id, "delete course failed"))
}

/// The signed-in user's completion percentage for a course.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_course_progress(client: &HttpClient, id: u64) -> Result<CourseProgress, ApiError> {
    client
        .get::<ProgressResponse>(&format!("/courses/progress/{id}"))
        .await
        .map(CourseProgress::from)
        .inspect_err(|e| tracing::error!(error = %e, course_id = id, "fetch course progress failed"))
}

#[cfg(test)]
#[path = "course_test.rs"]
mod course_test;
