//! Lesson CRUD. The backend wraps every lesson payload in `data`.

use crate::models::{Lesson, LessonDraft};
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, Payload};
use crate::net::types::{DataEnvelope, RawLesson};

fn lesson_path(id: u64) -> String {
    format!("/lesson/{id}")
}

fn lesson_payload(draft: LessonDraft) -> Payload {
    let fields = vec![
        ("course_id".to_owned(), draft.course_id.to_string()),
        ("title".to_owned(), draft.title),
        ("content".to_owned(), draft.content),
        ("order".to_owned(), draft.order.to_string()),
    ];
    Payload::form_with_file(fields, draft.image.map(|image| ("image", image)))
}

/// Lessons of one course.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_lessons_by_course(client: &HttpClient, course_id: u64) -> Result<Vec<Lesson>, ApiError> {
    client
        .get::<DataEnvelope<Option<Vec<RawLesson>>>>(&format!("/lessons/{course_id}"))
        .await
        .map(|envelope| {
            envelope
                .data
                .unwrap_or_default()
                .into_iter()
                .map(Lesson::from)
                .collect()
        })
        .inspect_err(|e| tracing::error!(error = %e, course_id, "fetch lessons failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_lesson(client: &HttpClient, id: u64) -> Result<Lesson, ApiError> {
    client
        .get::<DataEnvelope<RawLesson>>(&lesson_path(id))
        .await
        .map(|envelope| Lesson::from(envelope.data))
        .inspect_err(|e| tracing::error!(error = %e, lesson_id = id, "fetch lesson failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn create_lesson(client: &HttpClient, draft: LessonDraft) -> Result<Lesson, ApiError> {
    let course_id = draft.course_id;
    client
        .post::<DataEnvelope<RawLesson>>("/lessons", lesson_payload(draft))
        .await
        .map(|envelope| Lesson::from(envelope.data))
        .inspect_err(|e| tracing::error!(error = %e, course_id, "create lesson failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn update_lesson(client: &HttpClient, id: u64, draft: LessonDraft) -> Result<Lesson, ApiError> {
    client
        .put::<DataEnvelope<RawLesson>>(&lesson_path(id), lesson_payload(draft))
        .await
        .map(|envelope| Lesson::from(envelope.data))
        .inspect_err(|e| tracing::error!(error = %e, lesson_id = id, "update lesson failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn delete_lesson(client: &HttpClient, id: u64) -> Result<(), ApiError> {
    client
        .delete(&lesson_path(id))
        .await
        .inspect_err(|e| tracing::error!(error = %e, lesson_id = id, "delete lesson failed"))
}

#[cfg(test)]
#[path = "lesson_test.rs"]
mod lesson_test;
