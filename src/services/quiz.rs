//! Quizzes and quiz results.
//!
//! Quiz bodies are JSON. The backend stores options as a single string, so
//! a draft's option list is sent JSON-encoded and decoded again by
//! `net::mapping::parse_options`.

use serde_json::json;

use crate::models::{Quiz, QuizDraft, QuizResult};
use crate::net::error::ApiError;
use crate::net::http::{HttpClient, Payload};
use crate::net::types::{QuizEnvelope, QuizResultEnvelope, QuizResultsEnvelope, QuizzesEnvelope};

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_quizzes(client: &HttpClient) -> Result<Vec<Quiz>, ApiError> {
    client
        .get::<QuizzesEnvelope>("/quizzes")
        .await
        .map(|envelope| envelope.quizzes.unwrap_or_default().into_iter().map(Quiz::from).collect())
        .inspect_err(|e| tracing::error!(error = %e, "fetch quizzes failed"))
}

/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when the options cannot be encoded,
/// otherwise the adapter's [`ApiError`] unchanged.
pub async fn create_quiz(client: &HttpClient, draft: QuizDraft) -> Result<Quiz, ApiError> {
    let lesson_id = draft.lesson_id;
    let options = serde_json::to_string(&draft.options).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let body = json!({
        "lesson_id": draft.lesson_id,
        "question": draft.question,
        "options": options,
        "answer": draft.answer,
    });
    client
        .post::<QuizEnvelope>("/quizzes", Payload::Json(body))
        .await
        .map(|envelope| Quiz::from(envelope.quiz))
        .inspect_err(|e| tracing::error!(error = %e, lesson_id, "create quiz failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn delete_quiz(client: &HttpClient, id: u64) -> Result<(), ApiError> {
    client
        .delete(&format!("/quizzes/{id}"))
        .await
        .inspect_err(|e| tracing::error!(error = %e, quiz_id = id, "delete quiz failed"))
}

/// Record a completion; the backend also recomputes course progress.
///
/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged; completing a quiz twice is
/// a [`ApiError::Client`] with status 400.
pub async fn complete_quiz(client: &HttpClient, quiz_id: u64, score: i64) -> Result<QuizResult, ApiError> {
    client
        .post::<QuizResultEnvelope>(&format!("/quizzes/{quiz_id}/complete"), Payload::Json(json!({ "score": score })))
        .await
        .map(|envelope| QuizResult::from(envelope.result))
        .inspect_err(|e| tracing::error!(error = %e, quiz_id, "complete quiz failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn fetch_quiz_results(client: &HttpClient) -> Result<Vec<QuizResult>, ApiError> {
    client
        .get::<QuizResultsEnvelope>("/quiz-results")
        .await
        .map(|envelope| {
            envelope
                .quiz_results
                .unwrap_or_default()
                .into_iter()
                .map(QuizResult::from)
                .collect()
        })
        .inspect_err(|e| tracing::error!(error = %e, "fetch quiz results failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn submit_quiz_result(client: &HttpClient, quiz_id: u64, score: i64) -> Result<QuizResult, ApiError> {
    client
        .post::<QuizResultEnvelope>("/quiz-results", Payload::Json(json!({ "quiz_id": quiz_id, "score": score })))
        .await
        .map(|envelope| QuizResult::from(envelope.result))
        .inspect_err(|e| tracing::error!(error = %e, quiz_id, "submit quiz result failed"))
}

/// # Errors
///
/// Returns the adapter's [`ApiError`] unchanged.
pub async fn delete_quiz_result(client: &HttpClient, id: u64) -> Result<(), ApiError> {
    client
        .delete(&format!("/quiz-results/{id}"))
        .await
        .inspect_err(|e| tracing::error!(error = %e, result_id = id, "delete quiz result failed"))
}

#[cfg(test)]
#[path = "quiz_test.rs"]
mod quiz_test;
