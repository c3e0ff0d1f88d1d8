//! Client-side models.
//!
//! DESIGN
//! ======
//! These are the shapes views and stores consume. They are produced from the
//! raw wire schemas in `net::types` by `net::mapping` and never parsed from
//! backend JSON directly. Serialized with camelCase names because the session
//! user is persisted in this form.

use serde::{Deserialize, Serialize};

use crate::net::http::Upload;

/// Display identity attached to a user. An empty `name` means onboarding
/// has not been completed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// Course author, when the backend preloaded it.
    pub owner: Option<User>,
    /// Enrollment progress percentage, when known in context.
    pub progress: Option<f64>,
    /// Lessons, when the backend preloaded them.
    pub lessons: Vec<Lesson>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: u64,
    pub course_id: u64,
    pub title: String,
    pub content: String,
    pub order: i64,
    pub image: Option<String>,
    pub quizzes: Vec<Quiz>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: u64,
    pub lesson_id: u64,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: u64,
    pub user_id: u64,
    pub course_id: u64,
    pub progress: f64,
    /// Absent when the backend did not preload the course (e.g. right after enrolling).
    pub course: Option<Course>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: u64,
    pub user_id: u64,
    pub quiz_id: u64,
    pub score: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: u64,
    pub progress: f64,
}

/// Identity returned by the OAuth callback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthIdentity {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// `/profile/me` and `/profile/:id`: the user plus their authored and
/// enrolled courses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOverview {
    pub user: User,
    pub created_courses: Vec<Course>,
    pub enrolled_courses: Vec<Course>,
}

// =============================================================================
// DRAFTS
// =============================================================================

/// Locally constructed create/update payload for a course.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub image: Option<Upload>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LessonDraft {
    pub course_id: u64,
    pub title: String,
    pub content: String,
    pub order: i64,
    pub image: Option<Upload>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub image: Option<Upload>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizDraft {
    pub lesson_id: u64,
    pub question: String,
    /// Encoded as a JSON array string; the backend stores options as one string.
    pub options: Vec<String>,
    pub answer: String,
}
