//! Raw wire schemas for the backend's JSON responses.
//!
//! DESIGN
//! ======
//! Entity payloads use the backend's Go field names (`ID`, `Title`,
//! `CourseID`, ...). Entity IDs are required so a missing one fails parsing
//! with `MalformedResponse`; every other field defaults. Go encodes nil slices
//! as `null`, so list fields are `Option<Vec<_>>`.
//!
//! Each endpoint's outer object gets its own envelope type so a response that
//! lacks its key fails at the boundary instead of mapping to empty data.

use serde::Deserialize;

// =============================================================================
// ENTITIES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawProfile {
    #[serde(rename = "ID", default)]
    pub id: u64,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Image", default)]
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawUser {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Profile", default)]
    pub profile: RawProfile,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawCourse {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Image", default)]
    pub image: String,
    #[serde(rename = "User", default)]
    pub user: Option<RawUser>,
    #[serde(rename = "Lessons", default)]
    pub lessons: Option<Vec<RawLesson>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawLesson {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "CourseID", default)]
    pub course_id: u64,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Content", default)]
    pub content: String,
    #[serde(rename = "Order", default)]
    pub order: i64,
    #[serde(rename = "Image", default)]
    pub image: String,
    #[serde(rename = "Quizzes", default)]
    pub quizzes: Option<Vec<RawQuiz>>,
}

/// Quiz options as sent: the backend stores one string, older payloads a list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawOptions {
    List(Vec<String>),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawQuiz {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "LessonID", default)]
    pub lesson_id: u64,
    #[serde(rename = "Question", default)]
    pub question: String,
    #[serde(rename = "Options", default)]
    pub options: Option<RawOptions>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawEnrollment {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "UserID", default)]
    pub user_id: u64,
    #[serde(rename = "CourseID", default)]
    pub course_id: u64,
    #[serde(rename = "Progress", default)]
    pub progress: f64,
    #[serde(rename = "Course", default)]
    pub course: Option<RawCourse>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RawQuizResult {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "UserID", default)]
    pub user_id: u64,
    #[serde(rename = "QuizID", default)]
    pub quiz_id: u64,
    #[serde(rename = "Score", default)]
    pub score: i64,
}

// =============================================================================
// HAND-BUILT RESPONSES (snake_case keys)
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProfileBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A course summary inside `/profile/me`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CourseSummaryBody {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub progress: Option<f64>,
}

/// `GET /profile/me`, `GET /profile/:id`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfileResponse {
    pub id: u64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile: Option<ProfileBody>,
    #[serde(default)]
    pub created_courses: Option<Vec<CourseSummaryBody>>,
    #[serde(default)]
    pub enrolled_courses: Option<Vec<CourseSummaryBody>>,
}

/// The `user` object inside `PUT /profile/:id`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfileUserBody {
    pub id: u64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile: Option<ProfileBody>,
}

/// `GET|POST /auth/google/callback`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CallbackResponse {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// `GET /courses/progress/:id`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProgressResponse {
    pub course_id: u64,
    pub progress: f64,
}

// =============================================================================
// ENVELOPES
// =============================================================================

/// `GET /courses`
#[derive(Debug, Deserialize)]
pub struct CoursesEnvelope {
    pub courses: Option<Vec<RawCourse>>,
}

/// `GET|POST|PUT /courses[/:id]`
#[derive(Debug, Deserialize)]
pub struct CourseEnvelope {
    pub course: RawCourse,
}

/// Lesson endpoints wrap their payload in `data`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// `POST /enroll`
#[derive(Debug, Deserialize)]
pub struct EnrollmentEnvelope {
    pub enrollment: RawEnrollment,
}

/// `GET /enrollments/:userId`
#[derive(Debug, Deserialize)]
pub struct EnrollmentsEnvelope {
    pub enrollments: Option<Vec<RawEnrollment>>,
}

/// `PUT /profile/:id`
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateEnvelope {
    pub user: ProfileUserBody,
}

/// `GET /quizzes`
#[derive(Debug, Deserialize)]
pub struct QuizzesEnvelope {
    pub quizzes: Option<Vec<RawQuiz>>,
}

/// `POST /quizzes`
#[derive(Debug, Deserialize)]
pub struct QuizEnvelope {
    pub quiz: RawQuiz,
}

/// `POST /quizzes/:id/complete`, `POST /quiz-results`
#[derive(Debug, Deserialize)]
pub struct QuizResultEnvelope {
    pub result: RawQuizResult,
}

/// `GET /quiz-results`
#[derive(Debug, Deserialize)]
pub struct QuizResultsEnvelope {
    pub quiz_results: Option<Vec<RawQuizResult>>,
}
