//! Conversion from raw wire schemas to client models.
//!
//! Rules: empty image strings become `None`, `null` lists become empty, and a
//! Go zero-value relation (`ID == 0`) becomes `None`.

use super::types::{
    CallbackResponse, CourseSummaryBody, ProfileBody, ProfileResponse, ProfileUserBody, ProgressResponse,
    RawCourse, RawEnrollment, RawLesson, RawOptions, RawProfile, RawQuiz, RawQuizResult, RawUser,
};
use crate::models::{
    Course, CourseProgress, Enrollment, Lesson, OAuthIdentity, Profile, ProfileOverview, Quiz, QuizResult, User,
};

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

fn map_list<R, T>(raw: Option<Vec<R>>, f: impl FnMut(R) -> T) -> Vec<T> {
    raw.unwrap_or_default().into_iter().map(f).collect()
}

/// Split a stored options string: a JSON array when it is one, otherwise
/// comma-separated values.
#[must_use]
pub fn parse_options(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('[')
        && let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed)
    {
        return list;
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_owned)
        .collect()
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        Self { id: raw.id, name: raw.name, image: non_empty(raw.image) }
    }
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        Self { id: raw.id, email: raw.email, profile: raw.profile.into() }
    }
}

impl From<RawQuiz> for Quiz {
    fn from(raw: RawQuiz) -> Self {
        let options = match raw.options {
            Some(RawOptions::List(list)) => list,
            Some(RawOptions::Text(text)) => parse_options(&text),
            None => Vec::new(),
        };
        Self { id: raw.id, lesson_id: raw.lesson_id, question: raw.question, options }
    }
}

impl From<RawLesson> for Lesson {
    fn from(raw: RawLesson) -> Self {
        Self {
            id: raw.id,
            course_id: raw.course_id,
            title: raw.title,
            content: raw.content,
            order: raw.order,
            image: non_empty(raw.image),
            quizzes: map_list(raw.quizzes, Quiz::from),
        }
    }
}

impl From<RawCourse> for Course {
    fn from(raw: RawCourse) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            image: non_empty(raw.image),
            owner: raw.user.filter(|user| user.id != 0).map(User::from),
            progress: None,
            lessons: map_list(raw.lessons, Lesson::from),
        }
    }
}

impl From<RawEnrollment> for Enrollment {
    fn from(raw: RawEnrollment) -> Self {
        let course = raw
            .course
            .filter(|course| course.id != 0)
            .map(|course| Course { progress: Some(raw.progress), ..Course::from(course) });
        Self { id: raw.id, user_id: raw.user_id, course_id: raw.course_id, progress: raw.progress, course }
    }
}

impl From<RawQuizResult> for QuizResult {
    fn from(raw: RawQuizResult) -> Self {
        Self { id: raw.id, user_id: raw.user_id, quiz_id: raw.quiz_id, score: raw.score }
    }
}

/// Missing profile fields default to empty strings for the name and `None`
/// for the image.
fn profile_from_body(body: Option<ProfileBody>) -> Profile {
    let body = body.unwrap_or_default();
    Profile { id: 0, name: body.name.unwrap_or_default(), image: body.image.and_then(non_empty) }
}

impl From<CourseSummaryBody> for Course {
    fn from(raw: CourseSummaryBody) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            image: non_empty(raw.image),
            owner: None,
            progress: raw.progress,
            lessons: Vec::new(),
        }
    }
}

impl From<ProfileUserBody> for User {
    fn from(raw: ProfileUserBody) -> Self {
        Self { id: raw.id, email: raw.email, profile: profile_from_body(raw.profile) }
    }
}

impl From<ProfileResponse> for ProfileOverview {
    fn from(raw: ProfileResponse) -> Self {
        Self {
            user: User { id: raw.id, email: raw.email, profile: profile_from_body(raw.profile) },
            created_courses: map_list(raw.created_courses, Course::from),
            enrolled_courses: map_list(raw.enrolled_courses, Course::from),
        }
    }
}

impl From<CallbackResponse> for OAuthIdentity {
    fn from(raw: CallbackResponse) -> Self {
        Self { id: raw.id, name: raw.name, email: raw.email }
    }
}

impl From<ProgressResponse> for CourseProgress {
    fn from(raw: ProgressResponse) -> Self {
        Self { course_id: raw.course_id, progress: raw.progress }
    }
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod mapping_test;
