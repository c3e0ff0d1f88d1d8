use std::collections::HashMap;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{Value, json};

use super::*;
use crate::test_support::{authed_client, spawn_backend};

fn lesson(id: u64, course_id: u64, order: i64) -> Value {
    json!({
        "ID": id,
        "CourseID": course_id,
        "Title": format!("Lesson {order}"),
        "Content": "body",
        "Order": order,
        "Quizzes": [{"ID": 40, "LessonID": id, "Question": "?", "Options": "yes,no"}]
    })
}

/// Echo the submitted form back as a lesson, the way the backend persists it.
async fn echo_lesson(id: u64, form: &HashMap<String, String>) -> Json<Value> {
    Json(json!({"data": {
        "ID": id,
        "CourseID": form["course_id"].parse::<u64>().unwrap(),
        "Title": form["title"],
        "Content": form["content"],
        "Order": form["order"].parse::<i64>().unwrap()
    }}))
}

fn lesson_backend() -> Router {
    Router::new()
        .route(
            "/lessons/{course_id}",
            get(|Path(course_id): Path<u64>| async move {
                Json(json!({"data": [lesson(1, course_id, 1), lesson(2, course_id, 2)]}))
            }),
        )
        .route(
            "/lessons",
            post(|Form(form): Form<HashMap<String, String>>| async move { echo_lesson(30, &form).await }),
        )
        .route(
            "/lesson/{id}",
            get(|Path(id): Path<u64>| async move {
                if id == 1 {
                    Ok(Json(json!({"data": lesson(1, 5, 1)})))
                } else {
                    Err((StatusCode::NOT_FOUND, Json(json!({"error": "Lesson not found"}))))
                }
            })
            .put(|Path(id): Path<u64>, Form(form): Form<HashMap<String, String>>| async move {
                echo_lesson(id, &form).await
            })
            .delete(|Path(_id): Path<u64>| async { StatusCode::NO_CONTENT }),
        )
}

#[tokio::test]
async fn fetch_lessons_maps_list_and_quiz_options() {
    let base = spawn_backend(lesson_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    let lessons = fetch_lessons_by_course(&client, 5).await.unwrap();
    assert_eq!(lessons.len(), 2);
    assert!(lessons.iter().all(|lesson| lesson.course_id == 5));
    assert_eq!(lessons[1].order, 2);
    assert_eq!(lessons[0].quizzes[0].options, vec!["yes", "no"]);
}

#[tokio::test]
async fn fetch_lessons_accepts_null_data() {
    let router = Router::new().route("/lessons/{id}", get(|| async { Json(json!({"data": null})) }));
    let base = spawn_backend(router).await;
    let (client, _) = authed_client(&base, "tok");

    assert!(fetch_lessons_by_course(&client, 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_lesson_by_id() {
    let base = spawn_backend(lesson_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    let lesson = fetch_lesson(&client, 1).await.unwrap();
    assert_eq!(lesson.title, "Lesson 1");

    let err = fetch_lesson(&client, 2).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound { message: "Lesson not found".into() });
}

#[tokio::test]
async fn create_and_update_round_trip_form() {
    let base = spawn_backend(lesson_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    let draft = LessonDraft { course_id: 5, title: "Intro".into(), content: "Hi".into(), order: 3, image: None };
    let created = create_lesson(&client, draft.clone()).await.unwrap();
    assert_eq!((created.id, created.course_id, created.order), (30, 5, 3));
    assert_eq!(created.image, None);

    let updated = update_lesson(&client, 30, LessonDraft { title: "Intro 2".into(), ..draft }).await.unwrap();
    assert_eq!((updated.id, updated.title.as_str()), (30, "Intro 2"));
}

#[tokio::test]
async fn delete_lesson_accepts_empty_body() {
    let base = spawn_backend(lesson_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    delete_lesson(&client, 1).await.unwrap();
}
