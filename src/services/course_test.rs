use std::collections::HashMap;

use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{Value, json};

use super::*;
use crate::net::http::Upload;
use crate::test_support::{authed_client, spawn_backend};

fn go_course() -> Value {
    json!({
        "ID": 5,
        "Title": "Go",
        "Description": "Concurrency",
        "Image": "",
        "User": {"ID": 1, "Email": "a@b.com", "Profile": {"Name": "A"}},
        "Lessons": [{"ID": 9, "CourseID": 5, "Title": "L1", "Order": 1, "Quizzes": []}]
    })
}

fn course_backend() -> Router {
    Router::new()
        .route(
            "/courses",
            get(|| async { Json(json!({"courses": [go_course(), {"ID": 6, "Title": "Rust", "Lessons": null}]})) })
                .post(|Form(form): Form<HashMap<String, String>>| async move {
                    Json(json!({"course": {"ID": 10, "Title": form["title"], "Description": form["description"]}}))
                }),
        )
        .route(
            "/courses/{id}",
            get(|Path(id): Path<u64>| async move {
                if id == 5 {
                    Ok(Json(json!({"course": go_course()})))
                } else {
                    Err((StatusCode::NOT_FOUND, Json(json!({"error": "Course not found"}))))
                }
            })
            .put(|Path(id): Path<u64>, Form(form): Form<HashMap<String, String>>| async move {
                Json(json!({"course": {"ID": id, "Title": form["title"], "Description": form["description"]}}))
            })
            .delete(|Path(_id): Path<u64>| async { Json(json!({"message": "Course deleted"})) }),
        )
        .route(
            "/courses/progress/{id}",
            get(|Path(id): Path<u64>| async move { Json(json!({"course_id": id, "progress": 37.5})) }),
        )
}

#[tokio::test]
async fn fetch_courses_maps_every_course() {
    let base = spawn_backend(course_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    let courses = fetch_courses(&client).await.unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].owner.as_ref().map(|u| u.id), Some(1));
    assert!(courses[1].lessons.is_empty());
}

#[tokio::test]
async fn fetch_courses_accepts_null_list() {
    let base = spawn_backend(Router::new().route("/courses", get(|| async { Json(json!({"courses": null})) }))).await;
    let (client, _) = authed_client(&base, "tok");

    assert!(fetch_courses(&client).await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_courses_without_envelope_is_malformed() {
    let base = spawn_backend(Router::new().route("/courses", get(|| async { Json(json!([go_course()])) }))).await;
    let (client, _) = authed_client(&base, "tok");

    let err = fetch_courses(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn fetch_course_maps_detail() {
    let base = spawn_backend(course_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    let course = fetch_course(&client, 5).await.unwrap();
    assert_eq!(course.title, "Go");
    assert_eq!(course.lessons[0].title, "L1");
    assert_eq!(course.image, None);
}

#[tokio::test]
async fn fetch_missing_course_is_not_found() {
    let base = spawn_backend(course_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    let err = fetch_course(&client, 99).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound { message: "Course not found".into() });
}

#[tokio::test]
async fn create_and_update_send_form_fields() {
    let base = spawn_backend(course_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    let draft = CourseDraft { title: "New".into(), description: "Desc".into(), image: None };
    let created = create_course(&client, draft).await.unwrap();
    assert_eq!((created.id, created.title.as_str(), created.description.as_str()), (10, "New", "Desc"));

    let draft = CourseDraft { title: "Renamed".into(), description: "D2".into(), image: None };
    let updated = update_course(&client, 10, draft).await.unwrap();
    assert_eq!((updated.id, updated.title.as_str()), (10, "Renamed"));
}

#[tokio::test]
async fn create_with_image_sends_multipart() {
    let router = Router::new().route(
        "/courses",
        post(|mut multipart: Multipart| async move {
            let mut title = String::new();
            let mut image = String::new();
            while let Some(field) = multipart.next_field().await.unwrap() {
                let field_name = field.name().unwrap_or_default().to_owned();
                match field_name.as_str() {
                    "title" => title = field.text().await.unwrap(),
                    "image" => {
                        let name = field.file_name().unwrap_or_default().to_owned();
                        let mime = field.content_type().unwrap_or_default().to_owned();
                        let len = field.bytes().await.unwrap().len();
                        image = format!("/public/{name}|{mime}|{len}");
                    }
                    _ => {}
                }
            }
            Json(json!({"course": {"ID": 11, "Title": title, "Image": image}}))
        }),
    );
    let base = spawn_backend(router).await;
    let (client, _) = authed_client(&base, "tok");

    let draft = CourseDraft {
        title: "Pics".into(),
        description: String::new(),
        image: Some(Upload::new("cover.png", vec![1, 2, 3])),
    };
    let course = create_course(&client, draft).await.unwrap();
    assert_eq!(course.title, "Pics");
    assert_eq!(course.image.as_deref(), Some("/public/cover.png|image/png|3"));
}

#[tokio::test]
async fn delete_course_succeeds() {
    let base = spawn_backend(course_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    delete_course(&client, 5).await.unwrap();
}

#[tokio::test]
async fn fetch_progress_maps_percentage() {
    let base = spawn_backend(course_backend()).await;
    let (client, _) = authed_client(&base, "tok");

    let progress = fetch_course_progress(&client, 5).await.unwrap();
    assert_eq!(progress, CourseProgress { course_id: 5, progress: 37.5 });
}
