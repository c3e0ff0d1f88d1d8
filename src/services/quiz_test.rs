use std::sync::{Arc, Mutex};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use super::*;
use crate::test_support::{authed_client, spawn_backend};

fn quiz_backend(seen: Arc<Mutex<Vec<Value>>>) -> Router {
    let create_seen = seen.clone();
    Router::new()
        .route(
            "/quizzes",
            get(|| async {
                Json(json!({"quizzes": [
                    {"ID": 1, "LessonID": 3, "Question": "2+2?", "Options": "[\"3\",\"4\"]", "Answer": "4"}
                ]}))
            })
            .post(move |Json(body): Json<Value>| {
                let seen = create_seen.clone();
                async move {
                    seen.lock().unwrap().push(body.clone());
                    let quiz = json!({
                        "ID": 2,
                        "LessonID": body["lesson_id"],
                        "Question": body["question"],
                        "Options": body["options"]
                    });
                    (StatusCode::CREATED, Json(json!({ "quiz": quiz })))
                }
            }),
        )
        .route("/quizzes/{id}", delete(|Path(_id): Path<u64>| async { StatusCode::NO_CONTENT }))
        .route(
            "/quizzes/{id}/complete",
            post(move |Path(id): Path<u64>, Json(body): Json<Value>| {
                let seen = seen.clone();
                async move {
                    if id == 9 {
                        let error = json!({"error": "You have already completed this quiz"});
                        return Err((StatusCode::BAD_REQUEST, Json(error)));
                    }
                    seen.lock().unwrap().push(body.clone());
                    let result = json!({"ID": 5, "UserID": 3, "QuizID": id, "Score": body["score"]});
                    Ok(Json(json!({"message": "Quiz completed successfully", "result": result})))
                }
            }),
        )
        .route(
            "/quiz-results",
            get(|| async { Json(json!({"quiz_results": [{"ID": 5, "UserID": 3, "QuizID": 1, "Score": 80}]})) })
                .post(|Json(body): Json<Value>| async move {
                    let result = json!({"ID": 6, "UserID": 3, "QuizID": body["quiz_id"], "Score": body["score"]});
                    (StatusCode::CREATED, Json(json!({ "result": result })))
                }),
        )
        .route("/quiz-results/{id}", delete(|Path(_id): Path<u64>| async { Json(json!({"message": "deleted"})) }))
}

#[tokio::test]
async fn fetch_quizzes_decodes_string_options() {
    let base = spawn_backend(quiz_backend(Arc::default())).await;
    let (client, _) = authed_client(&base, "tok");

    let quizzes = fetch_quizzes(&client).await.unwrap();
    assert_eq!(quizzes, vec![Quiz { id: 1, lesson_id: 3, question: "2+2?".into(), options: vec!["3".into(), "4".into()] }]);
}

#[tokio::test]
async fn create_quiz_encodes_options_as_string() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_backend(quiz_backend(seen.clone())).await;
    let (client, _) = authed_client(&base, "tok");

    let draft = QuizDraft {
        lesson_id: 3,
        question: "Pick one".into(),
        options: vec!["a, with comma".into(), "b".into()],
        answer: "b".into(),
    };
    let quiz = create_quiz(&client, draft).await.unwrap();
    assert_eq!(quiz.id, 2);
    assert_eq!(quiz.options, vec!["a, with comma", "b"]);

    let body = seen.lock().unwrap()[0].clone();
    assert_eq!(body["options"], json!(r#"["a, with comma","b"]"#));
    assert_eq!(body["answer"], json!("b"));
}

#[tokio::test]
async fn complete_quiz_posts_score() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_backend(quiz_backend(seen.clone())).await;
    let (client, _) = authed_client(&base, "tok");

    let result = complete_quiz(&client, 1, 90).await.unwrap();
    assert_eq!(result, QuizResult { id: 5, user_id: 3, quiz_id: 1, score: 90 });
    assert_eq!(seen.lock().unwrap()[0], json!({"score": 90}));

    let err = complete_quiz(&client, 9, 90).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn quiz_results_list_submit_and_delete() {
    let base = spawn_backend(quiz_backend(Arc::default())).await;
    let (client, _) = authed_client(&base, "tok");

    let results = fetch_quiz_results(&client).await.unwrap();
    assert_eq!(results[0].score, 80);

    let submitted = submit_quiz_result(&client, 1, 70).await.unwrap();
    assert_eq!(submitted, QuizResult { id: 6, user_id: 3, quiz_id: 1, score: 70 });

    delete_quiz_result(&client, 6).await.unwrap();
    delete_quiz(&client, 1).await.unwrap();
}
