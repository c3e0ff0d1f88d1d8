use std::collections::HashMap;

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use super::*;
use crate::test_support::{spawn_backend, test_client};

fn callback_backend() -> Router {
    Router::new().route(
        CALLBACK_PATH,
        get(|Query(query): Query<HashMap<String, String>>| async move {
            let code = query.get("code").cloned().unwrap_or_default();
            Json(json!({"id": 3, "name": code, "email": "code@x.io"}))
        })
        .post(|Json(body): Json<Value>| async move {
            match body["token"].as_str() {
                Some("good") => Ok(Json(json!({"id": 1, "name": "Ana", "email": "ana@x.io"}))),
                _ => Err((axum::http::StatusCode::BAD_REQUEST, Json(json!({"error": "bad token"})))),
            }
        }),
    )
}

#[test]
fn login_url_joins_base() {
    let (client, _) = test_client("http://api.test:8080");
    assert_eq!(google_login_url(&client), "http://api.test:8080/auth/google/login");
}

#[tokio::test]
async fn callback_posts_token_and_maps_identity() {
    let base = spawn_backend(callback_backend()).await;
    let (client, _) = test_client(&base);

    let identity = handle_google_callback(&client, "good").await.unwrap();
    assert_eq!(identity, OAuthIdentity { id: 1, name: "Ana".into(), email: "ana@x.io".into() });
}

#[tokio::test]
async fn callback_rejection_is_reraised() {
    let base = spawn_backend(callback_backend()).await;
    let (client, _) = test_client(&base);

    let err = handle_google_callback(&client, "bad").await.unwrap_err();
    assert_eq!(err, ApiError::Client { status: 400, message: "bad token".into() });
}

#[tokio::test]
async fn exchange_code_encodes_query() {
    let base = spawn_backend(callback_backend()).await;
    let (client, _) = test_client(&base);

    let identity = exchange_code(&client, "4/a b&c=d%").await.unwrap();
    assert_eq!(identity.id, 3);
    assert_eq!(identity.name, "4/a b&c=d%");
}
