use std::sync::Arc;

use super::*;
use crate::models::{Profile, User};
use crate::state::storage::MemoryStorage;

fn user_named(name: &str) -> User {
    User { id: 1, email: "a@b.com".into(), profile: Profile { id: 0, name: name.into(), image: None } }
}

fn anonymous() -> Session {
    Session::default()
}

fn token_only() -> Session {
    Session { user: None, token: Some("abc123".into()) }
}

fn unnamed() -> Session {
    Session { user: Some(user_named("")), token: Some("abc123".into()) }
}

fn complete() -> Session {
    Session { user: Some(user_named("Ana")), token: Some("abc123".into()) }
}

fn protected_routes() -> impl Iterator<Item = AppRoute> {
    AppRoute::ALL
        .into_iter()
        .filter(|route| route.requires_auth() && *route != AppRoute::CreateProfile)
}

#[test]
fn profile_creation_is_always_allowed() {
    for session in [anonymous(), token_only(), unnamed(), complete()] {
        assert_eq!(evaluate(AppRoute::CreateProfile, &session), GuardDecision::Allow);
    }
}

#[test]
fn protected_routes_without_token_redirect_to_login() {
    for route in protected_routes() {
        assert_eq!(evaluate(route, &anonymous()), GuardDecision::Redirect(AppRoute::Login), "{route}");
    }
}

#[test]
fn empty_token_counts_as_absent() {
    let session = Session { user: Some(user_named("Ana")), token: Some(String::new()) };
    assert_eq!(evaluate(AppRoute::Home, &session), GuardDecision::Redirect(AppRoute::Login));
}

#[test]
fn protected_routes_without_profile_name_redirect_to_onboarding() {
    for route in protected_routes() {
        for session in [token_only(), unnamed()] {
            assert_eq!(evaluate(route, &session), GuardDecision::Redirect(AppRoute::CreateProfile), "{route}");
        }
    }
}

#[test]
fn whitespace_name_is_not_a_profile() {
    let session = Session { user: Some(user_named("   ")), token: Some("t".into()) };
    assert_eq!(evaluate(AppRoute::MyProfile, &session), GuardDecision::Redirect(AppRoute::CreateProfile));
}

#[test]
fn complete_session_reaches_every_route() {
    for route in AppRoute::ALL {
        assert_eq!(evaluate(route, &complete()), GuardDecision::Allow, "{route}");
    }
}

#[test]
fn public_routes_need_nothing() {
    for route in [AppRoute::Login, AppRoute::NotFound] {
        assert_eq!(evaluate(route, &anonymous()), GuardDecision::Allow);
    }
}

#[tokio::test]
async fn before_each_reads_current_store_state() {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()), "session");
    assert_eq!(before_each(&store, AppRoute::Home).await, GuardDecision::Redirect(AppRoute::Login));

    store.set_user(user_named("Ana")).await;
    // A cached user without a token is still anonymous.
    assert_eq!(before_each(&store, AppRoute::Home).await, GuardDecision::Redirect(AppRoute::Login));
}
