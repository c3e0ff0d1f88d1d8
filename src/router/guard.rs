//! Navigation guard.
//!
//! Rules, first match wins:
//! 1. the profile-creation route is always allowed;
//! 2. a protected route without a token redirects to login;
//! 3. a protected route without a named profile redirects to profile creation;
//! 4. everything else is allowed.
//!
//! Rule 1 must come first. Rules 2 and 3 would otherwise keep redirecting
//! away from the page that completes the profile.

use super::route::AppRoute;
use crate::state::session::{Session, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(AppRoute),
}

/// Decide a navigation to `to` against a session snapshot.
#[must_use]
pub fn evaluate(to: AppRoute, session: &Session) -> GuardDecision {
    if to == AppRoute::CreateProfile {
        return GuardDecision::Allow;
    }
    if !to.requires_auth() {
        return GuardDecision::Allow;
    }
    if !session.is_authenticated() {
        return GuardDecision::Redirect(AppRoute::Login);
    }
    let named = session.user.as_ref().is_some_and(|user| user.profile.is_complete());
    if !named {
        return GuardDecision::Redirect(AppRoute::CreateProfile);
    }
    GuardDecision::Allow
}

/// Read the store, then decide. Completes before the navigation proceeds.
pub async fn before_each(store: &SessionStore, to: AppRoute) -> GuardDecision {
    let session = store.snapshot().await;
    let decision = evaluate(to, &session);
    tracing::debug!(route = to.name(), ?decision, "guard evaluated");
    decision
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;
