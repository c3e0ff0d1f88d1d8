//! Client-side routing: the route table, the guard, and a small router that
//! applies navigation intents.
//!
//! ARCHITECTURE
//! ============
//! Store actions return a [`Navigation`] instead of redirecting. The caller
//! hands it to [`Router::apply`], which runs the guard and records history.
//! External intents leave the application and are handed back untouched.

pub mod guard;
pub mod route;

pub use guard::{GuardDecision, before_each, evaluate};
pub use route::AppRoute;

use crate::state::session::SessionStore;

/// Where an action wants the user to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(AppRoute),
    /// Leave the application, e.g. for the OAuth provider.
    External(String),
}

/// Current route plus the stack of routes left behind.
pub struct Router {
    session: SessionStore,
    current: AppRoute,
    history: Vec<AppRoute>,
}

impl Router {
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self { session, current: AppRoute::default(), history: Vec::new() }
    }

    #[must_use]
    pub fn current(&self) -> AppRoute {
        self.current
    }

    #[must_use]
    pub fn history(&self) -> &[AppRoute] {
        &self.history
    }

    /// Navigate to a URL path and return the route actually landed on.
    pub async fn navigate(&mut self, path: &str) -> AppRoute {
        self.push(AppRoute::from_path(path)).await
    }

    /// Apply an intent. Returns the URL when the intent leaves the app.
    pub async fn apply(&mut self, navigation: Navigation) -> Option<String> {
        match navigation {
            Navigation::To(route) => {
                self.push(route).await;
                None
            }
            Navigation::External(url) => Some(url),
        }
    }

    /// Return to the previous route, re-running the guard against it.
    pub async fn back(&mut self) -> Option<AppRoute> {
        let previous = self.history.pop()?;
        let landed = self.resolve(previous).await;
        self.current = landed;
        Some(landed)
    }

    async fn push(&mut self, requested: AppRoute) -> AppRoute {
        let landed = self.resolve(requested).await;
        if landed != self.current {
            self.history.push(self.current);
            self.current = landed;
        }
        landed
    }

    /// Follow guard redirects. Redirect targets are always allowed, so this
    /// settles within one hop.
    async fn resolve(&self, requested: AppRoute) -> AppRoute {
        let mut target = requested;
        while let GuardDecision::Redirect(to) = before_each(&self.session, target).await {
            tracing::debug!(from = requested.name(), to = to.name(), "guard redirected");
            target = to;
        }
        target
    }
}
