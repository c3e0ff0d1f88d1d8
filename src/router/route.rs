//! Route table.
//!
//! Pure domain model: each route knows its path and whether it sits behind
//! authentication. The guard in `super::guard` consults this metadata.

use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    #[default]
    Home,
    About,
    Login,
    /// Onboarding: reachable with a token even before the profile has a name.
    CreateProfile,
    UpdateProfile,
    MyProfile,
    CreateCourse,
    NotFound,
}

impl AppRoute {
    pub const ALL: [Self; 8] = [
        Self::Home,
        Self::About,
        Self::Login,
        Self::CreateProfile,
        Self::UpdateProfile,
        Self::MyProfile,
        Self::CreateCourse,
        Self::NotFound,
    ];

    /// Parse a URL path. Query strings, fragments and a trailing slash are
    /// ignored; unknown paths map to [`AppRoute::NotFound`].
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Self::Home,
            "/about" => Self::About,
            "/login" => Self::Login,
            "/profile/create" => Self::CreateProfile,
            "/profile/update" => Self::UpdateProfile,
            "/myProfile" => Self::MyProfile,
            "/course/create" => Self::CreateCourse,
            _ => Self::NotFound,
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Login => "/login",
            Self::CreateProfile => "/profile/create",
            Self::UpdateProfile => "/profile/update",
            Self::MyProfile => "/myProfile",
            Self::CreateCourse => "/course/create",
            Self::NotFound => "/404",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Login => "login",
            Self::CreateProfile => "create-profile",
            Self::UpdateProfile => "update-profile",
            Self::MyProfile => "my-profile",
            Self::CreateCourse => "create-course",
            Self::NotFound => "not-found",
        }
    }

    /// Whether the guard requires a session before entering.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;
