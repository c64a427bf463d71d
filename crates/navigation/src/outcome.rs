use std::fmt::Display;

use thiserror::Error;

use crate::{MatchedRoute, Session, WeekId, route::paths};

/// Decision taken for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Render the matched route.
    Proceed(MatchedRoute),
    /// Navigate again to this path instead.
    RedirectTo(String),
    Reject(RejectReason),
}

impl NavigationOutcome {
    pub fn redirect(path: impl Into<String>) -> Self {
        Self::RedirectTo(path.into())
    }

    pub fn no_week() -> Self {
        Self::redirect(paths::NO_WEEK)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::RedirectTo(path) => Some(path),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("no route matches {0}")]
    NoMatchingRoute(String),

    #[error("too many redirects while navigating to {0}")]
    TooManyRedirects(String),
}

/// Outcome of a week lookup. A failed lookup and a missing row both land on the
/// fallback route.
pub fn resolution_outcome<E: Display>(lookup: Result<Option<WeekId>, E>) -> NavigationOutcome {
    match lookup {
        Ok(Some(id)) => NavigationOutcome::RedirectTo(paths::week(id)),
        Ok(None) | Err(_) => NavigationOutcome::no_week(),
    }
}

/// Lets the route through unless it is protected and there is no session.
pub fn auth_outcome(route: MatchedRoute, session: Option<&Session>) -> NavigationOutcome {
    if route.requires_auth && session.is_none() {
        return NavigationOutcome::redirect(paths::LOGIN);
    }

    NavigationOutcome::Proceed(route)
}
