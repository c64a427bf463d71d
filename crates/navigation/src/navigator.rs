use std::sync::Arc;

use tracing::{debug, error, warn};
use weekmenu_week::{Clock, IsoWeek, LocalClock, WeekStart, start_of_iso_week};

use crate::{
    AuthProvider, MatchedRoute, NavigationOutcome, RejectReason, RouteKind, RouteTable,
    ScheduleStore, Session, auth_outcome, resolution_outcome,
};

/// Redirect hops followed by [`Navigator::settle`] before giving up.
pub const MAX_REDIRECTS: usize = 5;

/// Everything navigation needs, built once at startup and shared.
#[derive(Clone)]
pub struct NavigationContext {
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<dyn ScheduleStore>,
    pub clock: Arc<dyn Clock>,
    pub routes: Arc<RouteTable>,
}

impl NavigationContext {
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn ScheduleStore>) -> Self {
        Self {
            auth,
            store,
            clock: Arc::new(LocalClock),
            routes: Arc::new(RouteTable::default()),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = Arc::new(routes);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    /// Opaque credential handed to the auth provider, e.g. a session token.
    pub credential: Option<String>,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

/// Final state after following redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub outcome: NavigationOutcome,
    /// Paths redirected to, in order.
    pub redirects: Vec<String>,
}

#[derive(Clone)]
pub struct Navigator {
    context: NavigationContext,
}

impl Navigator {
    pub fn new(context: NavigationContext) -> Self {
        Self { context }
    }

    /// Decides a single navigation attempt.
    ///
    /// Symbolic routes are resolved first; the auth gate then applies to the matched
    /// route chain. A redirect produced by resolution is gated again when it is
    /// navigated, against the concrete route's own marker.
    #[tracing::instrument(skip_all, fields(path = %request.path))]
    pub async fn navigate(&self, request: &NavigationRequest) -> NavigationOutcome {
        let Some(route) = self.context.routes.resolve(&request.path) else {
            debug!("No route matches path");
            return NavigationOutcome::Reject(RejectReason::NoMatchingRoute(
                request.path.to_owned(),
            ));
        };

        let resolved = match route.kind {
            RouteKind::View => None,
            RouteKind::CurrentWeek => Some(self.resolve_current_week().await),
            RouteKind::WeekByYearAndNumber => Some(self.resolve_week_by_number(&route).await),
        };

        let session = if route.requires_auth {
            self.session(request).await
        } else {
            None
        };

        match auth_outcome(route, session.as_ref()) {
            NavigationOutcome::Proceed(route) => {
                resolved.unwrap_or(NavigationOutcome::Proceed(route))
            }
            outcome => {
                debug!(redirect = ?outcome.redirect_target(), "Protected route without session");
                outcome
            }
        }
    }

    /// Navigates and keeps following redirects until a route is rendered or rejected.
    pub async fn settle(&self, request: NavigationRequest) -> Settled {
        let mut request = request;
        let mut redirects = Vec::new();

        loop {
            let outcome = self.navigate(&request).await;
            let NavigationOutcome::RedirectTo(path) = outcome else {
                return Settled { outcome, redirects };
            };

            if redirects.len() == MAX_REDIRECTS {
                warn!(path = %path, "Too many redirects");
                return Settled {
                    outcome: NavigationOutcome::Reject(RejectReason::TooManyRedirects(path)),
                    redirects,
                };
            }

            redirects.push(path.to_owned());
            request.path = path;
        }
    }

    async fn resolve_current_week(&self) -> NavigationOutcome {
        let start = start_of_iso_week(self.context.clock.today());

        self.lookup(start).await
    }

    async fn resolve_week_by_number(&self, route: &MatchedRoute) -> NavigationOutcome {
        let year = route.param("year").unwrap_or_default();
        let week = route.param("week_nbr").unwrap_or_default();

        match IsoWeek::parse(year, week) {
            Ok(key) => self.lookup(key.start()).await,
            Err(e) => {
                error!(error = %e, year, week_nbr = week, "Invalid year or week number");
                NavigationOutcome::no_week()
            }
        }
    }

    async fn lookup(&self, start: WeekStart) -> NavigationOutcome {
        let result = self.context.store.find_week_id(start).await;

        match &result {
            Ok(Some(id)) => debug!(start_date = %start, week_id = id, "Week resolved"),
            Ok(None) => warn!(start_date = %start, "No week found for start_date"),
            Err(e) => warn!(start_date = %start, error = %e, "Week lookup failed"),
        }

        resolution_outcome(result)
    }

    async fn session(&self, request: &NavigationRequest) -> Option<Session> {
        match self
            .context
            .auth
            .get_session(request.credential.as_deref())
            .await
        {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Session query failed, treating as signed out");
                None
            }
        }
    }
}
