use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;
use weekmenu_week::WeekStart;

/// Row identifier of a week in the schedule store.
pub type WeekId = i64;

/// A live session as reported by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub subject: String,
    /// Expiry as a UTC unix timestamp.
    pub expires_at: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, strum::Display)]
pub enum AuthEvent {
    #[strum(serialize = "SIGNED_IN")]
    SignedIn { subject: String },
    #[strum(serialize = "TOKEN_REJECTED")]
    TokenRejected,
}

/// Owner of session state. Navigation only ever reads from it.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current session for the given credential, `None` when signed out.
    async fn get_session(&self, credential: Option<&str>) -> anyhow::Result<Option<Session>>;

    fn on_auth_state_change(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Lookup of week rows by their canonical start date.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// `select id from weeks where start_date = ? limit 1`
    async fn find_week_id(&self, start: WeekStart) -> anyhow::Result<Option<WeekId>>;
}
