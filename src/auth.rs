use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use weekmenu_navigation::{AuthEvent, AuthProvider, Session};

use crate::config::JwtConfig;

pub const AUTH_COOKIE_NAME: &str = "auth_token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String, // Audience
    exp: u64,    // Expiration time (as UTC timestamp)
    iat: u64,    // Issued at (as UTC timestamp)
    iss: String, // Issuer
    sub: String, // Subject (whom token refers to)
}

/// Session provider backed by HS256 tokens carried in the `auth_token` cookie.
#[derive(Clone)]
pub struct JwtAuthProvider {
    config: JwtConfig,
    events: broadcast::Sender<AuthEvent>,
}

impl JwtAuthProvider {
    pub fn new(config: JwtConfig) -> Self {
        let (events, _) = broadcast::channel(16);

        Self { config, events }
    }

    pub fn issue_token(&self, sub: impl Into<String>) -> anyhow::Result<String> {
        let sub = sub.into();
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let claims = Claims {
            aud: self.config.audience.to_owned(),
            exp: now + self.config.expiration_days * 24 * 60 * 60,
            iat: now,
            iss: self.config.issuer.to_owned(),
            sub: sub.to_owned(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )?;

        self.notify(AuthEvent::SignedIn { subject: sub });

        Ok(token)
    }

    pub fn build_cookie<'a>(&self, sub: impl Into<String>) -> anyhow::Result<Cookie<'a>> {
        let token = self.issue_token(sub)?;

        Ok(Cookie::build((AUTH_COOKIE_NAME, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .build())
    }

    fn validate(&self, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.config.issuer.to_owned()]);
        validation.set_audience(&[self.config.audience.to_owned()]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }

    fn notify(&self, event: AuthEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn get_session(&self, credential: Option<&str>) -> anyhow::Result<Option<Session>> {
        let Some(token) = credential else {
            return Ok(None);
        };

        match self.validate(token) {
            Ok(claims) => Ok(Some(Session {
                subject: claims.sub,
                expires_at: claims.exp,
            })),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                self.notify(AuthEvent::TokenRejected);
                Ok(None)
            }
        }
    }

    fn on_auth_state_change(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
