use crate::models::profile::ProfileFetchOutcome;
use crate::models::session::SessionUser;
use crate::service::profile::ProfileFetcher;
use base64::{Engine as _, engine::general_purpose};
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Build a structurally valid three-segment token around the given claims
/// JSON. The signature segment is junk; nothing client-side verifies it.
pub fn token_with_claims(claims_json: &str) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = general_purpose::URL_SAFE_NO_PAD.encode(claims_json);
    format!("{header}.{payload}.signature")
}

pub fn token_with_exp(exp: Option<i64>) -> String {
    match exp {
        Some(exp) => token_with_claims(&format!(r#"{{"sub":"42","exp":{exp}}}"#)),
        None => token_with_claims(r#"{"sub":"42"}"#),
    }
}

pub fn fresh_token() -> String {
    token_with_exp(Some((Utc::now() + Duration::hours(1)).timestamp()))
}

pub fn expired_token() -> String {
    token_with_exp(Some((Utc::now() - Duration::hours(1)).timestamp()))
}

pub fn user_with_role(role: &str) -> SessionUser {
    SessionUser {
        token: fresh_token(),
        role: role.to_string(),
        id: "42".to_string(),
        email: None,
        username: None,
        full_name: None,
        avatar: None,
    }
}

/// Profile-fetch collaborator that returns a canned outcome and counts calls.
pub struct MockProfileFetcher {
    outcome: ProfileFetchOutcome,
    calls: AtomicUsize,
}

impl MockProfileFetcher {
    pub fn returning(outcome: ProfileFetchOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProfileFetcher for MockProfileFetcher {
    async fn fetch_current_profile(&self) -> ProfileFetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
