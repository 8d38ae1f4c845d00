use crate::config::StorageConfig;
use crate::error::app_error::AppError;
use crate::models::profile::ProfileSource;
use crate::models::role::normalize_role;
use crate::models::session::{LoginPayload, SESSION_SCHEMA_VERSION, SessionRecord, SessionUser};
use crate::service::profile::ProfileFetcher;
use crate::store::SessionStore;
use crate::token;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Snapshot of the published session state. `bootstrapped` stays false only
/// until the first `bootstrap()` finishes, so dependent UI knows when to
/// stop showing its loading placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<SessionUser>,
    pub bootstrapped: bool,
}

/// Which tier of the persisted fallback produced the restored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapSource {
    /// The consolidated record parsed and was complete.
    Consolidated,
    /// Rebuilt from the legacy per-field keys.
    Reconstructed,
    /// Nothing usable persisted; starting signed out.
    Absent,
}

/// Owns the persisted session store and publishes the authoritative
/// in-memory user through a watch channel.
///
/// All mutations funnel through `login`/`logout`/`bootstrap`/`hydrate` so
/// the published state and the persisted record never diverge. Construct
/// one per application; tests instantiate independent instances freely.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    keys: StorageConfig,
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_keys(store, StorageConfig::default())
    }

    pub fn with_keys(store: Arc<dyn SessionStore>, keys: StorageConfig) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self { store, keys, tx }
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Current snapshot. A plain copy, never a live reference; a concurrent
    /// login or logout cannot produce a torn read.
    pub fn current(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.tx.borrow().user.is_some()
    }

    /// Canonical role of the signed-in user, if any.
    pub fn user_role(&self) -> Option<String> {
        self.tx.borrow().user.as_ref().map(|u| u.role.clone())
    }

    /// Reconstruct and publish the session from persisted state.
    ///
    /// Synchronous and infallible: every parse or validation failure is
    /// logged and converted into the signed-out outcome, and the
    /// `bootstrapped` flag is always set before returning.
    pub fn bootstrap(&self) -> BootstrapSource {
        let (user, source) = self.restore_session();

        match &user {
            Some(user) => info!(role = %user.role, user_id = %user.id, source = ?source, "session restored"),
            None => {
                self.clear_persisted();
                debug!("no valid persisted session, starting signed out");
            }
        }

        self.tx.send_replace(SessionSnapshot { user, bootstrapped: true });
        source
    }

    fn restore_session(&self) -> (Option<SessionUser>, BootstrapSource) {
        let Some(raw_token) = self.store.get(&self.keys.token_key) else {
            return (None, BootstrapSource::Absent);
        };
        if token::is_placeholder(&raw_token) {
            debug!("stored token is a placeholder value, signing out");
            return (None, BootstrapSource::Absent);
        }
        if let Err(e) = token::validate(&raw_token) {
            info!(error = %e, "stored token rejected, signing out");
            return (None, BootstrapSource::Absent);
        }

        if let Some(raw_record) = self.store.get(&self.keys.user_key) {
            match serde_json::from_str::<SessionRecord>(&raw_record) {
                Ok(record) => {
                    let needs_migration = record.schema_version < SESSION_SCHEMA_VERSION;
                    match record.into_user() {
                        Ok(user) => {
                            if needs_migration {
                                self.persist_consolidated(&user);
                                debug!("migrated persisted session record to current schema");
                            }
                            return (Some(user), BootstrapSource::Consolidated);
                        }
                        Err(e) => {
                            warn!(error = %e, "persisted session record incomplete, trying per-field reconstruction")
                        }
                    }
                }
                Err(e) => warn!(error = %e, "persisted session record unparseable, trying per-field reconstruction"),
            }
        }

        // Legacy tier: rebuild from the individual keys written by older
        // clients, then persist the consolidated form for next time.
        let role = self.store.get(&self.keys.role_key);
        let user_id = self
            .store
            .get(&self.keys.user_id_key)
            .filter(|id| !id.trim().is_empty());
        let email = self
            .store
            .get(&self.keys.email_key)
            .filter(|e| !e.trim().is_empty());

        if let (Some(role), Some(user_id)) = (role, user_id)
            && let Some(normalized) = normalize_role(&role)
        {
            let user = SessionUser {
                token: raw_token,
                role: normalized,
                id: user_id,
                email: email.clone(),
                username: email,
                full_name: None,
                avatar: None,
            };
            self.persist_consolidated(&user);
            return (Some(user), BootstrapSource::Reconstructed);
        }

        (None, BootstrapSource::Absent)
    }

    /// Publish a freshly authenticated session and persist it, consolidated
    /// record plus the backward-compatible individual keys, before returning.
    pub fn login(&self, payload: LoginPayload) -> Result<SessionUser, AppError> {
        let role = normalize_role(&payload.role).ok_or(AppError::IncompleteSession)?;

        let user = SessionUser {
            token: payload.token,
            role,
            id: payload.id,
            email: payload.email,
            username: payload.username,
            full_name: payload.full_name,
            avatar: payload.avatar,
        };

        self.persist_consolidated(&user);
        self.store.set(&self.keys.token_key, &user.token);
        self.store.set(&self.keys.role_key, &user.role);
        self.store.set(&self.keys.user_id_key, &user.id);
        if let Some(email) = user.email.as_deref().filter(|e| !e.trim().is_empty()) {
            self.store.set(&self.keys.email_key, email);
        }

        self.tx.send_replace(SessionSnapshot {
            user: Some(user.clone()),
            bootstrapped: true,
        });

        info!(role = %user.role, user_id = %user.id, "user logged in");
        Ok(user)
    }

    /// Publish signed-out state and clear every persisted field. Idempotent.
    pub fn logout(&self) {
        self.tx.send_replace(SessionSnapshot {
            user: None,
            bootstrapped: true,
        });
        self.clear_persisted();
        info!("user logged out");
    }

    /// Republish the consolidated record written by another part of the
    /// application. Skips token shape/expiry validation; callers use this
    /// only shortly after a known-good write.
    pub fn resync(&self) {
        let Some(raw) = self.store.get(&self.keys.user_key) else {
            return;
        };

        match serde_json::from_str::<SessionRecord>(&raw)
            .map_err(AppError::from)
            .and_then(SessionRecord::into_user)
        {
            Ok(user) => {
                self.tx.send_replace(SessionSnapshot {
                    user: Some(user),
                    bootstrapped: true,
                });
                debug!("session resynced from store");
            }
            Err(e) => warn!(error = %e, "resync found unusable session record, leaving published state unchanged"),
        }
    }

    /// Best-effort enrichment of the published user with server-sourced
    /// display fields. A no-op when signed out; failure never disturbs the
    /// published state. Callers may fire-and-forget; tests await it.
    ///
    /// No timeout or cancellation is attached: a slow fetch leaves the UI
    /// in its pre-hydration state indefinitely.
    pub async fn hydrate(&self, fetcher: &dyn ProfileFetcher) {
        if self.current().user.is_none() {
            debug!("hydrate skipped, no signed-in user");
            return;
        }

        let outcome = fetcher.fetch_current_profile().await;

        if !outcome.success {
            let e = AppError::HydrationFailure("profile fetch reported failure".to_string());
            warn!(error = %e, "keeping existing session fields");
            return;
        }
        if outcome.source != ProfileSource::Server {
            debug!("ignoring non-server profile data during hydration");
            return;
        }
        let Some(data) = outcome.data else {
            debug!("profile fetch succeeded with no data, nothing to merge");
            return;
        };

        // The user may have logged out or edited their profile while the
        // fetch was in flight; merge field-by-field onto the latest
        // published state, non-empty server values win.
        let Some(current) = self.current().user else {
            debug!("user signed out during hydration, dropping fetched profile");
            return;
        };

        let mut merged = current.clone();
        merge_non_empty(&mut merged.full_name, data.full_name);
        merge_non_empty(&mut merged.email, data.email);
        merge_non_empty(&mut merged.username, data.username);
        merge_non_empty(&mut merged.avatar, data.avatar);

        if merged == current {
            debug!("hydration produced no field changes");
            return;
        }

        self.persist_consolidated(&merged);
        self.tx.send_replace(SessionSnapshot {
            user: Some(merged),
            bootstrapped: true,
        });
        info!("session hydrated with server profile fields");
    }

    fn persist_consolidated(&self, user: &SessionUser) {
        match serde_json::to_string(&SessionRecord::from(user)) {
            Ok(serialized) => self.store.set(&self.keys.user_key, &serialized),
            Err(e) => warn!(error = %e, "failed to serialize session record, persisted state left as-is"),
        }
    }

    fn clear_persisted(&self) {
        self.store.remove(&self.keys.user_key);
        self.store.remove(&self.keys.token_key);
        self.store.remove(&self.keys.role_key);
        self.store.remove(&self.keys.user_id_key);
        self.store.remove(&self.keys.email_key);
    }
}

fn merge_non_empty(target: &mut Option<String>, incoming: Option<String>) {
    if let Some(value) = incoming.filter(|v| !v.trim().is_empty()) {
        *target = Some(value);
    }
}
