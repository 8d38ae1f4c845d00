//! Role-based access guard for protected views.
//!
//! `authorize` is a pure function over a snapshot of the published session;
//! the host router calls it before rendering each protected screen and acts
//! on the returned decision. Denials are silent: the redirect itself is the
//! signal, no error surface is involved.

use crate::models::role::{KnownRole, strip_role_prefix};
use crate::models::session::SessionUser;

/// Where unauthenticated (or unrecognizable) principals are sent.
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Bootstrap still in progress; render a loading placeholder, decide on
    /// the next evaluation.
    Loading,
    /// No authenticated user. Redirect to [`LOGIN_PATH`], replacing history
    /// so back-navigation cannot loop into the guarded page.
    RedirectToLogin,
    /// Render the protected content.
    Grant,
    /// Authenticated but not allowed here; send to the landing page for the
    /// user's own role.
    Redirect(&'static str),
}

/// Decide whether to render a protected view.
///
/// An empty or absent `allowed_roles` list means the view declares no
/// restriction and any authenticated user is granted. Membership is tested
/// against the bare (prefix-stripped) role tag.
pub fn authorize(user: Option<&SessionUser>, bootstrap_in_progress: bool, allowed_roles: Option<&[&str]>) -> AccessDecision {
    if bootstrap_in_progress {
        return AccessDecision::Loading;
    }

    let Some(user) = user else {
        return AccessDecision::RedirectToLogin;
    };

    let bare_role = strip_role_prefix(&user.role);

    let roles = match allowed_roles {
        None => return AccessDecision::Grant,
        Some([]) => return AccessDecision::Grant,
        Some(roles) => roles,
    };

    if roles.contains(&bare_role) {
        return AccessDecision::Grant;
    }

    match KnownRole::resolve(bare_role) {
        Some(known) => AccessDecision::Redirect(known.landing_page()),
        None => AccessDecision::RedirectToLogin,
    }
}
