pub mod config;
mod error;
pub mod guard;
pub mod models;
pub mod service;
pub mod store;
pub mod token;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::app_error::AppError;
pub use guard::{AccessDecision, LOGIN_PATH, authorize};
pub use models::profile::{ProfileData, ProfileFetchOutcome, ProfileSource};
pub use models::role::{KnownRole, normalize_role, strip_role_prefix};
pub use models::session::{LoginPayload, SessionRecord, SessionUser};
pub use service::profile::ProfileFetcher;
pub use service::session::{BootstrapSource, SessionService, SessionSnapshot};
pub use store::{MemoryStore, SessionStore};

use tracing_subscriber::EnvFilter;

/// Configure logging for a host embedding this crate.
///
/// RUST_LOG environment variable can be used for fine-grained control per module:
/// Examples:
///   RUST_LOG=debug                           - Set all to debug
///   RUST_LOG=campus_session=debug            - Set this crate to debug
///   RUST_LOG=info,campus_session::service=trace - Global info, service at trace
pub fn init_tracing(log_level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    if json_format {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
