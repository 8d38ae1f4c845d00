use crate::models::profile::ProfileFetchOutcome;
use async_trait::async_trait;

/// Collaborator that fetches authoritative display fields for the current
/// principal. Implemented by the host over its HTTP client.
///
/// Implementations never fail hard: network or server trouble is reported
/// through `ProfileFetchOutcome { success: false, .. }`.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch_current_profile(&self) -> ProfileFetchOutcome;
}
