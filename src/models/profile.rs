use serde::Deserialize;

/// Display attributes returned by the profile-fetch collaborator. All fields
/// are optional; empty strings are treated as absent at merge time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileData {
    #[serde(default, rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Where the collaborator got the profile data from. Only `Server` data is
/// merged into the session; a cache echo carries nothing newer than what is
/// already published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    Server,
    Cache,
}

/// Result of one profile fetch. The collaborator never fails hard; failure
/// is reported through `success: false`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileFetchOutcome {
    pub success: bool,
    pub data: Option<ProfileData>,
    pub source: ProfileSource,
}

impl ProfileFetchOutcome {
    pub fn server(data: ProfileData) -> Self {
        Self {
            success: true,
            data: Some(data),
            source: ProfileSource::Server,
        }
    }

    pub fn failure() -> Self {
        Self {
            success: false,
            data: None,
            source: ProfileSource::Cache,
        }
    }
}
