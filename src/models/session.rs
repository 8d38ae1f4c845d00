use crate::error::app_error::AppError;
use crate::models::role::normalize_role;
use serde::{Deserialize, Deserializer, Serialize};

/// Current version of the persisted consolidated record. Records written by
/// older clients carry no version field and deserialize as version 0; the
/// bootstrap migration rewrites them at this version.
pub const SESSION_SCHEMA_VERSION: u32 = 1;

/// Principal identifiers arrive from the backend as either a JSON string or
/// a number; both are carried internally as a string.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// The consolidated session record as persisted in the session store.
///
/// Field names match the storage format written by existing clients
/// (camelCase for `fullName`, bare names for the rest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default, rename = "schemaVersion")]
    pub schema_version: u32,
    pub token: String,
    pub role: String,
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl SessionRecord {
    /// A record is complete when all three required fields are non-empty.
    /// Display attributes never count toward completeness.
    pub fn is_complete(&self) -> bool {
        !self.token.trim().is_empty() && !self.role.trim().is_empty() && !self.id.trim().is_empty()
    }

    /// Convert into the published in-memory form, normalizing the role.
    pub fn into_user(self) -> Result<SessionUser, AppError> {
        if !self.is_complete() {
            return Err(AppError::IncompleteSession);
        }

        let role = normalize_role(&self.role).ok_or(AppError::IncompleteSession)?;

        Ok(SessionUser {
            token: self.token,
            role,
            id: self.id,
            email: self.email,
            username: self.username,
            full_name: self.full_name,
            avatar: self.avatar,
        })
    }
}

impl From<&SessionUser> for SessionRecord {
    fn from(user: &SessionUser) -> Self {
        Self {
            schema_version: SESSION_SCHEMA_VERSION,
            token: user.token.clone(),
            role: user.role.clone(),
            id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// The authenticated principal as published to the rest of the application.
/// `role` is always in canonical prefixed form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUser {
    pub token: String,
    pub role: String,
    pub id: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar: Option<String>,
}

/// Raw session payload produced by the authentication exchange and consumed
/// by `SessionService::login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub role: String,
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}
