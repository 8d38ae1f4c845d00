//! Structural token checks and claims decoding.
//!
//! Tokens are treated as opaque bearer credentials with a three-segment
//! dot-delimited shape. The claims segment is decoded only to read the
//! expiry instant; no signature verification happens client-side.

use crate::error::app_error::AppError;
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Literal strings that older clients persisted in place of a real token.
const PLACEHOLDER_TOKENS: [&str; 2] = ["null", "undefined"];

/// Claims carried in the middle token segment. Only the fields this slice
/// reads; everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// True when the stored value is not a real token at all: empty, whitespace,
/// or a serialized null/undefined.
pub fn is_placeholder(token: &str) -> bool {
    let trimmed = token.trim();
    trimmed.is_empty() || PLACEHOLDER_TOKENS.contains(&trimmed)
}

/// Structural check only: exactly three dot-delimited segments.
pub fn has_token_shape(token: &str) -> bool {
    token.split('.').count() == 3
}

/// Decode the claims segment. Tolerates both base64url and standard base64
/// alphabets, padded or not, matching what existing backends emit.
pub fn decode_claims(token: &str) -> Result<TokenClaims, AppError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(AppError::MalformedToken),
    };

    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| general_purpose::URL_SAFE.decode(payload))
        .or_else(|_| general_purpose::STANDARD.decode(payload))
        .map_err(|e| AppError::claims_decode(format!("claims segment is not valid base64: {e}")))?;

    serde_json::from_slice(&bytes).map_err(|e| AppError::claims_decode(format!("claims segment is not valid JSON: {e}")))
}

/// Full structural and expiry validation against a supplied instant.
///
/// An absent `exp` claim never expires. Shape failures come back as
/// [`AppError::MalformedToken`], a past `exp` as [`AppError::ExpiredToken`],
/// and an undecodable claims segment as [`AppError::ClaimsDecode`] — all of
/// which bootstrap treats as signed out.
pub fn validate_at(token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AppError> {
    if !has_token_shape(token) {
        return Err(AppError::MalformedToken);
    }

    let claims = decode_claims(token)?;
    if claims.exp.is_some_and(|exp| exp < now.timestamp()) {
        return Err(AppError::ExpiredToken);
    }

    Ok(claims)
}

pub fn validate(token: &str) -> Result<TokenClaims, AppError> {
    validate_at(token, Utc::now())
}
