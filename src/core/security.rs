use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::Settings;

/// Settings validation only admits HS256.
const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error)]
pub(crate) enum SecurityError {
    #[error("session token expired")]
    Expired,
    #[error("session token invalid: {0}")]
    Invalid(String),
}

/// Session claims issued by the identity provider: `sub` is the account id.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) exp: i64,
}

fn secret(settings: &Settings) -> &[u8] {
    settings.security().secret_key.as_bytes()
}

pub(crate) fn verify_token(token: &str, settings: &Settings) -> Result<Claims, SecurityError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.set_required_spec_claims(&["exp", "sub"]);

    match decode::<Claims>(token, &DecodingKey::from_secret(secret(settings)), &validation) {
        Ok(data) => Ok(data.claims),
        Err(err) if matches!(err.kind(), ErrorKind::ExpiredSignature) => {
            Err(SecurityError::Expired)
        }
        Err(err) => Err(SecurityError::Invalid(err.to_string())),
    }
}

#[cfg(test)]
pub(crate) fn create_access_token(
    subject: &str,
    settings: &Settings,
    expires_in: time::Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: subject.to_string(),
        exp: (time::OffsetDateTime::now_utc() + expires_in).unix_timestamp(),
    };
    encode(&Header::new(ALGORITHM), &claims, &EncodingKey::from_secret(secret(settings)))
}
