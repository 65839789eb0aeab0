//! Bearer credential inspection. The dashboard never verifies signatures; it
//! only reads the `exp` claim so a reload with an obviously expired token
//! does not optimistically restore a dead session. Opaque (non-JWT) tokens
//! carry no expiry and are trusted until the API answers 401.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    exp: Option<u64>,
}

/// Returns the `exp` claim (seconds since the epoch) of a JWT-shaped token.
#[must_use]
pub fn expires_at(token: &str) -> Option<u64> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = Base64UrlUnpadded::decode_vec(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice::<Claims>(&bytes).ok()?.exp
}

/// True when the token carries an `exp` claim at or before `now`.
#[must_use]
pub fn is_expired(token: &str, now: u64) -> bool {
    expires_at(token).is_some_and(|exp| exp <= now)
}

/// A credential worth restoring: non-blank and not past its expiry.
#[must_use]
pub fn looks_valid(token: &str, now: u64) -> bool {
    !token.trim().is_empty() && !is_expired(token, now)
}

/// Current wall clock in seconds since the epoch.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn unix_now() -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let seconds = (js_sys::Date::now() / 1000.0) as u64;
    seconds
}

/// Current wall clock in seconds since the epoch.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

#[cfg(test)]
pub(crate) fn jwt_with_exp(exp: u64) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload =
        Base64UrlUnpadded::encode_string(format!(r#"{{"sub":"7","exp":{exp}}}"#).as_bytes());
    format!("{header}.{payload}.signature")
}

#[cfg(test)]
mod tests {
    use super::{expires_at, is_expired, jwt_with_exp, looks_valid};

    #[test]
    fn reads_exp_from_jwt_payload() {
        let token = jwt_with_exp(1_900_000_000);
        assert_eq!(expires_at(&token), Some(1_900_000_000));
    }

    #[test]
    fn opaque_tokens_have_no_expiry() {
        assert_eq!(expires_at("c2VjcmV0LXNlc3Npb24"), None);
        assert_eq!(expires_at("a.b"), None);
        assert_eq!(expires_at("a.b.c.d"), None);
        assert!(!is_expired("opaque-token", u64::MAX));
    }

    #[test]
    fn expiry_is_inclusive() {
        let token = jwt_with_exp(100);
        assert!(!is_expired(&token, 99));
        assert!(is_expired(&token, 100));
        assert!(is_expired(&token, 101));
    }

    #[test]
    fn blank_or_expired_tokens_are_not_restorable() {
        assert!(!looks_valid("   ", 0));
        assert!(!looks_valid(&jwt_with_exp(10), 20));
        assert!(looks_valid(&jwt_with_exp(30), 20));
        assert!(looks_valid("opaque", 20));
    }
}
