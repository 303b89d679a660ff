//! Session token encode/decode.
//!
//! The token is a URL-safe base64 envelope around the public user identity,
//! with no signature and no expiry. Anyone holding the bytes can mint one;
//! that is the observable contract of the mock API this server reproduces,
//! not a trust model to carry into production.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::store::AuthUser;

#[derive(Serialize, Deserialize)]
struct SessionEnvelope {
    user: AuthUser,
}

/// Encode the public identity into a session token.
pub fn create_session_token(user: &AuthUser) -> anyhow::Result<String> {
    let payload = serde_json::to_vec(&SessionEnvelope { user: user.clone() })?;
    Ok(URL_SAFE_NO_PAD.encode(payload))
}

/// Decode and structurally validate a token. Malformed input is `None`,
/// never an error.
pub fn resolve_session_user(token: &str) -> Option<AuthUser> {
    let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;
    let envelope: SessionEnvelope = serde_json::from_slice(&bytes).ok()?;
    Some(envelope.user)
}

/// Server-side revocation is not tracked; the session lives entirely in the
/// client-held cookie.
pub fn clear_session(_token: &str) {}
