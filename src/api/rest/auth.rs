//! Authentication routes
//!
//! Login, signup, logout, and the session check. The session is a cookie
//! holding the base64 identity envelope; all validation lives here, above
//! the user store.

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration as CookieDuration;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::auth::{self, session};
use crate::store::AuthUser;

use super::error::ApiError;

pub const SESSION_COOKIE: &str = "session_id";

const SESSION_MAX_AGE_DAYS: i64 = 7;

// ============================================================================
// ROUTES
// ============================================================================

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/check", get(check))
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
}

// ============================================================================
// TYPES
// ============================================================================

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct SignupRequest {
    email: String,
    password: String,
    password_repeat: String,
}

#[derive(Serialize)]
struct AuthResponse {
    is_auth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<AuthUser>,
}

impl AuthResponse {
    fn authorized(user: AuthUser) -> Self {
        AuthResponse { is_auth: true, user: Some(user) }
    }

    fn anonymous() -> Self {
        AuthResponse { is_auth: false, user: None }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn check(jar: CookieJar) -> Json<AuthResponse> {
    match session_user(&jar) {
        Some(user) => Json(AuthResponse::authorized(user)),
        None => Json(AuthResponse::anonymous()),
    }
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    if session_user(&jar).is_some() {
        return Err(ApiError::BadRequest("User already authorized".into()));
    }

    let Json(req) = body.map_err(|_| ApiError::BadRequest("Wrong JSON format".into()))?;

    if !auth::is_valid_email(&req.email) {
        return Err(ApiError::BadRequest("Wrong JSON format".into()));
    }
    if !auth::password_length_ok(&req.password) {
        return Err(ApiError::BadRequest(
            "Password must have length between 8 and 32 symbols".into(),
        ));
    }

    let user = state
        .users
        .authenticate(&req.email, &req.password)
        .ok_or_else(|| ApiError::BadRequest("Wrong credentials".into()))?;

    tracing::info!(user_id = user.id, "login successful");

    let token = session::create_session_token(&user)?;
    Ok((jar.add(session_cookie(token)), Json(AuthResponse::authorized(user))))
}

async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let Json(req) = body.map_err(|_| ApiError::BadRequest("Wrong JSON format".into()))?;

    if !auth::is_valid_email(&req.email) {
        return Err(ApiError::BadRequest("Wrong JSON format".into()));
    }
    if !auth::password_length_ok(&req.password) {
        return Err(ApiError::BadRequest(
            "Password must have length between 8 and 32 symbols".into(),
        ));
    }
    if req.password != req.password_repeat {
        return Err(ApiError::BadRequest("Passwords do not match".into()));
    }
    if state.users.resolve_by_email(&req.email).is_some() {
        return Err(ApiError::BadRequest("User with this email already exists".into()));
    }

    let user = state.users.create_user(&req.email, &req.password);
    tracing::info!(user_id = user.id, "user created");

    let token = session::create_session_token(&user)?;
    Ok((jar.add(session_cookie(token)), Json(AuthResponse::authorized(user))))
}

async fn logout(jar: CookieJar) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Err(ApiError::Unauthorized("User not authorized".into()));
    };
    if session::resolve_session_user(cookie.value()).is_none() {
        return Err(ApiError::Unauthorized("User not authorized".into()));
    }

    session::clear_session(cookie.value());
    Ok((clear_session_cookie(jar), Json(serde_json::Value::Null)))
}

// ============================================================================
// SESSION COOKIE HELPERS
// ============================================================================

pub fn session_user(jar: &CookieJar) -> Option<AuthUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    session::resolve_session_user(cookie.value())
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

/// Clear by overwriting with an empty value and max-age 0.
fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(CookieDuration::ZERO)
        .build();
    jar.add(cookie)
}
