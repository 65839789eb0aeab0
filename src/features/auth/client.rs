//! Client wrappers for the auth endpoints. Login returns the session payload
//! for the caller to hand to the session store; logout is best-effort on the
//! server and always ends the local session.

use crate::{
    app_lib::{AppError, api::ApiClient},
    features::auth::types::{LoginRequest, LoginResponse, Session, UserProfile},
};

/// Exchanges phone and password for a bearer credential.
/// The password must never be logged.
///
/// # Errors
/// Returns `AppError::Validation` for bad credentials and transport errors otherwise.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<Session, AppError> {
    if request.phone.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "Phone and password are required.".to_string(),
        ));
    }

    let response: LoginResponse = api.post("/api/auth/login", request).await?;
    Ok(Session::from(response))
}

/// Fetches the profile behind the current credential.
///
/// # Errors
/// Returns `AppError::Unauthorized` (and ends the session) when the credential is stale.
pub async fn me(api: &ApiClient) -> Result<UserProfile, AppError> {
    api.get("/api/auth/me").await
}

/// Invalidates the credential on the server, then clears the local session
/// even if the server call failed.
pub async fn logout(api: &ApiClient) {
    if api.session().is_authenticated() {
        if let Err(err) = api.post::<(), _>("/api/auth/logout", &()).await {
            tracing::debug!(error = %err, "server-side logout failed");
        }
    }
    api.session().logout();
}
