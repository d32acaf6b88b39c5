use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;

use crate::models::User;
use crate::state::AppState;

/// Headers carrying the caller's email, in lookup order.
const EMAIL_HEADERS: [&str; 2] = ["x-user-email", "email"];

/// The authenticated caller, resolved from the email header.
///
/// Unknown emails are registered on first use.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let email = EMAIL_HEADERS
            .iter()
            .filter_map(|name| parts.headers.get(*name))
            .filter_map(|value| value.to_str().ok())
            .map(str::trim)
            .find(|value| !value.is_empty())
            .ok_or((StatusCode::UNAUTHORIZED, "Email required".to_string()))?;

        let user = state.store.get_or_create_user(email).map_err(|e| {
            tracing::error!("Authentication failed for {email}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication failed".to_string(),
            )
        })?;

        tracing::debug!("Authenticated {}", user.email);
        Ok(CurrentUser(user))
    }
}
