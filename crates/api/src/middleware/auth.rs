//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pitboss_core::error::CoreError;
use pitboss_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated principal extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(principal: AuthPrincipal) -> AppResult<Json<()>> {
///     tracing::info!(id = principal.id, kind = %principal.kind, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    /// The principal's internal database id (from `claims.sub`).
    pub id: DbId,
    /// `"player"` or `"staff"`.
    pub kind: String,
    /// Display name, used when stamping activity records.
    pub name: String,
    /// Staff role name; `None` for players.
    pub role: Option<String>,
    /// Membership card number; `None` for staff.
    pub card_number: Option<String>,
}

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthPrincipal {
            id: claims.sub,
            kind: claims.kind,
            name: claims.name,
            role: claims.role,
            card_number: claims.card_number,
        })
    }
}

/// Like [`AuthPrincipal`] but absence of credentials is not an error.
///
/// Used on public routes (waitlist join, tournament registration, food
/// orders) where a logged-in player enriches the record but walk-ins are
/// welcome. Invalid tokens are ignored rather than rejected.
#[derive(Debug, Clone)]
pub struct OptionalPrincipal(pub Option<AuthPrincipal>);

impl FromRequestParts<AppState> for OptionalPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalPrincipal(
            AuthPrincipal::from_request_parts(parts, state).await.ok(),
        ))
    }
}
