//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthPrincipal`] and rejects requests whose
//! principal does not meet the requirement, so authorization is enforced
//! at the type level in route handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pitboss_core::error::CoreError;
use pitboss_core::roles::ROLE_ADMIN;

use super::auth::AuthPrincipal;
use crate::auth::jwt::KIND_STAFF;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a staff token (any role). Rejects with 403 otherwise.
///
/// ```ignore
/// async fn staff_only(RequireStaff(staff): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthPrincipal);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = AuthPrincipal::from_request_parts(parts, state).await?;
        if principal.kind != KIND_STAFF {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff access required".into(),
            )));
        }
        Ok(RequireStaff(principal))
    }
}

/// Requires a staff token with the `admin` role. Rejects with 403
/// otherwise.
pub struct RequireAdmin(pub AuthPrincipal);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireStaff(principal) = RequireStaff::from_request_parts(parts, state).await?;
        if principal.role.as_deref() != Some(ROLE_ADMIN) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            )));
        }
        Ok(RequireAdmin(principal))
    }
}
