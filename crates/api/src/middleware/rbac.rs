//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role
//! does not meet the requirement. The `admin` role passes every check.
//! Domain code in `launchos_core` stays role-agnostic; these extractors
//! are the sole enforcement point.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use launchos_core::error::CoreError;
use launchos_core::roles::{can_access, ROLE_ADMIN, ROLE_AUDITOR, ROLE_CADASTRO, ROLE_CATALOGO};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `cadastro` or `admin` role (onboarding operators).
pub struct RequireCadastro(pub AuthUser);

impl FromRequestParts<AppState> for RequireCadastro {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_access(&user.role, &[ROLE_CADASTRO]) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cadastro role required".into(),
            )));
        }
        Ok(RequireCadastro(user))
    }
}

/// Requires `catalogo` or `admin` role (catalog and listing editors).
pub struct RequireCatalogo(pub AuthUser);

impl FromRequestParts<AppState> for RequireCatalogo {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_access(&user.role, &[ROLE_CATALOGO]) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Catalogo role required".into(),
            )));
        }
        Ok(RequireCatalogo(user))
    }
}

/// Requires `auditor` or `admin` role (gate decisions).
pub struct RequireAuditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_access(&user.role, &[ROLE_AUDITOR]) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Auditor role required".into(),
            )));
        }
        Ok(RequireAuditor(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for
/// routes where the intent "this route requires authentication" should
/// be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
