// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{Session, UserRole},
};

/// A set of roles allowed through a route.
pub trait RoleDef: Send + Sync + 'static {
    fn name() -> &'static str;
    fn allows(role: UserRole) -> bool;
}

/// Extractor that rejects the request with 403 unless the session's role
/// satisfies `T`.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AppError::InvalidToken)?;

        check::<T>(session)?;
        Ok(RequireRole(PhantomData))
    }
}

fn check<T: RoleDef>(session: &Session) -> Result<(), AppError> {
    if T::allows(session.role()) {
        return Ok(());
    }
    tracing::warn!(user_id = %session.user_id(), required = T::name(), "Role check failed");
    Err(AppError::Forbidden(format!("This action requires the '{}' role.", T::name())))
}

// ---
// ROLES
// ---

pub struct Admin;
impl RoleDef for Admin {
    fn name() -> &'static str { "admin" }
    fn allows(role: UserRole) -> bool { role == UserRole::Admin }
}

pub type AdminOnly = RequireRole<Admin>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{AdminSession, StaffSession};
    use uuid::Uuid;

    #[test]
    fn admin_passes_the_admin_gate() {
        let session = Session::Admin(AdminSession {
            user_id: Uuid::new_v4(),
            email: "owner@salon.in".into(),
        });
        assert!(check::<Admin>(&session).is_ok());
    }

    #[test]
    fn staff_is_forbidden_from_admin_routes() {
        let session = Session::Staff(StaffSession {
            user_id: Uuid::new_v4(),
            email: "anita@salon.in".into(),
            staff_id: None,
        });
        assert!(matches!(check::<Admin>(&session), Err(AppError::Forbidden(_))));
    }
}
