// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
}

// A login account as stored in the database
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: UserRole,
    pub staff_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "invalid_email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(email(message = "invalid_email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,
    pub role: UserRole,
    pub staff_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub session: Session,
}

// JWT claims. The role travels inside the signed token, never from client state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

// --- SESSION ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffSession {
    pub user_id: Uuid,
    pub email: String,
    pub staff_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Session {
    Admin(AdminSession),
    Staff(StaffSession),
}

impl Session {
    pub fn from_user(user: &User) -> Self {
        match user.role {
            UserRole::Admin => Session::Admin(AdminSession {
                user_id: user.id,
                email: user.email.clone(),
            }),
            UserRole::Staff => Session::Staff(StaffSession {
                user_id: user.id,
                email: user.email.clone(),
                staff_id: user.staff_id,
            }),
        }
    }

    pub fn user_id(&self) -> Uuid {
        match self {
            Session::Admin(s) => s.user_id,
            Session::Staff(s) => s.user_id,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Session::Admin(_) => UserRole::Admin,
            Session::Staff(_) => UserRole::Staff,
        }
    }
}
