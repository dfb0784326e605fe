// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, Session, User, UserRole},
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<(String, Session), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // bcrypt is CPU-bound; keep it off the async workers
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = issue_token(&self.jwt_secret, user.id, user.role, Utc::now())?;
        Ok((token, Session::from_user(&user)))
    }

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
        staff_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))??;

        let user = self
            .user_repo
            .create_user(email, &hashed_password, role, staff_id)
            .await?;

        tracing::info!(user_id = %user.id, role = ?user.role, "User account created");
        Ok(user)
    }

    /// Creates the first admin account when none exists yet.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.count_admins().await? > 0 {
            return Ok(());
        }
        self.create_user(email, password, UserRole::Admin, None).await?;
        tracing::info!("Bootstrap admin account created for {}", email);
        Ok(())
    }

    /// Verifies the token and rebuilds the session from the stored account,
    /// so a role change takes effect without waiting for the token to expire.
    pub async fn validate_token(&self, token: &str) -> Result<Session, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(Session::from_user(&user))
    }
}

pub fn issue_token(secret: &str, user_id: Uuid, role: UserRole, now: DateTime<Utc>) -> Result<String, AppError> {
    let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

    let claims = Claims {
        sub: user_id,
        role,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_keeps_subject_and_role() {
        let user_id = Uuid::new_v4();
        let token = issue_token("secret", user_id, UserRole::Staff, Utc::now()).unwrap();

        let claims = decode_token("secret", &token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Staff);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = issue_token("secret", Uuid::new_v4(), UserRole::Admin, Utc::now()).unwrap();
        assert!(matches!(decode_token("other", &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued = Utc::now() - chrono::Duration::days(TOKEN_TTL_DAYS + 1);
        let token = issue_token("secret", Uuid::new_v4(), UserRole::Admin, issued).unwrap();
        assert!(matches!(decode_token("secret", &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn session_variant_follows_the_stored_role() {
        let user = User {
            id: Uuid::new_v4(),
            email: "anita@salon.in".into(),
            password_hash: String::new(),
            role: UserRole::Staff,
            staff_id: Some(Uuid::new_v4()),
            created_at: Utc::now(),
        };

        let session = Session::from_user(&user);

        assert_eq!(session.role(), UserRole::Staff);
        assert_eq!(session.user_id(), user.id);
        assert!(matches!(session, Session::Staff(ref s) if s.staff_id == user.staff_id));
    }
}
