use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn invalid_credentials() -> ServiceError {
    ServiceError::Unauthorized("Invalid credentials".into())
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    pub async fn execute(&self, req: &LoginRequest) -> ServiceResult<User> {
        let email = req.email.trim().to_lowercase();
        let creds = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;
        let parsed = PasswordHash::new(&creds.password_hash)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(creds.user)
        } else {
            tracing::debug!(user_id = %creds.user.id, "login_password_mismatch");
            Err(invalid_credentials())
        }
    }
}
