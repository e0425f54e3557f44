use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::{NewUser, UserRepository};
use crate::application::validation;
use crate::domain::users::user::{Role, User};

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

const EMAIL_TAKEN: &str = "User with this email already exists";

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> ServiceResult<User> {
        let full_name = validation::non_empty("fullName", &req.full_name)?;
        let email = validation::email(&req.email)?;
        validation::password(&req.password)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::conflict(EMAIL_TAKEN));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();

        let new_user = NewUser {
            full_name,
            email,
            password_hash: hash,
            role: req.role.unwrap_or_default(),
        };
        // A concurrent registration can still win the unique index
        let user = self
            .repo
            .create_user(&new_user)
            .await?
            .ok_or_else(|| ServiceError::conflict(EMAIL_TAKEN))?;
        tracing::info!(user_id = %user.id, role = %user.role, "user_registered");
        Ok(user)
    }
}
