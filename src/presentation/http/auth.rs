use crate::application::access::Actor;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::user::{Role, User};
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::JsonBody;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// `admin` or `jobseeker` (default)
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            role: u.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = AuthResponse),
    (status = 400, body = ErrorBody),
    (status = 409, body = ErrorBody)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        full_name: req.full_name,
        email: req.email,
        password: req.password,
        role: req.role,
    };
    let user = uc.execute(&dto).await?;
    let access_token = issue_token(&ctx.cfg, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            access_token,
        }),
    ))
}

#[utoipa::path(post, path = "/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = AuthResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await?;
    let access_token = issue_token(&ctx.cfg, &user)?;
    Ok(Json(AuthResponse {
        user: user.into(),
        access_token,
    }))
}

#[utoipa::path(get, path = "/auth/profile", tag = "Auth", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn profile(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc.execute(actor.user_id).await?;
    Ok(Json(user.into()))
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .map(|t| Bearer(t.to_string()))
            .ok_or_else(ApiError::unauthorized)
    }
}

/// Token part of an `Authorization` value. The scheme name is case-insensitive.
fn bearer_token(auth: &str) -> Option<&str> {
    let (scheme, token) = auth.trim_start().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Caller resolved from a valid bearer token.
pub struct AuthUser(pub Actor);

#[axum::async_trait]
impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let bearer = Bearer::from_request_parts(parts, ctx).await?;
        let claims = validate_bearer(&ctx.cfg, bearer)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::unauthorized())?;
        Ok(AuthUser(Actor::new(user_id, claims.role)))
    }
}

pub fn issue_token(cfg: &Config, user: &User) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        iat: now,
        exp: now + (cfg.jwt_expires_secs as usize),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!(error = ?e, "jwt_encode_failed");
        ApiError::internal()
    })
}

pub fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<Claims, ApiError> {
    validate_token(cfg, &bearer.0)
}

pub fn validate_token(cfg: &Config, token: &str) -> Result<Claims, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::unauthorized())?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        let now = chrono::Utc::now();
        User {
            id: Uuid::new_v4(),
            full_name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_tokens_carry_identity_and_role() {
        let cfg = Config::default();
        let u = user(Role::Admin);
        let token = issue_token(&cfg, &u).unwrap();
        let claims = validate_token(&cfg, &token).unwrap();
        assert_eq!(claims.sub, u.id.to_string());
        assert_eq!(claims.email, u.email);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, cfg.jwt_expires_secs as usize);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let cfg = Config::default();
        let other = Config {
            jwt_secret: "some-other-secret-entirely".into(),
            ..Config::default()
        };
        let token = issue_token(&other, &user(Role::Jobseeker)).unwrap();
        let err = validate_token(&cfg, &token).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bearer_scheme_ignores_case() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("BEARER  abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearerabc"), None);
    }

    #[tokio::test]
    async fn extractor_accepts_lowercase_scheme() {
        let (mut parts, _) = axum::http::Request::builder()
            .header(axum::http::header::AUTHORIZATION, "bearer tok")
            .body(())
            .unwrap()
            .into_parts();
        let Bearer(token) = Bearer::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(token, "tok");
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(validate_token(&Config::default(), "not.a.jwt").is_err());
    }
}
