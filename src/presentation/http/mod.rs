pub mod applications;
pub mod auth;
pub mod error;
pub mod extract;
pub mod health;
pub mod jobs;
pub mod pagination;
pub mod users;

use axum::Router;
use axum::extract::DefaultBodyLimit;

use crate::bootstrap::app_context::AppContext;

/// All authenticated and public resource routes, without the health check.
pub fn router(ctx: AppContext) -> Router {
    let body_limit = ctx.cfg.body_limit_bytes;
    Router::new()
        .nest("/auth", auth::routes(ctx.clone()))
        .merge(jobs::routes(ctx.clone()))
        .merge(applications::routes(ctx.clone()))
        .merge(users::routes(ctx))
        // Resumes may be inline data URLs
        .layer(DefaultBodyLimit::max(body_limit))
}
