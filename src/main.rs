use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use jobboard::bootstrap::app_context::{AppContext, AppServices};
use jobboard::bootstrap::config::Config;
use jobboard::infrastructure::db::repositories::application_repository_sqlx::SqlxApplicationRepository;
use jobboard::infrastructure::db::repositories::job_repository_sqlx::SqlxJobRepository;
use jobboard::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            jobboard::presentation::http::auth::register,
            jobboard::presentation::http::auth::login,
            jobboard::presentation::http::auth::profile,
            jobboard::presentation::http::jobs::list_jobs,
            jobboard::presentation::http::jobs::list_open_jobs,
            jobboard::presentation::http::jobs::list_my_jobs,
            jobboard::presentation::http::jobs::list_locations,
            jobboard::presentation::http::jobs::create_job,
            jobboard::presentation::http::jobs::get_job,
            jobboard::presentation::http::jobs::update_job,
            jobboard::presentation::http::jobs::delete_job,
            jobboard::presentation::http::applications::apply,
            jobboard::presentation::http::applications::list_received,
            jobboard::presentation::http::applications::list_mine,
            jobboard::presentation::http::applications::has_applied,
            jobboard::presentation::http::applications::list_for_job,
            jobboard::presentation::http::applications::get_application,
            jobboard::presentation::http::applications::update_application,
            jobboard::presentation::http::applications::delete_application,
            jobboard::presentation::http::users::list_applicants,
            jobboard::presentation::http::users::stats,
            jobboard::presentation::http::users::get_user,
            jobboard::presentation::http::health::health,
        ),
        components(schemas(
            jobboard::presentation::http::error::ErrorBody,
            jobboard::presentation::http::pagination::PageMetaResponse,
            jobboard::presentation::http::auth::RegisterRequest,
            jobboard::presentation::http::auth::LoginRequest,
            jobboard::presentation::http::auth::AuthResponse,
            jobboard::presentation::http::auth::UserResponse,
            jobboard::presentation::http::jobs::CreatorSummary,
            jobboard::presentation::http::jobs::JobResponse,
            jobboard::presentation::http::jobs::JobListResponse,
            jobboard::presentation::http::jobs::CreateJobRequest,
            jobboard::presentation::http::jobs::UpdateJobRequest,
            jobboard::presentation::http::applications::ApplicationJobSummary,
            jobboard::presentation::http::applications::ApplicantSummary,
            jobboard::presentation::http::applications::ApplicationResponse,
            jobboard::presentation::http::applications::ApplicationListResponse,
            jobboard::presentation::http::applications::CreateApplicationRequest,
            jobboard::presentation::http::applications::UpdateApplicationRequest,
            jobboard::presentation::http::applications::HasAppliedResponse,
            jobboard::presentation::http::users::UserJobRef,
            jobboard::presentation::http::users::UserApplicationItem,
            jobboard::presentation::http::users::ApplicantResponse,
            jobboard::presentation::http::users::ApplicantListResponse,
            jobboard::presentation::http::users::UserDetailResponse,
            jobboard::presentation::http::users::StatsResponse,
            jobboard::presentation::http::health::HealthResponse,
        )),
        tags(
            (name = "Auth", description = "Registration, login and profile"),
            (name = "Jobs", description = "Job postings"),
            (name = "Applications", description = "Applications to job postings"),
            (name = "Users", description = "Applicants and dashboard stats for admins"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let origin = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        // FRONTEND_URL is mandatory in production, so this only denies
        Some(Err(_)) | None if cfg.is_production => {
            AllowOrigin::exact(HeaderValue::from_static("http://invalid"))
        }
        Some(Err(_)) | None => AllowOrigin::mirror_request(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "jobboard=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        production = cfg.is_production,
        "Starting job board backend"
    );

    // Database
    let pool =
        jobboard::infrastructure::db::connect_pool(&cfg.database_url, cfg.db_max_connections)
            .await?;
    jobboard::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxUserRepository::new(pool.clone())),
        Arc::new(SqlxJobRepository::new(pool.clone())),
        Arc::new(SqlxApplicationRepository::new(pool.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .merge(jobboard::presentation::http::health::routes(pool.clone()))
        .merge(jobboard::presentation::http::router(ctx))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
}
