//! Postgres-backed harness using a shared testcontainers instance.
//!
//! The container starts and migrations run once per test binary. Each test
//! opens its own pool, because every `#[tokio::test]` has its own runtime.

use std::sync::Arc;

use anyhow::{Context, Result};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use jobboard::bootstrap::app_context::AppServices;
use jobboard::bootstrap::config::Config;
use jobboard::infrastructure::db::repositories::application_repository_sqlx::SqlxApplicationRepository;
use jobboard::infrastructure::db::repositories::job_repository_sqlx::SqlxJobRepository;
use jobboard::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use jobboard::infrastructure::db::{self, PgPool};

use super::harness::TestApp;

struct SharedDatabase {
    url: String,
    // Keeps the container running for the whole test binary
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_DB: OnceCell<SharedDatabase> = OnceCell::const_new();

impl SharedDatabase {
    async fn init() -> Result<Self> {
        // RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;
        let host = postgres.get_host().await?;
        let port = postgres.get_host_port_ipv4(5432).await?;
        let url = format!("postgresql://postgres:postgres@{host}:{port}/postgres");

        let pool = db::connect_pool(&url, 2)
            .await
            .context("Failed to connect to Postgres for migrations")?;
        db::migrate(&pool).await.context("Failed to run migrations")?;
        pool.close().await;

        Ok(Self {
            url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_DB
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test database")
            })
            .await
    }
}

impl TestApp {
    /// Router over the sqlx repositories on the shared database.
    pub async fn postgres() -> Self {
        let shared = SharedDatabase::get().await;
        let pool = db::connect_pool(&shared.url, 5)
            .await
            .expect("Failed to connect to test database");
        let users = Arc::new(SqlxUserRepository::new(pool.clone()));
        let services = AppServices::new(
            users.clone(),
            Arc::new(SqlxJobRepository::new(pool.clone())),
            Arc::new(SqlxApplicationRepository::new(pool.clone())),
        );
        Self::assemble(Config::default(), services, users).with_pool(pool)
    }

    pub async fn applications_for_job(&self, job_id: Uuid) -> i64 {
        count_applications(self.pool(), job_id)
            .await
            .expect("count applications")
    }
}

async fn count_applications(pool: &PgPool, job_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE job_id = $1")
        .bind(job_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
