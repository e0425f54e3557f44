use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::pagination::PageRequest;
use crate::application::ports::user_repository::{
    AdminStats, NewUser, UserApplication, UserCredentials, UserRepository,
};
use crate::domain::users::user::User;
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> anyhow::Result<User> {
    let role: String = r.get("role");
    Ok(User {
        id: r.get("id"),
        full_name: r.get("full_name"),
        email: r.get("email"),
        role: role.parse()?,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn map_user_application(r: &PgRow) -> anyhow::Result<UserApplication> {
    let status: String = r.get("status");
    Ok(UserApplication {
        id: r.get("id"),
        user_id: r.get("user_id"),
        status: status.parse()?,
        created_at: r.get("created_at"),
        job_id: r.get("job_id"),
        job_title: r.get("job_title"),
        job_location: r.get("job_location"),
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"INSERT INTO users (full_name, email, password_hash, role) VALUES ($1, $2, $3, $4)
               ON CONFLICT (email) DO NOTHING
               RETURNING id, full_name, email, role, created_at, updated_at"#,
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let row = sqlx::query(
            r#"SELECT id, full_name, email, role, created_at, updated_at, password_hash
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(r) => Ok(Some(UserCredentials {
                user: map_user(&r)?,
                password_hash: r.get("password_hash"),
            })),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, full_name, email, role, created_at, updated_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_user).transpose()
    }

    async fn list_applicants_for_admin(
        &self,
        admin_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<User>, i64)> {
        let rows = sqlx::query(
            r#"SELECT u.id, u.full_name, u.email, u.role, u.created_at, u.updated_at
               FROM users u
               WHERE u.role = 'jobseeker'
                 AND EXISTS (
                     SELECT 1 FROM applications a
                     JOIN jobs j ON j.id = a.job_id
                     WHERE a.user_id = u.id AND j.created_by = $1
                 )
               ORDER BY u.created_at DESC, u.id DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(admin_id)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*)::BIGINT
               FROM users u
               WHERE u.role = 'jobseeker'
                 AND EXISTS (
                     SELECT 1 FROM applications a
                     JOIN jobs j ON j.id = a.job_id
                     WHERE a.user_id = u.id AND j.created_by = $1
                 )"#,
        )
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await?;
        let users = rows.iter().map(map_user).collect::<anyhow::Result<Vec<_>>>()?;
        Ok((users, total))
    }

    async fn applications_for_admin(
        &self,
        admin_id: Uuid,
        user_ids: &[Uuid],
    ) -> anyhow::Result<Vec<UserApplication>> {
        let rows = sqlx::query(
            r#"SELECT a.id, a.user_id, a.status, a.created_at,
                      j.id AS job_id, j.title AS job_title, j.location AS job_location
               FROM applications a
               JOIN jobs j ON j.id = a.job_id
               WHERE j.created_by = $1 AND a.user_id = ANY($2)
               ORDER BY a.created_at DESC, a.id DESC"#,
        )
        .bind(admin_id)
        .bind(user_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_user_application).collect()
    }

    async fn count_applications(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM applications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn stats_for_admin(&self, admin_id: Uuid) -> anyhow::Result<AdminStats> {
        let row = sqlx::query(
            r#"SELECT
                 (SELECT COUNT(*) FROM jobs WHERE created_by = $1)::BIGINT AS total_jobs,
                 (SELECT COUNT(*) FROM applications a
                    JOIN jobs j ON j.id = a.job_id
                   WHERE j.created_by = $1)::BIGINT AS total_applications,
                 (SELECT COUNT(DISTINCT a.user_id) FROM applications a
                    JOIN jobs j ON j.id = a.job_id
                    JOIN users u ON u.id = a.user_id
                   WHERE j.created_by = $1 AND u.role = 'jobseeker')::BIGINT AS total_applicants,
                 (SELECT COUNT(*) FROM jobs
                   WHERE created_by = $1 AND status = 'open')::BIGINT AS open_jobs"#,
        )
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(AdminStats {
            total_jobs: row.get("total_jobs"),
            total_applications: row.get("total_applications"),
            total_applicants: row.get("total_applicants"),
            open_jobs: row.get("open_jobs"),
        })
    }
}
