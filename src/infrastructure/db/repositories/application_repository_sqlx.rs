use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::pagination::PageRequest;
use crate::application::ports::application_repository::{
    ApplicationFilter, ApplicationRepository,
};
use crate::domain::applications::application::{
    Application, ApplicationChanges, NewApplication,
};
use crate::domain::jobs::job::JobSummary;
use crate::domain::users::user::UserSummary;
use crate::infrastructure::db::PgPool;

pub struct SqlxApplicationRepository {
    pub pool: PgPool,
}

impl SqlxApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const APPLICATION_SELECT: &str = r#"SELECT a.id, a.resume, a.cover_letter, a.status, a.job_id, a.user_id,
       a.created_at, a.updated_at,
       j.title AS job_title, j.location AS job_location, j.salary AS job_salary,
       j.status AS job_status, j.created_by AS job_created_by,
       u.full_name AS user_full_name, u.email AS user_email
FROM applications a
JOIN jobs j ON j.id = a.job_id
JOIN users u ON u.id = a.user_id"#;

// $1 admin (through jobs.created_by), $2 applicant, $3 job, $4 status
const APPLICATION_FILTER: &str = r#"WHERE ($1::uuid IS NULL OR j.created_by = $1)
  AND ($2::uuid IS NULL OR a.user_id = $2)
  AND ($3::uuid IS NULL OR a.job_id = $3)
  AND ($4::text IS NULL OR a.status = $4)"#;

fn map_application(r: &PgRow) -> anyhow::Result<Application> {
    let status: String = r.get("status");
    let job_status: String = r.get("job_status");
    let job_id: Uuid = r.get("job_id");
    let user_id: Uuid = r.get("user_id");
    Ok(Application {
        id: r.get("id"),
        resume: r.get("resume"),
        cover_letter: r.get("cover_letter"),
        status: status.parse()?,
        job_id,
        user_id,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        job: Some(JobSummary {
            id: job_id,
            title: r.get("job_title"),
            location: r.get("job_location"),
            salary: r.get("job_salary"),
            status: job_status.parse()?,
            created_by: r.get("job_created_by"),
        }),
        user: Some(UserSummary {
            id: user_id,
            full_name: r.get("user_full_name"),
            email: r.get("user_email"),
        }),
    })
}

#[async_trait]
impl ApplicationRepository for SqlxApplicationRepository {
    async fn create(&self, application: &NewApplication) -> anyhow::Result<Option<Application>> {
        let id: Option<Uuid> = sqlx::query_scalar(
            r#"INSERT INTO applications (resume, cover_letter, job_id, user_id)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (job_id, user_id) DO NOTHING
               RETURNING id"#,
        )
        .bind(&application.resume)
        .bind(&application.cover_letter)
        .bind(application.job_id)
        .bind(application.user_id)
        .fetch_optional(&self.pool)
        .await?;
        match id {
            Some(id) => self.get_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn exists_for(&self, job_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE job_id = $1 AND user_id = $2)",
        )
        .bind(job_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn list(
        &self,
        filter: &ApplicationFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Application>, i64)> {
        let status = filter.status.map(|s| s.as_str());
        let list_sql = format!(
            "{APPLICATION_SELECT}
             {APPLICATION_FILTER}
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $5 OFFSET $6"
        );
        let rows = sqlx::query(&list_sql)
            .bind(filter.admin_id)
            .bind(filter.user_id)
            .bind(filter.job_id)
            .bind(status)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!(
            "SELECT COUNT(*)::BIGINT
             FROM applications a JOIN jobs j ON j.id = a.job_id
             {APPLICATION_FILTER}"
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.admin_id)
            .bind(filter.user_id)
            .bind(filter.job_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        let items = rows
            .iter()
            .map(map_application)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok((items, total))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Application>> {
        let sql = format!("{APPLICATION_SELECT} WHERE a.id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_application).transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &ApplicationChanges,
    ) -> anyhow::Result<Option<Application>> {
        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"UPDATE applications SET
                    status = COALESCE($2, status),
                    resume = COALESCE($3, resume),
                    cover_letter = COALESCE($4, cover_letter),
                    updated_at = now()
                WHERE id = $1
                RETURNING id"#,
        )
        .bind(id)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(changes.resume.as_deref())
        .bind(changes.cover_letter.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        match updated {
            Some(id) => self.get_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Application>> {
        let Some(application) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok((res.rows_affected() > 0).then_some(application))
    }
}
