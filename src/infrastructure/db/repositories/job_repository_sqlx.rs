use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::pagination::PageRequest;
use crate::application::ports::job_repository::{JobFilter, JobRepository};
use crate::domain::jobs::job::{Job, JobChanges, NewJob};
use crate::domain::users::user::UserSummary;
use crate::infrastructure::db::{PgPool, contains_pattern};

pub struct SqlxJobRepository {
    pub pool: PgPool,
}

impl SqlxJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const JOB_COLUMNS: &str = r#"j.id, j.title, j.description, j.location, j.salary, j.status,
       j.created_by, j.created_at, j.updated_at,
       u.full_name AS creator_name, u.email AS creator_email,
       (SELECT COUNT(*) FROM applications a WHERE a.job_id = j.id)::BIGINT AS application_count"#;

// $1 owner, $2 search pattern, $3 location pattern, $4 status
const JOB_FILTER: &str = r#"WHERE ($1::uuid IS NULL OR j.created_by = $1)
  AND ($2::text IS NULL OR j.title ILIKE $2 OR j.description ILIKE $2)
  AND ($3::text IS NULL OR j.location ILIKE $3)
  AND ($4::text IS NULL OR j.status = $4)"#;

fn map_job(r: &PgRow) -> anyhow::Result<Job> {
    let status: String = r.get("status");
    let created_by: Uuid = r.get("created_by");
    Ok(Job {
        id: r.get("id"),
        title: r.get("title"),
        description: r.get("description"),
        location: r.get("location"),
        salary: r.get("salary"),
        status: status.parse()?,
        created_by,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        creator: Some(UserSummary {
            id: created_by,
            full_name: r.get("creator_name"),
            email: r.get("creator_email"),
        }),
        application_count: r.get("application_count"),
    })
}

#[async_trait]
impl JobRepository for SqlxJobRepository {
    async fn create(&self, created_by: Uuid, job: &NewJob) -> anyhow::Result<Job> {
        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO jobs (title, description, location, salary, status, created_by)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id"#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(job.salary)
        .bind(job.status.as_str())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("job {id} vanished after insert"))
    }

    async fn list(
        &self,
        filter: &JobFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Job>, i64)> {
        let search = filter.search.as_deref().map(contains_pattern);
        let location = filter.location.as_deref().map(contains_pattern);
        let status = filter.status.map(|s| s.as_str());

        let list_sql = format!(
            "SELECT {JOB_COLUMNS}
             FROM jobs j JOIN users u ON u.id = j.created_by
             {JOB_FILTER}
             ORDER BY j.created_at DESC, j.id DESC
             LIMIT $5 OFFSET $6"
        );
        let rows = sqlx::query(&list_sql)
            .bind(filter.owner_id)
            .bind(search.as_deref())
            .bind(location.as_deref())
            .bind(status)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*)::BIGINT FROM jobs j {JOB_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.owner_id)
            .bind(search.as_deref())
            .bind(location.as_deref())
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        let items = rows.iter().map(map_job).collect::<anyhow::Result<Vec<_>>>()?;
        Ok((items, total))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        let sql = format!(
            "SELECT {JOB_COLUMNS}
             FROM jobs j JOIN users u ON u.id = j.created_by
             WHERE j.id = $1"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_job).transpose()
    }

    async fn update(&self, id: Uuid, changes: &JobChanges) -> anyhow::Result<Option<Job>> {
        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"UPDATE jobs SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    location = COALESCE($4, location),
                    salary = CASE WHEN $5 THEN $6 ELSE salary END,
                    status = COALESCE($7, status),
                    updated_at = now()
                WHERE id = $1
                RETURNING id"#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.location.as_deref())
        .bind(changes.salary.is_some())
        .bind(changes.salary.flatten())
        .bind(changes.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;
        match updated {
            Some(id) => self.get_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        let Some(job) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok((res.rows_affected() > 0).then_some(job))
    }

    async fn distinct_locations(&self) -> anyhow::Result<Vec<String>> {
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT location FROM jobs ORDER BY location ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }
}
