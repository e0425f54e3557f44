use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UnknownVariant;
use crate::domain::users::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
        }
    }

    pub fn accepts_applications(&self) -> bool {
        matches!(self, JobStatus::Open)
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Open
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(JobStatus::Open),
            "closed" => Ok(JobStatus::Closed),
            other => Err(UnknownVariant::new("job status", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<f64>,
    pub status: JobStatus,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub creator: Option<UserSummary>,
    pub application_count: i64,
}

/// Minimal job projection attached to applications.
#[derive(Debug, Clone)]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub salary: Option<f64>,
    pub status: JobStatus,
    pub created_by: Uuid,
}

impl From<&Job> for JobSummary {
    fn from(j: &Job) -> Self {
        JobSummary {
            id: j.id,
            title: j.title.clone(),
            location: j.location.clone(),
            salary: j.salary,
            status: j.status,
            created_by: j.created_by,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<f64>,
    pub status: JobStatus,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    // None => not provided; Some(None) => clear; Some(Some(v)) => set
    pub salary: Option<Option<f64>>,
    pub status: Option<JobStatus>,
}

impl JobChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.salary.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_jobs_accept_applications() {
        assert!(JobStatus::Open.accepts_applications());
        assert!(!JobStatus::Closed.accepts_applications());
    }

    #[test]
    fn parses_known_statuses() {
        assert_eq!("open".parse::<JobStatus>().unwrap(), JobStatus::Open);
        assert_eq!("closed".parse::<JobStatus>().unwrap(), JobStatus::Closed);
        assert!("Open".parse::<JobStatus>().is_err());
    }

    #[test]
    fn empty_changes() {
        assert!(JobChanges::default().is_empty());
        let changes = JobChanges {
            salary: Some(None),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
