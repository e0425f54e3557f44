use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UnknownVariant;
use crate::domain::jobs::job::JobSummary;
use crate::domain::users::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Submitted,
    Reviewed,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Submitted
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ApplicationStatus::Submitted),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(UnknownVariant::new("application status", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Application {
    pub id: Uuid,
    pub resume: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub job: Option<JobSummary>,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub resume: String,
    pub cover_letter: String,
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationChanges {
    pub status: Option<ApplicationStatus>,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

impl ApplicationChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.resume.is_none() && self.cover_letter.is_none()
    }
}
