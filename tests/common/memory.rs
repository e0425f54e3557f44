//! In-memory implementations of the repository ports.
//!
//! One store backs all three ports so job ownership, cascades and the
//! (job, user) uniqueness rule behave like the Postgres schema.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use jobboard::application::dto::pagination::PageRequest;
use jobboard::application::ports::application_repository::{
    ApplicationFilter, ApplicationRepository,
};
use jobboard::application::ports::job_repository::{JobFilter, JobRepository};
use jobboard::application::ports::user_repository::{
    AdminStats, NewUser, UserApplication, UserCredentials, UserRepository,
};
use jobboard::domain::applications::application::{
    Application, ApplicationChanges, NewApplication,
};
use jobboard::domain::jobs::job::{Job, JobChanges, JobSummary, NewJob};
use jobboard::domain::users::user::{Role, User, UserSummary};

#[derive(Default)]
struct State {
    clock: i64,
    users: Vec<(User, String)>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
}

impl State {
    // Strictly increasing timestamps keep "newest first" deterministic
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        DateTime::<Utc>::from_timestamp(1_700_000_000 + self.clock, 0).unwrap()
    }

    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().map(|(u, _)| u).find(|u| u.id == id)
    }

    fn job(&self, id: Uuid) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    fn job_view(&self, job: &Job) -> Job {
        let mut view = job.clone();
        view.creator = self.user(job.created_by).map(UserSummary::from);
        view.application_count = self
            .applications
            .iter()
            .filter(|a| a.job_id == job.id)
            .count() as i64;
        view
    }

    fn application_view(&self, app: &Application) -> Application {
        let mut view = app.clone();
        view.job = self.job(app.job_id).map(JobSummary::from);
        view.user = self.user(app.user_id).map(UserSummary::from);
        view
    }

    fn job_owned_by(&self, job_id: Uuid, admin_id: Uuid) -> bool {
        self.job(job_id)
            .map(|j| j.created_by == admin_id)
            .unwrap_or(false)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T>(mut items: Vec<T>, page: PageRequest) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let start = (page.offset() as usize).min(items.len());
    let end = start.saturating_add(page.limit as usize).min(items.len());
    let window = items.drain(start..end).collect();
    (window, total)
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    stale_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn application_count(&self) -> usize {
        self.state.lock().unwrap().applications.len()
    }

    /// Makes `find_by_email` and `exists_for` miss existing rows, as if a
    /// concurrent request inserted them after the lookup. Only the insert's
    /// uniqueness check still sees them.
    pub fn serve_stale_reads(&self) {
        self.stale_reads.store(true, Ordering::SeqCst);
    }

    fn stale(&self) -> bool {
        self.stale_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<Option<User>> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Ok(None);
        }
        let now = state.tick();
        let created = User {
            id: Uuid::new_v4(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        state
            .users
            .push((created.clone(), user.password_hash.clone()));
        Ok(Some(created))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        if self.stale() {
            return Ok(None);
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, hash)| UserCredentials {
                user: u.clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.state.lock().unwrap().user(id).cloned())
    }

    async fn list_applicants_for_admin(
        &self,
        admin_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<User>, i64)> {
        let state = self.state.lock().unwrap();
        let applicant_ids: HashSet<Uuid> = state
            .applications
            .iter()
            .filter(|a| state.job_owned_by(a.job_id, admin_id))
            .map(|a| a.user_id)
            .collect();
        let mut users: Vec<User> = state
            .users
            .iter()
            .map(|(u, _)| u)
            .filter(|u| u.role == Role::Jobseeker && applicant_ids.contains(&u.id))
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(users, page))
    }

    async fn applications_for_admin(
        &self,
        admin_id: Uuid,
        user_ids: &[Uuid],
    ) -> anyhow::Result<Vec<UserApplication>> {
        let state = self.state.lock().unwrap();
        let mut apps: Vec<UserApplication> = state
            .applications
            .iter()
            .filter(|a| user_ids.contains(&a.user_id))
            .filter_map(|a| {
                let job = state.job(a.job_id)?;
                (job.created_by == admin_id).then(|| UserApplication {
                    id: a.id,
                    user_id: a.user_id,
                    status: a.status,
                    created_at: a.created_at,
                    job_id: job.id,
                    job_title: job.title.clone(),
                    job_location: job.location.clone(),
                })
            })
            .collect();
        apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(apps)
    }

    async fn count_applications(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .count() as i64)
    }

    async fn stats_for_admin(&self, admin_id: Uuid) -> anyhow::Result<AdminStats> {
        let state = self.state.lock().unwrap();
        let own_jobs: Vec<&Job> = state
            .jobs
            .iter()
            .filter(|j| j.created_by == admin_id)
            .collect();
        let own_apps: Vec<&Application> = state
            .applications
            .iter()
            .filter(|a| state.job_owned_by(a.job_id, admin_id))
            .collect();
        let applicants: HashSet<Uuid> = own_apps.iter().map(|a| a.user_id).collect();
        Ok(AdminStats {
            total_jobs: own_jobs.len() as i64,
            total_applications: own_apps.len() as i64,
            total_applicants: applicants.len() as i64,
            open_jobs: own_jobs
                .iter()
                .filter(|j| j.status.accepts_applications())
                .count() as i64,
        })
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn create(&self, created_by: Uuid, job: &NewJob) -> anyhow::Result<Job> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let row = Job {
            id: Uuid::new_v4(),
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            salary: job.salary,
            status: job.status,
            created_by,
            created_at: now,
            updated_at: now,
            creator: None,
            application_count: 0,
        };
        state.jobs.push(row.clone());
        Ok(state.job_view(&row))
    }

    async fn list(
        &self,
        filter: &JobFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Job>, i64)> {
        let state = self.state.lock().unwrap();
        let mut jobs: Vec<Job> = state
            .jobs
            .iter()
            .filter(|j| filter.owner_id.is_none_or(|o| j.created_by == o))
            .filter(|j| filter.status.is_none_or(|s| j.status == s))
            .filter(|j| {
                filter.search.as_deref().is_none_or(|q| {
                    contains_ci(&j.title, q) || contains_ci(&j.description, q)
                })
            })
            .filter(|j| {
                filter
                    .location
                    .as_deref()
                    .is_none_or(|l| contains_ci(&j.location, l))
            })
            .map(|j| state.job_view(j))
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(jobs, page))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        let state = self.state.lock().unwrap();
        Ok(state.job(id).map(|j| state.job_view(j)))
    }

    async fn update(&self, id: Uuid, changes: &JobChanges) -> anyhow::Result<Option<Job>> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let Some(job) = state.jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            job.title = title.clone();
        }
        if let Some(description) = &changes.description {
            job.description = description.clone();
        }
        if let Some(location) = &changes.location {
            job.location = location.clone();
        }
        if let Some(salary) = changes.salary {
            job.salary = salary;
        }
        if let Some(status) = changes.status {
            job.status = status;
        }
        job.updated_at = now;
        let job = job.clone();
        Ok(Some(state.job_view(&job)))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        let mut state = self.state.lock().unwrap();
        let Some(job) = state.job(id).map(|j| state.job_view(j)) else {
            return Ok(None);
        };
        state.jobs.retain(|j| j.id != id);
        state.applications.retain(|a| a.job_id != id);
        Ok(Some(job))
    }

    async fn distinct_locations(&self) -> anyhow::Result<Vec<String>> {
        let state = self.state.lock().unwrap();
        let mut locations: Vec<String> = state.jobs.iter().map(|j| j.location.clone()).collect();
        locations.sort();
        locations.dedup();
        Ok(locations)
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn create(&self, application: &NewApplication) -> anyhow::Result<Option<Application>> {
        let mut state = self.state.lock().unwrap();
        let duplicate = state
            .applications
            .iter()
            .any(|a| a.job_id == application.job_id && a.user_id == application.user_id);
        if duplicate {
            return Ok(None);
        }
        let now = state.tick();
        let row = Application {
            id: Uuid::new_v4(),
            resume: application.resume.clone(),
            cover_letter: application.cover_letter.clone(),
            status: Default::default(),
            job_id: application.job_id,
            user_id: application.user_id,
            created_at: now,
            updated_at: now,
            job: None,
            user: None,
        };
        state.applications.push(row.clone());
        Ok(Some(state.application_view(&row)))
    }

    async fn exists_for(&self, job_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        if self.stale() {
            return Ok(false);
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .applications
            .iter()
            .any(|a| a.job_id == job_id && a.user_id == user_id))
    }

    async fn list(
        &self,
        filter: &ApplicationFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Application>, i64)> {
        let state = self.state.lock().unwrap();
        let mut apps: Vec<Application> = state
            .applications
            .iter()
            .filter(|a| {
                filter
                    .admin_id
                    .is_none_or(|admin| state.job_owned_by(a.job_id, admin))
            })
            .filter(|a| filter.user_id.is_none_or(|u| a.user_id == u))
            .filter(|a| filter.job_id.is_none_or(|j| a.job_id == j))
            .filter(|a| filter.status.is_none_or(|s| a.status == s))
            .map(|a| state.application_view(a))
            .collect();
        apps.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(apps, page))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Application>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .applications
            .iter()
            .find(|a| a.id == id)
            .map(|a| state.application_view(a)))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &ApplicationChanges,
    ) -> anyhow::Result<Option<Application>> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let Some(app) = state.applications.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(status) = changes.status {
            app.status = status;
        }
        if let Some(resume) = &changes.resume {
            app.resume = resume.clone();
        }
        if let Some(cover_letter) = &changes.cover_letter {
            app.cover_letter = cover_letter.clone();
        }
        app.updated_at = now;
        let app = app.clone();
        Ok(Some(state.application_view(&app)))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Application>> {
        let mut state = self.state.lock().unwrap();
        let Some(app) = state
            .applications
            .iter()
            .find(|a| a.id == id)
            .map(|a| state.application_view(a))
        else {
            return Ok(None);
        };
        state.applications.retain(|a| a.id != id);
        Ok(Some(app))
    }
}
