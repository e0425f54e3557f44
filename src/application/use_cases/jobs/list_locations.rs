use crate::application::error::ServiceResult;
use crate::application::ports::job_repository::JobRepository;

pub struct ListLocations<'a, R: JobRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: JobRepository + ?Sized> ListLocations<'a, R> {
    pub async fn execute(&self) -> ServiceResult<Vec<String>> {
        Ok(self.repo.distinct_locations().await?)
    }
}
