use std::future::Future;

use joblane_models::job::{Job, JobFilter, JobId, JobPage, JobPageRequest, JobPatchRef};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait JobRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Creates a new job posting.
    fn create(
        &self,
        txn: &mut Txn,
        job: &Job,
    ) -> impl Future<Output = Result<(), JobRepoError>> + Send;

    /// Returns the job with the given id.
    fn get(
        &self,
        txn: &mut Txn,
        job_id: &JobId,
    ) -> impl Future<Output = anyhow::Result<Option<Job>>> + Send;

    /// Returns one page of jobs matching the given filter: substring match on
    /// the location, equality on the job type and a substring match across
    /// title, company and description for the search text.
    fn list(
        &self,
        txn: &mut Txn,
        filter: &JobFilter,
        request: JobPageRequest,
    ) -> impl Future<Output = anyhow::Result<JobPage>> + Send;

    /// Applies the given patch to the job with the given id. Only fields
    /// present in the patch are written. Returns `false` if the job does not
    /// exist.
    fn update<'a>(
        &self,
        txn: &mut Txn,
        job_id: &JobId,
        patch: JobPatchRef<'a>,
    ) -> impl Future<Output = Result<bool, JobRepoError>> + Send;

    /// Deletes the job with the given id. Returns whether a row was removed.
    fn delete(
        &self,
        txn: &mut Txn,
        job_id: &JobId,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Returns the number of jobs matching the given filter.
    fn count(
        &self,
        txn: &mut Txn,
        filter: &JobFilter,
    ) -> impl Future<Output = anyhow::Result<u64>> + Send;
}

#[derive(Debug, Error)]
pub enum JobRepoError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockJobRepository<Txn> {
    pub fn with_create(mut self, job: Job, result: Result<(), JobRepoError>) -> Self {
        self.expect_create()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(job))
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get(mut self, job_id: JobId, result: Option<Job>) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(job_id))
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list(
        mut self,
        filter: JobFilter,
        request: JobPageRequest,
        result: anyhow::Result<JobPage>,
    ) -> Self {
        self.expect_list()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(filter),
                mockall::predicate::eq(request),
            )
            .return_once(|_, _, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_update(
        mut self,
        job_id: JobId,
        patch: joblane_models::job::JobPatch,
        result: Result<bool, JobRepoError>,
    ) -> Self {
        self.expect_update()
            .once()
            .withf(move |_, id, p| *id == job_id && p == &patch.as_ref())
            .return_once(|_, _, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_delete(mut self, job_id: JobId, result: bool) -> Self {
        self.expect_delete()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(job_id))
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_count(mut self, filter: JobFilter, result: u64) -> Self {
        self.expect_count()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(filter))
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
