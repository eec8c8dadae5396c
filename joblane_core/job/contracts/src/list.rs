use std::future::Future;

use joblane_models::job::JobPage;
use thiserror::Error;

pub trait JobListService: Send + Sync + 'static {
    /// Runs a filtered, sorted, paginated collection query.
    ///
    /// Unknown job types and sort fields fail fast without touching the
    /// repository; page and limit are normalized rather than rejected; free
    /// text is sanitized.
    fn list(&self, query: JobListQuery)
        -> impl Future<Output = Result<JobPage, JobListError>> + Send;

    /// The most recent postings, unfiltered.
    fn get_featured_jobs(
        &self,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<JobPage, JobListError>> + Send;

    fn get_jobs_by_location(
        &self,
        location: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<JobPage, JobListError>> + Send;

    fn get_jobs_by_type(
        &self,
        job_type: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<JobPage, JobListError>> + Send;

    fn search_jobs(
        &self,
        search_term: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<JobPage, JobListError>> + Send;

    /// One owner's postings. Fails with [`JobListError::MissingUserId`] if the
    /// user id is blank.
    fn get_user_jobs(
        &self,
        user_id: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<JobPage, JobListError>> + Send;
}

/// Raw collection query as decoded from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobListQuery {
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub search_term: Option<String>,
    pub user_id: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order_by: Option<String>,
    pub order_direction: Option<String>,
}

#[derive(Debug, Error)]
pub enum JobListError {
    #[error("The job type is not one of the supported values.")]
    InvalidJobType,
    #[error("The requested sort field is not supported.")]
    InvalidOrderField,
    #[error("A user id is required for this query.")]
    MissingUserId,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
