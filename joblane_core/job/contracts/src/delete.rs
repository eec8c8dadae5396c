use std::{future::Future, time::Duration};

use thiserror::Error;

pub trait JobDeleteService: Send + Sync + 'static {
    /// Deletes one posting. `force_delete` is meant for privileged callers:
    /// it bypasses both the ownership check and the post-update cool-down.
    fn invoke(
        &self,
        job_id: &str,
        user_id: &str,
        force_delete: bool,
    ) -> impl Future<Output = Result<(), JobDeleteError>> + Send;

    /// Deletes several postings, attempting each id independently. Requires
    /// administrative privileges.
    fn bulk_delete(
        &self,
        job_ids: &[String],
        user_id: &str,
    ) -> impl Future<Output = Result<BulkDeleteOutcome, JobBulkDeleteError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkDeleteOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkDeleteFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkDeleteFailure {
    pub job_id: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum JobDeleteError {
    #[error("The caller is not authenticated.")]
    Unauthenticated,
    #[error("The job id is malformed.")]
    InvalidId,
    #[error("The job does not exist.")]
    NotFound,
    #[error("Only the owner may delete this job.")]
    Forbidden,
    #[error("The posting was updated moments ago; deletion is briefly blocked.")]
    RecentlyUpdated,
    #[error("The repository did not remove the job.")]
    DeleteFailed,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum JobBulkDeleteError {
    #[error("The caller is not authenticated.")]
    Unauthenticated,
    #[error("Bulk deletion requires administrative privileges.")]
    AdminOnly,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct JobDeleteServiceConfig {
    /// Non-forced deletion is blocked for this long after an update.
    pub delete_cooldown: Duration,
    /// Deleting a posting younger than this only logs a warning.
    pub new_job_warning_age: Duration,
}

impl Default for JobDeleteServiceConfig {
    fn default() -> Self {
        Self {
            delete_cooldown: Duration::from_secs(5 * 60),
            new_job_warning_age: Duration::from_secs(60 * 60),
        }
    }
}
