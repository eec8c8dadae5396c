use std::{future::Future, time::Duration};

use joblane_models::job::Job;
use thiserror::Error;

use crate::{
    schema::{JobUpdateRequest, ValidationIssues},
    CompanyBlacklist,
};

pub trait JobUpdateService: Send + Sync + 'static {
    /// Applies a partial update to one of the caller's postings. Absent
    /// fields are left untouched; a successful update refreshes `updated_at`.
    fn invoke(
        &self,
        job_id: &str,
        user_id: &str,
        request: JobUpdateRequest,
    ) -> impl Future<Output = Result<Job, JobUpdateError>> + Send;
}

#[derive(Debug, Error)]
pub enum JobUpdateError {
    #[error("The caller is not authenticated.")]
    Unauthenticated,
    #[error("The job id is malformed.")]
    InvalidId,
    #[error("The job does not exist.")]
    NotFound,
    #[error("Only the owner may update this job.")]
    Forbidden,
    #[error("The posting is too old to be edited.")]
    EditWindowExpired,
    #[error("The input failed validation.")]
    Validation(ValidationIssues),
    #[error("The company is not allowed to post listings.")]
    CompanyNotAllowed,
    #[error("The company of a posting may only be changed within its first day.")]
    CompanyLocked,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct JobUpdateServiceConfig {
    /// Owners may edit a posting for this long after creation.
    pub edit_window: Duration,
    /// Window after creation within which the company may still be changed.
    pub company_lock_window: Duration,
    pub company_blacklist: CompanyBlacklist,
}

impl Default for JobUpdateServiceConfig {
    fn default() -> Self {
        Self {
            edit_window: Duration::from_secs(90 * 24 * 60 * 60),
            company_lock_window: Duration::from_secs(24 * 60 * 60),
            company_blacklist: CompanyBlacklist::default(),
        }
    }
}
