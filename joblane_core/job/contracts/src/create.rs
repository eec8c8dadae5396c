use std::{future::Future, time::Duration};

use joblane_models::job::Job;
use thiserror::Error;

use crate::{
    schema::{JobCreateRequest, ValidationIssues},
    CompanyBlacklist,
};

pub trait JobCreateService: Send + Sync + 'static {
    /// Creates a new posting owned by the calling user.
    ///
    /// The duplicate check is advisory: if the lookup of the caller's recent
    /// postings fails, creation proceeds instead of blocking on an unrelated
    /// storage fault.
    fn invoke(
        &self,
        user_id: &str,
        request: JobCreateRequest,
    ) -> impl Future<Output = Result<Job, JobCreateError>> + Send;
}

#[derive(Debug, Error)]
pub enum JobCreateError {
    #[error("The caller is not authenticated.")]
    Unauthenticated,
    #[error("The input failed validation.")]
    Validation(ValidationIssues),
    #[error("The company is not allowed to post listings.")]
    CompanyNotAllowed,
    #[error("An identical posting was created recently.")]
    DuplicatePosting,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct JobCreateServiceConfig {
    /// Window within which a same-title, same-company posting by the same
    /// owner counts as a duplicate.
    pub duplicate_window: Duration,
    /// How many of the owner's most recent postings the duplicate check scans.
    pub duplicate_scan_limit: u64,
    pub company_blacklist: CompanyBlacklist,
}

impl Default for JobCreateServiceConfig {
    fn default() -> Self {
        Self {
            duplicate_window: Duration::from_secs(7 * 24 * 60 * 60),
            duplicate_scan_limit: 100,
            company_blacklist: CompanyBlacklist::default(),
        }
    }
}
