use std::{collections::BTreeMap, future::Future, time::Duration};

use chrono::{DateTime, Utc};
use joblane_models::job::{CompanyName, Job, JobId, JobLocation, JobTitle, JobType};
use thiserror::Error;

pub trait JobGetService: Send + Sync + 'static {
    /// Returns the job with the given id together with viewer-relative
    /// permissions. Non-owner views (including anonymous ones) are counted by
    /// the view-tracking collaborator; a failure there never fails the read.
    fn get_job(
        &self,
        job_id: &str,
        viewer: Option<&str>,
    ) -> impl Future<Output = Result<JobView, JobGetError>> + Send;

    /// Best-effort batch fetch: ids that cannot be resolved end up in the
    /// per-id error map instead of failing the whole call. Batch reads do not
    /// count views.
    fn get_multiple_jobs(
        &self,
        job_ids: &[String],
        viewer: Option<&str>,
    ) -> impl Future<Output = Result<JobBatch, JobGetError>> + Send;

    /// [`JobGetService::get_job`] plus a lookup of postings with the same
    /// location and type. A failed related-lookup degrades to an empty list.
    fn get_job_with_related(
        &self,
        job_id: &str,
        viewer: Option<&str>,
    ) -> impl Future<Output = Result<JobWithRelated, JobGetError>> + Send;

    /// Returns a compact representation with the description truncated to
    /// [`JobPreview::SUMMARY_CHARS`] characters.
    fn get_job_preview(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<JobPreview, JobGetError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobView {
    pub job: Job,
    /// Whether the viewer owns this posting.
    pub is_owner: bool,
    /// Owners may edit until the edit window has elapsed; afterwards the
    /// posting is permanently read-only.
    pub can_edit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobBatch {
    pub jobs: Vec<JobView>,
    pub errors: BTreeMap<String, JobBatchIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobBatchIssue {
    InvalidId,
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobWithRelated {
    pub view: JobView,
    pub related: Vec<Job>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPreview {
    pub id: JobId,
    pub title: JobTitle,
    pub company: CompanyName,
    pub location: JobLocation,
    pub job_type: JobType,
    /// The description, cut off at [`Self::SUMMARY_CHARS`] characters with an
    /// ellipsis.
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl JobPreview {
    pub const SUMMARY_CHARS: usize = 200;
}

#[derive(Debug, Error)]
pub enum JobGetError {
    #[error("The job id is malformed.")]
    InvalidId,
    #[error("The job does not exist.")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct JobGetServiceConfig {
    /// Owners may edit a posting for this long after creation.
    pub edit_window: Duration,
    /// Maximum number of related jobs returned alongside a posting.
    pub related_limit: u64,
}

impl Default for JobGetServiceConfig {
    fn default() -> Self {
        Self {
            edit_window: Duration::from_secs(90 * 24 * 60 * 60),
            related_limit: 5,
        }
    }
}
