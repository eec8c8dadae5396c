use std::future::Future;

use joblane_models::{job::JobId, user::UserId};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait JobAuditService: Send + Sync + 'static {
    /// Records one entry in the audit trail.
    fn record(&self, entry: JobAuditEntry) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobAuditEntry {
    Created {
        job_id: JobId,
        user_id: UserId,
    },
    Updated {
        job_id: JobId,
        user_id: UserId,
        changes: Vec<FieldChange>,
    },
    Deleted {
        job_id: JobId,
        user_id: UserId,
        forced: bool,
    },
}

/// Before/after pair of one changed field. Long values are truncated at the
/// call site to bound the entry size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: String,
    pub new: String,
}

#[cfg(feature = "mock")]
impl MockJobAuditService {
    pub fn with_record(mut self, entry: JobAuditEntry, result: anyhow::Result<()>) -> Self {
        self.expect_record()
            .once()
            .with(mockall::predicate::eq(entry))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
