use joblane_di::Build;
use joblane_telemetry_contracts::audit::{JobAuditEntry, JobAuditService};

#[derive(Debug, Clone, Copy, Build, Default)]
pub struct JobAuditServiceImpl;

impl JobAuditService for JobAuditServiceImpl {
    async fn record(&self, entry: JobAuditEntry) -> anyhow::Result<()> {
        match entry {
            JobAuditEntry::Created { job_id, user_id } => {
                tracing::info!(target: "joblane::audit", %job_id, %user_id, "job created");
            }
            JobAuditEntry::Updated {
                job_id,
                user_id,
                changes,
            } => {
                tracing::info!(target: "joblane::audit", %job_id, %user_id, ?changes, "job updated");
            }
            JobAuditEntry::Deleted {
                job_id,
                user_id,
                forced,
            } => {
                tracing::info!(target: "joblane::audit", %job_id, %user_id, forced, "job deleted");
            }
        }
        Ok(())
    }
}
