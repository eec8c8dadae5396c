use joblane_di::Build;
use joblane_models::{job::JobId, user::UserId};
use joblane_telemetry_contracts::view::JobViewTrackingService;

#[derive(Debug, Clone, Copy, Build, Default)]
pub struct JobViewTrackingServiceImpl;

impl JobViewTrackingService for JobViewTrackingServiceImpl {
    async fn track(&self, job_id: &JobId, viewer: Option<UserId>) -> anyhow::Result<()> {
        tracing::info!(target: "joblane::views", %job_id, viewer = ?viewer, "job viewed");
        Ok(())
    }
}
