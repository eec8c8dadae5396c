use joblane_di::Build;
use joblane_models::job::Job;
use joblane_telemetry_contracts::notification::JobNotificationService;

#[derive(Debug, Clone, Copy, Build, Default)]
pub struct JobNotificationServiceImpl;

impl JobNotificationService for JobNotificationServiceImpl {
    async fn listing_removed(&self, job: &Job) -> anyhow::Result<()> {
        tracing::info!(
            target: "joblane::notifications",
            job_id = %job.id,
            title = %&*job.title,
            company = %&*job.company,
            "listing no longer available"
        );
        Ok(())
    }
}
