use anyhow::Context;
use joblane_core_job_contracts::delete::{
    BulkDeleteFailure, BulkDeleteOutcome, JobBulkDeleteError, JobDeleteError, JobDeleteService,
    JobDeleteServiceConfig,
};
use joblane_di::Build;
use joblane_models::{job::JobId, user::UserId};
use joblane_persistence_contracts::{job::JobRepository, Database, Transaction};
use joblane_shared_contracts::{role::RoleService, time::TimeService};
use joblane_telemetry_contracts::{
    audit::{JobAuditEntry, JobAuditService},
    notification::JobNotificationService,
};
use joblane_utils::trace_instrument;

#[derive(Debug, Clone, Build, Default)]
pub struct JobDeleteServiceImpl<Db, Time, Roles, JobRepo, Audit, Notifications> {
    db: Db,
    time: Time,
    roles: Roles,
    job_repo: JobRepo,
    audit: Audit,
    notifications: Notifications,
    config: JobDeleteServiceConfig,
}

impl<Db, Time, Roles, JobRepo, Audit, Notifications> JobDeleteService
    for JobDeleteServiceImpl<Db, Time, Roles, JobRepo, Audit, Notifications>
where
    Db: Database,
    Time: TimeService,
    Roles: RoleService,
    JobRepo: JobRepository<Db::Transaction>,
    Audit: JobAuditService,
    Notifications: JobNotificationService,
{
    #[trace_instrument(skip(self))]
    async fn invoke(
        &self,
        job_id: &str,
        user_id: &str,
        force_delete: bool,
    ) -> Result<(), JobDeleteError> {
        let user_id = UserId::try_new(user_id).map_err(|_| JobDeleteError::Unauthenticated)?;
        let job_id = JobId::try_new(job_id).map_err(|_| JobDeleteError::InvalidId)?;

        let mut txn = self
            .db
            .begin_transaction()
            .await
            .context("Failed to begin transaction")?;

        let job = self
            .job_repo
            .get(&mut txn, &job_id)
            .await
            .context("Failed to get job from database")?
            .ok_or(JobDeleteError::NotFound)?;

        if !job.is_owned_by(&user_id) && !force_delete {
            return Err(JobDeleteError::Forbidden);
        }

        let now = self.time.now();
        if !force_delete && now < job.updated_at + self.config.delete_cooldown {
            return Err(JobDeleteError::RecentlyUpdated);
        }

        if now < job.created_at + self.config.new_job_warning_age {
            tracing::warn!(
                job_id = %job.id,
                "Deleting a posting that was created less than an hour ago"
            );
        }

        if let Err(err) = self
            .audit
            .record(JobAuditEntry::Deleted {
                job_id: job.id.clone(),
                user_id,
                forced: force_delete,
            })
            .await
        {
            tracing::warn!("Failed to record audit entry: {err:#}");
        }

        let deleted = self
            .job_repo
            .delete(&mut txn, &job_id)
            .await
            .context("Failed to delete job from database")?;
        if !deleted {
            return Err(JobDeleteError::DeleteFailed);
        }

        txn.commit().await.context("Failed to commit transaction")?;

        if let Err(err) = self.notifications.listing_removed(&job).await {
            tracing::warn!("Failed to send listing-removed notification: {err:#}");
        }

        Ok(())
    }

    #[trace_instrument(skip(self))]
    async fn bulk_delete(
        &self,
        job_ids: &[String],
        user_id: &str,
    ) -> Result<BulkDeleteOutcome, JobBulkDeleteError> {
        let caller = UserId::try_new(user_id).map_err(|_| JobBulkDeleteError::Unauthenticated)?;

        let is_admin = self
            .roles
            .is_admin(&caller)
            .await
            .context("Failed to check the caller's roles")?;
        if !is_admin {
            return Err(JobBulkDeleteError::AdminOnly);
        }

        let mut outcome = BulkDeleteOutcome::default();
        for job_id in job_ids {
            match self.invoke(job_id, user_id, true).await {
                Ok(()) => outcome.succeeded.push(job_id.clone()),
                Err(err) => outcome.failed.push(BulkDeleteFailure {
                    job_id: job_id.clone(),
                    reason: err.to_string(),
                }),
            }
        }

        Ok(outcome)
    }
}
