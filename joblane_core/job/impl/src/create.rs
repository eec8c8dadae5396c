use anyhow::Context;
use joblane_core_job_contracts::create::{
    JobCreateError, JobCreateService, JobCreateServiceConfig,
};
use joblane_core_job_contracts::schema::JobCreateRequest;
use joblane_di::Build;
use joblane_models::{
    job::{Job, JobFilter, JobPageRequest, JobSort},
    pagination::{PageLimit, PageNumber},
    user::UserId,
};
use joblane_persistence_contracts::{
    job::{JobRepoError, JobRepository},
    Database, Transaction,
};
use joblane_shared_contracts::{id::IdService, time::TimeService};
use joblane_telemetry_contracts::audit::{JobAuditEntry, JobAuditService};
use joblane_utils::trace_instrument;

#[derive(Debug, Clone, Build, Default)]
pub struct JobCreateServiceImpl<Db, Id, Time, JobRepo, Audit> {
    db: Db,
    id: Id,
    time: Time,
    job_repo: JobRepo,
    audit: Audit,
    config: JobCreateServiceConfig,
}

impl<Db, Id, Time, JobRepo, Audit> JobCreateService
    for JobCreateServiceImpl<Db, Id, Time, JobRepo, Audit>
where
    Db: Database,
    Id: IdService,
    Time: TimeService,
    JobRepo: JobRepository<Db::Transaction>,
    Audit: JobAuditService,
{
    #[trace_instrument(skip(self))]
    async fn invoke(
        &self,
        user_id: &str,
        request: JobCreateRequest,
    ) -> Result<Job, JobCreateError> {
        let user_id = UserId::try_new(user_id).map_err(|_| JobCreateError::Unauthenticated)?;

        let data = request.parse().map_err(JobCreateError::Validation)?;

        if self.config.company_blacklist.matches(&data.company) {
            return Err(JobCreateError::CompanyNotAllowed);
        }

        let mut txn = self
            .db
            .begin_transaction()
            .await
            .context("Failed to begin transaction")?;

        let now = self.time.now();

        // Advisory duplicate scan over the owner's most recent postings. A
        // failure here must not block creation.
        let filter = JobFilter {
            user_id: Some(user_id.clone()),
            ..Default::default()
        };
        let scan = JobPageRequest {
            page: PageNumber::default(),
            limit: PageLimit::new(self.config.duplicate_scan_limit),
            sort: JobSort::default(),
        };
        match self.job_repo.list(&mut txn, &filter, scan).await {
            Ok(page) => {
                let title = data.title.to_lowercase();
                let company = data.company.to_lowercase();
                let duplicate = page.jobs.iter().any(|existing| {
                    existing.title.to_lowercase() == title
                        && existing.company.to_lowercase() == company
                        && now < existing.created_at + self.config.duplicate_window
                });
                if duplicate {
                    return Err(JobCreateError::DuplicatePosting);
                }
            }
            Err(err) => {
                tracing::warn!("Failed to scan for duplicate postings, proceeding: {err:#}");
            }
        }

        let job = Job {
            id: self.id.generate(),
            user_id,
            title: data.title,
            company: data.company,
            description: data.description,
            location: data.location,
            job_type: data.job_type,
            created_at: now,
            updated_at: now,
        };

        self.job_repo
            .create(&mut txn, &job)
            .await
            .map_err(|err| match err {
                JobRepoError::Other(err) => {
                    JobCreateError::Other(err.context("Failed to create job in database"))
                }
            })?;

        txn.commit().await.context("Failed to commit transaction")?;

        if let Err(err) = self
            .audit
            .record(JobAuditEntry::Created {
                job_id: job.id.clone(),
                user_id: job.user_id.clone(),
            })
            .await
        {
            tracing::warn!("Failed to record audit entry: {err:#}");
        }

        Ok(job)
    }
}
