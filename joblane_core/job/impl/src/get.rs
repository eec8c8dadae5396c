use anyhow::Context;
use chrono::{DateTime, Utc};
use joblane_core_job_contracts::get::{
    JobBatch, JobBatchIssue, JobGetError, JobGetService, JobGetServiceConfig, JobPreview, JobView,
    JobWithRelated,
};
use joblane_di::Build;
use joblane_models::{
    job::{Job, JobDescription, JobFilter, JobId, JobPageRequest, JobSort},
    pagination::{PageLimit, PageNumber},
    user::UserId,
    QueryText,
};
use joblane_persistence_contracts::{job::JobRepository, Database};
use joblane_shared_contracts::time::TimeService;
use joblane_telemetry_contracts::view::JobViewTrackingService;
use joblane_utils::trace_instrument;

#[derive(Debug, Clone, Build, Default)]
pub struct JobGetServiceImpl<Db, Time, JobRepo, Views> {
    db: Db,
    time: Time,
    job_repo: JobRepo,
    views: Views,
    config: JobGetServiceConfig,
}

impl<Db, Time, JobRepo, Views> JobGetService for JobGetServiceImpl<Db, Time, JobRepo, Views>
where
    Db: Database,
    Time: TimeService,
    JobRepo: JobRepository<Db::Transaction>,
    Views: JobViewTrackingService,
{
    #[trace_instrument(skip(self))]
    async fn get_job(&self, job_id: &str, viewer: Option<&str>) -> Result<JobView, JobGetError> {
        let job_id = JobId::try_new(job_id).map_err(|_| JobGetError::InvalidId)?;

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
            .ok_or(JobGetError::NotFound)?;

        let view = self.build_view(job, viewer, self.time.now());
        self.track_view(&view, viewer).await;

        Ok(view)
    }

    #[trace_instrument(skip(self))]
    async fn get_multiple_jobs(
        &self,
        job_ids: &[String],
        viewer: Option<&str>,
    ) -> Result<JobBatch, JobGetError> {
        let mut txn = self
            .db
            .begin_transaction()
            .await
            .context("Failed to begin transaction")?;

        let now = self.time.now();
        let mut batch = JobBatch::default();

        for raw in job_ids {
            let Ok(job_id) = JobId::try_new(raw.as_str()) else {
                batch.errors.insert(raw.clone(), JobBatchIssue::InvalidId);
                continue;
            };
            match self.job_repo.get(&mut txn, &job_id).await {
                Ok(Some(job)) => batch.jobs.push(self.build_view(job, viewer, now)),
                Ok(None) => {
                    batch.errors.insert(raw.clone(), JobBatchIssue::NotFound);
                }
                Err(err) => {
                    batch
                        .errors
                        .insert(raw.clone(), JobBatchIssue::Failed(format!("{err:#}")));
                }
            }
        }

        Ok(batch)
    }

    #[trace_instrument(skip(self))]
    async fn get_job_with_related(
        &self,
        job_id: &str,
        viewer: Option<&str>,
    ) -> Result<JobWithRelated, JobGetError> {
        let job_id = JobId::try_new(job_id).map_err(|_| JobGetError::InvalidId)?;

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
            .ok_or(JobGetError::NotFound)?;

        let view = self.build_view(job, viewer, self.time.now());
        self.track_view(&view, viewer).await;

        let filter = JobFilter {
            location: Some(QueryText::new((*view.job.location).clone())),
            job_type: Some(view.job.job_type),
            ..Default::default()
        };
        let request = JobPageRequest {
            page: PageNumber::default(),
            limit: PageLimit::new(self.config.related_limit + 1),
            sort: JobSort::default(),
        };

        // A posting without related listings is still worth returning, so a
        // failed lookup degrades to an empty list.
        let related = match self.job_repo.list(&mut txn, &filter, request).await {
            Ok(page) => page
                .jobs
                .into_iter()
                .filter(|candidate| candidate.id != view.job.id)
                .take(self.config.related_limit as usize)
                .collect(),
            Err(err) => {
                tracing::warn!("Failed to look up related jobs: {err:#}");
                Vec::new()
            }
        };

        Ok(JobWithRelated { view, related })
    }

    #[trace_instrument(skip(self))]
    async fn get_job_preview(&self, job_id: &str) -> Result<JobPreview, JobGetError> {
        let job_id = JobId::try_new(job_id).map_err(|_| JobGetError::InvalidId)?;

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
            .ok_or(JobGetError::NotFound)?;

        let summary = summarize(&job.description);

        Ok(JobPreview {
            id: job.id,
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            summary,
            created_at: job.created_at,
        })
    }
}

impl<Db, Time, JobRepo, Views> JobGetServiceImpl<Db, Time, JobRepo, Views>
where
    Views: JobViewTrackingService,
{
    fn build_view(&self, job: Job, viewer: Option<&str>, now: DateTime<Utc>) -> JobView {
        let viewer_id = viewer.and_then(|raw| UserId::try_new(raw).ok());
        let is_owner = viewer_id.is_some_and(|id| job.is_owned_by(&id));
        let can_edit = is_owner && now <= job.created_at + self.config.edit_window;
        JobView {
            job,
            is_owner,
            can_edit,
        }
    }

    /// Counts a view for non-owners; owners reading their own posting are not
    /// tracked, and a tracking failure never fails the read.
    async fn track_view(&self, view: &JobView, viewer: Option<&str>) {
        if view.is_owner {
            return;
        }
        let viewer_id = viewer.and_then(|raw| UserId::try_new(raw).ok());
        if let Err(err) = self.views.track(&view.job.id, viewer_id).await {
            tracing::warn!("Failed to track job view: {err:#}");
        }
    }
}

fn summarize(description: &JobDescription) -> String {
    let text: &str = description;
    if text.chars().count() <= JobPreview::SUMMARY_CHARS {
        text.to_owned()
    } else {
        let mut summary = text
            .chars()
            .take(JobPreview::SUMMARY_CHARS)
            .collect::<String>();
        summary.push('…');
        summary
    }
}
