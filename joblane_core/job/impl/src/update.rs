use anyhow::Context;
use joblane_core_job_contracts::schema::JobUpdateRequest;
use joblane_core_job_contracts::update::{
    JobUpdateError, JobUpdateService, JobUpdateServiceConfig,
};
use joblane_di::Build;
use joblane_models::{
    job::{Job, JobId, JobPatch},
    user::UserId,
};
use joblane_persistence_contracts::{
    job::{JobRepoError, JobRepository},
    Database, Transaction,
};
use joblane_shared_contracts::time::TimeService;
use joblane_telemetry_contracts::audit::{FieldChange, JobAuditEntry, JobAuditService};
use joblane_utils::{
    patch::{Patch, PatchValue},
    trace_instrument,
};

/// Field values longer than this are cut off in audit entries.
const AUDIT_VALUE_CHARS: usize = 64;

#[derive(Debug, Clone, Build, Default)]
pub struct JobUpdateServiceImpl<Db, Time, JobRepo, Audit> {
    db: Db,
    time: Time,
    job_repo: JobRepo,
    audit: Audit,
    config: JobUpdateServiceConfig,
}

impl<Db, Time, JobRepo, Audit> JobUpdateService for JobUpdateServiceImpl<Db, Time, JobRepo, Audit>
where
    Db: Database,
    Time: TimeService,
    JobRepo: JobRepository<Db::Transaction>,
    Audit: JobAuditService,
{
    #[trace_instrument(skip(self))]
    async fn invoke(
        &self,
        job_id: &str,
        user_id: &str,
        request: JobUpdateRequest,
    ) -> Result<Job, JobUpdateError> {
        let user_id = UserId::try_new(user_id).map_err(|_| JobUpdateError::Unauthenticated)?;
        let job_id = JobId::try_new(job_id).map_err(|_| JobUpdateError::InvalidId)?;

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
            .ok_or(JobUpdateError::NotFound)?;

        if !job.is_owned_by(&user_id) {
            return Err(JobUpdateError::Forbidden);
        }

        let now = self.time.now();
        if now > job.created_at + self.config.edit_window {
            return Err(JobUpdateError::EditWindowExpired);
        }

        let mut patch = request
            .parse()
            .map_err(JobUpdateError::Validation)?
            .minimize(&job);

        if let PatchValue::Update(company) = &patch.company {
            if self.config.company_blacklist.matches(company) {
                return Err(JobUpdateError::CompanyNotAllowed);
            }
            if now > job.created_at + self.config.company_lock_window {
                return Err(JobUpdateError::CompanyLocked);
            }
        }

        if patch.is_unchanged() {
            return Ok(job);
        }

        let changes = field_changes(&job, &patch);

        patch.updated_at = PatchValue::Update(now);

        let updated = self
            .job_repo
            .update(&mut txn, &job_id, patch.as_ref())
            .await
            .map_err(|err| match err {
                JobRepoError::Other(err) => {
                    JobUpdateError::Other(err.context("Failed to update job in database"))
                }
            })?;
        if !updated {
            // the row vanished between the read and the write
            return Err(JobUpdateError::NotFound);
        }

        txn.commit().await.context("Failed to commit transaction")?;

        let job = job.update(patch);

        if let Err(err) = self
            .audit
            .record(JobAuditEntry::Updated {
                job_id: job.id.clone(),
                user_id,
                changes,
            })
            .await
        {
            tracing::warn!("Failed to record audit entry: {err:#}");
        }

        Ok(job)
    }
}

fn field_changes(job: &Job, patch: &JobPatch) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    if let PatchValue::Update(title) = &patch.title {
        changes.push(change("title", &job.title, title));
    }
    if let PatchValue::Update(company) = &patch.company {
        changes.push(change("company", &job.company, company));
    }
    if let PatchValue::Update(description) = &patch.description {
        changes.push(change("description", &job.description, description));
    }
    if let PatchValue::Update(location) = &patch.location {
        changes.push(change("location", &job.location, location));
    }
    if let PatchValue::Update(job_type) = patch.job_type {
        changes.push(FieldChange {
            field: "job_type",
            old: job.job_type.to_string(),
            new: job_type.to_string(),
        });
    }
    changes
}

fn change(field: &'static str, old: &str, new: &str) -> FieldChange {
    FieldChange {
        field,
        old: clip(old),
        new: clip(new),
    }
}

fn clip(value: &str) -> String {
    if value.chars().count() <= AUDIT_VALUE_CHARS {
        value.to_owned()
    } else {
        value
            .chars()
            .take(AUDIT_VALUE_CHARS)
            .chain(['…'])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::anyhow;
    use joblane_demo::{
        job::{BAR_JOB, FOO_JOB},
        user::{BAR, FOO},
    };
    use joblane_models::job::JobTitle;
    use joblane_persistence_contracts::{job::MockJobRepository, MockDatabase, MockTransaction};
    use joblane_shared_contracts::time::MockTimeService;
    use joblane_telemetry_contracts::audit::MockJobAuditService;
    use joblane_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    type Sut = JobUpdateServiceImpl<
        MockDatabase,
        MockTimeService,
        MockJobRepository<MockTransaction>,
        MockJobAuditService,
    >;

    #[tokio::test]
    async fn ok_single_field_update() {
        // Arrange
        let now = FOO_JOB.created_at + Duration::from_secs(3600);
        let new_title = JobTitle::try_new("Platform Engineer").unwrap();

        let expected = Job {
            title: new_title.clone(),
            updated_at: now,
            ..FOO_JOB.clone()
        };

        let db = MockDatabase::build(true);
        let time = MockTimeService::new().with_now(now);
        let job_repo = MockJobRepository::new()
            .with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()))
            .with_update(
                FOO_JOB.id.clone(),
                JobPatch::new()
                    .update_title(new_title.clone())
                    .update_updated_at(now),
                Ok(true),
            );
        let audit = MockJobAuditService::new().with_record(
            JobAuditEntry::Updated {
                job_id: FOO_JOB.id.clone(),
                user_id: FOO.clone(),
                changes: vec![FieldChange {
                    field: "title",
                    old: (*FOO_JOB.title).clone(),
                    new: (*new_title).clone(),
                }],
            },
            Ok(()),
        );

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            audit,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    title: Some("Platform Engineer".into()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        let job = result.unwrap();
        assert_eq!(job, expected);
        // every other field is untouched and `updated_at` strictly advanced
        assert_eq!(job.company, FOO_JOB.company);
        assert_eq!(job.description, FOO_JOB.description);
        assert_eq!(job.location, FOO_JOB.location);
        assert_eq!(job.job_type, FOO_JOB.job_type);
        assert!(job.updated_at > FOO_JOB.updated_at);
    }

    #[tokio::test]
    async fn unauthenticated() {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut
            .invoke(&FOO_JOB.id, "", JobUpdateRequest::default())
            .await;

        // Assert
        assert_matches!(result, Err(JobUpdateError::Unauthenticated));
    }

    #[tokio::test]
    async fn invalid_id() {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut
            .invoke("not a valid id!", &FOO, JobUpdateRequest::default())
            .await;

        // Assert
        assert_matches!(result, Err(JobUpdateError::InvalidId));
    }

    #[tokio::test]
    async fn not_found() {
        // Arrange
        let db = MockDatabase::build(false);
        let job_repo = MockJobRepository::new().with_get(FOO_JOB.id.clone(), None);

        let sut = JobUpdateServiceImpl {
            db,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(&FOO_JOB.id, &FOO, JobUpdateRequest::default())
            .await;

        // Assert
        assert_matches!(result, Err(JobUpdateError::NotFound));
    }

    #[tokio::test]
    async fn forbidden_for_non_owners() {
        // Arrange
        let db = MockDatabase::build(false);
        let job_repo =
            MockJobRepository::new().with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()));

        let sut = JobUpdateServiceImpl {
            db,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(&FOO_JOB.id, &BAR, JobUpdateRequest::default())
            .await;

        // Assert
        assert_matches!(result, Err(JobUpdateError::Forbidden));
    }

    #[tokio::test]
    async fn edit_window_is_inclusive() {
        // Arrange
        let edit_window = JobUpdateServiceConfig::default().edit_window;
        let now = FOO_JOB.created_at + edit_window;
        let new_title = JobTitle::try_new("Platform Engineer").unwrap();

        let db = MockDatabase::build(true);
        let time = MockTimeService::new().with_now(now);
        let job_repo = MockJobRepository::new()
            .with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()))
            .with_update(
                FOO_JOB.id.clone(),
                JobPatch::new()
                    .update_title(new_title.clone())
                    .update_updated_at(now),
                Ok(true),
            );
        let audit = MockJobAuditService::new().with_record(
            JobAuditEntry::Updated {
                job_id: FOO_JOB.id.clone(),
                user_id: FOO.clone(),
                changes: vec![FieldChange {
                    field: "title",
                    old: (*FOO_JOB.title).clone(),
                    new: (*new_title).clone(),
                }],
            },
            Ok(()),
        );

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            audit,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    title: Some("Platform Engineer".into()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn edit_window_expired() {
        // Arrange
        let edit_window = JobUpdateServiceConfig::default().edit_window;
        let now = FOO_JOB.created_at + edit_window + Duration::from_secs(24 * 60 * 60);

        let db = MockDatabase::build(false);
        let time = MockTimeService::new().with_now(now);
        let job_repo =
            MockJobRepository::new().with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()));

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    // the window check wins over validation of the body
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        assert_matches!(result, Err(JobUpdateError::EditWindowExpired));
    }

    #[tokio::test]
    async fn validation_failed() {
        // Arrange
        let now = FOO_JOB.created_at + Duration::from_secs(3600);

        let db = MockDatabase::build(false);
        let time = MockTimeService::new().with_now(now);
        let job_repo =
            MockJobRepository::new().with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()));

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    description: Some("too short".into()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        assert_matches!(
            result,
            Err(JobUpdateError::Validation(issues))
                if issues.fields().collect::<Vec<_>>() == ["description"]
        );
    }

    #[tokio::test]
    async fn company_change_allowed_within_the_first_day() {
        // Arrange
        let now = FOO_JOB.created_at + Duration::from_secs(23 * 60 * 60);
        let new_company = "Initech";

        let db = MockDatabase::build(true);
        let time = MockTimeService::new().with_now(now);
        let job_repo = MockJobRepository::new()
            .with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()))
            .with_update(
                FOO_JOB.id.clone(),
                JobPatch::new()
                    .update_company(new_company.try_into().unwrap())
                    .update_updated_at(now),
                Ok(true),
            );
        let audit = MockJobAuditService::new().with_record(
            JobAuditEntry::Updated {
                job_id: FOO_JOB.id.clone(),
                user_id: FOO.clone(),
                changes: vec![FieldChange {
                    field: "company",
                    old: (*FOO_JOB.company).clone(),
                    new: new_company.to_owned(),
                }],
            },
            Ok(()),
        );

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            audit,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    company: Some(new_company.into()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        assert_eq!(&**result.unwrap().company, new_company);
    }

    #[tokio::test]
    async fn company_locked_after_the_first_day() {
        // Arrange
        let now = FOO_JOB.created_at + Duration::from_secs(25 * 60 * 60);

        let db = MockDatabase::build(false);
        let time = MockTimeService::new().with_now(now);
        let job_repo =
            MockJobRepository::new().with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()));

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    company: Some("Initech".into()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        assert_matches!(result, Err(JobUpdateError::CompanyLocked));
    }

    #[tokio::test]
    async fn resubmitting_the_same_company_is_not_a_change() {
        // Arrange
        let now = FOO_JOB.created_at + Duration::from_secs(25 * 60 * 60);

        let db = MockDatabase::build(false);
        let time = MockTimeService::new().with_now(now);
        let job_repo =
            MockJobRepository::new().with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()));

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    company: Some((*FOO_JOB.company).clone()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        assert_eq!(result.unwrap(), *FOO_JOB);
    }

    #[tokio::test]
    async fn company_change_to_blacklisted_name() {
        // Arrange
        let now = FOO_JOB.created_at + Duration::from_secs(3600);

        let db = MockDatabase::build(false);
        let time = MockTimeService::new().with_now(now);
        let job_repo =
            MockJobRepository::new().with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()));

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    company: Some("Scam Industries".into()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        assert_matches!(result, Err(JobUpdateError::CompanyNotAllowed));
    }

    #[tokio::test]
    async fn noop_update_returns_the_job_unchanged() {
        // Arrange
        let now = FOO_JOB.created_at + Duration::from_secs(3600);

        let db = MockDatabase::build(false);
        let time = MockTimeService::new().with_now(now);
        let job_repo =
            MockJobRepository::new().with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()));

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(&FOO_JOB.id, &FOO, JobUpdateRequest::default())
            .await;

        // Assert
        assert_eq!(result.unwrap(), *FOO_JOB);
    }

    #[tokio::test]
    async fn audit_diff_truncates_long_descriptions() {
        // Arrange
        let now = BAR_JOB.updated_at + Duration::from_secs(3600);
        let new_description = "d".repeat(200);
        let clipped = format!("{}…", "d".repeat(AUDIT_VALUE_CHARS));

        let db = MockDatabase::build(true);
        let time = MockTimeService::new().with_now(now);
        let job_repo = MockJobRepository::new()
            .with_get(BAR_JOB.id.clone(), Some(BAR_JOB.clone()))
            .with_update(
                BAR_JOB.id.clone(),
                JobPatch::new()
                    .update_description(new_description.as_str().try_into().unwrap())
                    .update_updated_at(now),
                Ok(true),
            );
        let audit = MockJobAuditService::new().with_record(
            JobAuditEntry::Updated {
                job_id: BAR_JOB.id.clone(),
                user_id: BAR.clone(),
                changes: vec![FieldChange {
                    field: "description",
                    old: (*BAR_JOB.description).clone(),
                    new: clipped,
                }],
            },
            Ok(()),
        );

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            audit,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &BAR_JOB.id,
                &BAR,
                JobUpdateRequest {
                    description: Some(new_description.clone()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        assert_eq!(&**result.unwrap().description, new_description);
    }

    #[tokio::test]
    async fn concurrent_deletion_surfaces_as_not_found() {
        // Arrange
        let now = FOO_JOB.created_at + Duration::from_secs(3600);
        let new_title = JobTitle::try_new("Platform Engineer").unwrap();

        let db = MockDatabase::build(false);
        let time = MockTimeService::new().with_now(now);
        let job_repo = MockJobRepository::new()
            .with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()))
            .with_update(
                FOO_JOB.id.clone(),
                JobPatch::new()
                    .update_title(new_title)
                    .update_updated_at(now),
                Ok(false),
            );

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    title: Some("Platform Engineer".into()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        assert_matches!(result, Err(JobUpdateError::NotFound));
    }

    #[tokio::test]
    async fn repository_error() {
        // Arrange
        let now = FOO_JOB.created_at + Duration::from_secs(3600);
        let new_title = JobTitle::try_new("Platform Engineer").unwrap();

        let db = MockDatabase::build(false);
        let time = MockTimeService::new().with_now(now);
        let job_repo = MockJobRepository::new()
            .with_get(FOO_JOB.id.clone(), Some(FOO_JOB.clone()))
            .with_update(
                FOO_JOB.id.clone(),
                JobPatch::new()
                    .update_title(new_title)
                    .update_updated_at(now),
                Err(JobRepoError::Other(anyhow!("boom"))),
            );

        let sut = JobUpdateServiceImpl {
            db,
            time,
            job_repo,
            ..Sut::default()
        };

        // Act
        let result = sut
            .invoke(
                &FOO_JOB.id,
                &FOO,
                JobUpdateRequest {
                    title: Some("Platform Engineer".into()),
                    ..Default::default()
                },
            )
            .await;

        // Assert
        assert_matches!(result, Err(JobUpdateError::Other(_)));
    }
}
