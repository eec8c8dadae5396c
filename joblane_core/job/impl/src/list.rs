use anyhow::Context;
use joblane_core_job_contracts::list::{JobListError, JobListQuery, JobListService};
use joblane_di::Build;
use joblane_models::{
    job::{JobFilter, JobPage, JobPageRequest, JobSort, JobSortField, JobType, SortDirection},
    pagination::{PageLimit, PageNumber},
    user::UserId,
    QueryText,
};
use joblane_persistence_contracts::{job::JobRepository, Database};
use joblane_utils::trace_instrument;

#[derive(Debug, Clone, Build, Default)]
pub struct JobListServiceImpl<Db, JobRepo> {
    db: Db,
    job_repo: JobRepo,
}

impl<Db, JobRepo> JobListService for JobListServiceImpl<Db, JobRepo>
where
    Db: Database,
    JobRepo: JobRepository<Db::Transaction>,
{
    #[trace_instrument(skip(self))]
    async fn list(&self, query: JobListQuery) -> Result<JobPage, JobListError> {
        let request = JobPageRequest {
            page: PageNumber::from_raw(query.page),
            limit: PageLimit::from_raw(query.limit),
            sort: parse_sort(query.order_by.as_deref(), query.order_direction.as_deref())?,
        };

        let job_type = query
            .job_type
            .as_deref()
            .map(|raw| JobType::from_input(raw).ok_or(JobListError::InvalidJobType))
            .transpose()?;

        let user_id = match query.user_id.as_deref() {
            Some(raw) => match UserId::try_new(raw) {
                Ok(user_id) => Some(user_id),
                // an owner id that cannot exist matches nothing
                Err(_) => return Ok(JobPage::empty(request)),
            },
            None => None,
        };

        let filter = JobFilter {
            user_id,
            location: sanitize_text(query.location),
            job_type,
            search: sanitize_text(query.search_term),
        };

        let mut txn = self
            .db
            .begin_transaction()
            .await
            .context("Failed to begin transaction")?;

        self.job_repo
            .list(&mut txn, &filter, request)
            .await
            .context("Failed to list jobs from database")
            .map_err(Into::into)
    }

    #[trace_instrument(skip(self))]
    async fn get_featured_jobs(&self, limit: Option<i64>) -> Result<JobPage, JobListError> {
        self.list(JobListQuery {
            limit,
            ..Default::default()
        })
        .await
    }

    #[trace_instrument(skip(self))]
    async fn get_jobs_by_location(
        &self,
        location: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<JobPage, JobListError> {
        self.list(JobListQuery {
            location: Some(location.to_owned()),
            page,
            limit,
            ..Default::default()
        })
        .await
    }

    #[trace_instrument(skip(self))]
    async fn get_jobs_by_type(
        &self,
        job_type: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<JobPage, JobListError> {
        self.list(JobListQuery {
            job_type: Some(job_type.to_owned()),
            page,
            limit,
            ..Default::default()
        })
        .await
    }

    #[trace_instrument(skip(self))]
    async fn search_jobs(
        &self,
        search_term: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<JobPage, JobListError> {
        self.list(JobListQuery {
            search_term: Some(search_term.to_owned()),
            page,
            limit,
            ..Default::default()
        })
        .await
    }

    #[trace_instrument(skip(self))]
    async fn get_user_jobs(
        &self,
        user_id: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<JobPage, JobListError> {
        if user_id.trim().is_empty() {
            return Err(JobListError::MissingUserId);
        }
        self.list(JobListQuery {
            user_id: Some(user_id.to_owned()),
            page,
            limit,
            ..Default::default()
        })
        .await
    }
}

fn parse_sort(
    order_by: Option<&str>,
    order_direction: Option<&str>,
) -> Result<JobSort, JobListError> {
    let field = match order_by {
        Some(raw) => JobSortField::from_input(raw).ok_or(JobListError::InvalidOrderField)?,
        None => JobSortField::default(),
    };
    let direction = match order_direction {
        Some(raw) => SortDirection::from_input(raw).ok_or(JobListError::InvalidOrderField)?,
        None => SortDirection::default(),
    };
    Ok(JobSort { field, direction })
}

fn sanitize_text(raw: Option<String>) -> Option<QueryText> {
    raw.map(QueryText::new).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use joblane_demo::{job::ALL_JOBS, user::FOO};
    use joblane_persistence_contracts::{job::MockJobRepository, MockDatabase, MockTransaction};
    use joblane_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    type Sut = JobListServiceImpl<MockDatabase, MockJobRepository<MockTransaction>>;

    #[tokio::test]
    async fn ok_defaults() {
        // Arrange
        let expected = full_page();

        let db = MockDatabase::build(false);
        let job_repo = MockJobRepository::new().with_list(
            JobFilter::default(),
            default_request(),
            Ok(expected.clone()),
        );

        let sut = JobListServiceImpl { db, job_repo };

        // Act
        let result = sut.list(JobListQuery::default()).await;

        // Assert
        assert_eq!(result.unwrap(), expected);
    }

    #[tokio::test]
    async fn limit_is_clamped_and_page_normalized() {
        // Arrange
        let request = JobPageRequest {
            page: PageNumber::new(1),
            limit: PageLimit::new(100),
            sort: JobSort::default(),
        };

        let db = MockDatabase::build(false);
        let job_repo =
            MockJobRepository::new().with_list(JobFilter::default(), request, Ok(full_page()));

        let sut = JobListServiceImpl { db, job_repo };

        // Act
        let result = sut
            .list(JobListQuery {
                page: Some(-3),
                limit: Some(500),
                ..Default::default()
            })
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn invalid_job_type_fails_fast() {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut
            .list(JobListQuery {
                job_type: Some("Freelance".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_matches!(result, Err(JobListError::InvalidJobType));
    }

    #[tokio::test]
    async fn remote_job_type_is_not_supported() {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut
            .list(JobListQuery {
                job_type: Some("REMOTE".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_matches!(result, Err(JobListError::InvalidJobType));
    }

    #[tokio::test]
    async fn invalid_order_field_fails_fast() {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut
            .list(JobListQuery {
                order_by: Some("salary".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_matches!(result, Err(JobListError::InvalidOrderField));
    }

    #[tokio::test]
    async fn invalid_order_direction_fails_fast() {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut
            .list(JobListQuery {
                order_direction: Some("sideways".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_matches!(result, Err(JobListError::InvalidOrderField));
    }

    #[tokio::test]
    async fn sort_accepts_camel_and_snake_case() {
        // Arrange
        for raw in ["updatedAt", "updated_at"] {
            let request = JobPageRequest {
                sort: JobSort {
                    field: JobSortField::UpdatedAt,
                    direction: SortDirection::Asc,
                },
                ..Default::default()
            };

            let db = MockDatabase::build(false);
            let job_repo =
                MockJobRepository::new().with_list(JobFilter::default(), request, Ok(full_page()));

            let sut = JobListServiceImpl { db, job_repo };

            // Act
            let result = sut
                .list(JobListQuery {
                    order_by: Some(raw.into()),
                    order_direction: Some("asc".into()),
                    ..Default::default()
                })
                .await;

            // Assert
            result.unwrap();
        }
    }

    #[tokio::test]
    async fn free_text_is_sanitized() {
        // Arrange
        let filter = JobFilter {
            location: Some(QueryText::new("Berlin")),
            search: Some(QueryText::new("rust backend")),
            ..Default::default()
        };

        let db = MockDatabase::build(false);
        let job_repo =
            MockJobRepository::new().with_list(filter, default_request(), Ok(full_page()));

        let sut = JobListServiceImpl { db, job_repo };

        // Act
        let result = sut
            .list(JobListQuery {
                location: Some("Berlin!!".into()),
                search_term: Some("rust; backend'".into()),
                ..Default::default()
            })
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn unknown_owner_matches_nothing() {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut
            .list(JobListQuery {
                user_id: Some("not a user id!".into()),
                ..Default::default()
            })
            .await;

        // Assert
        let page = result.unwrap();
        assert!(page.jobs.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn featured_jobs_use_the_default_sort() {
        // Arrange
        let request = JobPageRequest {
            limit: PageLimit::new(3),
            ..Default::default()
        };

        let db = MockDatabase::build(false);
        let job_repo =
            MockJobRepository::new().with_list(JobFilter::default(), request, Ok(full_page()));

        let sut = JobListServiceImpl { db, job_repo };

        // Act
        let result = sut.get_featured_jobs(Some(3)).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn jobs_by_type_delegate_to_the_filter() {
        // Arrange
        let filter = JobFilter {
            job_type: Some(JobType::PartTime),
            ..Default::default()
        };

        let db = MockDatabase::build(false);
        let job_repo =
            MockJobRepository::new().with_list(filter, default_request(), Ok(full_page()));

        let sut = JobListServiceImpl { db, job_repo };

        // Act
        let result = sut.get_jobs_by_type("Part-Time", None, None).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn search_jobs_delegate_to_the_filter() {
        // Arrange
        let filter = JobFilter {
            search: Some(QueryText::new("barista")),
            ..Default::default()
        };

        let db = MockDatabase::build(false);
        let job_repo =
            MockJobRepository::new().with_list(filter, default_request(), Ok(full_page()));

        let sut = JobListServiceImpl { db, job_repo };

        // Act
        let result = sut.search_jobs("barista", None, None).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn user_jobs_require_a_user_id() {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut.get_user_jobs("  ", None, None).await;

        // Assert
        assert_matches!(result, Err(JobListError::MissingUserId));
    }

    #[tokio::test]
    async fn user_jobs_filter_by_owner() {
        // Arrange
        let filter = JobFilter {
            user_id: Some(FOO.clone()),
            ..Default::default()
        };

        let db = MockDatabase::build(false);
        let job_repo =
            MockJobRepository::new().with_list(filter, default_request(), Ok(full_page()));

        let sut = JobListServiceImpl { db, job_repo };

        // Act
        let result = sut.get_user_jobs(&FOO, None, None).await;

        // Assert
        result.unwrap();
    }

    fn default_request() -> JobPageRequest {
        JobPageRequest::default()
    }

    fn full_page() -> JobPage {
        let jobs = ALL_JOBS.iter().copied().cloned().collect::<Vec<_>>();
        JobPage {
            total: jobs.len() as u64,
            page: 1,
            limit: 20,
            total_pages: 1,
            has_more: false,
            jobs,
        }
    }
}
