use std::future::Future;

use joblane_models::{job::JobId, user::UserId};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait JobViewTrackingService: Send + Sync + 'static {
    /// Counts one view of the given job. The viewer is absent for anonymous
    /// visitors; owners' views are never tracked.
    fn track(
        &self,
        job_id: &JobId,
        viewer: Option<UserId>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockJobViewTrackingService {
    pub fn with_track(
        mut self,
        job_id: JobId,
        viewer: Option<UserId>,
        result: anyhow::Result<()>,
    ) -> Self {
        self.expect_track()
            .once()
            .with(mockall::predicate::eq(job_id), mockall::predicate::eq(viewer))
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
