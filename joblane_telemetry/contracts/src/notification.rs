use std::future::Future;

use joblane_models::job::Job;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait JobNotificationService: Send + Sync + 'static {
    /// Tells interested parties that a listing is no longer available.
    fn listing_removed(&self, job: &Job) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockJobNotificationService {
    pub fn with_listing_removed(mut self, job: Job, result: anyhow::Result<()>) -> Self {
        self.expect_listing_removed()
            .once()
            .with(mockall::predicate::eq(job))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
