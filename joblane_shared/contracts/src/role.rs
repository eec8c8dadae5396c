use std::future::Future;

use joblane_models::user::UserId;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RoleService: Send + Sync + 'static {
    /// Returns whether the given user has administrative privileges.
    fn is_admin(&self, user_id: &UserId) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockRoleService {
    pub fn with_is_admin(mut self, user_id: UserId, result: bool) -> Self {
        self.expect_is_admin()
            .once()
            .with(mockall::predicate::eq(user_id))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
