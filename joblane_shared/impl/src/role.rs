use joblane_di::Build;
use joblane_models::user::UserId;
use joblane_shared_contracts::role::RoleService;
use joblane_utils::trace_instrument;

#[derive(Debug, Clone, Copy, Build)]
pub struct RoleServiceImpl;

impl RoleService for RoleServiceImpl {
    // TODO: look up the caller's roles in the account system once one exists
    #[trace_instrument(skip(self))]
    async fn is_admin(&self, _user_id: &UserId) -> anyhow::Result<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn nobody_is_admin() {
        // Arrange
        let sut = RoleServiceImpl;
        let user_id = UserId::try_new("someone").unwrap();

        // Act
        let result = sut.is_admin(&user_id).await;

        // Assert
        assert!(!result.unwrap());
    }
}
