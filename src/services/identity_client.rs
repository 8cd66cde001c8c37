use crate::models::principal::PrincipalRef;
use anyhow::Result;
use async_trait::async_trait;

/// Operations the group update needs from an SSO admin service.
///
/// Lookups return `Ok(None)` when the service answers that no such principal
/// exists; `Err` is reserved for transport and service failures.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn update_group_description(&self, group: &str, description: &str) -> Result<()>;

    async fn find_user_by_name(&self, name: &str) -> Result<Option<PrincipalRef>>;

    async fn find_group_by_name(&self, name: &str) -> Result<Option<PrincipalRef>>;

    async fn add_principal_to_group(&self, group: &str, principal: &PrincipalRef) -> Result<()>;

    async fn remove_principal_from_group(
        &self,
        group: &str,
        principal: &PrincipalRef,
    ) -> Result<()>;
}
