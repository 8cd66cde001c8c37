use crate::config::get_log_target;
use crate::error::PrincipalNotFound;
use crate::models::principal::{ChangeSet, PrincipalKind, PrincipalRef, Target};
use crate::services::identity_client::IdentityClient;
use anyhow::Result;
use log::{error, info};

/// Applies `changes` to `group`: description first, then the add, then the
/// remove. Stops at the first failure; steps already applied stay applied.
pub async fn update_group<C>(client: &C, group: &str, changes: &ChangeSet) -> Result<()>
where
    C: IdentityClient + ?Sized,
{
    if changes.is_empty() {
        info!(target:get_log_target(), "No changes requested for group '{}'", group);
        return Ok(());
    }

    if let Some(description) = &changes.description {
        info!(target:get_log_target(), "Updating description of group '{}'", group);
        client
            .update_group_description(group, description)
            .await
            .inspect_err(|e| {
                error!(target:get_log_target(), "Failed to update group '{}': {}", group, e);
            })?;
    }

    if let Some(target) = &changes.add {
        let principal = resolve_principal(client, target).await?;
        info!(target:get_log_target(),
            "Adding {} '{}' to group '{}'",
            principal.kind, principal.id, group
        );
        client
            .add_principal_to_group(group, &principal)
            .await
            .inspect_err(|e| {
                error!(target:get_log_target(),
                    "Failed to add {} '{}' to group '{}': {}",
                    principal.kind, principal.id, group, e
                );
            })?;
    }

    if let Some(target) = &changes.remove {
        let principal = resolve_principal(client, target).await?;
        info!(target:get_log_target(),
            "Removing {} '{}' from group '{}'",
            principal.kind, principal.id, group
        );
        client
            .remove_principal_from_group(group, &principal)
            .await
            .inspect_err(|e| {
                error!(target:get_log_target(),
                    "Failed to remove {} '{}' from group '{}': {}",
                    principal.kind, principal.id, group, e
                );
            })?;
    }

    Ok(())
}

/// Looks `target` up by name with the lookup matching its kind.
pub async fn resolve_principal<C>(client: &C, target: &Target) -> Result<PrincipalRef>
where
    C: IdentityClient + ?Sized,
{
    let found = match target.kind {
        PrincipalKind::Group => client.find_group_by_name(&target.name).await?,
        PrincipalKind::User => client.find_user_by_name(&target.name).await?,
    };
    match found {
        Some(principal) => Ok(principal),
        None => {
            error!(target:get_log_target(), "{} '{}' not found", target.kind, target.name);
            Err(PrincipalNotFound {
                kind: target.kind,
                name: target.name.clone(),
            }
            .into())
        }
    }
}
