use anyhow::{Context as _, Result};
use reqwest::Method;
use serde::Deserialize;

use super::client::{ApiVersion, DineroSession, OrganizationId};

#[derive(Deserialize, Debug, Clone)]
pub struct Organization {
    pub name: String,
    pub id: u64,
}

pub async fn get_organizations(session: &DineroSession) -> Result<Vec<Organization>> {
    log::info!("Requesting organizations...");

    let organizations = session
        .request(Method::GET, ApiVersion::V1, "organizations")
        .query(&[("fields", "name,id")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("Failed to parse Dinero organizations")?;

    log::info!("Requesting organizations...done");
    Ok(organizations)
}

/// Looks up an organization by its exact name. Without a name, the organization is
/// only resolved if the user has exactly one.
pub async fn organization_id(
    session: &DineroSession,
    name: Option<&str>,
) -> Result<Option<OrganizationId>> {
    let organizations = get_organizations(session).await?;
    let Some(name) = name else {
        return Ok(match organizations.as_slice() {
            [organization] => Some(OrganizationId(organization.id)),
            _ => {
                log::warn!(
                    "Found {} organizations, please choose one by name",
                    organizations.len()
                );
                None
            }
        });
    };
    Ok(organizations
        .into_iter()
        .find(|organization| organization.name == name)
        .map(|organization| OrganizationId(organization.id)))
}
