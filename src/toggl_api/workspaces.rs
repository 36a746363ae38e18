use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::client::Toggl;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct WorkspaceId(pub u64);

impl Display for WorkspaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
}

pub async fn get_workspaces(client: &Toggl) -> Result<Vec<Workspace>> {
    log::info!("Requesting workspaces...");

    let workspaces: Option<Vec<Workspace>> = client
        .get_api("workspaces")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("Failed to parse Toggl workspaces")?;

    log::info!("Requesting workspaces...done");
    Ok(workspaces.unwrap_or_default())
}

/// Looks up a workspace by its exact name. Without a name, the workspace is only
/// resolved if the user has exactly one.
pub async fn workspace_id(client: &Toggl, name: Option<&str>) -> Result<Option<WorkspaceId>> {
    let workspaces = get_workspaces(client).await?;
    let Some(name) = name else {
        return Ok(match workspaces.as_slice() {
            [workspace] => Some(workspace.id),
            _ => {
                log::warn!(
                    "Found {} workspaces, please choose one by name",
                    workspaces.len()
                );
                None
            }
        });
    };
    Ok(workspaces
        .into_iter()
        .find(|workspace| workspace.name == name)
        .map(|workspace| workspace.id))
}
