use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::client::Toggl;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TogglClient {
    pub id: ClientId,
    pub name: String,
}

pub async fn get_clients(client: &Toggl) -> Result<Vec<TogglClient>> {
    log::info!("Requesting clients...");

    // Toggl sends `null` instead of an empty list
    let clients: Option<Vec<TogglClient>> = client
        .get_api("clients")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("Failed to parse Toggl clients")?;

    log::info!("Requesting clients...done");
    Ok(clients.unwrap_or_default())
}

/// Looks up a client by its exact name
pub async fn client_id(client: &Toggl, name: &str) -> Result<Option<ClientId>> {
    let clients = get_clients(client).await?;
    Ok(clients
        .into_iter()
        .find(|toggl_client| toggl_client.name == name)
        .map(|toggl_client| toggl_client.id))
}
