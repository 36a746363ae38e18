use anyhow::Result;

use crate::args::{DineroArgs, TogglArgs};
use crate::dinero_api::{DineroAuth, DineroEndpoints};
use crate::terminal;
use crate::toggl_api::TogglEndpoints;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TogglConfig {
    pub api_token: String,
    pub endpoints: TogglEndpoints,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DineroConfig {
    pub auth: DineroAuth,
    pub organization: Option<String>,
    pub endpoints: DineroEndpoints,
}

impl TogglConfig {
    /// Missing credentials are prompted for
    pub fn from_args(args: &TogglArgs) -> Result<Self> {
        let defaults = TogglEndpoints::default();
        Ok(Self {
            api_token: or_prompt_secret(&args.toggl_api_token, "Toggl API token")?,
            endpoints: TogglEndpoints {
                api_url: args.toggl_api_url.clone().unwrap_or(defaults.api_url),
                reports_url: args
                    .toggl_reports_url
                    .clone()
                    .unwrap_or(defaults.reports_url),
            },
        })
    }
}

impl DineroConfig {
    /// Missing credentials are prompted for
    pub fn from_args(args: &DineroArgs) -> Result<Self> {
        let defaults = DineroEndpoints::default();
        let client_id = match &args.dinero_client_id {
            Some(client_id) => client_id.clone(),
            None => terminal::prompt("Dinero client id")?,
        };
        let client_secret = or_prompt_secret(&args.dinero_client_secret, "Dinero client secret")?;
        let api_key = or_prompt_secret(&args.dinero_api_key, "Dinero API key")?;
        Ok(Self {
            auth: DineroAuth::new(client_id, client_secret, api_key),
            organization: args.dinero_organization.clone(),
            endpoints: DineroEndpoints {
                token_url: args.dinero_token_url.clone().unwrap_or(defaults.token_url),
                api_url: args.dinero_api_url.clone().unwrap_or(defaults.api_url),
            },
        })
    }
}

fn or_prompt_secret(value: &Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value.clone()),
        None => terminal::prompt_secret(prompt),
    }
}
