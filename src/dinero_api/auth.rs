use anyhow::{Context as _, Result};
use reqwest::Client;
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

const SCOPE: &str = "read write";

/// Credentials of a Dinero API client plus the API key of the organization user
#[derive(Clone, PartialEq, Eq)]
pub struct DineroAuth {
    client_id: String,
    client_secret: String,
    api_key: String,
}

impl DineroAuth {
    pub fn new(client_id: String, client_secret: String, api_key: String) -> Self {
        Self {
            client_id,
            client_secret,
            api_key,
        }
    }
}

impl Debug for DineroAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DineroAuth({}, *****, *****)", self.client_id)
    }
}

#[derive(Clone)]
pub struct AccessToken {
    access_token: String,
}

impl AccessToken {
    pub fn new(access_token: String) -> AccessToken {
        AccessToken { access_token }
    }

    pub fn get(&self) -> &str {
        &self.access_token
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(*****)")
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// OAuth2 password grant, Dinero uses the API key as both username and password
pub async fn fetch_access_token(
    client: &Client,
    token_url: &str,
    auth: &DineroAuth,
) -> Result<AccessToken> {
    log::info!("Requesting access token...");

    let response: TokenResponse = client
        .post(token_url)
        .basic_auth(&auth.client_id, Some(&auth.client_secret))
        .form(&[
            ("grant_type", "password"),
            ("scope", SCOPE),
            ("username", auth.api_key.as_str()),
            ("password", auth.api_key.as_str()),
        ])
        .send()
        .await?
        .error_for_status()
        .context("Dinero rejected the credentials")?
        .json()
        .await
        .context("Failed to parse Dinero token response")?;

    log::info!("Requesting access token...done");
    Ok(AccessToken::new(response.access_token))
}
