use anyhow::{anyhow, Result};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::fmt::{Display, Formatter};

use super::{
    auth::{fetch_access_token, AccessToken, DineroAuth},
    organizations::organization_id,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DineroEndpoints {
    pub token_url: String,
    pub api_url: String,
}

impl Default for DineroEndpoints {
    fn default() -> Self {
        Self {
            token_url: "https://authz.dinero.dk/dineroapi/oauth/token".to_string(),
            api_url: "https://api.dinero.dk".to_string(),
        }
    }
}

/// Versions of the Dinero API. Text lines on invoices need at least v1.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ApiVersion {
    V1,
    V1_2,
}

impl ApiVersion {
    fn path(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V1_2 => "v1.2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrganizationId(pub u64);

impl Display for OrganizationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated connection that isn't bound to an organization yet
pub struct DineroSession {
    client: Client,
    api_url: String,
    access_token: AccessToken,
}

impl DineroSession {
    pub async fn login(endpoints: &DineroEndpoints, auth: &DineroAuth) -> Result<Self> {
        let client = Client::new();
        let access_token = fetch_access_token(&client, &endpoints.token_url, auth).await?;
        Ok(Self::with_client(client, endpoints, access_token))
    }

    pub fn with_access_token(endpoints: &DineroEndpoints, access_token: AccessToken) -> Self {
        Self::with_client(Client::new(), endpoints, access_token)
    }

    fn with_client(client: Client, endpoints: &DineroEndpoints, access_token: AccessToken) -> Self {
        Self {
            client,
            api_url: endpoints.api_url.clone(),
            access_token,
        }
    }

    pub(super) fn request(
        &self,
        method: Method,
        version: ApiVersion,
        path: &str,
    ) -> RequestBuilder {
        let url = format!("{}/{}/{path}", self.api_url, version.path());
        log::debug!("{method} {url}");
        self.client
            .request(method, url)
            .bearer_auth(self.access_token.get())
    }
}

/// A session working on one organization
pub struct Dinero {
    session: DineroSession,
    organization_id: OrganizationId,
}

impl Dinero {
    /// Logs in and selects the organization with the given name, or the only
    /// organization of the user if no name is given.
    pub async fn connect(
        endpoints: &DineroEndpoints,
        auth: &DineroAuth,
        organization: Option<&str>,
    ) -> Result<Self> {
        let session = DineroSession::login(endpoints, auth).await?;
        let organization_id = organization_id(&session, organization)
            .await?
            .ok_or_else(|| match organization {
                Some(name) => anyhow!("Dinero organization not found: {name}"),
                None => anyhow!(
                    "Could not determine Dinero organization, please choose one by name"
                ),
            })?;
        Ok(Self::new(session, organization_id))
    }

    pub fn new(session: DineroSession, organization_id: OrganizationId) -> Self {
        Self {
            session,
            organization_id,
        }
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Request to a path below the organization
    pub(super) fn request(
        &self,
        method: Method,
        version: ApiVersion,
        path: &str,
    ) -> RequestBuilder {
        self.session.request(
            method,
            version,
            &format!("{}/{path}", self.organization_id),
        )
    }
}

/// Result of a call that changes data in Dinero. A failed mutation is reported, not
/// raised, so the caller knows for sure whether it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Done,
    Failed { status: StatusCode, body: String },
}

impl MutationOutcome {
    pub(super) async fn from_response(action: &str, response: Response) -> Result<Self> {
        let status = response.status();
        if status.is_success() {
            return Ok(Self::Done);
        }
        let body = response.text().await?;
        log::error!("{action} failed: {status}: {body}");
        Ok(Self::Failed { status, body })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::dinero_api::testutils::{dinero_for, endpoints_for, ORGANIZATION_ID};

    fn auth() -> DineroAuth {
        DineroAuth::new(
            "client-id".to_string(),
            "client-secret".to_string(),
            "api-key".to_string(),
        )
    }

    async fn mock_login(server: &MockServer, organizations: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "access-token"})),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/organizations"))
            .and(header("Authorization", "Bearer access-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(organizations))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn connect_selects_only_organization() {
        let server = MockServer::start().await;
        mock_login(&server, json!([{"name": "Geanix ApS", "id": 17}])).await;

        let dinero = Dinero::connect(&endpoints_for(&server), &auth(), None)
            .await
            .unwrap();
        assert_eq!(OrganizationId(17), dinero.organization_id());
    }

    #[tokio::test]
    async fn connect_selects_organization_by_name() {
        let server = MockServer::start().await;
        mock_login(
            &server,
            json!([{"name": "Geanix ApS", "id": 17}, {"name": "Other ApS", "id": 18}]),
        )
        .await;

        let dinero = Dinero::connect(&endpoints_for(&server), &auth(), Some("Other ApS"))
            .await
            .unwrap();
        assert_eq!(OrganizationId(18), dinero.organization_id());
    }

    #[tokio::test]
    async fn connect_fails_for_ambiguous_organization() {
        let server = MockServer::start().await;
        mock_login(
            &server,
            json!([{"name": "Geanix ApS", "id": 17}, {"name": "Other ApS", "id": 18}]),
        )
        .await;

        let err = Dinero::connect(&endpoints_for(&server), &auth(), None)
            .await
            .err()
            .unwrap();
        assert_eq!(
            "Could not determine Dinero organization, please choose one by name",
            err.to_string()
        );
    }

    #[tokio::test]
    async fn connect_fails_for_unknown_organization() {
        let server = MockServer::start().await;
        mock_login(&server, json!([{"name": "Geanix ApS", "id": 17}])).await;

        let err = Dinero::connect(&endpoints_for(&server), &auth(), Some("Other ApS"))
            .await
            .err()
            .unwrap();
        assert_eq!("Dinero organization not found: Other ApS", err.to_string());
    }

    #[tokio::test]
    async fn requests_are_scoped_to_organization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v1.2/{ORGANIZATION_ID}/invoices")))
            .and(header("Authorization", "Bearer access-token"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let response = dinero_for(&server)
            .request(Method::GET, ApiVersion::V1_2, "invoices")
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn failed_mutation_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/v1/{ORGANIZATION_ID}/contacts/guid")))
            .respond_with(ResponseTemplate::new(422).set_body_string("Invalid contact"))
            .mount(&server)
            .await;

        let response = dinero_for(&server)
            .request(Method::PUT, ApiVersion::V1, "contacts/guid")
            .send()
            .await
            .unwrap();
        let outcome = MutationOutcome::from_response("Updating contact", response)
            .await
            .unwrap();
        assert_eq!(
            MutationOutcome::Failed {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: "Invalid contact".to_string(),
            },
            outcome
        );
    }
}
