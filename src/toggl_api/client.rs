use reqwest::{Client, RequestBuilder};

/// Sent as `user_agent` parameter with every reports API request
pub const USER_AGENT: &str = "toggl-dinero";

/// Password that goes along with an API token in basic auth
const API_TOKEN_PASSWORD: &str = "api_token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TogglEndpoints {
    pub api_url: String,
    pub reports_url: String,
}

impl Default for TogglEndpoints {
    fn default() -> Self {
        Self {
            api_url: "https://api.track.toggl.com/api/v8".to_string(),
            reports_url: "https://api.track.toggl.com/reports/api/v2".to_string(),
        }
    }
}

pub struct Toggl {
    client: Client,
    api_token: String,
    endpoints: TogglEndpoints,
}

impl Toggl {
    pub fn new(api_token: String, endpoints: TogglEndpoints) -> Toggl {
        Toggl {
            client: Client::new(),
            api_token,
            endpoints,
        }
    }

    pub(super) fn get_api(&self, path: &str) -> RequestBuilder {
        self.get(format!("{}/{path}", self.endpoints.api_url))
    }

    pub(super) fn get_reports(&self, path: &str) -> RequestBuilder {
        self.get(format!("{}/{path}", self.endpoints.reports_url))
            .query(&[("user_agent", USER_AGENT)])
    }

    fn get(&self, url: String) -> RequestBuilder {
        log::debug!("GET {url}");
        self.client
            .get(url)
            .basic_auth(&self.api_token, Some(API_TOKEN_PASSWORD))
    }
}
