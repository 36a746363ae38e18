use serde_json::{json, Value};
use wiremock::MockServer;

use super::{SummaryReport, Toggl, TogglEndpoints};

pub const API_TOKEN: &str = "__DUMMY_API_KEY__";

/// Basic auth header for [API_TOKEN]
pub const AUTHORIZATION: &str = "Basic X19EVU1NWV9BUElfS0VZX186YXBpX3Rva2Vu";

pub fn endpoints_for(server: &MockServer) -> TogglEndpoints {
    TogglEndpoints {
        api_url: format!("{}/api/v8", server.uri()),
        reports_url: format!("{}/reports/api/v2", server.uri()),
    }
}

pub async fn mock_toggl() -> (MockServer, Toggl) {
    let server = MockServer::start().await;
    let toggl = Toggl::new(API_TOKEN.to_string(), endpoints_for(&server));
    (server, toggl)
}

pub fn clients_json() -> Value {
    json!([
        {"id": 1234, "wid": 5657, "name": "Foo", "at": "2019-12-23T12:23:07+00:00"},
        {"id": 8901, "wid": 2345, "name": "Bar", "at": "2019-12-23T12:23:12+00:00"}
    ])
}

pub fn workspaces_json() -> Value {
    json!([
        {
            "id": 1234, "name": "Foo",
            "profile": 101, "premium": true, "admin": true,
            "default_hourly_rate": 42, "default_currency": "DKK",
            "rounding": 0, "rounding_minutes": 6,
            "at": "2020-08-07T15:22:00+00:00"
        },
        {
            "id": 5678, "name": "Bar",
            "profile": 102, "premium": true, "admin": false,
            "default_hourly_rate": 43, "default_currency": "DKK",
            "rounding": 0, "rounding_minutes": 6,
            "at": "2020-08-07T15:23:00+00:00"
        }
    ])
}

/// Two projects, "Things" with 0.2 and 5.4 hours and "Nothing" with 0.1 hours
pub const SUMMARY_REPORT_JSON: &str = r##"{
    "data": [
        {
            "id": 1234,
            "items": [
                {"cur": "DKK", "rate": 1000.0, "sum": 200.0, "time": 720000, "title": {"time_entry": "Some stuff"}},
                {"cur": "DKK", "rate": 1000.0, "sum": 5400.0, "time": 19440000, "title": {"time_entry": "Other stuff"}}
            ],
            "time": 20160000,
            "title": {"client": "Client", "color": "0", "hex_color": "#0b83d9", "project": "Things"},
            "total_currencies": [{"amount": 5600.0, "currency": "DKK"}]
        },
        {
            "id": 5678,
            "items": [
                {"cur": "DKK", "rate": 2000.0, "sum": 200.0, "time": 360000, "title": {"time_entry": "Wasting time"}}
            ],
            "time": 360000,
            "title": {"client": "DEIF", "color": "0", "hex_color": "#525266", "project": "Nothing"},
            "total_currencies": [{"amount": 200.0, "currency": "DKK"}]
        }
    ],
    "total_billable": 20520000,
    "total_currencies": [{"amount": 5800.0, "currency": "DKK"}],
    "total_grand": 20520000
}"##;

pub fn summary_report_fixture() -> SummaryReport {
    serde_json::from_str(SUMMARY_REPORT_JSON).unwrap()
}

/// A summary report with the given project entries
pub fn summary_report_json(data: Value) -> SummaryReport {
    serde_json::from_value(json!({ "data": data })).unwrap()
}
