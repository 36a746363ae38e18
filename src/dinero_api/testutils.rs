use serde_json::{json, Value};
use wiremock::MockServer;

use super::{AccessToken, Dinero, DineroEndpoints, DineroSession, OrganizationId};

pub const ORGANIZATION_ID: u64 = 4242;

pub fn endpoints_for(server: &MockServer) -> DineroEndpoints {
    DineroEndpoints {
        token_url: format!("{}/oauth/token", server.uri()),
        api_url: server.uri(),
    }
}

pub fn session_for(server: &MockServer) -> DineroSession {
    DineroSession::with_access_token(
        &endpoints_for(server),
        AccessToken::new("access-token".to_string()),
    )
}

pub fn dinero_for(server: &MockServer) -> Dinero {
    Dinero::new(session_for(server), OrganizationId(ORGANIZATION_ID))
}

/// One page of the contacts listing
pub fn contacts_page(contacts: Vec<Value>, page_size: usize) -> Value {
    json!({
        "Collection": contacts,
        "Pagination": {
            "MaxPageSizeAllowed": 1000,
            "PageSize": page_size,
            "Result": contacts.len(),
            "ResultWithoutFilter": contacts.len(),
            "Page": 0,
        },
    })
}

pub fn draft_invoice_json(product_lines: Vec<Value>) -> Value {
    json!({
        "Guid": "invoice-guid",
        "TimeStamp": "2020-08-31T10:00:00Z",
        "ContactGuid": "contact-guid",
        "Currency": "DKK",
        "Language": "da-DK",
        "Status": "Draft",
        "ShowLinesInclVat": false,
        "ProductLines": product_lines,
    })
}
