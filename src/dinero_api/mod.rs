mod auth;
mod client;
mod contacts;
mod invoices;
mod organizations;

#[cfg(test)]
pub mod testutils;

pub use auth::{fetch_access_token, AccessToken, DineroAuth};
pub use client::{Dinero, DineroEndpoints, DineroSession, MutationOutcome, OrganizationId};
pub use contacts::{
    contact_id, contact_with_external_reference, get_contact, set_external_reference,
    update_contact, ContactGuid,
};
pub use invoices::{
    create_invoice, get_draft_invoice, update_invoice, Invoice, InvoiceGuid, LineType,
    ProductLine,
};
pub use organizations::{get_organizations, organization_id, Organization};

/// Key under which the Toggl client id is stored in a contact's `ExternalReference`
pub const TOGGL_REFERENCE_KEY: &str = "toggl";
