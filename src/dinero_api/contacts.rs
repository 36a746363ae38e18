use anyhow::{anyhow, bail, Context as _, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

use super::client::{ApiVersion, Dinero, MutationOutcome};

const EXTERNAL_REFERENCE: &str = "ExternalReference";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContactGuid(pub String);

impl Display for ContactGuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contact as returned by the contacts listing. The listing names its fields the
/// way they are requested in the `fields` parameter.
#[derive(Deserialize, Debug, Clone)]
struct ContactListEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "contactGuid")]
    contact_guid: ContactGuid,
    #[serde(rename = "ExternalReference", default)]
    external_reference: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ContactsPage {
    collection: Vec<ContactListEntry>,
    pagination: Pagination,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Pagination {
    /// Number of contacts on this page
    result: u64,
    page_size: u64,
}

/// Walks through all pages of the contacts listing and returns the first contact
/// accepted by `is_match`
async fn find_contact(
    client: &Dinero,
    fields: &str,
    is_match: impl Fn(&ContactListEntry) -> bool,
) -> Result<Option<ContactGuid>> {
    log::info!("Requesting contacts...");

    let mut page_number: u32 = 0;
    loop {
        log::info!("Requesting contacts...page {}...", page_number + 1);
        let page_param = page_number.to_string();
        let page: ContactsPage = client
            .request(Method::GET, ApiVersion::V1, "contacts")
            .query(&[("fields", fields), ("page", page_param.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse Dinero contacts")?;

        let is_last_page = page.collection.is_empty()
            || page.pagination.result < page.pagination.page_size;
        if let Some(contact) = page.collection.into_iter().find(|contact| is_match(contact)) {
            log::info!("Requesting contacts...done");
            return Ok(Some(contact.contact_guid));
        }
        if is_last_page {
            break;
        }
        page_number += 1;
    }

    log::info!("Requesting contacts...done");
    Ok(None)
}

/// Looks up a contact by its exact name
pub async fn contact_id(client: &Dinero, name: &str) -> Result<Option<ContactGuid>> {
    find_contact(client, "name,contactGuid", |contact| {
        contact.name.as_deref() == Some(name)
    })
    .await
}

/// Looks up the contact whose `ExternalReference` is a JSON object with `key` set to
/// `value`. Contacts with an `ExternalReference` that isn't valid JSON are skipped.
pub async fn contact_with_external_reference(
    client: &Dinero,
    key: &str,
    value: &Value,
) -> Result<Option<ContactGuid>> {
    find_contact(client, "name,contactGuid,ExternalReference", |contact| {
        external_reference_matches(contact, key, value)
    })
    .await
}

fn external_reference_matches(contact: &ContactListEntry, key: &str, value: &Value) -> bool {
    let Some(external_reference) = contact
        .external_reference
        .as_deref()
        .filter(|reference| !reference.is_empty())
    else {
        return false;
    };
    match serde_json::from_str::<Value>(external_reference) {
        Ok(Value::Object(reference)) => reference.get(key) == Some(value),
        Ok(_) => {
            log::warn!(
                "Bad ExternalReference value of contact {}: not a JSON object: {external_reference}",
                contact.contact_guid,
            );
            false
        }
        Err(err) => {
            log::warn!(
                "Bad ExternalReference value of contact {}: {err}: {external_reference}",
                contact.contact_guid,
            );
            false
        }
    }
}

/// Full contact record. Kept as plain JSON so that updating it doesn't drop fields.
pub async fn get_contact(client: &Dinero, contact: &ContactGuid) -> Result<Value> {
    log::info!("Requesting contact {contact}...");

    let contact_data = client
        .request(Method::GET, ApiVersion::V1, &format!("contacts/{contact}"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("Failed to parse Dinero contact")?;

    log::info!("Requesting contact {contact}...done");
    Ok(contact_data)
}

pub async fn update_contact(
    client: &Dinero,
    contact: &ContactGuid,
    contact_data: &Value,
) -> Result<MutationOutcome> {
    log::info!("Updating contact {contact}...");

    let response = client
        .request(Method::PUT, ApiVersion::V1, &format!("contacts/{contact}"))
        .json(contact_data)
        .send()
        .await?;
    let outcome = MutationOutcome::from_response("Updating contact", response).await?;

    log::info!("Updating contact {contact}...done");
    Ok(outcome)
}

/// Sets `key` in the JSON object stored in the `ExternalReference` field of a contact
/// record, keeping all other keys. A missing or empty field counts as an empty object.
pub fn set_external_reference(contact_data: &mut Value, key: &str, value: Value) -> Result<()> {
    let contact_data = contact_data
        .as_object_mut()
        .ok_or_else(|| anyhow!("Contact record is not a JSON object"))?;
    let mut reference = match contact_data.get(EXTERNAL_REFERENCE) {
        None | Some(Value::Null) => Map::new(),
        Some(Value::String(reference)) if reference.is_empty() => Map::new(),
        Some(Value::String(reference)) => {
            let parsed = serde_json::from_str::<Value>(reference).with_context(|| {
                anyhow!("Existing ExternalReference isn't valid JSON: {reference}")
            })?;
            match parsed {
                Value::Object(reference) => reference,
                _ => bail!("Existing ExternalReference isn't a JSON object: {reference}"),
            }
        }
        Some(other) => bail!("Unexpected ExternalReference value: {other}"),
    };
    reference.insert(key.to_string(), value);
    contact_data.insert(
        EXTERNAL_REFERENCE.to_string(),
        Value::String(serde_json::to_string(&reference)?),
    );
    Ok(())
}
