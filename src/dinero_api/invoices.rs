use anyhow::{Context as _, Result};
use reqwest::{header::ACCEPT, Method};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

use super::{
    client::{ApiVersion, Dinero, MutationOutcome},
    contacts::ContactGuid,
};
use crate::invoice::{InvoiceLine, Language, LineItem};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct InvoiceGuid(pub String);

impl Display for InvoiceGuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineType {
    #[default]
    Product,
    Text,
}

/// One entry of an invoice's `ProductLines`, which holds text lines as well.
///
/// Fields this crate doesn't use are kept in `other` so they survive an update. The
/// fields below are written back only when they hold a value, an explicit `null` is dropped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ProductLine {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub line_type: LineType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub base_amount_value: Option<Decimal>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl LineItem for ProductLine {
    fn text_description(&self) -> Option<&str> {
        match self.line_type {
            LineType::Text => Some(&self.description),
            LineType::Product => None,
        }
    }
}

impl From<InvoiceLine> for ProductLine {
    fn from(line: InvoiceLine) -> Self {
        match line {
            InvoiceLine::Text(line) => ProductLine {
                description: line.description,
                line_type: LineType::Text,
                account_number: None,
                quantity: None,
                unit: None,
                base_amount_value: None,
                other: Map::new(),
            },
            InvoiceLine::Product(line) => ProductLine {
                description: line.description,
                line_type: LineType::Product,
                account_number: Some(line.account_number),
                quantity: Some(line.quantity),
                unit: Some(line.unit),
                base_amount_value: Some(line.unit_amount),
                other: Map::new(),
            },
        }
    }
}

/// A full invoice record. Only the lines are interpreted, everything else is passed
/// back unchanged on update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    pub guid: InvoiceGuid,
    #[serde(default)]
    pub product_lines: Vec<ProductLine>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct InvoiceListEntry {
    guid: InvoiceGuid,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct InvoicesPage {
    collection: Vec<InvoiceListEntry>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct CreateInvoiceRequest<'a> {
    contact_guid: &'a ContactGuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
    language: &'a str,
    product_lines: &'a [ProductLine],
}

/// Creates a draft invoice. A rejected request is logged and reported in the outcome.
pub async fn create_invoice(
    client: &Dinero,
    contact: &ContactGuid,
    product_lines: &[ProductLine],
    currency: Option<&str>,
    language: Language,
) -> Result<MutationOutcome> {
    log::info!("Creating invoice...");

    let request = CreateInvoiceRequest {
        contact_guid: contact,
        currency,
        language: language.dinero_code(),
        product_lines,
    };
    let response = client
        .request(Method::POST, ApiVersion::V1_2, "invoices")
        .json(&request)
        .send()
        .await?;
    let outcome = MutationOutcome::from_response("Creating invoice", response).await?;

    log::info!("Creating invoice...done");
    Ok(outcome)
}

/// Returns the draft invoice of a contact. Exactly one draft invoice is expected, if
/// there is none or several, this returns `None`.
pub async fn get_draft_invoice(client: &Dinero, contact: &ContactGuid) -> Result<Option<Invoice>> {
    log::info!("Requesting draft invoices...");

    let query_filter = format!("ContactGuid eq '{contact}'");
    let response = client
        .request(Method::GET, ApiVersion::V1, "invoices")
        .query(&[
            ("fields", "Guid,Date,Description"),
            ("statusFilter", "Draft"),
            ("queryFilter", query_filter.as_str()),
        ])
        .send()
        .await?;
    if !response.status().is_success() {
        let status = response.status();
        log::error!(
            "Getting invoice list failed: {status}: {}",
            response.text().await?
        );
        return Ok(None);
    }
    let page: InvoicesPage = response
        .json()
        .await
        .context("Failed to parse Dinero invoice list")?;

    let guid = match page.collection.as_slice() {
        [invoice] => invoice.guid.clone(),
        [] => {
            log::warn!("No draft invoice found for contact {contact}");
            return Ok(None);
        }
        invoices => {
            log::warn!(
                "{} draft invoices found for contact {contact}, expected one",
                invoices.len()
            );
            return Ok(None);
        }
    };
    log::info!("Requesting draft invoices...done");

    get_invoice(client, &guid).await
}

async fn get_invoice(client: &Dinero, guid: &InvoiceGuid) -> Result<Option<Invoice>> {
    log::info!("Requesting invoice {guid}...");

    let response = client
        .request(Method::GET, ApiVersion::V1, &format!("invoices/{guid}"))
        .header(ACCEPT, "application/json")
        .send()
        .await?;
    if !response.status().is_success() {
        let status = response.status();
        log::error!("Getting invoice failed: {status}: {}", response.text().await?);
        return Ok(None);
    }
    let invoice = response
        .json()
        .await
        .context("Failed to parse Dinero invoice")?;

    log::info!("Requesting invoice {guid}...done");
    Ok(Some(invoice))
}

/// Uploads the invoice as it is. A rejected request is logged and reported in the outcome.
pub async fn update_invoice(client: &Dinero, invoice: &Invoice) -> Result<MutationOutcome> {
    log::info!("Updating invoice {}...", invoice.guid);

    let response = client
        .request(
            Method::PUT,
            ApiVersion::V1_2,
            &format!("invoices/{}", invoice.guid),
        )
        .json(invoice)
        .send()
        .await?;
    let outcome = MutationOutcome::from_response("Updating invoice", response).await?;

    log::info!("Updating invoice {}...done", invoice.guid);
    Ok(outcome)
}
