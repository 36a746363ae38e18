use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{client::Toggl, ClientId, WorkspaceId};

/// Which time entries to include in a report
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Billable {
    #[default]
    Yes,
    No,
    Both,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    #[default]
    On,
    Off,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayHours {
    #[default]
    Decimal,
    Minutes,
}

/// Query parameters of the summary report, for both the JSON and the PDF variant
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SummaryParams {
    pub workspace_id: WorkspaceId,
    pub client_ids: ClientId,
    pub since: NaiveDate,
    pub until: NaiveDate,
    pub billable: Billable,
    pub rounding: Rounding,
    pub display_hours: DisplayHours,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    /// One entry per project
    pub data: Vec<ProjectSummary>,
}

impl SummaryReport {
    pub fn entry_count(&self) -> usize {
        self.data.iter().map(|project| project.items.len()).sum()
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: ProjectTitle,
    pub items: Vec<SummaryItem>,
    #[serde(default)]
    pub total_currencies: Vec<CurrencyAmount>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectTitle {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub title: ItemTitle,
    /// Duration in milliseconds
    pub time: u64,
    #[serde(default)]
    pub cur: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub rate: Option<Decimal>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ItemTitle {
    #[serde(default)]
    pub time_entry: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAmount {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
}

pub async fn get_summary_report(client: &Toggl, params: &SummaryParams) -> Result<SummaryReport> {
    log::info!("Requesting summary report...");

    let report = client
        .get_reports("summary")
        .query(params)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("Failed to parse Toggl summary report")?;

    log::info!("Requesting summary report...done");
    Ok(report)
}

pub async fn get_summary_report_pdf(client: &Toggl, params: &SummaryParams) -> Result<Vec<u8>> {
    log::info!("Requesting summary report PDF...");

    let pdf = client
        .get_reports("summary.pdf")
        .query(params)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    log::info!("Requesting summary report PDF...done");
    Ok(pdf.to_vec())
}
