use anyhow::{bail, ensure, Result};
use rust_decimal::{Decimal, RoundingStrategy};

use super::{language::Language, line::InvoiceLine};
use crate::period::Dates;
use crate::toggl_api::{ProjectSummary, SummaryReport};

const MS_PER_HOUR: u64 = 60 * 60 * 1000;

/// Description used for time entries that aren't assigned to a project
const NO_PROJECT: &str = "(no project)";

/// The lines generated for one billing period, from header to footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBlock {
    pub lines: Vec<InvoiceLine>,
    /// Currency shared by all lines, `None` if the report had no projects
    pub currency: Option<String>,
    pub total_hours: Decimal,
}

/// Renders a summary report into a header line, one product line per time entry and a
/// footer line with the total hours.
///
/// Fails if the report mixes currencies, since an invoice has exactly one currency.
pub fn generate_block(
    report: &SummaryReport,
    dates: &Dates,
    language: Language,
) -> Result<GeneratedBlock> {
    let currency = invoice_currency(report)?;

    let mut lines = Vec::with_capacity(report.entry_count() + 2);
    lines.push(InvoiceLine::new_text(language.header(dates)));

    let mut total_hours = Decimal::ZERO;
    for project in &report.data {
        let project_name = project.title.project.as_deref().unwrap_or(NO_PROJECT);
        for item in &project.items {
            let hours = ms_to_hours(item.time);
            total_hours += hours;
            let rate = item.rate.unwrap_or_else(|| {
                log::warn!(
                    "Time entry {:?} of project {project_name:?} has no rate, billing it at 0",
                    item.title.time_entry,
                );
                Decimal::ZERO
            });
            let description = format!(
                "{project_name}: {}",
                item.title.time_entry.as_deref().unwrap_or_default()
            );
            lines.push(InvoiceLine::new_hours(description, hours, rate));
        }
        // Rounded once per project, not per line
        total_hours = round_hours(total_hours);
    }

    lines.push(InvoiceLine::new_text(
        language.footer(&format_hours(total_hours)),
    ));

    Ok(GeneratedBlock {
        lines,
        currency,
        total_hours,
    })
}

fn invoice_currency(report: &SummaryReport) -> Result<Option<String>> {
    let mut invoice_currency: Option<&str> = None;
    for project in &report.data {
        let currency = project_currency(project)?;
        match invoice_currency {
            None => invoice_currency = Some(currency),
            Some(expected) => ensure!(
                expected == currency,
                "Report mixes currencies {expected} and {currency}, can't put them on one invoice",
            ),
        }
        for item in &project.items {
            ensure!(
                item.cur.as_deref() == Some(currency),
                "Time entry {:?} has currency {:?} but its project {:?} uses {currency}",
                item.title.time_entry,
                item.cur,
                project.title.project,
            );
        }
    }
    Ok(invoice_currency.map(str::to_string))
}

fn project_currency(project: &ProjectSummary) -> Result<&str> {
    match project.total_currencies.as_slice() {
        [total] => match total.currency.as_deref() {
            Some(currency) => Ok(currency),
            None => bail!("Project {:?} has no currency", project.title.project),
        },
        totals => bail!(
            "Expected exactly one currency for project {:?} but found {}",
            project.title.project,
            totals.len(),
        ),
    }
}

/// Converts a duration to hours, rounded half-up to 2 decimals
pub fn ms_to_hours(ms: u64) -> Decimal {
    round_hours(Decimal::from(ms) / Decimal::from(MS_PER_HOUR))
}

fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats hours without trailing zeros but with at least one decimal, e.g. `5.6` or `3.0`
pub fn format_hours(hours: Decimal) -> String {
    let hours = hours.normalize();
    if hours.scale() == 0 {
        format!("{hours}.0")
    } else {
        hours.to_string()
    }
}
