use anyhow::{anyhow, Context as _, Result};
use chrono::{Local, NaiveDate};
use console::{style, StyledObject};
use log::LevelFilter;
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::args::{Args, Command, InvoiceArgs, LinkArgs};
use crate::config::{DineroConfig, TogglConfig};
use crate::dinero_api::{
    self, ContactGuid, Dinero, MutationOutcome, ProductLine, TOGGL_REFERENCE_KEY,
};
use crate::invoice::{self, format_hours, InvoiceLine, Placement};
use crate::terminal::{BulletPointPrinter, LineWriter, StdoutLineWriter};
use crate::toggl_api::{self, ClientId, Rounding, SummaryParams, Toggl};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn main(args: Args, log_level: Option<LevelFilter>) -> Result<()> {
    if let Some(level) = log_level {
        println!(
            "{}",
            style(format!("Verbose logging is enabled. (LEVEL={level})")).yellow()
        );
    }
    match args.command {
        Command::Version => main_version(),
        Command::Invoice(args) => main_invoice(args, Local::now().date_naive()).await,
        Command::Link(args) => main_link(args).await,
    }
}

fn main_version() -> Result<()> {
    println!("{}", style(VERSION).bold());
    Ok(())
}

async fn main_invoice(args: InvoiceArgs, today: NaiveDate) -> Result<()> {
    let toggl_config = TogglConfig::from_args(&args.toggl)?;
    let dinero_config = DineroConfig::from_args(&args.dinero)?;

    let toggl = Toggl::new(toggl_config.api_token, toggl_config.endpoints);
    let client_id = resolve_toggl_client(&toggl, &args.client).await?;
    let workspace_id = toggl_api::workspace_id(&toggl, args.workspace.as_deref())
        .await?
        .ok_or_else(|| match &args.workspace {
            Some(name) => anyhow!("Toggl workspace not found: {name}"),
            None => anyhow!(
                "Could not determine Toggl workspace, please choose one with --workspace"
            ),
        })?;

    let dates = args.period.dates(today);
    let params = SummaryParams {
        workspace_id,
        client_ids: client_id,
        since: dates.since,
        until: dates.until,
        billable: args.billable,
        rounding: if args.no_rounding {
            Rounding::Off
        } else {
            Rounding::On
        },
        display_hours: args.display_hours,
    };
    let report = toggl_api::get_summary_report(&toggl, &params).await?;
    let pdf = toggl_api::get_summary_report_pdf(&toggl, &params).await?;
    let pdf_path = write_report_pdf(&args.report_dir, &args.client, &pdf).await?;
    println!("Summary report written to {}", pdf_path.display());

    let block = invoice::generate_block(&report, &dates, args.language)?;
    println!();
    println!("{}", style_header("Invoice lines:"));
    print_lines(&BulletPointPrinter::new_stdout(), &block.lines);
    println!(
        "{} hours in {} time entries",
        style_hours(&format_hours(block.total_hours)),
        report.entry_count(),
    );
    println!();

    let dinero = Dinero::connect(
        &dinero_config.endpoints,
        &dinero_config.auth,
        dinero_config.organization.as_deref(),
    )
    .await?;
    let contact = dinero_api::contact_with_external_reference(
        &dinero,
        TOGGL_REFERENCE_KEY,
        &json!(client_id.0),
    )
    .await?
    .ok_or_else(|| {
        anyhow!(
            "Could not find linked Dinero contact for Toggl client {} ({client_id}), use the link command first",
            args.client,
        )
    })?;

    let lines: Vec<ProductLine> = block.lines.into_iter().map(ProductLine::from).collect();
    if args.update {
        update_draft_invoice(&dinero, &contact, &lines).await
    } else {
        let outcome = dinero_api::create_invoice(
            &dinero,
            &contact,
            &lines,
            block.currency.as_deref(),
            args.language,
        )
        .await?;
        print_outcome("Creating invoice", &outcome);
        Ok(())
    }
}

async fn update_draft_invoice(
    dinero: &Dinero,
    contact: &ContactGuid,
    lines: &[ProductLine],
) -> Result<()> {
    let mut draft = dinero_api::get_draft_invoice(dinero, contact)
        .await?
        .ok_or_else(|| anyhow!("Could not determine invoice to update"))?;

    let reconciled = invoice::replace_block(&draft.product_lines, lines);
    print_placement(&StdoutLineWriter, &reconciled.placement);
    draft.product_lines = reconciled.lines;

    let outcome = dinero_api::update_invoice(dinero, &draft).await?;
    print_outcome("Updating invoice", &outcome);
    Ok(())
}

async fn main_link(args: LinkArgs) -> Result<()> {
    let toggl_config = TogglConfig::from_args(&args.toggl)?;
    let dinero_config = DineroConfig::from_args(&args.dinero)?;

    let toggl = Toggl::new(toggl_config.api_token, toggl_config.endpoints);
    let client_id = resolve_toggl_client(&toggl, &args.toggl_client).await?;

    let dinero = Dinero::connect(
        &dinero_config.endpoints,
        &dinero_config.auth,
        dinero_config.organization.as_deref(),
    )
    .await?;
    let contact = dinero_api::contact_id(&dinero, &args.dinero_contact)
        .await?
        .ok_or_else(|| anyhow!("Dinero contact not found: {}", args.dinero_contact))?;

    let mut contact_data = dinero_api::get_contact(&dinero, &contact).await?;
    dinero_api::set_external_reference(&mut contact_data, TOGGL_REFERENCE_KEY, json!(client_id.0))
        .with_context(|| anyhow!("Can't link Dinero contact {}", args.dinero_contact))?;
    let outcome = dinero_api::update_contact(&dinero, &contact, &contact_data).await?;
    print_outcome(
        &format!(
            "Linking Toggl client {} to Dinero contact {}",
            args.toggl_client, args.dinero_contact
        ),
        &outcome,
    );
    Ok(())
}

async fn resolve_toggl_client(toggl: &Toggl, name: &str) -> Result<ClientId> {
    toggl_api::client_id(toggl, name)
        .await?
        .ok_or_else(|| anyhow!("Toggl client not found: {name}"))
}

/// Path separators in the client name are replaced, so the report always lands
/// directly in `report_dir`
async fn write_report_pdf(report_dir: &Path, client: &str, pdf: &[u8]) -> Result<PathBuf> {
    let file_name = client.replace(['/', '\\'], "_");
    let path = report_dir.join(format!("{file_name}_report.pdf"));
    tokio::fs::write(&path, pdf)
        .await
        .with_context(|| anyhow!("Failed to write summary report to {}", path.display()))?;
    Ok(path)
}

fn print_lines<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, lines: &[InvoiceLine]) {
    let product_printer = printer.indent();
    for line in lines {
        match line {
            InvoiceLine::Text(line) => printer.print_item(style_text_line(&line.description)),
            InvoiceLine::Product(line) => product_printer.print_item(format!(
                "{} {} {} x {}",
                line.description,
                style_hours(&format_hours(line.quantity)),
                line.unit,
                line.unit_amount,
            )),
        }
    }
}

fn print_placement(writer: &impl LineWriter, placement: &Placement) {
    let message = match placement {
        Placement::Appended => {
            "No generated lines found in the invoice, appending the new lines".to_string()
        }
        Placement::Replaced { header, footer } => format!(
            "Replacing generated lines {}-{} of the invoice",
            header + 1,
            footer + 1
        ),
        Placement::AppendedAfterOrphanedHeader { header } => format!(
            "Could not find matching footer line for line {}, appending the new lines",
            header + 1,
        ),
    };
    if placement.is_warning() {
        writer.write_line(&format!("{} {message}", style_warning("Warning:")));
    } else {
        writer.write_line(&message);
    }
}

fn print_outcome(action: &str, outcome: &MutationOutcome) {
    match outcome {
        MutationOutcome::Done => println!("{action}...{}", style("done").green()),
        MutationOutcome::Failed { status, body } => {
            println!("{} {status}", style_error(&format!("Error: {action} failed:")));
            println!("{body}");
        }
    }
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

fn style_text_line(description: &str) -> StyledObject<&str> {
    style(description).italic()
}

fn style_hours(hours: &str) -> StyledObject<&str> {
    style(hours).cyan().bold()
}

fn style_warning(message: &str) -> StyledObject<&str> {
    style(message).yellow().bold()
}

fn style_error(message: &str) -> StyledObject<&str> {
    style(message).red().bold()
}
