use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::invoice::Language;
use crate::period::Period;
use crate::toggl_api::{Billable, DisplayHours};

/// Dinero invoicing from Toggl time entries.
#[derive(Parser, Debug)]
#[command(name = "toggl-dinero")]
pub struct Args {
    /// Enable verbose output, repeat for more (-vvvv for debug output)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the version
    Version,

    /// Create a draft invoice from the Toggl time entries of a client, or update the
    /// existing draft invoice with them
    Invoice(InvoiceArgs),

    /// Link a Toggl client to a Dinero contact, so that invoices for the client go to
    /// that contact
    Link(LinkArgs),
}

#[derive(Debug, ClapArgs)]
pub struct InvoiceArgs {
    /// Name of the Toggl client
    pub client: String,

    /// Period to invoice
    #[arg(value_enum, default_value_t = Period::ThisMonth)]
    pub period: Period,

    /// Name of the Toggl workspace, can be omitted if there is only one
    #[arg(long, env = "TOGGL_WORKSPACE")]
    pub workspace: Option<String>,

    /// Which time entries to invoice
    #[arg(long, value_enum, default_value_t = Billable::Yes)]
    pub billable: Billable,

    /// Don't apply the workspace's rounding settings to the time entries
    #[arg(long)]
    pub no_rounding: bool,

    /// How durations are displayed in the PDF report
    #[arg(long, value_enum, default_value_t = DisplayHours::Decimal)]
    pub display_hours: DisplayHours,

    /// Language of the invoice
    #[arg(long, value_enum, default_value_t = Language::Da)]
    pub language: Language,

    /// Replace the generated lines in the existing draft invoice of the contact instead
    /// of creating a new invoice
    #[arg(long)]
    pub update: bool,

    /// Directory to write the PDF summary report to
    #[arg(long, default_value = ".")]
    pub report_dir: PathBuf,

    #[command(flatten)]
    pub toggl: TogglArgs,

    #[command(flatten)]
    pub dinero: DineroArgs,
}

#[derive(Debug, ClapArgs)]
pub struct LinkArgs {
    /// Name of the Toggl client
    pub toggl_client: String,

    /// Name of the Dinero contact
    pub dinero_contact: String,

    #[command(flatten)]
    pub toggl: TogglArgs,

    #[command(flatten)]
    pub dinero: DineroArgs,
}

#[derive(Debug, ClapArgs)]
pub struct TogglArgs {
    /// Toggl API token, will be prompted for if not given
    #[arg(long, env = "TOGGL_API_TOKEN", hide_env_values = true)]
    pub toggl_api_token: Option<String>,

    #[arg(long, env = "TOGGL_API_URL", hide = true)]
    pub toggl_api_url: Option<String>,

    #[arg(long, env = "TOGGL_REPORTS_URL", hide = true)]
    pub toggl_reports_url: Option<String>,
}

#[derive(Debug, ClapArgs)]
pub struct DineroArgs {
    /// Dinero API client id, will be prompted for if not given
    #[arg(long, env = "DINERO_CLIENT_ID")]
    pub dinero_client_id: Option<String>,

    /// Dinero API client secret, will be prompted for if not given
    #[arg(long, env = "DINERO_CLIENT_SECRET", hide_env_values = true)]
    pub dinero_client_secret: Option<String>,

    /// Dinero API key of the organization, will be prompted for if not given
    #[arg(long, env = "DINERO_API_KEY", hide_env_values = true)]
    pub dinero_api_key: Option<String>,

    /// Name of the Dinero organization, can be omitted if there is only one
    #[arg(long, env = "DINERO_ORGANIZATION")]
    pub dinero_organization: Option<String>,

    #[arg(long, env = "DINERO_TOKEN_URL", hide = true)]
    pub dinero_token_url: Option<String>,

    #[arg(long, env = "DINERO_API_URL", hide = true)]
    pub dinero_api_url: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
