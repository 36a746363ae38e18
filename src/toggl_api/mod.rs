mod client;
mod clients;
mod summary;
mod workspaces;

#[cfg(test)]
pub mod testutils;

pub use client::{Toggl, TogglEndpoints, USER_AGENT};
pub use clients::{client_id, get_clients, ClientId, TogglClient};
pub use summary::{
    get_summary_report, get_summary_report_pdf, Billable, CurrencyAmount, DisplayHours,
    ItemTitle, ProjectSummary, ProjectTitle, Rounding, SummaryItem, SummaryParams,
    SummaryReport,
};
pub use workspaces::{get_workspaces, workspace_id, Workspace, WorkspaceId};
