mod generate;
mod language;
mod line;
mod reconcile;

pub use generate::{format_hours, generate_block, ms_to_hours, GeneratedBlock};
pub use language::Language;
pub use line::{InvoiceLine, LineItem, ProductLine, TextLine, ACCOUNT_NUMBER, HOURS_UNIT};
pub use reconcile::{
    find_marker, replace_block, Placement, Reconciled, FOOTER_PREFIXES, HEADER_PREFIXES,
};
