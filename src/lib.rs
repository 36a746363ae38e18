pub mod args;
pub mod cli;
pub mod config;
pub mod dinero_api;
pub mod invoice;
pub mod logging;
pub mod period;
pub mod terminal;
pub mod toggl_api;
