//! CSV export of generated tables.
//!
//! The [`CsvExporter`] writes the account and visit tables to the configured
//! output directory, each with a fixed header row.

mod writer;

pub use writer::{
    ACCOUNT_HEADERS, CsvExporter, ExportError, VISIT_HEADERS, write_accounts, write_visits,
};
