//! # Corebank Reports
//!
//! Account statement generation and export.
//!
//! A statement aggregates every movement across a client's accounts over an
//! inclusive date range, carrying the running balance of each movement plus
//! period totals for debits and credits.
//!
//! ## Exporters
//!
//! - [`CsvExporter`] - CSV format with proper escaping
//! - [`JsonExporter`] - JSON format (pretty or compact)
//!
//! ## Example
//!
//! ```rust,ignore
//! use corebank_reports::{generate_statement, CsvExporter, ReportExporter};
//!
//! let report = generate_statement(pool, client_id, start, end).await?;
//! let csv = CsvExporter::new().export(&report);
//! ```

pub mod error;
pub mod exporters;
pub mod statement;

pub use error::{ReportError, ReportResult};
pub use exporters::{CsvExporter, JsonExporter, ReportExporter};
pub use statement::{generate_statement, StatementReport, StatementRow};
