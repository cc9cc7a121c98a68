//! Statement generation command

use anyhow::{Context, Result};
use chrono::NaiveDate;
use corebank_reports::{generate_statement, CsvExporter, JsonExporter, ReportExporter};
use std::path::{Path, PathBuf};

use crate::db;
use crate::ReportFormat;

/// Generate a statement and write it to a file or stdout
pub async fn generate(
    db_path: &Path,
    client_id: i64,
    from: NaiveDate,
    to: NaiveDate,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let database = db::connect(db_path).await?;
    let report = generate_statement(database.pool(), client_id, from, to).await?;

    let exporter: Box<dyn ReportExporter> = match format {
        ReportFormat::Csv => Box::new(CsvExporter::new()),
        ReportFormat::Json => Box::new(JsonExporter::new()),
    };
    let rendered = exporter.export(&report);

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Statement written to {:?}", path);
        }
        None => {
            println!("{}", rendered);
        }
    }

    println!(
        "{} movements, total credits {}, total debits {}",
        report.rows.len(),
        report.total_credits,
        report.total_debits
    );
    Ok(())
}
