//! Statement exporters - CSV and JSON.

use crate::statement::StatementReport;
use serde_json::json;

/// Trait for exporting statements to different formats
pub trait ReportExporter {
    /// Export to the target format
    fn export(&self, report: &StatementReport) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;

    /// Get the MIME type for this format
    fn mime_type(&self) -> &'static str;
}

// ============================================================================
// CSV Exporter
// ============================================================================

/// CSV format exporter
pub struct CsvExporter {
    delimiter: char,
    include_header: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    fn escape_csv_field(&self, field: &str) -> String {
        if field.contains(self.delimiter) || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

const HEADERS: [&str; 10] = [
    "Date",
    "Client",
    "Account Number",
    "Type",
    "Initial Balance",
    "Status",
    "Movement",
    "Available Balance",
    "Total Debits",
    "Total Credits",
];

fn row_fields(report: &StatementReport) -> Vec<Vec<String>> {
    report
        .rows
        .iter()
        .map(|r| {
            vec![
                r.date.to_rfc3339(),
                r.client.clone(),
                r.account_number.clone(),
                r.account_type.clone(),
                r.initial_balance.to_string(),
                r.status.to_string(),
                r.movement.to_string(),
                r.available_balance.to_string(),
                r.total_debits.to_string(),
                r.total_credits.to_string(),
            ]
        })
        .collect()
}

impl ReportExporter for CsvExporter {
    fn export(&self, report: &StatementReport) -> String {
        let mut output = String::new();
        let sep = self.delimiter.to_string();

        if self.include_header {
            let headers: Vec<String> = HEADERS
                .iter()
                .map(|h| self.escape_csv_field(h))
                .collect();
            output.push_str(&headers.join(&sep));
            output.push('\n');
        }

        for row in row_fields(report) {
            let escaped: Vec<String> = row
                .iter()
                .map(|field| self.escape_csv_field(field))
                .collect();
            output.push_str(&escaped.join(&sep));
            output.push('\n');
        }

        output
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn mime_type(&self) -> &'static str {
        "text/csv"
    }
}

// ============================================================================
// JSON Exporter
// ============================================================================

/// JSON format exporter
pub struct JsonExporter {
    pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl ReportExporter for JsonExporter {
    fn export(&self, report: &StatementReport) -> String {
        let output = json!({
            "client": report.client_name,
            "clientId": report.client_id,
            "from": report.start,
            "to": report.end,
            "totalDebits": report.total_debits,
            "totalCredits": report.total_credits,
            "generatedAt": report.generated_at,
            "movements": report.rows,
        });

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_default()
        } else {
            serde_json::to_string(&output).unwrap_or_default()
        }
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }
}
