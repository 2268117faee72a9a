//! YAML Export functionality
//!
//! Same envelope as the JSON export, preceded by a comment header.

use std::io::Write;

use crate::error::LedgerResult;
use crate::export::json::ReportExport;
use crate::reports::ExpenseReport;

/// Export a report to YAML format
pub fn export_report_yaml<W: Write>(report: &ExpenseReport, writer: &mut W) -> LedgerResult<()> {
    let export = ReportExport::new(report);

    writeln!(writer, "# siteledger expense report")?;
    writeln!(
        writer,
        "# Range: {} to {}",
        report.filters.start, report.filters.end
    )?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::{date, Fixture};
    use crate::reports::ReportFilters;

    #[test]
    fn test_yaml_export() {
        let fx = Fixture::new();
        let records = vec![fx.expense(&fx.depot, &fx.transport, 120, date(2024, 3, 2))];
        let filters = ReportFilters::new(date(2024, 3, 1), date(2024, 3, 31));
        let report = ExpenseReport::from_parts(&records, &fx.reference(), &filters, 0).unwrap();

        let mut output = Vec::new();
        export_report_yaml(&report, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# siteledger expense report"));
        assert!(text.contains("# Range: 2024-03-01 to 2024-03-31"));

        let body: String = text
            .lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let value: serde_yaml::Value = serde_yaml::from_str(&body).unwrap();
        assert_eq!(value["schema_version"].as_str(), Some("1.0.0"));
        assert_eq!(value["report"]["entry_count"].as_u64(), Some(1));
        assert_eq!(
            value["report"]["by_project"][0]["label"].as_str(),
            Some("Bus Depot")
        );
    }
}
