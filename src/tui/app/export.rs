//! Export functionality for the TUI
//!
//! Renders the visible cluster records as JSON or CSV. Writing the file
//! stays on `App` since it reports the outcome through a notification.

use anyhow::{Context, Result};

use super::state::ExportFormat;
use crate::models::ClusterRecord;

const CSV_HEADER: &str =
    "id,project,location,cluster,node_pool,autoscale_enabled,min_nodes,max_nodes,current_nodes,status";

/// Escape a string for CSV (handle commas, quotes, newlines)
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Serialize records in the requested format
pub fn export_records(records: &[&ClusterRecord], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(records).context("Failed to serialize cluster records")
        }
        ExportFormat::Csv => {
            let mut out = String::from(CSV_HEADER);
            out.push('\n');
            for r in records {
                let fields = [
                    escape_csv(&r.id),
                    escape_csv(&r.project),
                    escape_csv(&r.location),
                    escape_csv(&r.cluster),
                    escape_csv(&r.node_pool),
                    r.autoscale_enabled.to_string(),
                    r.min_nodes.to_string(),
                    r.max_nodes.to_string(),
                    r.current_nodes.to_string(),
                    r.status.as_str().to_string(),
                ];
                out.push_str(&fields.join(","));
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Timestamped file name in the working directory
pub fn export_filename(format: ExportFormat) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("nodescale_clusters_{}.{}", timestamp, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_clusters;

    #[test]
    fn test_escape_csv_simple() {
        assert_eq!(escape_csv("hello"), "hello");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn test_escape_csv_comma() {
        assert_eq!(escape_csv("hello,world"), "\"hello,world\"");
    }

    #[test]
    fn test_escape_csv_quotes() {
        assert_eq!(escape_csv("say \"hello\""), "\"say \"\"hello\"\"\"");
    }

    #[test]
    fn test_escape_csv_newline() {
        assert_eq!(escape_csv("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_export_csv() {
        let fleet = seed_clusters();
        let visible: Vec<&ClusterRecord> = fleet.iter().take(2).collect();
        let csv = export_records(&visible, ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "1,my-production-project,us-central1-a,main-cluster,default-pool,true,2,10,4,running"
        );
    }

    #[test]
    fn test_export_json() {
        let fleet = seed_clusters();
        let visible: Vec<&ClusterRecord> = fleet.iter().collect();
        let json = export_records(&visible, ExportFormat::Json).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.as_array().unwrap().len(), 3);
        assert_eq!(doc[2]["status"], "updating");
    }

    #[test]
    fn test_export_filename() {
        let name = export_filename(ExportFormat::Csv);
        assert!(name.starts_with("nodescale_clusters_"));
        assert!(name.ends_with(".csv"));
    }
}
