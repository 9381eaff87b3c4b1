//! JSON row-count summary file.
//!
//! After a full conversion the per-table row counts are written as a JSON
//! array of `{"tableName": ..., "rows": ...}` objects to a fixed-name file
//! in the output directory. This is the only place row counts are exposed
//! outside the CSV files themselves.

use std::fs;
use std::path::{Path, PathBuf};

use crate::perflog::container::TableSummary;
use crate::PerfError;

/// Fixed name of the summary file inside the output directory.
pub const SUMMARY_FILE: &str = "conversion_summary.json";

/// Write the summary JSON and return its path.
///
/// Entries appear in table-completion order; an empty run produces `[]`.
pub fn write_summary(out_dir: &Path, summaries: &[TableSummary]) -> Result<PathBuf, PerfError> {
    let path = out_dir.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(summaries)
        .map_err(|e| PerfError::Io(format!("Cannot serialize summary: {e}")))?;
    fs::write(&path, json + "\n")
        .map_err(|e| PerfError::Io(format!("Cannot write {}: {}", path.display(), e)))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_summary_is_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = write_summary(dir.path(), &[]).unwrap();
        assert!(path.ends_with(SUMMARY_FILE));
        let contents = fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, serde_json::json!([]));
    }

    #[test]
    fn test_summary_entries_in_order() {
        let dir = TempDir::new().unwrap();
        let summaries = vec![
            TableSummary {
                table_name: "sessions".to_string(),
                rows: 3,
            },
            TableSummary {
                table_name: "contexts".to_string(),
                rows: 0,
            },
        ];
        let path = write_summary(dir.path(), &summaries).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {"tableName": "sessions", "rows": 3},
                {"tableName": "contexts", "rows": 0}
            ])
        );
    }
}
