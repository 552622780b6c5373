use std::path::Path;

use anyhow::{Context, Result};

use crate::models::AnalysisResult;

/// Load a previously exported analysis record from a JSON file
pub fn load_result_file(path: &Path) -> Result<AnalysisResult> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_result_json(&content)
}

/// Parse an analysis record from a JSON string
pub fn parse_result_json(json: &str) -> Result<AnalysisResult> {
    serde_json::from_str(json).context("Failed to parse analysis JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_result_json("{not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse analysis JSON"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_result_file(Path::new("/no/such/result.json")).unwrap_err();
        assert!(err.to_string().contains("/no/such/result.json"));
    }
}
