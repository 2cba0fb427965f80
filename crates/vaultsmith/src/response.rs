//! Response envelope shared by every tool

use serde::{Deserialize, Serialize};
use turbomcp::prelude::*;
use vaultsmith_core::Error;
use vaultsmith_tools::BulkResult;

/// Convert a vault error into the MCP error a client sees
pub fn to_mcp_error(e: Error) -> McpError {
    McpError::internal(e.to_string())
}

/// Standardized response envelope for all tools.
///
/// `message` is the human-readable result; structured extras (hashes,
/// transaction ids, per-note records) go in `meta`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StandardResponse {
    /// Which vault this operation was performed on
    pub vault: String,
    /// Tool name (e.g. "edit_note")
    pub operation: String,
    pub success: bool,
    pub message: String,
    /// Count of items in result (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub took_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Suggested follow-up tools
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl StandardResponse {
    pub fn new(
        vault: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            vault: vault.into(),
            operation: operation.into(),
            success: true,
            message: message.into(),
            count: None,
            took_ms: 0,
            warnings: vec![],
            next_steps: vec![],
            meta: serde_json::Map::new(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_duration(mut self, ms: u64) -> Self {
        self.took_ms = ms;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    pub fn with_next_steps(mut self, steps: &[&str]) -> Self {
        self.next_steps.extend(steps.iter().map(|s| s.to_string()));
        self
    }

    /// Envelope for a bulk run.
    ///
    /// Per-note failures become a warning; `success` is false only when no
    /// note went through.
    pub fn for_bulk(vault: &str, operation: &str, result: &BulkResult) -> McpResult<Self> {
        let failed = result.failed().count();
        let records =
            serde_json::to_value(&result.records).map_err(|e| McpError::internal(e.to_string()))?;

        let mut response = Self::new(vault, operation, result.report())
            .with_count(result.total)
            .with_duration(result.duration_ms)
            .with_success(failed < result.total)
            .with_meta("transaction_id", serde_json::json!(result.transaction_id))
            .with_meta("records", records);
        if failed > 0 {
            response = response.with_warning(format!("{} of {} notes failed", failed, result.total));
        }
        Ok(response)
    }

    /// Follow-ups after a note was changed
    pub fn with_write_next_steps(self) -> Self {
        self.with_next_steps(&["read_note", "get_frontmatter"])
    }

    /// Serialize with consistent error handling
    pub fn to_json(self) -> McpResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| McpError::internal(e.to_string()))
    }
}
