//! MCP tool surface for one vault

use crate::response::{StandardResponse, to_mcp_error};
use anyhow::Result;
use std::time::Instant;
use turbomcp::prelude::*;
use vaultsmith_core::ServerConfig;
use vaultsmith_tools::{
    BulkResult, BulkTools, EditOutcome, EditTools, FileTools, LinkTools, MetadataTools,
    SearchTools, ToolContext, render_mocs,
};
use vaultsmith_vault::compute_hash;

/// Non-negative integer argument, zero when absent
fn count_arg(value: Option<i32>) -> usize {
    value.unwrap_or(0).max(0) as usize
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Vaultsmith MCP server bound to the configured default vault
#[derive(Clone)]
pub struct VaultsmithServer {
    vault_name: String,
    read_only: bool,
    files: FileTools,
    edits: EditTools,
    metadata: MetadataTools,
    links: LinkTools,
    search: SearchTools,
    bulk: BulkTools,
}

impl VaultsmithServer {
    /// Open the default vault of `config`
    pub fn new(config: ServerConfig) -> Result<Self> {
        config.validate()?;
        let vault_name = config.default_vault()?.name.clone();
        let ctx = ToolContext::from_config(config)?;
        Ok(Self::with_context(vault_name, ctx))
    }

    /// Build the server over an existing tool context
    pub fn with_context(vault_name: impl Into<String>, ctx: ToolContext) -> Self {
        Self {
            vault_name: vault_name.into(),
            read_only: ctx.is_read_only(),
            files: FileTools::new(ctx.clone()),
            edits: EditTools::new(ctx.clone()),
            metadata: MetadataTools::new(ctx.clone()),
            links: LinkTools::new(ctx.clone()),
            search: SearchTools::new(ctx.clone()),
            bulk: BulkTools::new(ctx),
        }
    }

    pub fn vault_name(&self) -> &str {
        &self.vault_name
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn respond(&self, operation: &str, message: impl Into<String>) -> StandardResponse {
        StandardResponse::new(&self.vault_name, operation, message)
    }

    /// Envelope for a single-note edit, hashes in meta
    fn edit_response(&self, operation: &str, outcome: EditOutcome, start: Instant) -> StandardResponse {
        self.respond(operation, outcome.message)
            .with_count(outcome.applied)
            .with_duration(elapsed_ms(start))
            .with_meta("path", serde_json::json!(outcome.path))
            .with_meta("old_hash", serde_json::json!(outcome.old_hash))
            .with_meta("new_hash", serde_json::json!(outcome.new_hash))
            .with_write_next_steps()
    }

    fn bulk_response(&self, operation: &str, result: BulkResult) -> McpResult<serde_json::Value> {
        StandardResponse::for_bulk(&self.vault_name, operation, &result)?.to_json()
    }
}

#[turbomcp::server(name = "vaultsmith", version = "0.4.2", transports = ["stdio"])]
impl VaultsmithServer {
    // ==================== Notes ====================

    #[tool(
        description = "List notes in the vault, optionally under a directory, with pagination",
        usage = "limit and offset of 0 mean no limit and start from the beginning. Paths are sorted and relative to the vault root",
        related = ["read_note", "query_frontmatter"]
    )]
    async fn list_notes(
        &self,
        directory: Option<String>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let message = self
            .files
            .list_notes(directory.as_deref(), count_arg(limit), count_arg(offset))
            .await
            .map_err(to_mcp_error)?;

        self.respond("list_notes", message)
            .with_duration(elapsed_ms(start))
            .with_next_steps(&["read_note"])
            .to_json()
    }

    #[tool(
        description = "Read the full content of a note",
        usage = "Path must end with .md. The content hash is returned in meta",
        related = ["edit_note", "get_frontmatter", "get_backlinks"],
        examples = ["projects/roadmap.md"]
    )]
    async fn read_note(&self, path: String) -> McpResult<serde_json::Value> {
        let content = self.files.read_note(&path).await.map_err(to_mcp_error)?;
        let hash = compute_hash(&content);

        self.respond("read_note", content)
            .with_meta("path", serde_json::json!(path))
            .with_meta("hash", serde_json::json!(hash))
            .with_next_steps(&["edit_note", "replace_section", "batch_edit_note"])
            .to_json()
    }

    #[tool(
        description = "Create or overwrite a note, creating parent directories",
        usage = "Path must end with .md. For targeted changes prefer edit_note or batch_edit_note",
        related = ["read_note", "edit_note"]
    )]
    async fn write_note(&self, path: String, content: String) -> McpResult<serde_json::Value> {
        let message = self
            .files
            .write_note(&path, &content)
            .await
            .map_err(to_mcp_error)?;

        self.respond("write_note", message)
            .with_meta("hash", serde_json::json!(compute_hash(&content)))
            .with_write_next_steps()
            .to_json()
    }

    #[tool(
        description = "Permanently delete a note",
        usage = "Links pointing at the note are left as they are; check get_backlinks first",
        related = ["get_backlinks", "rename_note"]
    )]
    async fn delete_note(&self, path: String) -> McpResult<serde_json::Value> {
        let message = self.files.delete_note(&path).await.map_err(to_mcp_error)?;
        self.respond("delete_note", message).to_json()
    }

    // ==================== Editing ====================

    #[tool(
        description = "Replace exact text in a note. old_text must be unique unless replace_all is true",
        usage = "Appends .md when missing. context_lines > 0 returns numbered lines around the change. Fails without writing when old_text is missing or ambiguous",
        related = ["batch_edit_note", "replace_section", "read_note"]
    )]
    async fn edit_note(
        &self,
        path: String,
        old_text: String,
        new_text: String,
        replace_all: Option<bool>,
        context_lines: Option<i32>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let outcome = self
            .edits
            .edit_note(
                &path,
                &old_text,
                &new_text,
                replace_all.unwrap_or(false),
                count_arg(context_lines),
            )
            .await
            .map_err(to_mcp_error)?;

        self.edit_response("edit_note", outcome, start).to_json()
    }

    #[tool(
        description = "Replace everything under a heading up to the next heading of the same or higher level",
        usage = "Heading text matches case-insensitively, without the leading #s. The heading line itself is kept",
        related = ["edit_note", "read_note"]
    )]
    async fn replace_section(
        &self,
        path: String,
        heading: String,
        content: String,
        context_lines: Option<i32>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let outcome = self
            .edits
            .replace_section(&path, &heading, &content, count_arg(context_lines))
            .await
            .map_err(to_mcp_error)?;

        self.edit_response("replace_section", outcome, start).to_json()
    }

    #[tool(
        description = "Apply several find/replace edits to one note, all or nothing",
        usage = r#"edits is a JSON array: [{"old_text": "...", "new_text": "..."}]. Every old_text must occur exactly once and matches must not overlap, otherwise nothing is written"#,
        related = ["edit_note", "read_note"]
    )]
    async fn batch_edit_note(
        &self,
        path: String,
        edits: String,
        context_lines: Option<i32>,
    ) -> McpResult<serde_json::Value> {
        let result = self
            .edits
            .batch_edit_note(&path, &edits, count_arg(context_lines))
            .await
            .map_err(to_mcp_error)?;

        self.respond("batch_edit_note", result.message)
            .with_count(result.applied)
            .with_duration(result.duration_ms)
            .with_meta("path", serde_json::json!(result.path))
            .with_meta("old_hash", serde_json::json!(result.old_hash))
            .with_meta("new_hash", serde_json::json!(result.new_hash))
            .with_meta("transaction_id", serde_json::json!(result.transaction_id))
            .with_write_next_steps()
            .to_json()
    }

    // ==================== Frontmatter ====================

    #[tool(
        description = "Show a note's frontmatter as key: value lines",
        related = ["query_frontmatter", "set_frontmatter"]
    )]
    async fn get_frontmatter(&self, path: String) -> McpResult<serde_json::Value> {
        let message = self
            .metadata
            .get_frontmatter(&path)
            .await
            .map_err(to_mcp_error)?;
        self.respond("get_frontmatter", message).to_json()
    }

    #[tool(
        description = "Find notes whose frontmatter value contains a string (key=value or key:value)",
        usage = "Matching is case-insensitive substring on the value. Optionally limit to a directory",
        related = ["get_frontmatter", "bulk_set_frontmatter"],
        examples = ["status=draft", "type:project"]
    )]
    async fn query_frontmatter(
        &self,
        query: String,
        directory: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let message = self
            .metadata
            .query_frontmatter(&query, directory.as_deref())
            .await
            .map_err(to_mcp_error)?;

        self.respond("query_frontmatter", message)
            .with_duration(elapsed_ms(start))
            .to_json()
    }

    #[tool(
        description = "Set a scalar frontmatter key on one note, creating the block if needed",
        related = ["remove_frontmatter", "add_to_frontmatter_array", "bulk_set_frontmatter"]
    )]
    async fn set_frontmatter(
        &self,
        path: String,
        key: String,
        value: String,
    ) -> McpResult<serde_json::Value> {
        let message = self
            .metadata
            .set_frontmatter(&path, &key, &value)
            .await
            .map_err(to_mcp_error)?;
        self.respond("set_frontmatter", message)
            .with_write_next_steps()
            .to_json()
    }

    #[tool(
        description = "Remove a frontmatter key from one note; the block goes with its last key",
        related = ["set_frontmatter", "get_frontmatter"]
    )]
    async fn remove_frontmatter(&self, path: String, key: String) -> McpResult<serde_json::Value> {
        let message = self
            .metadata
            .remove_frontmatter(&path, &key)
            .await
            .map_err(to_mcp_error)?;
        self.respond("remove_frontmatter", message).to_json()
    }

    #[tool(
        description = "Append a value to a frontmatter list, converting inline or scalar values to a dash list",
        related = ["set_frontmatter", "bulk_tag"]
    )]
    async fn add_to_frontmatter_array(
        &self,
        path: String,
        key: String,
        value: String,
    ) -> McpResult<serde_json::Value> {
        let message = self
            .metadata
            .add_to_frontmatter_array(&path, &key, &value)
            .await
            .map_err(to_mcp_error)?;
        self.respond("add_to_frontmatter_array", message)
            .with_write_next_steps()
            .to_json()
    }

    // ==================== Links ====================

    #[tool(
        description = "Find notes that wikilink to a note by full name or basename, with line context",
        related = ["rename_note", "discover_mocs"]
    )]
    async fn get_backlinks(&self, path: String) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let message = self
            .links
            .get_backlinks(&path)
            .await
            .map_err(to_mcp_error)?;
        self.respond("get_backlinks", message)
            .with_duration(elapsed_ms(start))
            .to_json()
    }

    #[tool(
        description = "Rename or move a note and update wikilinks to it across the vault",
        usage = "Both paths must end with .md and stay inside the vault. Fails if the destination exists",
        related = ["get_backlinks", "bulk_move"]
    )]
    async fn rename_note(&self, old_path: String, new_path: String) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let message = self
            .links
            .rename_note(&old_path, &new_path)
            .await
            .map_err(to_mcp_error)?;
        self.respond("rename_note", message)
            .with_duration(elapsed_ms(start))
            .with_next_steps(&["get_backlinks"])
            .to_json()
    }

    #[tool(
        description = "List maps of content: notes tagged #moc, with title, tags and linked notes",
        related = ["get_backlinks", "bulk_tag"]
    )]
    async fn discover_mocs(&self, directory: Option<String>) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let mocs = self
            .links
            .find_mocs(directory.as_deref())
            .await
            .map_err(to_mcp_error)?;
        let entries =
            serde_json::to_value(&mocs).map_err(|e| McpError::internal(e.to_string()))?;

        self.respond("discover_mocs", render_mocs(&mocs))
            .with_count(mocs.len())
            .with_duration(elapsed_ms(start))
            .with_meta("mocs", entries)
            .to_json()
    }

    // ==================== Search ====================

    #[tool(
        description = "Search note content for a string (case-insensitive substring match)",
        usage = "Returns matching lines with line numbers, grouped by note. Optionally limit to a directory",
        related = ["read_note", "edit_note", "search_by_tags"]
    )]
    async fn search_vault(
        &self,
        query: String,
        directory: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let message = self
            .search
            .search_vault(&query, directory.as_deref())
            .await
            .map_err(to_mcp_error)?;
        self.respond("search_vault", message)
            .with_duration(elapsed_ms(start))
            .to_json()
    }

    #[tool(
        description = "Find notes carrying every listed tag (frontmatter or inline)",
        usage = "tags is comma separated; a leading # is optional and matching ignores case",
        related = ["bulk_tag", "discover_mocs"],
        examples = ["project, urgent", "#moc"]
    )]
    async fn search_by_tags(
        &self,
        tags: String,
        directory: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let message = self
            .search
            .search_by_tags(&tags, directory.as_deref())
            .await
            .map_err(to_mcp_error)?;
        self.respond("search_by_tags", message)
            .with_duration(elapsed_ms(start))
            .to_json()
    }

    #[tool(
        description = "List checkbox tasks across the vault with priority and due date",
        usage = "status is all (default), open or completed. Optionally limit to a directory",
        related = ["edit_note", "search_vault"]
    )]
    async fn list_tasks(
        &self,
        status: Option<String>,
        directory: Option<String>,
    ) -> McpResult<serde_json::Value> {
        let start = Instant::now();
        let message = self
            .search
            .list_tasks(status.as_deref(), directory.as_deref())
            .await
            .map_err(to_mcp_error)?;
        self.respond("list_tasks", message)
            .with_duration(elapsed_ms(start))
            .to_json()
    }

    // ==================== Bulk ====================

    #[tool(
        description = "Move many notes into a folder, optionally updating links",
        usage = "paths is a JSON array or a comma/newline separated list; .md is appended when missing. update_links defaults to true",
        related = ["rename_note", "list_notes"]
    )]
    async fn bulk_move(
        &self,
        paths: String,
        destination: String,
        update_links: Option<bool>,
    ) -> McpResult<serde_json::Value> {
        let result = self
            .bulk
            .bulk_move(&paths, &destination, update_links.unwrap_or(true))
            .await
            .map_err(to_mcp_error)?;
        self.bulk_response("bulk_move", result)
    }

    #[tool(
        description = "Set one frontmatter key to the same value on many notes",
        usage = "paths is a JSON array or a comma/newline separated list",
        related = ["set_frontmatter", "query_frontmatter"]
    )]
    async fn bulk_set_frontmatter(
        &self,
        paths: String,
        key: String,
        value: String,
    ) -> McpResult<serde_json::Value> {
        let result = self
            .bulk
            .bulk_set_frontmatter(&paths, &key, &value)
            .await
            .map_err(to_mcp_error)?;
        self.bulk_response("bulk_set_frontmatter", result)
    }

    #[tool(
        description = "Add or remove a tag on many notes (action: add or remove)",
        usage = "Add skips notes that already carry the tag in any case. Remove drops inline #tag tokens and the frontmatter entry",
        related = ["discover_mocs", "add_to_frontmatter_array"]
    )]
    async fn bulk_tag(
        &self,
        paths: String,
        tag: String,
        action: String,
    ) -> McpResult<serde_json::Value> {
        let result = self
            .bulk
            .bulk_tag(&paths, &tag, &action)
            .await
            .map_err(to_mcp_error)?;
        self.bulk_response("bulk_tag", result)
    }
}
