//! Unit tests for FileTools

use std::sync::Arc;
use tempfile::TempDir;
use vaultsmith_core::{ConfigProfile, VaultConfig};
use vaultsmith_tools::{FileTools, ToolContext};
use vaultsmith_vault::VaultManager;

async fn setup_test_vault(read_only: bool) -> (TempDir, FileTools) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut config = ConfigProfile::Development.create_config();
    let vault_config = VaultConfig::builder("test", temp_dir.path())
        .build()
        .expect("Failed to create vault config");
    config.vaults.push(vault_config);

    let manager = VaultManager::new(config).expect("Failed to create vault manager");
    let tools = FileTools::new(ToolContext::new(Arc::new(manager), read_only));
    (temp_dir, tools)
}

async fn seed(temp_dir: &TempDir, path: &str, content: &str) {
    let full = temp_dir.path().join(path);
    tokio::fs::create_dir_all(full.parent().unwrap()).await.unwrap();
    tokio::fs::write(full, content).await.unwrap();
}

#[tokio::test]
async fn test_list_notes_empty_vault() {
    let (_temp_dir, tools) = setup_test_vault(false).await;
    assert_eq!(tools.list_notes(None, 0, 0).await.unwrap(), "No notes found");
}

#[tokio::test]
async fn test_list_notes_sorted_and_filtered() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "z.md", "z").await;
    seed(&temp_dir, "a.md", "a").await;
    seed(&temp_dir, "notes/b.md", "b").await;
    seed(&temp_dir, "notes/image.png", "").await;
    seed(&temp_dir, ".obsidian/workspace.md", "").await;

    assert_eq!(
        tools.list_notes(None, 0, 0).await.unwrap(),
        "Found 3 notes:\n\na.md\nnotes/b.md\nz.md"
    );
    assert_eq!(
        tools.list_notes(Some("notes"), 0, 0).await.unwrap(),
        "Found 1 notes:\n\nnotes/b.md"
    );
}

#[tokio::test]
async fn test_list_notes_pagination() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    for name in ["a", "b", "c", "d"] {
        seed(&temp_dir, &format!("{}.md", name), name).await;
    }

    assert_eq!(
        tools.list_notes(None, 2, 1).await.unwrap(),
        "Found 4 notes (showing 2-3):\n\nb.md\nc.md"
    );
    assert_eq!(
        tools.list_notes(None, 10, 3).await.unwrap(),
        "Found 4 notes (showing 4-4):\n\nd.md"
    );
    assert_eq!(
        tools.list_notes(None, 0, 4).await.unwrap(),
        "Offset 4 exceeds total count 4"
    );
}

#[tokio::test]
async fn test_read_note() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "test.md", "# Test Note\nHello World").await;

    assert_eq!(
        tools.read_note("test.md").await.unwrap(),
        "# Test Note\nHello World"
    );
}

#[tokio::test]
async fn test_read_note_errors() {
    let (_temp_dir, tools) = setup_test_vault(false).await;

    let err = tools.read_note("test").await.unwrap_err();
    assert_eq!(err.to_string(), "path must end with .md");

    let err = tools.read_note("missing.md").await.unwrap_err();
    assert_eq!(err.to_string(), "Note not found: missing.md");

    let err = tools.read_note("../outside.md").await.unwrap_err();
    assert!(err.to_string().starts_with("path must be within vault"));

    let err = tools.read_note("").await.unwrap_err();
    assert_eq!(err.to_string(), "path is required");
}

#[tokio::test]
async fn test_write_note_creates_directories() {
    let (temp_dir, tools) = setup_test_vault(false).await;

    let message = tools
        .write_note("deep/nested/new.md", "# New")
        .await
        .unwrap();
    assert_eq!(message, "Successfully wrote: deep/nested/new.md");

    let on_disk = tokio::fs::read_to_string(temp_dir.path().join("deep/nested/new.md"))
        .await
        .unwrap();
    assert_eq!(on_disk, "# New");
}

#[tokio::test]
async fn test_delete_note() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "gone.md", "bye").await;

    assert_eq!(
        tools.delete_note("gone.md").await.unwrap(),
        "Successfully deleted: gone.md"
    );
    assert!(!temp_dir.path().join("gone.md").exists());

    let err = tools.delete_note("gone.md").await.unwrap_err();
    assert_eq!(err.to_string(), "Note not found: gone.md");
}

#[tokio::test]
async fn test_read_only_rejects_writes() {
    let (temp_dir, tools) = setup_test_vault(true).await;
    seed(&temp_dir, "keep.md", "keep").await;

    let err = tools.write_note("keep.md", "changed").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Vault is read-only: write_note is disabled"
    );
    assert!(tools.delete_note("keep.md").await.is_err());

    // Reads still work
    assert_eq!(tools.read_note("keep.md").await.unwrap(), "keep");
}
