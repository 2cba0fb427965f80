//! Unit tests for EditTools

use std::sync::Arc;
use tempfile::TempDir;
use vaultsmith_core::{ConfigProfile, Error, VaultConfig};
use vaultsmith_tools::{EditTools, ToolContext};
use vaultsmith_vault::VaultManager;

async fn setup_test_vault(read_only: bool) -> (TempDir, EditTools) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut config = ConfigProfile::Development.create_config();
    let vault_config = VaultConfig::builder("test", temp_dir.path())
        .build()
        .expect("Failed to create vault config");
    config.vaults.push(vault_config);

    let manager = VaultManager::new(config).expect("Failed to create vault manager");
    let tools = EditTools::new(ToolContext::new(Arc::new(manager), read_only));
    (temp_dir, tools)
}

async fn seed(temp_dir: &TempDir, path: &str, content: &str) {
    tokio::fs::write(temp_dir.path().join(path), content)
        .await
        .unwrap();
}

async fn on_disk(temp_dir: &TempDir, path: &str) -> String {
    tokio::fs::read_to_string(temp_dir.path().join(path))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_edit_note_appends_extension() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "todo.md", "- [ ] ship it").await;

    let outcome = tools
        .edit_note("todo", "[ ]", "[x]", false, 0)
        .await
        .unwrap();

    assert_eq!(outcome.path, "todo.md");
    assert_eq!(outcome.message, "Replaced 1 occurrence(s) in todo.md");
    assert_eq!(on_disk(&temp_dir, "todo.md").await, "- [x] ship it");
}

#[tokio::test]
async fn test_edit_note_replace_all() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "n.md", "cat cat cat").await;

    let outcome = tools.edit_note("n.md", "cat", "dog", true, 0).await.unwrap();
    assert_eq!(outcome.applied, 3);
    assert_eq!(on_disk(&temp_dir, "n.md").await, "dog dog dog");
}

#[tokio::test]
async fn test_edit_note_not_found_text() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "n.md", "abc").await;

    let err = tools.edit_note("n", "xyz", "q", false, 0).await.unwrap_err();
    assert_eq!(err.to_string(), "old_text not found in n.md");
    assert!(matches!(err, Error::Conflict { .. }));
}

#[tokio::test]
async fn test_replace_section_round_trip() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "doc.md", "# Title\n\n## Notes\nold\n\n## Next\nkeep").await;

    tools
        .replace_section("doc", "Notes", "fresh\ncontent\n\n", 0)
        .await
        .unwrap();

    assert_eq!(
        on_disk(&temp_dir, "doc.md").await,
        "# Title\n\n## Notes\n\nfresh\ncontent\n\n## Next\nkeep"
    );
}

#[tokio::test]
async fn test_replace_section_missing_heading() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "doc.md", "# Title\nbody").await;

    let err = tools
        .replace_section("doc.md", "Nope", "x", 0)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Heading 'Nope' not found in doc.md");

    let err = tools.replace_section("doc.md", " ", "x", 0).await.unwrap_err();
    assert_eq!(err.to_string(), "heading is required");
}

#[tokio::test]
async fn test_batch_edit_note() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "n.md", "one two three").await;

    let result = tools
        .batch_edit_note(
            "n",
            r#"[{"old_text": "three", "new_text": "3"}, {"old_text": "one", "new_text": "1"}]"#,
            0,
        )
        .await
        .unwrap();

    assert_eq!(result.message, "Applied 2 edit(s) to n.md");
    assert_eq!(on_disk(&temp_dir, "n.md").await, "1 two 3");
}

#[tokio::test]
async fn test_batch_edit_overlap_rejected() {
    let (temp_dir, tools) = setup_test_vault(false).await;
    seed(&temp_dir, "n.md", "the quick brown fox").await;

    let err = tools
        .batch_edit_note(
            "n.md",
            r#"[{"old_text": "quick brown", "new_text": "slow"}, {"old_text": "brown fox", "new_text": "dog"}]"#,
            0,
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Batch edit validation failed for n.md: edits 1 and 2 overlap"
    );
    assert_eq!(on_disk(&temp_dir, "n.md").await, "the quick brown fox");
}

#[tokio::test]
async fn test_read_only_rejects_edits() {
    let (temp_dir, tools) = setup_test_vault(true).await;
    seed(&temp_dir, "n.md", "abc").await;

    let err = tools.edit_note("n.md", "a", "b", false, 0).await.unwrap_err();
    assert!(matches!(err, Error::ReadOnly { .. }));
    assert!(tools.replace_section("n.md", "h", "x", 0).await.is_err());
    assert!(
        tools
            .batch_edit_note("n.md", r#"[{"old_text": "a", "new_text": "b"}]"#, 0)
            .await
            .is_err()
    );
    assert_eq!(on_disk(&temp_dir, "n.md").await, "abc");
}
