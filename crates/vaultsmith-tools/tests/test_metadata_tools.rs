//! Unit tests for MetadataTools

use std::sync::Arc;
use tempfile::TempDir;
use vaultsmith_core::{ConfigProfile, VaultConfig};
use vaultsmith_tools::{MetadataTools, ToolContext};
use vaultsmith_vault::VaultManager;

async fn setup_test_vault_with_metadata() -> (TempDir, MetadataTools) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let vault_path = temp_dir.path();

    tokio::fs::write(
        vault_path.join("note1.md"),
        "---\ntitle: \"First Note\"\nstatus: Draft\ntags: [project, urgent]\n---\n# Note 1\nContent here",
    )
    .await
    .unwrap();

    tokio::fs::create_dir_all(vault_path.join("archive"))
        .await
        .unwrap();
    tokio::fs::write(
        vault_path.join("archive/note2.md"),
        "---\ntitle: Second Note\nstatus: draft-final\n---\n# Note 2",
    )
    .await
    .unwrap();

    tokio::fs::write(
        vault_path.join("note3.md"),
        "---\ntitle: Third Note\nstatus: published\n---\n# Note 3",
    )
    .await
    .unwrap();

    tokio::fs::write(vault_path.join("plain.md"), "# No Metadata\nJust content")
        .await
        .unwrap();

    let mut config = ConfigProfile::Development.create_config();
    let vault_config = VaultConfig::builder("test", vault_path).build().unwrap();
    config.vaults.push(vault_config);

    let manager = VaultManager::new(config).unwrap();
    let tools = MetadataTools::new(ToolContext::new(Arc::new(manager), false));
    (temp_dir, tools)
}

async fn on_disk(temp_dir: &TempDir, path: &str) -> String {
    tokio::fs::read_to_string(temp_dir.path().join(path))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_get_frontmatter_in_document_order() {
    let (_temp_dir, tools) = setup_test_vault_with_metadata().await;

    assert_eq!(
        tools.get_frontmatter("note1.md").await.unwrap(),
        "Frontmatter for note1.md:\n\ntitle: First Note\nstatus: Draft\ntags: [project, urgent]\n"
    );
    assert_eq!(
        tools.get_frontmatter("plain.md").await.unwrap(),
        "No frontmatter found in: plain.md"
    );
}

#[tokio::test]
async fn test_get_frontmatter_errors() {
    let (_temp_dir, tools) = setup_test_vault_with_metadata().await;

    let err = tools.get_frontmatter("note1").await.unwrap_err();
    assert_eq!(err.to_string(), "path must end with .md");

    let err = tools.get_frontmatter("missing.md").await.unwrap_err();
    assert_eq!(err.to_string(), "Note not found: missing.md");
}

#[tokio::test]
async fn test_query_frontmatter_contains() {
    let (_temp_dir, tools) = setup_test_vault_with_metadata().await;

    let report = tools.query_frontmatter("status=draft", None).await.unwrap();
    assert_eq!(
        report,
        "Found 2 notes matching \"status=draft\":\n\n\
         ## archive/note2.md\n  title: Second Note\n  status: draft-final\n\n\
         ## note1.md\n  title: First Note\n  status: Draft\n  tags: [project, urgent]\n\n"
    );
}

#[tokio::test]
async fn test_query_frontmatter_directory_and_misses() {
    let (_temp_dir, tools) = setup_test_vault_with_metadata().await;

    let report = tools
        .query_frontmatter("status: draft", Some("archive"))
        .await
        .unwrap();
    assert!(report.starts_with("Found 1 notes matching \"status: draft\":"));

    assert_eq!(
        tools.query_frontmatter("owner=bob", None).await.unwrap(),
        "No notes found matching: owner=bob"
    );

    let err = tools.query_frontmatter("nonsense", None).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid query format. Use: key=value or key:value"
    );
}

#[tokio::test]
async fn test_set_frontmatter_is_idempotent() {
    let (temp_dir, tools) = setup_test_vault_with_metadata().await;

    let message = tools
        .set_frontmatter("note3.md", "status", "archived")
        .await
        .unwrap();
    assert_eq!(message, "Set status: archived in note3.md");
    let once = on_disk(&temp_dir, "note3.md").await;
    assert_eq!(once, "---\ntitle: Third Note\nstatus: archived\n---\n# Note 3");

    tools
        .set_frontmatter("note3.md", "status", "archived")
        .await
        .unwrap();
    assert_eq!(on_disk(&temp_dir, "note3.md").await, once);
}

#[tokio::test]
async fn test_set_frontmatter_rejects_keys_the_parser_cannot_find() {
    let (temp_dir, tools) = setup_test_vault_with_metadata().await;
    let before = on_disk(&temp_dir, "note3.md").await;

    for key in ["due date", "2024", "a:b"] {
        let err = tools
            .set_frontmatter("note3.md", key, "2024")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid frontmatter key"), "{}", err);
        assert!(tools.remove_frontmatter("note3.md", key).await.is_err());
        assert!(
            tools
                .add_to_frontmatter_array("note3.md", key, "x")
                .await
                .is_err()
        );
    }
    assert_eq!(on_disk(&temp_dir, "note3.md").await, before);

    tools.set_frontmatter("note3.md", "due_date", "2024").await.unwrap();
    let once = on_disk(&temp_dir, "note3.md").await;
    tools.set_frontmatter("note3.md", "due_date", "2024").await.unwrap();
    assert_eq!(on_disk(&temp_dir, "note3.md").await, once);
}

#[tokio::test]
async fn test_set_frontmatter_rejects_multiline_value() {
    let (temp_dir, tools) = setup_test_vault_with_metadata().await;
    let before = on_disk(&temp_dir, "note3.md").await;

    let err = tools
        .set_frontmatter("note3.md", "status", "x\n---\ninjected: 1")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "value must be a single line");
    assert_eq!(on_disk(&temp_dir, "note3.md").await, before);
}

#[tokio::test]
async fn test_remove_last_key_drops_block() {
    let (temp_dir, tools) = setup_test_vault_with_metadata().await;
    tokio::fs::write(temp_dir.path().join("one.md"), "---\nonly: x\n---\n\nbody")
        .await
        .unwrap();

    assert_eq!(
        tools.remove_frontmatter("one.md", "only").await.unwrap(),
        "Removed only from one.md"
    );
    assert_eq!(on_disk(&temp_dir, "one.md").await, "body");

    assert_eq!(
        tools.remove_frontmatter("one.md", "only").await.unwrap(),
        "Key 'only' not found in: one.md"
    );
}

#[tokio::test]
async fn test_add_to_frontmatter_array_converts_inline_list() {
    let (temp_dir, tools) = setup_test_vault_with_metadata().await;
    tokio::fs::write(temp_dir.path().join("t.md"), "---\ntags: [a]\n---\n\nbody")
        .await
        .unwrap();

    assert_eq!(
        tools.add_to_frontmatter_array("t.md", "tags", "b").await.unwrap(),
        "Added b to tags in t.md"
    );
    assert_eq!(
        on_disk(&temp_dir, "t.md").await,
        "---\ntags:\n  - a\n  - b\n---\n\nbody"
    );
}
