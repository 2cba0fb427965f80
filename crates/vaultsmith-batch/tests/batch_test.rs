//! Batch edits and bulk operations against a temporary vault

use std::sync::Arc;
use tempfile::TempDir;
use vaultsmith_batch::{BatchEditEngine, BulkExecutor, BulkOperation, parse_paths};
use vaultsmith_core::{ConfigProfile, VaultConfig};
use vaultsmith_vault::{DocumentStore, VaultManager};

async fn setup_test_vault() -> (TempDir, Arc<dyn DocumentStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut config = ConfigProfile::Development.create_config();
    let vault_config = VaultConfig::builder("test", temp_dir.path())
        .build()
        .expect("Failed to create vault config");
    config.vaults.push(vault_config);

    let manager = VaultManager::new(config).expect("Failed to create vault manager");
    (temp_dir, Arc::new(manager))
}

async fn seed(temp_dir: &TempDir, path: &str, content: &str) {
    let full = temp_dir.path().join(path);
    if let Some(parent) = full.parent() {
        tokio::fs::create_dir_all(parent).await.unwrap();
    }
    tokio::fs::write(full, content).await.unwrap();
}

async fn on_disk(temp_dir: &TempDir, path: &str) -> String {
    tokio::fs::read_to_string(temp_dir.path().join(path))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_batch_applies_all_edits_once() {
    let (temp_dir, store) = setup_test_vault().await;
    seed(&temp_dir, "note.md", "title\nalpha\nbeta\ngamma").await;

    let engine = BatchEditEngine::new(store);
    let result = engine
        .apply_json(
            "note.md",
            r#"[{"old_text": "gamma", "new_text": "GAMMA"}, {"old_text": "alpha", "new_text": "ALPHA"}]"#,
            1,
        )
        .await
        .unwrap();

    assert_eq!(on_disk(&temp_dir, "note.md").await, "title\nALPHA\nbeta\nGAMMA");
    assert_eq!(
        result.message,
        "Applied 2 edit(s) to note.md\n\n--- Context (first edit) ---\nL1: title\nL2: ALPHA  ← CHANGED\nL3: beta\n"
    );
    assert_eq!(result.applied, 2);
    assert!(!result.transaction_id.is_empty());
}

#[tokio::test]
async fn test_rejected_batch_leaves_file_identical() {
    let (temp_dir, store) = setup_test_vault().await;
    seed(&temp_dir, "note.md", "a b a").await;

    let engine = BatchEditEngine::new(store);
    let err = engine
        .apply_json(
            "note.md",
            r#"[{"old_text": "a", "new_text": "x"}, {"old_text": "b", "new_text": "y"}]"#,
            0,
        )
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .starts_with("Batch edit validation failed for note.md:\n- edit 1:"));
    assert_eq!(on_disk(&temp_dir, "note.md").await, "a b a");
}

#[tokio::test]
async fn test_batch_missing_note() {
    let (_temp_dir, store) = setup_test_vault().await;
    let engine = BatchEditEngine::new(store);

    let err = engine
        .apply_json("ghost.md", r#"[{"old_text": "a", "new_text": "b"}]"#, 0)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Note not found: ghost.md");
}

#[tokio::test]
async fn test_bulk_move_reports_each_note() {
    let (temp_dir, store) = setup_test_vault().await;
    seed(&temp_dir, "a.md", "# A").await;
    seed(&temp_dir, "b.md", "# B").await;
    seed(&temp_dir, "archive/b.md", "# old B").await;
    seed(&temp_dir, "c.md", "[[a]]").await;

    let bulk = BulkExecutor::new(store);
    let paths = parse_paths("a, b, missing", ".md");
    let result = bulk
        .execute(
            BulkOperation::Move {
                destination: "archive".into(),
                update_links: true,
            },
            &paths,
        )
        .await
        .unwrap();

    assert_eq!(
        result.report(),
        "# Bulk Move to archive\n\n## Moved\n\n- a.md -> archive/a.md\n\n## Errors\n\n- b.md: already exists at destination\n- missing.md: not found\n"
    );
    assert_eq!(on_disk(&temp_dir, "archive/a.md").await, "# A");
    assert_eq!(on_disk(&temp_dir, "c.md").await, "[[a]]");
}

#[tokio::test]
async fn test_bulk_move_destination_outside_vault() {
    let (_temp_dir, store) = setup_test_vault().await;
    let bulk = BulkExecutor::new(store);

    let result = bulk
        .execute(
            BulkOperation::Move {
                destination: "../elsewhere".into(),
                update_links: false,
            },
            &["a.md".to_string()],
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_bulk_requires_paths() {
    let (_temp_dir, store) = setup_test_vault().await;
    let bulk = BulkExecutor::new(store);

    let err = bulk
        .execute(BulkOperation::AddTag { tag: "x".into() }, &[])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "at least one path is required");
}

#[tokio::test]
async fn test_bulk_set_frontmatter() {
    let (temp_dir, store) = setup_test_vault().await;
    seed(&temp_dir, "a.md", "---\ntitle: A\n---\nbody").await;
    seed(&temp_dir, "b.md", "plain").await;

    let bulk = BulkExecutor::new(store);
    let result = bulk
        .execute(
            BulkOperation::SetFrontmatter {
                key: "status".into(),
                value: "done".into(),
            },
            &parse_paths(r#"["a.md", "b.md", "../x.md"]"#, ".md"),
        )
        .await
        .unwrap();

    assert_eq!(
        result.report(),
        "# Bulk Set Frontmatter: status\n\n## Updated\n\n- a.md: set status=done\n- b.md: set status=done\n\n## Errors\n\n- ../x.md: path must be within vault\n"
    );
    assert_eq!(
        on_disk(&temp_dir, "a.md").await,
        "---\ntitle: A\nstatus: done\n---\nbody"
    );
    assert_eq!(
        on_disk(&temp_dir, "b.md").await,
        "---\nstatus: done\n---\n\nplain"
    );
}

#[tokio::test]
async fn test_bulk_set_frontmatter_keeps_block_intact() {
    let (temp_dir, store) = setup_test_vault().await;
    seed(&temp_dir, "a.md", "---\ntitle: A\n---\nbody").await;

    let bulk = BulkExecutor::new(store);
    let paths = vec!["a.md".to_string()];
    for (key, value) in [("status", "x\n---\ninjected: 1"), ("due date", "2024")] {
        let op = BulkOperation::SetFrontmatter {
            key: key.into(),
            value: value.into(),
        };
        assert!(bulk.execute(op, &paths).await.is_err());
    }
    assert_eq!(on_disk(&temp_dir, "a.md").await, "---\ntitle: A\n---\nbody");
}

#[tokio::test]
async fn test_bulk_tag_add_and_remove() {
    let (temp_dir, store) = setup_test_vault().await;
    seed(&temp_dir, "a.md", "---\ntags: [x]\n---\nbody").await;
    seed(&temp_dir, "b.md", "plain").await;
    seed(&temp_dir, "c.md", "already #Review").await;

    let bulk = BulkExecutor::new(store);
    let paths = parse_paths("a\nb\nc", ".md");

    let added = bulk
        .execute(BulkOperation::tag("add", "#review").unwrap(), &paths)
        .await
        .unwrap();
    assert_eq!(
        added.report(),
        "# Bulk Add Tag: #review\n\n## Results\n\n- a.md: added #review\n- b.md: added #review\n- c.md: no change\n"
    );
    assert_eq!(
        on_disk(&temp_dir, "a.md").await,
        "---\ntags:\n  - x\n  - review\n---\nbody"
    );
    assert_eq!(on_disk(&temp_dir, "b.md").await, "plain\n\n#review");

    let removed = bulk
        .execute(BulkOperation::tag("remove", "review").unwrap(), &paths)
        .await
        .unwrap();
    assert_eq!(removed.succeeded().filter(|r| r.changed).count(), 3);
    assert_eq!(on_disk(&temp_dir, "a.md").await, "---\ntags: [x]\n---\nbody");
    assert_eq!(on_disk(&temp_dir, "b.md").await, "plain\n\n");
    assert_eq!(on_disk(&temp_dir, "c.md").await, "already");
}
