//! Tests for database initialization and the SQLite store

use chrono::{TimeZone, Utc};
use prodcheck_admin::db::{init_database, init_memory_database};
use prodcheck_admin::store::{ChecklistStore, SqliteStore};
use prodcheck_admin::CHECKLIST_ID;
use prodcheck_common::progress::ProgressRecord;
use prodcheck_common::selection::{SectionId, SectionSelection};

#[tokio::test]
async fn init_seeds_every_section_enabled() {
    let pool = init_memory_database().await.unwrap();
    let store = SqliteStore::new(pool);

    let selection = store.load_selection().await.unwrap();
    assert_eq!(selection, SectionSelection::all_enabled());
}

#[tokio::test]
async fn init_keeps_an_existing_selection() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("prodcheck.db");

    let pool = init_database(&db_path).await.unwrap();
    let store = SqliteStore::new(pool);

    let mut narrowed = SectionSelection::all_enabled();
    narrowed.disable(SectionId::Analytics);
    store.save_selection(&narrowed).await.unwrap();
    store.pool().close().await;

    // Re-initializing must not reset the administrator's choice.
    let pool = init_database(&db_path).await.unwrap();
    let store = SqliteStore::new(pool);
    assert_eq!(store.load_selection().await.unwrap(), narrowed);
}

#[tokio::test]
async fn init_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("deeper").join("prodcheck.db");

    let pool = init_database(&db_path).await.unwrap();
    assert!(db_path.exists());
    pool.close().await;
}

#[tokio::test]
async fn selection_round_trips_through_the_settings_table() {
    let pool = init_memory_database().await.unwrap();
    let store = SqliteStore::new(pool);

    let mut selection = SectionSelection::new();
    selection.enable(SectionId::Seo);
    selection.disable(SectionId::Legal);

    store.save_selection(&selection).await.unwrap();
    assert_eq!(store.load_selection().await.unwrap(), selection);

    // Saving again overwrites rather than duplicating the row.
    selection.enable(SectionId::Legal);
    store.save_selection(&selection).await.unwrap();
    assert_eq!(store.load_selection().await.unwrap(), selection);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings WHERE key = 'sections'")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn null_selection_value_loads_as_unconfigured() {
    let pool = init_memory_database().await.unwrap();

    sqlx::query("UPDATE settings SET value = NULL WHERE key = 'sections'")
        .execute(&pool)
        .await
        .unwrap();

    let store = SqliteStore::new(pool);
    assert_eq!(store.load_selection().await.unwrap(), SectionSelection::new());
}

#[tokio::test]
async fn missing_progress_row_loads_as_none() {
    let pool = init_memory_database().await.unwrap();
    let store = SqliteStore::new(pool);

    assert!(store.load_progress(CHECKLIST_ID).await.unwrap().is_none());
}

#[tokio::test]
async fn progress_round_trips_with_metadata() {
    let pool = init_memory_database().await.unwrap();
    let store = SqliteStore::new(pool);

    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut record = ProgressRecord::new();
    record.mark_completed("sitemap", at, Some("admin"));
    record.mark_completed("robots", at, None);

    store.save_progress(CHECKLIST_ID, &record).await.unwrap();

    let loaded = store.load_progress(CHECKLIST_ID).await.unwrap().unwrap();
    assert_eq!(loaded, record);
    assert_eq!(loaded.items["sitemap"].completed_by.as_deref(), Some("admin"));
    assert_eq!(loaded.items["sitemap"].completed_at, at);
}

#[tokio::test]
async fn drifted_completed_count_is_corrected_on_load() {
    let pool = init_memory_database().await.unwrap();

    // A record written by hand with a count that disagrees with the items.
    sqlx::query("INSERT INTO checklist_progress (checklist_id, progress) VALUES (?, ?)")
        .bind(CHECKLIST_ID)
        .bind(
            r#"{"items":{"sitemap":{"completed_at":"2024-03-01T12:00:00Z"}},"completed_count":9}"#,
        )
        .execute(&pool)
        .await
        .unwrap();

    let store = SqliteStore::new(pool);
    let loaded = store.load_progress(CHECKLIST_ID).await.unwrap().unwrap();
    assert_eq!(loaded.completed_count, 1);
    assert!(loaded.is_completed("sitemap"));
}

#[tokio::test]
async fn progress_rows_are_keyed_by_checklist_id() {
    let pool = init_memory_database().await.unwrap();
    let store = SqliteStore::new(pool);

    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut record = ProgressRecord::new();
    record.mark_completed("sitemap", at, None);

    store.save_progress(CHECKLIST_ID, &record).await.unwrap();
    assert!(store.load_progress("another_checklist").await.unwrap().is_none());
}
