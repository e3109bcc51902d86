//! Persisted selection and progress storage
//!
//! The workflow never talks to the database directly; it goes through
//! [`ChecklistStore`] so hosts can supply their own persistence. The shipped
//! implementation is [`SqliteStore`] over the schema created by
//! [`crate::db::init_database`].

use crate::db::SECTIONS_KEY;
use prodcheck_common::progress::ProgressRecord;
use prodcheck_common::selection::SectionSelection;
use prodcheck_common::Result;
use sqlx::SqlitePool;
use tracing::warn;

/// Storage contract for the section selection and the checklist progress
/// record.
///
/// Loads tolerate missing data: a site that was never configured has no
/// selection row yet, and the progress record belongs to the host's
/// checklist tracker, which may not have created it. Saves are
/// last-write-wins; retry policy belongs to the caller's persistence layer.
#[allow(async_fn_in_trait)]
pub trait ChecklistStore {
    /// Load the persisted section selection, empty if never saved
    async fn load_selection(&self) -> Result<SectionSelection>;

    /// Persist the section selection
    async fn save_selection(&self, selection: &SectionSelection) -> Result<()>;

    /// Load the progress record for a checklist, `None` if the tracker
    /// never created one
    async fn load_progress(&self, checklist_id: &str) -> Result<Option<ProgressRecord>>;

    /// Persist the progress record for a checklist
    async fn save_progress(&self, checklist_id: &str, record: &ProgressRecord) -> Result<()>;
}

/// SQLite-backed store over the settings and checklist_progress tables
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl ChecklistStore for SqliteStore {
    async fn load_selection(&self) -> Result<SectionSelection> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT value FROM settings WHERE key = ?")
                .bind(SECTIONS_KEY)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((Some(value),)) => Ok(serde_json::from_str(&value)?),
            // Missing row or NULL value: never configured
            _ => Ok(SectionSelection::new()),
        }
    }

    async fn save_selection(&self, selection: &SectionSelection) -> Result<()> {
        let value = serde_json::to_string(selection)?;
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(SECTIONS_KEY)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_progress(&self, checklist_id: &str) -> Result<Option<ProgressRecord>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT progress FROM checklist_progress WHERE checklist_id = ?")
                .bind(checklist_id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((value,)) => {
                let mut record: ProgressRecord = serde_json::from_str(&value)?;
                if record.normalize() {
                    warn!(
                        "Progress record '{}' had a drifted completed count, corrected to {}",
                        checklist_id, record.completed_count
                    );
                }
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn save_progress(&self, checklist_id: &str, record: &ProgressRecord) -> Result<()> {
        let value = serde_json::to_string(record)?;
        sqlx::query(
            r#"
            INSERT INTO checklist_progress (checklist_id, progress, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(checklist_id) DO UPDATE
            SET progress = excluded.progress, updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(checklist_id)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
