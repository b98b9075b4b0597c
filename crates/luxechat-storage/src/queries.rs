// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value CRUD operations.

use luxechat_core::LuxeError;
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

/// Read the value stored under `key`, if any.
pub async fn get_value(db: &Database, key: &str) -> Result<Option<String>, LuxeError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Write `value` under `key`, replacing any prior value.
pub async fn set_value(db: &Database, key: &str, value: &str) -> Result<(), LuxeError> {
    let key = key.to_string();
    let value = value.to_string();
    let updated_at = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE
                 SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete the value stored under `key`. Deleting a missing key is a no-op.
pub async fn remove_value(db: &Database, key: &str) -> Result<(), LuxeError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn open_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("queries.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let (db, _dir) = open_db().await;
        assert_eq!(get_value(&db, "missing").await.unwrap(), None);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let (db, _dir) = open_db().await;
        set_value(&db, "chat.history", r#"[{"role":"user","content":"halo"}]"#)
            .await
            .unwrap();
        let value = get_value(&db, "chat.history").await.unwrap();
        assert_eq!(
            value.as_deref(),
            Some(r#"[{"role":"user","content":"halo"}]"#)
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn set_overwrites_existing_value() {
        let (db, _dir) = open_db().await;
        set_value(&db, "k", "first").await.unwrap();
        set_value(&db, "k", "second").await.unwrap();
        assert_eq!(get_value(&db, "k").await.unwrap().as_deref(), Some("second"));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_missing() {
        let (db, _dir) = open_db().await;
        set_value(&db, "k", "v").await.unwrap();
        remove_value(&db, "k").await.unwrap();
        assert_eq!(get_value(&db, "k").await.unwrap(), None);
        // Removing again is a no-op.
        remove_value(&db, "k").await.unwrap();
        db.close().await.unwrap();
    }
}
