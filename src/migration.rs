//! Upgrade of legacy `todos` table layouts
//!
//! Older databases used one of two layouts, neither of which has a `status`
//! column:
//!
//! - **Timestamped**: `id, title, description, completedAt, createdAt, updatedAt`,
//!   optionally with `skippedAt` and `"order"`. A todo is completed iff
//!   `completedAt` is set, otherwise skipped iff `skippedAt` is set. Rows keep
//!   their stored order when there is one, else creation order.
//! - **Flagged**: `id, task_name, completed, skipped, "order"`. Completion and
//!   skip are 0/1 flags; no timestamps were kept.
//!
//! Both are rebuilt into the current schema inside a single transaction, with
//! orders renumbered densely from 0.

use crate::error::{TodoError, TodoResult};
use crate::storage::CREATE_SCHEMA;
use crate::todo::{Todo, TodoStatus, repository};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Connection;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegacyLayout {
    Timestamped,
    Flagged,
}

impl LegacyLayout {
    fn detect(columns: &[String]) -> Option<Self> {
        let has = |name: &str| columns.iter().any(|c| c == name);
        if has("title") && has("completedAt") && has("createdAt") {
            Some(LegacyLayout::Timestamped)
        } else if has("task_name") && has("completed") && has("skipped") {
            Some(LegacyLayout::Flagged)
        } else {
            None
        }
    }
}

/// True when a `todos` table exists but predates the `status` column
pub(crate) fn needs_migration(conn: &Connection) -> TodoResult<bool> {
    let columns = todo_columns(conn)?;
    Ok(!columns.is_empty() && !columns.iter().any(|c| c == "status"))
}

/// Rebuild a legacy `todos` table into the current schema.
///
/// Returns the number of migrated rows.
pub(crate) fn migrate_legacy(conn: &Connection) -> TodoResult<usize> {
    let columns = todo_columns(conn)?;
    let layout = LegacyLayout::detect(&columns).ok_or_else(|| {
        TodoError::Migration(format!(
            "unrecognised todos table layout (columns: {})",
            columns.join(", ")
        ))
    })?;

    let mut todos = match layout {
        LegacyLayout::Timestamped => read_timestamped(conn, &columns)?,
        LegacyLayout::Flagged => read_flagged(conn)?,
    };
    for (order, todo) in todos.iter_mut().enumerate() {
        todo.order = order as i64;
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("ALTER TABLE todos RENAME TO todos_legacy;")?;
    tx.execute_batch(CREATE_SCHEMA)?;
    for todo in &todos {
        repository::insert_row(&tx, todo)?;
    }
    tx.execute_batch("DROP TABLE todos_legacy;")?;
    tx.commit()?;

    info!(rows = todos.len(), layout = ?layout, "Migrated legacy todos table");
    Ok(todos.len())
}

fn todo_columns(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info(todos)")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

fn read_timestamped(conn: &Connection, columns: &[String]) -> rusqlite::Result<Vec<Todo>> {
    let has = |name: &str| columns.iter().any(|c| c == name);
    let skipped_at = if has("skippedAt") { "skippedAt" } else { "NULL" };
    let order_by = if has("order") {
        r#""order", createdAt, rowid"#
    } else {
        "createdAt, rowid"
    };

    let now = Utc::now();
    let mut stmt = conn.prepare(&format!(
        "SELECT id, title, description, completedAt, createdAt, updatedAt, {skipped_at}
         FROM todos ORDER BY {order_by}"
    ))?;
    let todos = stmt
        .query_map([], |row| {
            let completed_at = parse_legacy_timestamp(row.get(3)?);
            let created_at = parse_legacy_timestamp(row.get(4)?).unwrap_or(now);
            let skipped = row.get::<_, Option<String>>(6)?.is_some();
            let status = if completed_at.is_some() {
                TodoStatus::completed
            } else if skipped {
                TodoStatus::skipped
            } else {
                TodoStatus::active
            };
            Ok(Todo {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row
                    .get::<_, Option<String>>(2)?
                    .filter(|d| !d.is_empty()),
                status,
                order: 0,
                created_at,
                updated_at: parse_legacy_timestamp(row.get(5)?).unwrap_or(created_at),
                completed_at,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(todos)
}

fn read_flagged(conn: &Connection) -> rusqlite::Result<Vec<Todo>> {
    let now = Utc::now();
    let mut stmt = conn.prepare(
        r#"SELECT id, task_name, completed, skipped FROM todos ORDER BY "order", rowid"#,
    )?;
    let todos = stmt
        .query_map([], |row| {
            let completed: i64 = row.get(2)?;
            let skipped: i64 = row.get(3)?;
            let status = if completed != 0 {
                TodoStatus::completed
            } else if skipped != 0 {
                TodoStatus::skipped
            } else {
                TodoStatus::active
            };
            Ok(Todo {
                id: row.get(0)?,
                title: row.get(1)?,
                description: None,
                status,
                order: 0,
                created_at: now,
                updated_at: now,
                completed_at: (status == TodoStatus::completed).then_some(now),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(todos)
}

/// Accepts RFC 3339 or a naive ISO timestamp (assumed UTC)
fn parse_legacy_timestamp(value: Option<String>) -> Option<DateTime<Utc>> {
    let value = value?;
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
