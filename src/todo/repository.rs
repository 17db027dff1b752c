//! SQLite-backed storage for todo rows
//!
//! The repository owns the connection it was constructed with. Every method
//! that touches more than one row runs inside a transaction so that order
//! shifts and inserts/deletes land together or not at all.

use super::item::{Todo, TodoStatus};
use crate::error::{TodoError, TodoResult};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_TODO: &str = r#"
    SELECT id, title, description, status, "order", created_at, updated_at, completed_at
    FROM todos
"#;

pub struct TodoRepository {
    conn: Connection,
}

impl TodoRepository {
    /// Wrap an open connection whose schema is already in place
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Insert todos as one contiguous block.
    ///
    /// Without `at_order` the block is appended after the current last todo.
    /// With `at_order = k`, every todo at or after `k` moves up by the block
    /// length and the block lands at `k, k+1, ...`. An `at_order` past the end
    /// appends.
    ///
    /// Returns the inserted todos with their assigned orders.
    pub fn insert(&mut self, todos: Vec<Todo>, at_order: Option<i64>) -> TodoResult<Vec<Todo>> {
        let tx = self.conn.transaction()?;

        let end = next_order(&tx)?;
        let start = match at_order {
            Some(k) if k < end => {
                let k = k.max(0);
                shift_orders(&tx, k, todos.len() as i64)?;
                k
            }
            _ => end,
        };

        let mut inserted = Vec::with_capacity(todos.len());
        for (offset, mut todo) in todos.into_iter().enumerate() {
            todo.order = start + offset as i64;
            insert_row(&tx, &todo)?;
            inserted.push(todo);
        }

        tx.commit()?;
        Ok(inserted)
    }

    pub fn get(&self, id: &str) -> TodoResult<Todo> {
        fetch(&self.conn, id)?.ok_or_else(|| TodoError::NotFound(id.to_string()))
    }

    /// All todos by ascending order
    pub fn list(&self) -> TodoResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!(r#"{SELECT_TODO} ORDER BY "order""#))?;
        let todos = stmt
            .query_map([], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(todos)
    }

    pub fn list_by_status(&self, status: TodoStatus) -> TodoResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!(r#"{SELECT_TODO} WHERE status = ?1 ORDER BY "order""#))?;
        let todos = stmt
            .query_map(params![status], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(todos)
    }

    pub fn count(&self) -> TodoResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Persist the mutable fields of `todo` (title, description, status, timestamps).
    /// The order is left untouched.
    pub fn update(&mut self, todo: &Todo) -> TodoResult<Todo> {
        if update_row(&self.conn, todo)? == 0 {
            return Err(TodoError::NotFound(todo.id.clone()));
        }
        self.get(&todo.id)
    }

    /// Persist several todos atomically. Fails with NotFound, changing nothing,
    /// if any of them is missing.
    pub fn update_many(&mut self, todos: &[Todo]) -> TodoResult<()> {
        let tx = self.conn.transaction()?;
        for todo in todos {
            if update_row(&tx, todo)? == 0 {
                return Err(TodoError::NotFound(todo.id.clone()));
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Remove a todo and close the gap it leaves in the order sequence
    pub fn delete(&mut self, id: &str) -> TodoResult<Todo> {
        let tx = self.conn.transaction()?;

        let todo = fetch(&tx, id)?.ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        tx.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        shift_orders(&tx, todo.order + 1, -1)?;

        tx.commit()?;
        Ok(todo)
    }

    /// Delete every row, returning how many were removed
    pub fn clear(&mut self) -> TodoResult<usize> {
        Ok(self.conn.execute("DELETE FROM todos", [])?)
    }

    /// Case-insensitive substring match on the title
    pub fn find_by_title(&self, query: &str) -> TodoResult<Vec<Todo>> {
        let needle = query.to_lowercase();
        let mut todos = self.list()?;
        todos.retain(|todo| todo.title.to_lowercase().contains(&needle));
        Ok(todos)
    }

    /// Todos created on the given (UTC) calendar date
    pub fn find_by_date(&self, date: NaiveDate) -> TodoResult<Vec<Todo>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"{SELECT_TODO} WHERE substr(created_at, 1, 10) = ?1 ORDER BY "order""#
        ))?;
        let todos = stmt
            .query_map(params![date.format("%Y-%m-%d").to_string()], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(todos)
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        order: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
        completed_at: row.get(7)?,
    })
}

fn fetch(conn: &Connection, id: &str) -> rusqlite::Result<Option<Todo>> {
    conn.query_row(
        &format!("{SELECT_TODO} WHERE id = ?1"),
        params![id],
        from_row,
    )
    .optional()
}

fn next_order(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row(
        r#"SELECT COALESCE(MAX("order") + 1, 0) FROM todos"#,
        [],
        |row| row.get(0),
    )
}

/// Move every todo with `order >= from` by `delta`.
///
/// The `order` column is UNIQUE and SQLite checks it row by row, so the rows
/// are first parked on distinct negative values and then flipped back.
fn shift_orders(conn: &Connection, from: i64, delta: i64) -> rusqlite::Result<()> {
    conn.execute(
        r#"UPDATE todos SET "order" = -("order" + ?2) - 1 WHERE "order" >= ?1"#,
        params![from, delta],
    )?;
    conn.execute(
        r#"UPDATE todos SET "order" = -"order" - 1 WHERE "order" < 0"#,
        [],
    )?;
    Ok(())
}

pub(crate) fn insert_row(conn: &Connection, todo: &Todo) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO todos (id, title, description, status, "order", created_at, updated_at, completed_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            todo.id,
            todo.title,
            todo.description,
            todo.status,
            todo.order,
            todo.created_at,
            todo.updated_at,
            todo.completed_at,
        ],
    )?;
    Ok(())
}

fn update_row(conn: &Connection, todo: &Todo) -> rusqlite::Result<usize> {
    conn.execute(
        r#"
        UPDATE todos
        SET title = ?2, description = ?3, status = ?4, updated_at = ?5, completed_at = ?6
        WHERE id = ?1
        "#,
        params![
            todo.id,
            todo.title,
            todo.description,
            todo.status,
            todo.updated_at,
            todo.completed_at,
        ],
    )
}
