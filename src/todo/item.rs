use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Todo status
///
/// Uses lowercase naming to match the value stored in the `status` column.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoStatus {
    /// Not yet done (initial state)
    active,
    /// Done; `completed_at` is set
    completed,
    /// Passed over without being done
    skipped,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::active => "active",
            TodoStatus::completed => "completed",
            TodoStatus::skipped => "skipped",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(TodoStatus::active),
            "completed" => Ok(TodoStatus::completed),
            "skipped" => Ok(TodoStatus::skipped),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: active, completed, skipped",
                s
            )),
        }
    }
}

impl ToSql for TodoStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TodoStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// A single task record
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    /// UUID v4, immutable
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    /// Position in the list; dense `0..n-1` across all todos
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present if and only if `status == completed`
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Build a fresh active todo. The order is assigned by the repository on insert.
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description,
            status: TodoStatus::active,
            order: 0,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TodoStatus::active
    }

    pub fn is_completed(&self) -> bool {
        self.status == TodoStatus::completed
    }

    pub fn is_skipped(&self) -> bool {
        self.status == TodoStatus::skipped
    }

    pub(crate) fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.status = TodoStatus::completed;
        self.completed_at = Some(at);
        self.updated_at = at;
    }

    pub(crate) fn mark_skipped(&mut self, at: DateTime<Utc>) {
        self.status = TodoStatus::skipped;
        self.completed_at = None;
        self.updated_at = at;
    }

    pub(crate) fn mark_active(&mut self, at: DateTime<Utc>) {
        self.status = TodoStatus::active;
        self.completed_at = None;
        self.updated_at = at;
    }
}

/// Title/description pair used by create and insert operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }
}
