//! Todo MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for an ordered
//! todo list persisted in SQLite. Todos can be created, inserted at a position,
//! completed, skipped, searched and deleted, and the server can tell the caller
//! which todo comes next after the most recently completed one.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TodoServerHandler` and the `handlers` module - tool
//!   registration, argument validation and markdown responses
//! - **Domain Layer**: `TodoService` - ordering rules and the status state machine
//! - **Persistence Layer**: `TodoRepository` / `Storage` - a single SQLite table
//!
//! # Example
//!
//! ```no_run
//! use todo_mcp::TodoServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TodoServerHandler::new("todos.sqlite")?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
mod formatting;
pub mod handlers;
mod migration;
mod storage;
mod todo;
mod validation;

use anyhow::Result;
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{ErrorCode, Result as McpResult};
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;

// Re-export commonly used types
pub use config::Config;
pub use error::{TodoError, TodoResult};
pub use storage::Storage;
pub use todo::{NewTodo, Todo, TodoRepository, TodoService, TodoStatus};

/// MCP Server handler for the todo list
///
/// Owns the [`TodoService`] behind a mutex so that tool calls are applied one
/// at a time against the single SQLite connection.
pub struct TodoServerHandler {
    pub(crate) service: Mutex<TodoService>,
}

impl TodoServerHandler {
    /// Create a handler backed by the SQLite file at `db_path`
    ///
    /// The file (and its folder) is created if missing, and a legacy table
    /// layout is migrated in place.
    ///
    /// # Example
    /// ```no_run
    /// # use todo_mcp::TodoServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = TodoServerHandler::new("todos.sqlite")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Storage::new(db_path).open()?;
        Ok(Self::from_service(TodoService::new(TodoRepository::new(
            conn,
        ))))
    }

    /// Create a handler backed by a private in-memory database
    pub fn in_memory() -> Result<Self> {
        let conn = storage::open_in_memory()?;
        Ok(Self::from_service(TodoService::new(TodoRepository::new(
            conn,
        ))))
    }

    pub fn from_service(service: TodoService) -> Self {
        Self {
            service: Mutex::new(service),
        }
    }

    /// Run `f` against the service and turn any [`TodoError`] into a public MCP error
    pub(crate) fn with_service<T>(
        &self,
        f: impl FnOnce(&mut TodoService) -> TodoResult<T>,
    ) -> McpResult<T> {
        let mut service = self.service.lock().map_err(|_| {
            mcp_attr::Error::new(ErrorCode::INTERNAL_ERROR)
                .with_message("Todo service is unavailable".to_string(), true)
        })?;
        f(&mut service).map_err(|e| {
            warn!(error = %e, "Tool call failed");
            e.into_mcp()
        })
    }
}

/// Ordered todo list manager.
///
/// Todos have a title, an optional description, a status and an order. The
/// order is the todo's position in the list, starting at 0; inserting at a
/// position pushes later todos down and deleting closes the gap.
///
/// Statuses:
/// - **active**: still to do (every todo starts here)
/// - **completed**: done; records when it was completed
/// - **skipped**: passed over without being done
///
/// A completed todo cannot be skipped and a skipped todo cannot be completed;
/// use mark-todos-not-completed to return either to active first.
///
/// Todo IDs are UUIDs returned by create-todo and insert-todo.
#[mcp_server]
impl McpServer for TodoServerHandler {
    /// Create todos at the end of the list. Pass one title for a single todo or several for a batch (kept in the given order).
    #[tool("create-todo")]
    async fn create_todo(
        &self,
        /// Titles, one per todo (non-empty)
        title: Vec<String>,
        /// Descriptions matched to titles by position (optional)
        description: Option<Vec<String>>,
    ) -> McpResult<String> {
        self.handle_create_todo(title, description).await
    }

    /// Insert todos at a position. Todos at or after `order` move down; a batch lands at order, order+1, ...
    #[tool("insert-todo")]
    async fn insert_todo(
        &self,
        /// Position for the first todo, from 0 to the current number of todos
        order: i64,
        /// Titles, one per todo (non-empty)
        title: Vec<String>,
        /// Descriptions matched to titles by position (optional)
        description: Option<Vec<String>>,
    ) -> McpResult<String> {
        self.handle_insert_todo(order, title, description).await
    }

    /// List all todos in order.
    #[tool("list-todos")]
    async fn list_todos(&self) -> McpResult<String> {
        self.handle_list_todos().await
    }

    /// Get a specific todo by ID.
    #[tool("get-todo")]
    async fn get_todo(
        &self,
        /// Todo ID (UUID)
        id: String,
    ) -> McpResult<String> {
        self.handle_get_todo(id).await
    }

    /// Update a todo's title or description. Use "" to clear the description.
    #[tool("update-todo")]
    async fn update_todo(
        &self,
        /// Todo ID (UUID)
        id: String,
        /// New title (optional)
        title: Option<String>,
        /// New description, ""=clear (optional)
        description: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_todo(id, title, description).await
    }

    /// Mark an active todo as completed.
    #[tool("complete-todo")]
    async fn complete_todo(
        &self,
        /// Todo ID (UUID)
        id: String,
    ) -> McpResult<String> {
        self.handle_complete_todo(id).await
    }

    /// Delete a todo permanently. Later todos move up one place.
    #[tool("delete-todo")]
    async fn delete_todo(
        &self,
        /// Todo ID (UUID)
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_todo(id).await
    }

    /// Skip one or more todos. Completed todos cannot be skipped; nothing changes if any ID fails.
    #[tool("skip-todo")]
    async fn skip_todo(
        &self,
        /// Todo IDs (UUIDs)
        id: Vec<String>,
    ) -> McpResult<String> {
        self.handle_skip_todo(id).await
    }

    /// Search todos by title (case-insensitive partial match).
    #[tool("search-todos-by-title")]
    async fn search_todos_by_title(
        &self,
        /// Text to look for in titles
        query: String,
    ) -> McpResult<String> {
        self.handle_search_todos_by_title(query).await
    }

    /// Search todos by creation date (UTC).
    #[tool("search-todos-by-date")]
    async fn search_todos_by_date(
        &self,
        /// Date in YYYY-MM-DD format
        date: String,
    ) -> McpResult<String> {
        self.handle_search_todos_by_date(date).await
    }

    /// List active (not completed, not skipped) todos in order.
    #[tool("list-active-todos")]
    async fn list_active_todos(&self) -> McpResult<String> {
        self.handle_list_active_todos().await
    }

    /// Summarize active todos as a short bulleted list.
    #[tool("summarize-active-todos")]
    async fn summarize_active_todos(&self) -> McpResult<String> {
        self.handle_summarize_active_todos().await
    }

    /// Show the next todo: the first active todo after the most recently completed one.
    #[tool("read-next-todo")]
    async fn read_next_todo(&self) -> McpResult<String> {
        self.handle_read_next_todo().await
    }

    /// Return completed or skipped todos to active. Nothing changes if any ID fails.
    #[tool("mark-todos-not-completed")]
    async fn mark_todos_not_completed(
        &self,
        /// Todo IDs (UUIDs)
        id: Vec<String>,
    ) -> McpResult<String> {
        self.handle_mark_todos_not_completed(id).await
    }

    /// Delete every todo.
    #[tool("clear-todo-list")]
    async fn clear_todo_list(&self) -> McpResult<String> {
        self.handle_clear_todo_list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn get_test_handler() -> TodoServerHandler {
        TodoServerHandler::in_memory().unwrap()
    }

    /// Pull the first "ID: <uuid>" out of a response
    fn extract_id_from_response(response: &str) -> String {
        response
            .lines()
            .find_map(|line| line.strip_prefix("ID: "))
            .unwrap_or("")
            .trim()
            .to_string()
    }

    fn extract_ids_from_response(response: &str) -> Vec<String> {
        response
            .lines()
            .filter_map(|line| line.strip_prefix("ID: "))
            .map(|id| id.trim().to_string())
            .collect()
    }

    async fn create(handler: &TodoServerHandler, title: &str) -> String {
        let response = handler
            .handle_create_todo(vec![title.to_string()], None)
            .await
            .unwrap();
        extract_id_from_response(&response)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let handler = get_test_handler();
        let response = handler
            .handle_create_todo(
                vec!["Buy milk".to_string()],
                Some(vec!["Semi-skimmed".to_string()]),
            )
            .await
            .unwrap();
        assert!(response.starts_with("✅ Todo Created:"));

        let id = extract_id_from_response(&response);
        let todo = handler.handle_get_todo(id.clone()).await.unwrap();
        assert!(todo.contains("## 0. Buy milk"));
        assert!(todo.contains("Description: Semi-skimmed"));
        assert!(todo.contains(&id));
    }

    #[tokio::test]
    async fn test_bulk_create_keeps_order() {
        let handler = get_test_handler();
        let response = handler
            .handle_create_todo(
                vec!["one".to_string(), "two".to_string(), "three".to_string()],
                None,
            )
            .await
            .unwrap();
        assert!(response.starts_with("✅ 3 Todos Created:"));
        assert_eq!(extract_ids_from_response(&response).len(), 3);

        let list = handler.handle_list_todos().await.unwrap();
        let one = list.find("## 0. one").unwrap();
        let two = list.find("## 1. two").unwrap();
        let three = list.find("## 2. three").unwrap();
        assert!(one < two && two < three);
    }

    #[tokio::test]
    async fn test_empty_title_is_validation_error() {
        let handler = get_test_handler();
        create(&handler, "existing").await;

        let result = handler
            .handle_create_todo(vec!["".to_string()], None)
            .await;
        assert!(result.is_err());

        let list = handler.handle_list_todos().await.unwrap();
        assert!(list.starts_with("# Todo List (1 item)"));
    }

    #[tokio::test]
    async fn test_insert_todo() {
        let handler = get_test_handler();
        handler
            .handle_create_todo(vec!["a".to_string(), "b".to_string()], None)
            .await
            .unwrap();

        handler
            .handle_insert_todo(1, vec!["x".to_string()], None)
            .await
            .unwrap();
        let list = handler.handle_list_todos().await.unwrap();
        assert!(list.contains("## 1. x"));
        assert!(list.contains("## 2. b"));

        assert!(
            handler
                .handle_insert_todo(9, vec!["y".to_string()], None)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_invalid_id_is_rejected() {
        let handler = get_test_handler();
        assert!(handler.handle_get_todo("task-1".to_string()).await.is_err());
        assert!(
            handler
                .handle_complete_todo("not-a-uuid".to_string())
                .await
                .is_err()
        );
        assert!(handler.handle_skip_todo(vec![]).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let handler = get_test_handler();
        let missing = uuid::Uuid::new_v4().to_string();
        assert!(handler.handle_get_todo(missing.clone()).await.is_err());
        assert!(handler.handle_complete_todo(missing.clone()).await.is_err());
        assert!(handler.handle_delete_todo(missing.clone()).await.is_err());
        assert!(
            handler
                .handle_update_todo(missing, Some("x".to_string()), None)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_status_workflow() {
        let handler = get_test_handler();
        let first = create(&handler, "first").await;
        let second = create(&handler, "second").await;

        let response = handler.handle_complete_todo(first.clone()).await.unwrap();
        assert!(response.contains("Status: Completed"));
        assert!(handler.handle_complete_todo(first.clone()).await.is_err());
        assert!(handler.handle_skip_todo(vec![first.clone()]).await.is_err());

        let response = handler.handle_skip_todo(vec![second.clone()]).await.unwrap();
        assert!(response.contains("Status: Skipped"));
        assert_eq!(
            handler.handle_list_active_todos().await.unwrap(),
            "No todos found."
        );

        let response = handler
            .handle_mark_todos_not_completed(vec![first.clone(), second.clone()])
            .await
            .unwrap();
        assert!(response.starts_with("✅ 2 Todos Marked Not Completed:"));
        let active = handler.handle_list_active_todos().await.unwrap();
        assert!(active.contains("## 0. first"));
        assert!(active.contains("## 1. second"));
    }

    #[tokio::test]
    async fn test_read_next_todo() {
        let handler = get_test_handler();
        let response = handler
            .handle_create_todo(
                vec!["t0", "t1", "t2", "t3"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                None,
            )
            .await
            .unwrap();
        let ids = extract_ids_from_response(&response);

        let next = handler.handle_read_next_todo().await.unwrap();
        assert!(next.contains("## 0. t0"));

        handler.handle_complete_todo(ids[1].clone()).await.unwrap();
        let next = handler.handle_read_next_todo().await.unwrap();
        assert!(next.contains("## 2. t2"));

        handler.handle_clear_todo_list().await.unwrap();
        let next = handler.handle_read_next_todo().await.unwrap();
        assert_eq!(next, "No active todo after the most recently completed one.");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let handler = get_test_handler();
        let id = create(&handler, "draft").await;

        let response = handler
            .handle_update_todo(id.clone(), Some("final".to_string()), None)
            .await
            .unwrap();
        assert!(response.contains("## 0. final"));
        assert!(
            handler
                .handle_update_todo(id.clone(), Some("".to_string()), None)
                .await
                .is_err()
        );

        let response = handler.handle_delete_todo(id.clone()).await.unwrap();
        assert_eq!(response, "✅ Todo Deleted: \"final\"");
        assert!(handler.handle_delete_todo(id).await.is_err());
    }

    #[tokio::test]
    async fn test_search_tools() {
        let handler = get_test_handler();
        create(&handler, "buy milk").await;
        create(&handler, "walk dog").await;

        let found = handler
            .handle_search_todos_by_title("Buy".to_string())
            .await
            .unwrap();
        assert!(found.contains("buy milk"));
        assert!(!found.contains("walk dog"));

        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let found = handler.handle_search_todos_by_date(today).await.unwrap();
        assert!(found.starts_with("# Todo List (2 items)"));

        assert!(
            handler
                .handle_search_todos_by_date("03/15/2025".to_string())
                .await
                .is_err()
        );
        assert!(
            handler
                .handle_search_todos_by_title(" ".to_string())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_clear_and_summary() {
        let handler = get_test_handler();
        create(&handler, "a").await;
        create(&handler, "b").await;

        let summary = handler.handle_summarize_active_todos().await.unwrap();
        assert!(summary.contains("There are 2 active todos"));

        let response = handler.handle_clear_todo_list().await.unwrap();
        assert!(response.contains("deleted 2 todo(s)"));
        assert_eq!(handler.handle_list_todos().await.unwrap(), "No todos found.");
        assert_eq!(
            handler.handle_summarize_active_todos().await.unwrap(),
            "No active todos found."
        );
    }

    #[tokio::test]
    async fn test_persists_across_handlers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.sqlite");

        {
            let handler = TodoServerHandler::new(&path).unwrap();
            create(&handler, "survives restart").await;
        }

        let handler = TodoServerHandler::new(&path).unwrap();
        let list = handler.handle_list_todos().await.unwrap();
        assert!(list.contains("survives restart"));
    }
}
