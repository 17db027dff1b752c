//! Common test utilities for integration tests

#![allow(dead_code)]

use tempfile::TempDir;
use todo_mcp::{NewTodo, Storage, TodoRepository, TodoServerHandler, TodoService};

/// Create a handler backed by an in-memory database
pub fn get_test_handler() -> TodoServerHandler {
    TodoServerHandler::in_memory().unwrap()
}

/// Create a service over a fresh database file inside a temporary folder
pub fn get_test_service() -> (TodoService, TempDir) {
    let dir = TempDir::new().unwrap();
    let conn = Storage::new(dir.path().join("todos.sqlite")).open().unwrap();
    (TodoService::new(TodoRepository::new(conn)), dir)
}

pub fn items(titles: &[&str]) -> Vec<NewTodo> {
    titles.iter().map(|t| NewTodo::new(*t, None)).collect()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Extract every "ID: <uuid>" line from a tool response
pub fn extract_ids_from_response(response: &str) -> Vec<String> {
    response
        .lines()
        .filter_map(|line| line.strip_prefix("ID: "))
        .map(|id| id.trim().to_string())
        .collect()
}
