//! MCP tool handlers for the todo server
//!
//! Each `handle_*` method validates the tool's arguments, calls the
//! [`TodoService`](crate::TodoService) and renders the result as markdown.

pub mod change_status;
pub mod clear;
pub mod create;
pub mod delete;
pub mod list;
pub mod search;
pub mod update;
