//! List handlers for the todo MCP server

use crate::TodoServerHandler;
use crate::formatting;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    pub async fn handle_list_todos(&self) -> McpResult<String> {
        let todos = self.with_service(|service| service.list())?;
        Ok(formatting::format_todo_list(&todos))
    }

    pub async fn handle_list_active_todos(&self) -> McpResult<String> {
        let todos = self.with_service(|service| service.list_active())?;
        Ok(formatting::format_todo_list(&todos))
    }

    pub async fn handle_summarize_active_todos(&self) -> McpResult<String> {
        let todos = self.with_service(|service| service.list_active())?;
        Ok(formatting::format_active_summary(&todos))
    }

    /// Shows the active todo following the most recently completed one.
    pub async fn handle_read_next_todo(&self) -> McpResult<String> {
        let next = self.with_service(|service| service.read_next())?;
        Ok(match next {
            Some(todo) => format!("Next todo:\n\n{}", formatting::format_todo(&todo)),
            None => "No active todo after the most recently completed one.".to_string(),
        })
    }
}
