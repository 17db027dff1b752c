//! Clear handler for the todo MCP server

use crate::TodoServerHandler;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// Removes every todo.
    pub async fn handle_clear_todo_list(&self) -> McpResult<String> {
        let count = self.with_service(|service| service.clear())?;
        Ok(format!("✅ Todo list cleared: deleted {} todo(s)", count))
    }
}
