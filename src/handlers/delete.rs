//! Delete handler for the todo MCP server

use crate::TodoServerHandler;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// Removes a todo permanently; later todos move up one place.
    pub async fn handle_delete_todo(&self, id: String) -> McpResult<String> {
        let removed = self.with_service(|service| {
            let id = validation::parse_todo_id(&id)?;
            service.delete(&id)
        })?;
        Ok(format!("✅ Todo Deleted: \"{}\"", removed.title))
    }
}
