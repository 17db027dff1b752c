//! Update handler for the todo MCP server

use crate::TodoServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// Changes the title and/or description. `description = ""` clears it.
    /// The id, order and status cannot be changed here.
    pub async fn handle_update_todo(
        &self,
        id: String,
        title: Option<String>,
        description: Option<String>,
    ) -> McpResult<String> {
        let updated = self.with_service(|service| {
            let id = validation::parse_todo_id(&id)?;
            service.update(&id, title, description)
        })?;
        Ok(formatting::format_changed("Updated", &[updated]))
    }
}
