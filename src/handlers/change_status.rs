//! Status change handlers: complete, skip, mark not completed

use crate::TodoServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// active → completed. Already completed or skipped todos are rejected.
    pub async fn handle_complete_todo(&self, id: String) -> McpResult<String> {
        let completed = self.with_service(|service| {
            let id = validation::parse_todo_id(&id)?;
            service.complete(&id)
        })?;
        Ok(formatting::format_changed("Completed", &[completed]))
    }

    /// active → skipped for every id; nothing changes if any id fails.
    pub async fn handle_skip_todo(&self, id: Vec<String>) -> McpResult<String> {
        let skipped = self.with_service(|service| {
            let ids = validation::parse_todo_ids(&id)?;
            service.skip(&ids)
        })?;
        Ok(formatting::format_changed("Skipped", &skipped))
    }

    /// completed/skipped → active for every id; nothing changes if any id fails.
    pub async fn handle_mark_todos_not_completed(&self, id: Vec<String>) -> McpResult<String> {
        let restored = self.with_service(|service| {
            let ids = validation::parse_todo_ids(&id)?;
            service.mark_not_completed(&ids)
        })?;
        Ok(formatting::format_changed("Marked Not Completed", &restored))
    }
}
