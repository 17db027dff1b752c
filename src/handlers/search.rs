//! Lookup handlers: by id, by title, by creation date

use crate::TodoServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    pub async fn handle_get_todo(&self, id: String) -> McpResult<String> {
        let todo = self.with_service(|service| {
            let id = validation::parse_todo_id(&id)?;
            service.get(&id)
        })?;
        Ok(formatting::format_todo(&todo))
    }

    pub async fn handle_search_todos_by_title(&self, query: String) -> McpResult<String> {
        let todos = self.with_service(|service| {
            let query = validation::validate_query(&query)?;
            service.search_by_title(&query)
        })?;
        Ok(formatting::format_todo_list(&todos))
    }

    pub async fn handle_search_todos_by_date(&self, date: String) -> McpResult<String> {
        let todos = self.with_service(|service| {
            let date = validation::parse_date(&date)?;
            service.search_by_date(date)
        })?;
        Ok(formatting::format_todo_list(&todos))
    }
}
