//! Create and insert handlers

use crate::TodoServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// Appends todos to the end of the list. Titles and descriptions are paired by position.
    pub async fn handle_create_todo(
        &self,
        title: Vec<String>,
        description: Option<Vec<String>>,
    ) -> McpResult<String> {
        let created = self.with_service(|service| {
            let items = validation::pair_items(title, description)?;
            service.create(items)
        })?;
        Ok(formatting::format_changed("Created", &created))
    }

    /// Inserts todos starting at `order`, pushing later todos down.
    pub async fn handle_insert_todo(
        &self,
        order: i64,
        title: Vec<String>,
        description: Option<Vec<String>>,
    ) -> McpResult<String> {
        let inserted = self.with_service(|service| {
            let items = validation::pair_items(title, description)?;
            service.insert_at(order, items)
        })?;
        Ok(formatting::format_changed("Inserted", &inserted))
    }
}
