//! Argument validation for the todo tools
//!
//! Every function here turns raw tool arguments into typed values or a
//! [`TodoError::Validation`] naming the offending field.

use crate::error::{TodoError, TodoResult};
use crate::todo::NewTodo;
use chrono::NaiveDate;
use uuid::Uuid;

/// Parse a todo id, normalizing it to the lowercase hyphenated UUID form
pub fn parse_todo_id(id: &str) -> TodoResult<String> {
    Uuid::parse_str(id.trim())
        .map(|uuid| uuid.hyphenated().to_string())
        .map_err(|_| TodoError::validation("id", format!("Invalid Todo ID '{}'", id)))
}

/// Parse a non-empty list of todo ids
pub fn parse_todo_ids(ids: &[String]) -> TodoResult<Vec<String>> {
    if ids.is_empty() {
        return Err(TodoError::validation(
            "id",
            "No IDs provided. Please specify at least one todo ID.",
        ));
    }
    ids.iter().map(|id| parse_todo_id(id)).collect()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> TodoResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        TodoError::validation(
            "date",
            format!(
                "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
                date
            ),
        )
    })
}

/// Trim a title and reject it if nothing is left
pub fn validate_title(title: &str) -> TodoResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoError::validation("title", "Title must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Empty descriptions are stored as "no description"
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

/// Search queries must contain something to search for
pub fn validate_query(query: &str) -> TodoResult<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(TodoError::validation("query", "Search term is required"));
    }
    Ok(trimmed.to_string())
}

/// An insert position must fall within `[0, count]`
pub fn validate_order(order: i64, count: i64) -> TodoResult<()> {
    if !(0..=count).contains(&order) {
        return Err(TodoError::validation(
            "order",
            format!("Order {} is out of range. Valid range: 0..={}", order, count),
        ));
    }
    Ok(())
}

/// Pair titles with descriptions by position.
///
/// Missing trailing descriptions mean "no description"; more descriptions than
/// titles is an error. Titles are checked later by the service.
pub fn pair_items(
    titles: Vec<String>,
    descriptions: Option<Vec<String>>,
) -> TodoResult<Vec<NewTodo>> {
    if titles.is_empty() {
        return Err(TodoError::validation(
            "title",
            "At least one title is required",
        ));
    }

    let descriptions = descriptions.unwrap_or_default();
    if descriptions.len() > titles.len() {
        return Err(TodoError::validation(
            "description",
            format!(
                "Got {} descriptions for {} titles",
                descriptions.len(),
                titles.len()
            ),
        ));
    }

    let mut descriptions = descriptions.into_iter();
    Ok(titles
        .into_iter()
        .map(|title| NewTodo::new(title, normalize_description(descriptions.next())))
        .collect())
}
