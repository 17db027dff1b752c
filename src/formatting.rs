//! Markdown rendering of todos for tool responses

use crate::todo::{Todo, TodoStatus};

fn status_marker(status: TodoStatus) -> &'static str {
    match status {
        TodoStatus::completed => "✓",
        TodoStatus::skipped => "⁉",
        TodoStatus::active => "✗",
    }
}

fn status_text(status: TodoStatus) -> &'static str {
    match status {
        TodoStatus::completed => "Completed",
        TodoStatus::skipped => "Skipped",
        TodoStatus::active => "Not completed",
    }
}

/// Render a single todo as a markdown section
pub fn format_todo(todo: &Todo) -> String {
    let mut result = format!(
        "## {}. {} {}\n\nOrder: {}\nID: {}\nStatus: {}\n",
        todo.order,
        todo.title,
        status_marker(todo.status),
        todo.order,
        todo.id,
        status_text(todo.status)
    );

    if let Some(ref description) = todo.description {
        result.push_str(&format!("Description: {}\n", description));
    }
    result.push_str(&format!(
        "Created: {}\n",
        todo.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(completed_at) = todo.completed_at {
        result.push_str(&format!(
            "Completed: {}\n",
            completed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    result.trim_end().to_string()
}

/// Render a list of todos, or a "nothing found" line when empty
pub fn format_todo_list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No todos found.".to_string();
    }

    let items: Vec<String> = todos.iter().map(format_todo).collect();
    format!(
        "# Todo List ({} item{})\n\n{}",
        todos.len(),
        if todos.len() == 1 { "" } else { "s" },
        items.join("\n\n---\n\n")
    )
}

/// Render the result of an operation that touched one or more todos
pub fn format_changed(action: &str, todos: &[Todo]) -> String {
    let items: Vec<String> = todos.iter().map(format_todo).collect();
    if todos.len() == 1 {
        format!("✅ Todo {}:\n\n{}", action, items[0])
    } else {
        format!(
            "✅ {} Todos {}:\n\n{}",
            todos.len(),
            action,
            items.join("\n\n---\n\n")
        )
    }
}

/// Bulleted summary of active todos
pub fn format_active_summary(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No active todos found.".to_string();
    }

    let bullets: Vec<String> = todos
        .iter()
        .map(|todo| format!("- {}. {}", todo.order, todo.title))
        .collect();
    format!(
        "# Active Todos Summary\n\nThere {} {} active todo{}:\n\n{}",
        if todos.len() == 1 { "is" } else { "are" },
        todos.len(),
        if todos.len() == 1 { "" } else { "s" },
        bullets.join("\n")
    )
}
