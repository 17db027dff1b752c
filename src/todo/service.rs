//! Business rules for the todo list
//!
//! The service sits between the tool handlers and the repository. It checks
//! titles and insert positions, enforces the status state machine, and answers
//! the "what's next" question.
//!
//! Allowed transitions:
//! - active → completed (`complete`)
//! - active → skipped (`skip`)
//! - completed/skipped → active (`mark_not_completed`)
//!
//! completed → skipped and skipped → completed fail with InvalidState.

use super::item::{NewTodo, Todo, TodoStatus};
use super::repository::TodoRepository;
use crate::error::{TodoError, TodoResult};
use crate::validation;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

pub struct TodoService {
    repo: TodoRepository,
}

impl TodoService {
    pub fn new(repo: TodoRepository) -> Self {
        Self { repo }
    }

    /// Append todos at the end of the list, in the given sequence.
    ///
    /// Nothing is written if any title is empty.
    pub fn create(&mut self, items: Vec<NewTodo>) -> TodoResult<Vec<Todo>> {
        let todos = build_todos(items)?;
        let created = self.repo.insert(todos, None)?;
        info!(count = created.len(), "Created todos");
        Ok(created)
    }

    /// Insert todos starting at `order`; later todos move down to make room.
    ///
    /// `order` must lie within `[0, count]`. Item `i` lands at `order + i`.
    pub fn insert_at(&mut self, order: i64, items: Vec<NewTodo>) -> TodoResult<Vec<Todo>> {
        validation::validate_order(order, self.repo.count()?)?;
        let todos = build_todos(items)?;
        let inserted = self.repo.insert(todos, Some(order))?;
        info!(count = inserted.len(), order, "Inserted todos");
        Ok(inserted)
    }

    pub fn get(&self, id: &str) -> TodoResult<Todo> {
        self.repo.get(id)
    }

    pub fn list(&self) -> TodoResult<Vec<Todo>> {
        self.repo.list()
    }

    pub fn list_active(&self) -> TodoResult<Vec<Todo>> {
        self.repo.list_by_status(TodoStatus::active)
    }

    /// Change title and/or description. An empty description clears it.
    pub fn update(
        &mut self,
        id: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> TodoResult<Todo> {
        if title.is_none() && description.is_none() {
            return Err(TodoError::validation(
                "title",
                "At least one field (title or description) must be provided",
            ));
        }

        let mut todo = self.repo.get(id)?;
        if let Some(title) = title {
            todo.title = validation::validate_title(&title)?;
        }
        if description.is_some() {
            todo.description = validation::normalize_description(description);
        }
        todo.updated_at = Utc::now();

        let updated = self.repo.update(&todo)?;
        debug!(id, "Updated todo");
        Ok(updated)
    }

    pub fn complete(&mut self, id: &str) -> TodoResult<Todo> {
        let mut todo = self.repo.get(id)?;
        match todo.status {
            TodoStatus::completed => {
                return Err(TodoError::invalid_state(id, "is already completed"));
            }
            TodoStatus::skipped => {
                return Err(TodoError::invalid_state(
                    id,
                    "is skipped; mark it not completed before completing it",
                ));
            }
            TodoStatus::active => {}
        }

        todo.mark_completed(Utc::now());
        let completed = self.repo.update(&todo)?;
        info!(id, order = completed.order, "Completed todo");
        Ok(completed)
    }

    /// Skip one or more todos. Fails, changing nothing, if any id is missing
    /// or already completed.
    pub fn skip(&mut self, ids: &[String]) -> TodoResult<Vec<Todo>> {
        let now = Utc::now();
        let mut todos = self.load_all(ids)?;
        for todo in &mut todos {
            if todo.is_completed() {
                return Err(TodoError::invalid_state(
                    &todo.id,
                    "is already completed and cannot be skipped",
                ));
            }
            if todo.is_skipped() {
                debug!(id = %todo.id, "Todo already skipped");
            }
            todo.mark_skipped(now);
        }

        self.repo.update_many(&todos)?;
        info!(count = todos.len(), "Skipped todos");
        Ok(todos)
    }

    /// Return todos to active, clearing any completion time. Fails, changing
    /// nothing, if any id is missing.
    pub fn mark_not_completed(&mut self, ids: &[String]) -> TodoResult<Vec<Todo>> {
        let now = Utc::now();
        let mut todos = self.load_all(ids)?;
        for todo in &mut todos {
            todo.mark_active(now);
        }

        self.repo.update_many(&todos)?;
        info!(count = todos.len(), "Marked todos not completed");
        Ok(todos)
    }

    /// Remove a todo, returning it
    pub fn delete(&mut self, id: &str) -> TodoResult<Todo> {
        let removed = self.repo.delete(id)?;
        info!(id, title = %removed.title, "Deleted todo");
        Ok(removed)
    }

    /// Remove every todo, returning how many were deleted
    pub fn clear(&mut self) -> TodoResult<usize> {
        let removed = self.repo.clear()?;
        info!(removed, "Cleared todo list");
        Ok(removed)
    }

    /// The active todo right after the most recently completed one.
    ///
    /// With nothing completed yet this is the first active todo. Returns
    /// `None` when no active todo follows.
    pub fn read_next(&self) -> TodoResult<Option<Todo>> {
        let todos = self.repo.list()?;

        let after = todos
            .iter()
            .filter(|todo| todo.is_completed())
            .max_by_key(|todo| (todo.completed_at, todo.order))
            .map(|todo| todo.order);

        Ok(todos
            .into_iter()
            .filter(|todo| todo.is_active())
            .find(|todo| after.is_none_or(|order| todo.order > order)))
    }

    pub fn search_by_title(&self, query: &str) -> TodoResult<Vec<Todo>> {
        self.repo.find_by_title(query)
    }

    pub fn search_by_date(&self, date: NaiveDate) -> TodoResult<Vec<Todo>> {
        self.repo.find_by_date(date)
    }

    /// Fetch each id once, in the order given. Any missing id is NotFound.
    fn load_all(&self, ids: &[String]) -> TodoResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = Vec::with_capacity(ids.len());
        for id in ids {
            if todos.iter().any(|todo| &todo.id == id) {
                continue;
            }
            todos.push(self.repo.get(id)?);
        }
        Ok(todos)
    }
}

fn build_todos(items: Vec<NewTodo>) -> TodoResult<Vec<Todo>> {
    if items.is_empty() {
        return Err(TodoError::validation("title", "At least one title is required"));
    }
    items
        .into_iter()
        .map(|item| {
            let title = validation::validate_title(&item.title)?;
            Ok(Todo::new(
                title,
                validation::normalize_description(item.description),
            ))
        })
        .collect()
}
