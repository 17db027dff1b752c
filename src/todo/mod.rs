//! Todo domain: the record type, its SQLite repository, and the service that
//! applies the ordering and status rules.

mod item;
pub(crate) mod repository;
mod service;

pub use item::{NewTodo, Todo, TodoStatus};
pub use repository::TodoRepository;
pub use service::TodoService;
