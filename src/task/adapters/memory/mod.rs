//! In-memory adapters for task list ports.

mod store;

pub use store::InMemoryTaskStore;
