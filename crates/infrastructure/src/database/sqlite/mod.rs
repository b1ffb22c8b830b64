pub mod schema;
pub mod sqlite_task_repository;

pub use schema::{column_exists, run_migrations, MigrationReport};
pub use sqlite_task_repository::{SqliteTaskRepository, TASK_COLUMNS};
