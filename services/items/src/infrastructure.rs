// Infrastructure layer modules
pub mod config;
pub mod item_repository;
pub mod logging;
pub mod update_expression;

// Re-exports
pub use config::{DynamoDbConfig, DynamoDbConfigError};
pub use item_repository::{DynamoItemRepository, ItemRepository, RepositoryError};
pub use logging::init_logging;
pub use update_expression::UpdateExpression;
