// Domain layer modules
pub mod id_generator;
pub mod item;
pub mod item_validator;

// Re-exports
pub use id_generator::{IdGenerator, UuidV7IdGenerator};
pub use item::{Item, ItemUpdate, NewItem};
pub use item_validator::{ItemValidator, ValidationError};
