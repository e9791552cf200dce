//! Remote schema source and the loading service built on it

mod file;
mod service;
mod traits;

pub use file::FileSchemaSource;
pub use service::{CommentForms, LoadedEventType};
pub use traits::SchemaSource;

#[cfg(test)]
pub use traits::MockSchemaSource;
