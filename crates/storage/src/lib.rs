#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::JsonFileRepository;
pub use repository::{InMemoryRepository, Storage, StorageError, StudyRepository};
