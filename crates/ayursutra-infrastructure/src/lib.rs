pub mod in_memory_user_repository;
pub mod local_storage_user_repository;
pub mod paths;
pub mod storage;

pub use crate::in_memory_user_repository::InMemoryUserRepository;
pub use crate::local_storage_user_repository::LocalStorageUserRepository;
pub use crate::paths::AyurPaths;
