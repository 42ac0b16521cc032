//! 基础设施层：存储、ID 生成、仓储、日志

pub mod ids;
pub mod logger;
pub mod repository;
pub mod store;

pub use ids::{id_generator, IdGenerator, TimestampIds, UuidIds};
pub use repository::{Entity, Repository, RepositoryError, Stored};
pub use store::{Collection, JsonFileStore, MemoryStore, Record, RecordStore, StoreError};
