pub mod collection;
pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod query_builder;
pub mod repository;
pub mod store;

pub use collection::Collection;
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryServiceStore;
pub use models::{NewService, Service, ServiceChanges, ServiceInput, ServiceUpdate};
pub use postgres::PgServiceStore;
pub use repository::ServiceRepository;
pub use store::ServiceStore;
