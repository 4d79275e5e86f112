pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod params;
pub mod update;

// Re-export handler functions for use in routing
pub use create::create as service_create;
pub use delete::delete as service_delete;
pub use get::get as service_get;
pub use list::list as service_list;
pub use update::update as service_update;
