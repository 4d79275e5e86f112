pub mod service;

pub use service::{NewService, Service, ServiceChanges, ServiceInput, ServiceUpdate};
