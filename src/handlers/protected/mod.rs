// handlers/protected/mod.rs - Handlers behind the Auth Gate
//
// Every route in this tier is mounted through `AuthGate::protect`, so a
// handler here only ever runs for an authenticated request.

pub mod services; // Service catalog CRUD

pub use services::*;
