pub mod protected; // Bearer credential required on every route

pub use protected::*;
