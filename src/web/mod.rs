//! Web-related modules for the `/query` proxy

pub mod errors;
pub mod handlers;

pub use handlers::*;
