//! HTTP request handlers.

pub mod admin;
pub mod discovery;
pub mod providers;

pub use admin::*;
pub use discovery::*;
pub use providers::*;
