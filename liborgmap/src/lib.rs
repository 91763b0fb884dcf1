//! This is a library that provides objects and functionality to help you keep
//! track of organisations and the geographic locations that belong to them
//! inside of a database.

pub mod core;
pub mod location;
pub mod organisation;

pub use core::database::Database;
pub use core::error::{Error, Result};
