pub mod config;
pub mod constants;
pub mod error;
pub mod migration;
pub mod schema;

pub use error::{Result, StructureError};
