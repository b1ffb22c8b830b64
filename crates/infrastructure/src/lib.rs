pub mod database;
pub mod error_handling;

pub use database::*;
