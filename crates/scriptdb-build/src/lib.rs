//! Database construction from ordered script directories.

pub mod builder;
pub mod executor;
pub mod update;

pub use builder::{BuildReport, DatabaseBuilder, apply_scripts, discover_scripts};
pub use executor::ConnectionExecutor;
pub use update::update_database;
