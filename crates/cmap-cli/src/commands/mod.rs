//! Command implementations.

pub mod algorithms;
pub mod config;
pub mod grade;

pub use self::algorithms::execute_algorithms;
pub use self::config::execute_config;
pub use self::grade::execute_grade;
