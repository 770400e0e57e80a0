//! Standard executor implementations.

pub mod logging;

pub use logging::LoggingExecutor;
