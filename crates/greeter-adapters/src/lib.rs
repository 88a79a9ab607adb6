//! Infrastructure adapters for greeter.
//!
//! This crate implements the ports defined in `greeter-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod signal;
pub mod sink;

// Re-export commonly used adapters
pub use signal::{NoopSignal, OsSignal};
pub use sink::{
    BufferConfig, BufferedFileSink, CompositeSink, ConsoleSink, FileSink, MemorySink,
};
