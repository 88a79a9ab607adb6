//! Output sink adapters.

mod buffered;
mod composite;
mod console;
mod file;
mod memory;
mod queue;

pub use buffered::BufferedFileSink;
pub use composite::CompositeSink;
pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::MemorySink;
pub use queue::BufferConfig;

/// Native line terminator appended to every delivered message.
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };
