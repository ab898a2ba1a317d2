//! Order log implementations

pub mod file;
pub mod in_memory;

pub use file::FileOrderLog;
pub use in_memory::InMemoryOrderLog;
