//! Local persistence: key/value stores and the design mirror.

mod file;
mod memory;
mod mirror;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use mirror::LocalMirror;
