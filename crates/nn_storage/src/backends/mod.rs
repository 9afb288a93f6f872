pub mod memory;

pub use memory::MemoryPreferenceStore;
