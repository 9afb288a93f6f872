use std::sync::Arc;

use nn_core::{Error, PreferenceStore, Result};

pub mod backends;

pub use backends::*;

/// Build a preference store by name. Only `memory` is available.
pub async fn create_storage(kind: &str) -> Result<Arc<dyn PreferenceStore>> {
    match kind {
        "memory" => {
            tracing::info!("💾 Using in-memory preference store");
            Ok(Arc::new(MemoryPreferenceStore::new()))
        }
        other => Err(Error::Storage(format!(
            "Unknown storage backend '{}'. Available backends: memory",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
    pub use nn_core::PreferenceStore;
}
