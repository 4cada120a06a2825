mod clock;
mod kv_store;
mod resource_manager;

pub use clock::{IClock, SystemClock};
pub use kv_store::IKeyValueStore;
pub use resource_manager::{IResourceManager, InteractionSignal};
