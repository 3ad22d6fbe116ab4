mod entity_cache;

pub use entity_cache::{EntityCache, DEFAULT_MAX_CACHE_SIZE};
