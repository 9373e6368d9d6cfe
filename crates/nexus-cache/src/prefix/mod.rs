//! Guild prefix cache module.

mod prefix_cache;

pub use prefix_cache::{cache_key, PrefixCache, PREFIX_KEY_PREFIX};
