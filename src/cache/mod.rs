//! Cache Module
//!
//! Time-bounded memoization storage shared by the cache enhancement.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;
