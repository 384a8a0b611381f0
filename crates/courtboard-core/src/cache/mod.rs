//! Caching layer for courtboard-core
//!
//! Provides the two-tier (memory + durable slot) TTL cache for team logos.

pub mod durable;
pub mod entry;
pub mod logo_cache;

pub use durable::{DurableStore, FileSlot, MemorySlot, LOGO_SLOT_FILE};
pub use entry::{CacheEntry, LOGO_TTL};
pub use logo_cache::{CachedLogo, LogoCache};
