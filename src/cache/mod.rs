//! Caching subsystem.
//!
//! - [`response::ResponseCache`]: TTL cache of LLM answers with a
//!   write-triggered expiry sweep. See the [`response`] module docs for the
//!   eviction and concurrency model.
//!
//! - [`clock`]: the time source the cache reads, swappable for a
//!   [`ManualClock`] in tests.

pub mod clock;
pub mod response;

pub use clock::{Clock, ManualClock, SystemClock};
pub use response::{CacheConfig, CacheEntry, CacheKey, ResponseCache};
