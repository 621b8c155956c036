//! Chunk streaming policy: residency radius, load ordering, bulk loading

pub mod config;
pub mod region;
pub mod preload;

pub use config::StreamingConfig;
pub use preload::{generate_parallel, LoadProgress};
pub use region::{load_order, should_evict};
