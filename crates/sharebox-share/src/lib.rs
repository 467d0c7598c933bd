//! # sharebox-share
//!
//! The share link subsystem: opaque token generation and the in-memory
//! registry that tracks each token's target file and expiry. Entries are
//! evicted lazily at resolve time; nothing sweeps the map in the
//! background, and the registry is lost on process restart by design.

pub mod registry;
pub mod token;

pub use registry::{ShareEntry, ShareRegistry};
