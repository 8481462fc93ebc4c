//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic frame clock)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod storage;
pub mod time;

pub use storage::{MemoryStorage, Storage, UnavailableStorage};
pub use time::{FrameClock, now_ms};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
