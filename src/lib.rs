pub mod config;
pub mod constants;
pub mod driver;
pub mod engine;
pub mod error;
pub mod frame_pool;
pub mod lru;
pub mod process;
pub mod report;

// Re-export commonly used items for convenience
pub use config::SimConfig;
pub use driver::{DriverConfig, TickDriver, TickReport};
pub use engine::{Access, Eviction, EvictionReason, MemoryManager};
pub use error::{ConfigError, SimError};
pub use frame_pool::FramePool;
pub use lru::LruQueue;
pub use process::{PageRef, Pid, Process, ProcessTable};
