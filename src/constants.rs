pub const SYSTEM_FRAMES: usize = 64;
pub const PROCESS_TABLE_SIZE: usize = 200;
pub const PAGES_PER_PROCESS: usize = 10;
pub const WORKING_SET_LIMIT: usize = 4;

pub const MIN_PID: u32 = 1000;
pub const MAX_PID: u32 = 9999;

/// Random draws attempted for a fresh pid before falling back to a
/// deterministic scan of the id space.
pub const PID_SAMPLE_ATTEMPTS: usize = 64;

pub const DEFAULT_TICKS: u64 = 24;
pub const DEFAULT_SPAWN_EVERY: u64 = 3;
pub const DEFAULT_INITIAL_PROCESSES: usize = 4;
