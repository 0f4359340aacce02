use thiserror::Error;

use crate::process::Pid;

/// Runtime failures surfaced by the simulation core.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Process creation attempted while the table is at capacity. The
    /// caller skips that tick's spawn; it must not retry within the tick.
    #[error("process table full ({0} live processes)")]
    TableFull(usize),

    /// An operation named a pid with no live table entry.
    #[error("no live process with {0}")]
    NotFound(Pid),

    /// No free physical frame. Never escapes `request_page`: eviction runs
    /// before admission whenever the pool is full, so seeing this from the
    /// outside means the bookkeeping is broken.
    #[error("no free physical frame")]
    Exhausted,
}

/// Construction-time rejection of degenerate parameters. Fatal before the
/// simulation starts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("frame pool capacity must be at least 1")]
    FrameCount,

    #[error("processes need at least one logical page")]
    PageCount,

    #[error("working-set limit must be at least 1")]
    WorkingSetLimit,

    #[error("process table capacity must be at least 1")]
    TableCapacity,

    #[error("pid range is empty ({min}..={max})")]
    PidRange { min: u32, max: u32 },

    #[error("process table capacity {capacity} exceeds the pid space of {space} ids")]
    PidSpace { capacity: usize, space: usize },
}
