use std::fmt;

use log::debug;
use rand::Rng;

use crate::config::SimConfig;
use crate::error::{ConfigError, SimError};
use crate::frame_pool::FramePool;
use crate::lru::LruQueue;
use crate::process::{PageRef, Pid, ProcessTable};

/// Why a page was pushed out during a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// The requesting process was at its working-set limit.
    WorkingSetLimit,
    /// No physical frame was free anywhere.
    MemoryFull,
}

impl fmt::Display for EvictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionReason::WorkingSetLimit => write!(f, "working-set limit"),
            EvictionReason::MemoryFull => write!(f, "memory full"),
        }
    }
}

/// A page evicted to make room for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eviction {
    pub victim: PageRef,
    pub frame: usize,
    pub reason: EvictionReason,
}

/// Outcome of a page-access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The page was already resident; only its recency changed.
    Hit { frame: usize },
    /// Page fault: the page was brought into `frame`, evicting another
    /// page first if the working set or the pool was at its limit.
    Fault {
        frame: usize,
        evicted: Option<Eviction>,
    },
}

impl Access {
    /// The frame serving the request, whichever path produced it.
    pub fn frame(&self) -> usize {
        match self {
            Access::Hit { frame } | Access::Fault { frame, .. } => *frame,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Access::Hit { .. })
    }

    pub fn eviction(&self) -> Option<Eviction> {
        match self {
            Access::Fault { evicted, .. } => *evicted,
            Access::Hit { .. } => None,
        }
    }
}

/// The allocation engine. Owns the three pieces of simulation state — the
/// process table, the frame pool, and the recency queue — and is the only
/// thing that mutates them, so they cannot drift apart.
pub struct MemoryManager {
    config: SimConfig,
    table: ProcessTable,
    pool: FramePool,
    queue: LruQueue,
}

impl MemoryManager {
    /// Build an empty simulation. Degenerate parameters are rejected here,
    /// before any state exists.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(MemoryManager {
            table: ProcessTable::new(&config),
            pool: FramePool::new(config.frame_count),
            queue: LruQueue::new(),
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn processes(&self) -> &ProcessTable {
        &self.table
    }

    #[inline]
    pub fn frames(&self) -> &FramePool {
        &self.pool
    }

    #[inline]
    pub fn queue(&self) -> &LruQueue {
        &self.queue
    }

    /// Create a process with no resident pages.
    pub fn spawn(&mut self, rng: &mut impl Rng) -> Result<Pid, SimError> {
        let pid = self.table.create(rng)?;
        debug!("spawned {pid}");
        Ok(pid)
    }

    /// Handle one access to a logical page.
    ///
    /// A resident page is a hit and only moves to the most recent end of
    /// the queue. A miss admits the page into a free frame, first evicting
    /// the requester's own least recently used page when it sits at the
    /// working-set limit, or the globally least recently used page when no
    /// frame is free.
    pub fn request_page(&mut self, pid: Pid, page: usize) -> Result<Access, SimError> {
        // Step 1: resolve the process and its residency state.
        let (resident, mapped) = {
            let process = self.table.get(pid).ok_or(SimError::NotFound(pid))?;
            assert!(
                page < process.page_count(),
                "page {page} out of range for {pid}"
            );
            (process.resident_count(), process.frame_of(page))
        };

        // Step 2: hit. The frame assignment never changes on a hit.
        if let Some(frame) = mapped {
            self.queue.touch(PageRef::new(pid, page));
            debug!("{pid} page {page}: hit in frame {frame}");
            return Ok(Access::Hit { frame });
        }

        // Step 3: page fault — make room if a cap is hit. At most one of
        // the two evictions fires per fault: step 3a frees a frame, which
        // leaves the pool non-full for step 3b's check.
        let mut evicted = None;
        if resident >= self.config.working_set_limit {
            // Step 3a: working-set enforcement. The process gives up its
            // own least recently used page, whatever the global pressure.
            let victim = self
                .queue
                .oldest_for(pid)
                .expect("a process with resident pages has queue entries");
            self.queue.remove(victim);
            let frame = self.release_mapping(victim);
            debug!("{pid} page {page}: working-set limit, evicted {victim} from frame {frame}");
            evicted = Some(Eviction {
                victim,
                frame,
                reason: EvictionReason::WorkingSetLimit,
            });
        } else if self.pool.is_full() {
            // Step 3b: physical memory is exhausted. The globally least
            // recently used page goes, whoever owns it.
            let victim = self
                .queue
                .pop_front()
                .expect("a full frame pool implies a non-empty queue");
            let frame = self.release_mapping(victim);
            debug!("{pid} page {page}: memory full, evicted {victim} from frame {frame}");
            evicted = Some(Eviction {
                victim,
                frame,
                reason: EvictionReason::MemoryFull,
            });
        }

        // Step 4: admission. Eviction has run if it was needed, so a frame
        // is free; exhaustion here means the bookkeeping is broken.
        let target = PageRef::new(pid, page);
        let frame = self
            .pool
            .allocate(target)
            .expect("a frame is always free once eviction has run");
        self.table
            .get_mut(pid)
            .expect("resolved at the top of the request")
            .map_page(page, frame);
        self.queue.touch(target);
        debug!("{pid} page {page}: loaded into frame {frame}");

        Ok(Access::Fault { frame, evicted })
    }

    /// Destroy a process and reclaim everything it held. The table itself
    /// does not cascade, so the frames and queue entries are released here,
    /// before the entry goes.
    pub fn terminate(&mut self, pid: Pid) -> Result<(), SimError> {
        let frames: Vec<usize> = {
            let process = self.table.get(pid).ok_or(SimError::NotFound(pid))?;
            process.resident_pages().map(|(_, frame)| frame).collect()
        };

        for frame in frames {
            self.pool.release(frame);
        }
        self.queue.remove_all(pid);
        self.table.destroy(pid)?;
        debug!("terminated {pid}");
        Ok(())
    }

    /// Clear the victim's mapping in the owning table entry and free its
    /// frame. The victim's queue entry must already be gone.
    fn release_mapping(&mut self, victim: PageRef) -> usize {
        let process = self
            .table
            .get_mut(victim.pid)
            .expect("queue entries always name a live process");
        let frame = process.unmap_page(victim.page);
        let owner = self.pool.release(frame);
        debug_assert_eq!(owner, victim, "frame back-reference out of step");
        frame
    }
}
