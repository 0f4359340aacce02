use std::fmt;

use rand::Rng;

use crate::config::SimConfig;
use crate::constants::PID_SAMPLE_ATTEMPTS;
use crate::error::SimError;

/// Process identifier, unique among live processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid {}", self.0)
    }
}

/// A (process, logical page) pair. Frame-pool slots and LRU-queue entries
/// both store these as non-owning back-references into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRef {
    pub pid: Pid,
    pub page: usize,
}

impl PageRef {
    #[inline]
    pub fn new(pid: Pid, page: usize) -> Self {
        PageRef { pid, page }
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} page {}", self.pid, self.page)
    }
}

/// A live process: a fixed-length logical page table mapping each page to
/// its physical frame (or nothing, when not resident) plus a resident
/// counter kept in step with the table.
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    frames: Vec<Option<usize>>,
    resident: usize,
}

impl Process {
    fn new(pid: Pid, pages: usize) -> Self {
        Process {
            pid,
            frames: vec![None; pages],
            resident: 0,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Number of logical pages, resident or not.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.frames.len()
    }

    /// Physical frame holding the page, if it is resident.
    #[inline]
    pub fn frame_of(&self, page: usize) -> Option<usize> {
        self.frames[page]
    }

    #[inline]
    pub fn resident_count(&self) -> usize {
        self.resident
    }

    /// Iterate the resident pages as (logical page, physical frame) pairs,
    /// in page order.
    pub fn resident_pages(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.frames
            .iter()
            .enumerate()
            .filter_map(|(page, frame)| frame.map(|f| (page, f)))
    }

    /// Record the page as resident in `frame`. The page must not already be
    /// mapped; residency changes only through the allocation engine.
    pub(crate) fn map_page(&mut self, page: usize, frame: usize) {
        debug_assert!(self.frames[page].is_none(), "page {page} already mapped");
        self.frames[page] = Some(frame);
        self.resident += 1;
    }

    /// Clear the page's mapping and return the frame it held.
    pub(crate) fn unmap_page(&mut self, page: usize) -> usize {
        let frame = self.frames[page]
            .take()
            .expect("unmapping a page that is not resident");
        self.resident -= 1;
        frame
    }
}

/// The bounded table of live processes, in creation order.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    processes: Vec<Process>,
    capacity: usize,
    pages_per_process: usize,
    min_pid: u32,
    max_pid: u32,
}

impl ProcessTable {
    pub fn new(config: &SimConfig) -> Self {
        ProcessTable {
            processes: Vec::new(),
            capacity: config.table_capacity,
            pages_per_process: config.pages_per_process,
            min_pid: config.min_pid,
            max_pid: config.max_pid,
        }
    }

    /// Create a process with a freshly generated pid, all pages
    /// non-resident. Fails with `TableFull` at capacity.
    pub fn create(&mut self, rng: &mut impl Rng) -> Result<Pid, SimError> {
        if self.is_full() {
            return Err(SimError::TableFull(self.capacity));
        }

        let pid = self.generate_pid(rng);
        self.processes.push(Process::new(pid, self.pages_per_process));
        Ok(pid)
    }

    /// Remove the entry, preserving the order of the rest, and hand it back
    /// to the caller. The table does not release frames or queue entries on
    /// the way out; the caller must have reclaimed them already.
    pub fn destroy(&mut self, pid: Pid) -> Result<Process, SimError> {
        let index = self
            .processes
            .iter()
            .position(|p| p.pid == pid)
            .ok_or(SimError::NotFound(pid))?;
        Ok(self.processes.remove(index))
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        self.processes.iter_mut().find(|p| p.pid == pid)
    }

    #[inline]
    pub fn contains(&self, pid: Pid) -> bool {
        self.get(pid).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.processes.len() == self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// Live pids in creation order. The driver walks these each tick.
    pub fn pids(&self) -> Vec<Pid> {
        self.processes.iter().map(|p| p.pid).collect()
    }

    /// Draw a pid not used by any live process. Uniform sampling with a
    /// bounded number of retries; past the bound, a scan of the id space
    /// finds a free id (one always exists, since the table never holds more
    /// processes than the id space has ids).
    fn generate_pid(&self, rng: &mut impl Rng) -> Pid {
        for _ in 0..PID_SAMPLE_ATTEMPTS {
            let candidate = Pid(rng.random_range(self.min_pid..=self.max_pid));
            if !self.contains(candidate) {
                return candidate;
            }
        }

        for id in self.min_pid..=self.max_pid {
            if !self.contains(Pid(id)) {
                return Pid(id);
            }
        }

        unreachable!("live processes exceed the pid space")
    }
}
