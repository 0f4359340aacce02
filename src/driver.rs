use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{DEFAULT_INITIAL_PROCESSES, DEFAULT_SPAWN_EVERY};
use crate::engine::{Access, MemoryManager};
use crate::error::SimError;
use crate::process::{PageRef, Pid};

/// How the driver advances the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Processes spawned before the first tick.
    pub initial_processes: usize,
    /// Attempt one spawn every this many ticks; 0 disables the schedule.
    pub spawn_every: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            initial_processes: DEFAULT_INITIAL_PROCESSES,
            spawn_every: DEFAULT_SPAWN_EVERY,
        }
    }
}

/// One page access issued during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    pub target: PageRef,
    pub outcome: Access,
}

/// Everything that happened during one clock tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub spawned: Option<Pid>,
    /// A scheduled spawn hit a full table and was skipped.
    pub spawn_skipped: bool,
    pub accesses: Vec<AccessRecord>,
}

impl TickReport {
    pub fn hits(&self) -> usize {
        self.accesses.iter().filter(|r| r.outcome.is_hit()).count()
    }

    pub fn faults(&self) -> usize {
        self.accesses.len() - self.hits()
    }

    pub fn evictions(&self) -> usize {
        self.accesses
            .iter()
            .filter(|r| r.outcome.eviction().is_some())
            .count()
    }
}

/// Advances the simulation in discrete ticks: a scheduled spawn attempt,
/// then exactly one page access per live process, in table order. All
/// randomness comes from one seeded generator, so a run is fully
/// determined by its seed.
pub struct TickDriver {
    manager: MemoryManager,
    rng: StdRng,
    schedule: DriverConfig,
    clock: u64,
}

impl TickDriver {
    pub fn new(manager: MemoryManager, schedule: DriverConfig, seed: u64) -> Self {
        let mut driver = TickDriver {
            manager,
            rng: StdRng::seed_from_u64(seed),
            schedule,
            clock: 0,
        };
        for _ in 0..schedule.initial_processes {
            if let Err(e) = driver.manager.spawn(&mut driver.rng) {
                warn!("initial spawn skipped: {e}");
                break;
            }
        }
        driver
    }

    #[inline]
    pub fn manager(&self) -> &MemoryManager {
        &self.manager
    }

    #[inline]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Run one full tick and report what happened.
    pub fn tick(&mut self) -> TickReport {
        self.clock += 1;
        let mut report = TickReport {
            tick: self.clock,
            spawned: None,
            spawn_skipped: false,
            accesses: Vec::new(),
        };

        if self.schedule.spawn_every != 0 && self.clock % self.schedule.spawn_every == 0 {
            match self.manager.spawn(&mut self.rng) {
                Ok(pid) => report.spawned = Some(pid),
                Err(SimError::TableFull(_)) => {
                    // Terminal for this tick; the next scheduled tick will
                    // try again.
                    warn!("tick {}: process table full, spawn skipped", self.clock);
                    report.spawn_skipped = true;
                }
                Err(e) => unreachable!("spawn only fails with TableFull: {e}"),
            }
        }

        let pages = self.manager.config().pages_per_process;
        for pid in self.manager.processes().pids() {
            let page = self.rng.random_range(0..pages);
            let outcome = self
                .manager
                .request_page(pid, page)
                .expect("pids come straight from the table");
            report.accesses.push(AccessRecord {
                target: PageRef::new(pid, page),
                outcome,
            });
        }

        report
    }

    /// Run `ticks` full steps and collect the reports.
    pub fn run(&mut self, ticks: u64) -> Vec<TickReport> {
        (0..ticks).map(|_| self.tick()).collect()
    }
}
