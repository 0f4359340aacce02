//! Read-only rendering of simulation state for the console. Nothing in
//! here mutates the manager; the driver owns all state changes.

use crate::driver::TickReport;
use crate::engine::{Access, MemoryManager};

pub fn tick_banner(tick: u64) -> String {
    format!("========== tick {tick} ==========")
}

/// Describe a tick's spawn outcome and every access it issued.
pub fn render_tick(report: &TickReport) -> String {
    let mut out = String::new();

    if let Some(pid) = report.spawned {
        out.push_str(&format!("spawned {pid}\n"));
    }
    if report.spawn_skipped {
        out.push_str("process table full, spawn skipped\n");
    }

    for record in &report.accesses {
        match record.outcome {
            Access::Hit { frame } => {
                out.push_str(&format!("{}: hit (frame {frame})\n", record.target));
            }
            Access::Fault { frame, evicted } => match evicted {
                Some(eviction) => out.push_str(&format!(
                    "{}: fault -> frame {frame} (evicted {}, {})\n",
                    record.target, eviction.victim, eviction.reason
                )),
                None => out.push_str(&format!("{}: fault -> frame {frame}\n", record.target)),
            },
        }
    }

    out
}

/// One line per live process: residency count and page -> frame mappings.
pub fn render_processes(manager: &MemoryManager) -> String {
    let table = manager.processes();
    let mut out = format!("processes ({} live):\n", table.len());

    for process in table.iter() {
        let mappings: Vec<String> = process
            .resident_pages()
            .map(|(page, frame)| format!("{page} -> f{frame}"))
            .collect();
        out.push_str(&format!(
            "  {}: {}/{} resident [{}]\n",
            process.pid(),
            process.resident_count(),
            process.page_count(),
            mappings.join(", ")
        ));
    }

    out
}

/// The recency queue from least to most recently used.
pub fn render_queue(manager: &MemoryManager) -> String {
    let queue = manager.queue();
    if queue.is_empty() {
        return "lru queue: empty\n".to_string();
    }

    let entries: Vec<String> = queue.iter().map(|entry| entry.to_string()).collect();
    format!(
        "lru queue ({} entries, oldest first): {}\n",
        queue.len(),
        entries.join(" | ")
    )
}

/// The full frame map, one slot per line, in the style of a memory dump.
pub fn render_frames(manager: &MemoryManager) -> String {
    let pool = manager.frames();
    let mut out = format!(
        "frames ({} of {} in use):\n",
        pool.capacity() - pool.free_count(),
        pool.capacity()
    );

    for (frame, slot) in pool.slots().enumerate() {
        match slot {
            Some(owner) => out.push_str(&format!("  frame {frame:>3}: {owner}\n")),
            None => out.push_str(&format!("  frame {frame:>3}: free\n")),
        }
    }

    out
}

/// Whole-run totals printed after the last tick.
pub fn render_summary(reports: &[TickReport], manager: &MemoryManager) -> String {
    let accesses: usize = reports.iter().map(|r| r.accesses.len()).sum();
    let hits: usize = reports.iter().map(|r| r.hits()).sum();
    let faults: usize = reports.iter().map(|r| r.faults()).sum();
    let evictions: usize = reports.iter().map(|r| r.evictions()).sum();
    let skipped = reports.iter().filter(|r| r.spawn_skipped).count();
    let pool = manager.frames();

    let mut out = String::from("========== summary ==========\n");
    out.push_str(&format!("ticks:          {}\n", reports.len()));
    out.push_str(&format!("accesses:       {accesses}\n"));
    out.push_str(&format!("hits:           {hits}\n"));
    out.push_str(&format!("page faults:    {faults}\n"));
    out.push_str(&format!("evictions:      {evictions}\n"));
    if skipped > 0 {
        out.push_str(&format!("spawns skipped: {skipped}\n"));
    }
    out.push_str(&format!(
        "live processes: {}\n",
        manager.processes().len()
    ));
    out.push_str(&format!(
        "frames in use:  {}/{}\n",
        pool.capacity() - pool.free_count(),
        pool.capacity()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::driver::{DriverConfig, TickDriver};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_manager() -> (MemoryManager, StdRng) {
        let config = SimConfig {
            frame_count: 4,
            table_capacity: 4,
            pages_per_process: 6,
            working_set_limit: 4,
            min_pid: 1000,
            max_pid: 9999,
        };
        (
            MemoryManager::new(config).unwrap(),
            StdRng::seed_from_u64(5),
        )
    }

    #[test]
    fn test_frame_map_lists_every_slot() {
        let (mut manager, mut rng) = small_manager();
        let pid = manager.spawn(&mut rng).unwrap();
        manager.request_page(pid, 2).unwrap();

        let rendered = render_frames(&manager);
        assert!(rendered.contains("1 of 4 in use"));
        assert!(rendered.contains(&format!("frame   0: {pid} page 2")));
        assert!(rendered.contains("frame   3: free"));
    }

    #[test]
    fn test_queue_renders_oldest_first() {
        let (mut manager, mut rng) = small_manager();
        let pid = manager.spawn(&mut rng).unwrap();
        manager.request_page(pid, 1).unwrap();
        manager.request_page(pid, 0).unwrap();

        let rendered = render_queue(&manager);
        assert!(rendered.contains("2 entries"));
        assert!(rendered.contains(&format!("{pid} page 1 | {pid} page 0")));

        let (empty, _) = small_manager();
        assert_eq!(render_queue(&empty), "lru queue: empty\n");
    }

    #[test]
    fn test_process_lines_show_residency() {
        let (mut manager, mut rng) = small_manager();
        let pid = manager.spawn(&mut rng).unwrap();
        manager.request_page(pid, 3).unwrap();

        let rendered = render_processes(&manager);
        assert!(rendered.contains("processes (1 live)"));
        assert!(rendered.contains(&format!("{pid}: 1/6 resident [3 -> f0]")));
    }

    #[test]
    fn test_tick_rendering_mentions_evictions() {
        let (manager, _) = small_manager();
        let schedule = DriverConfig {
            initial_processes: 1,
            spawn_every: 0,
        };
        let mut driver = TickDriver::new(manager, schedule, 11);

        // Enough ticks to exercise hits, faults, and working-set evictions
        // against 6 pages and a working set of 4.
        let reports = driver.run(20);
        let rendered: String = reports.iter().map(render_tick).collect();
        assert!(rendered.contains("fault -> frame"));
        assert!(rendered.contains("hit (frame"));
        assert!(rendered.contains("working-set limit"));

        let summary = render_summary(&reports, driver.manager());
        assert!(summary.contains("ticks:          20"));
        assert!(summary.contains("accesses:       20"));
    }
}
