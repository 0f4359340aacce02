use crate::constants::*;
use crate::error::ConfigError;

/// Tunable parameters of a simulation. Defaults mirror the classic
/// assignment numbers: 64 frames, a 200-entry process table, 10 logical
/// pages per process, a working set of 4, pids drawn from 1000..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Physical frames in the pool (M).
    pub frame_count: usize,
    /// Maximum number of live processes.
    pub table_capacity: usize,
    /// Logical pages per process (N).
    pub pages_per_process: usize,
    /// Pages a single process may keep resident at once (W).
    pub working_set_limit: usize,
    /// Inclusive lower bound of the pid range.
    pub min_pid: u32,
    /// Inclusive upper bound of the pid range.
    pub max_pid: u32,
}

impl SimConfig {
    /// Reject degenerate parameters before any state is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_count < 1 {
            return Err(ConfigError::FrameCount);
        }
        if self.pages_per_process < 1 {
            return Err(ConfigError::PageCount);
        }
        if self.working_set_limit < 1 {
            return Err(ConfigError::WorkingSetLimit);
        }
        if self.table_capacity < 1 {
            return Err(ConfigError::TableCapacity);
        }
        if self.min_pid > self.max_pid {
            return Err(ConfigError::PidRange {
                min: self.min_pid,
                max: self.max_pid,
            });
        }
        // Every live process needs a distinct pid, so the id space must be
        // at least as large as the table. This also bounds pid generation:
        // a free id always exists for the fallback scan to find.
        let space = self.pid_space();
        if self.table_capacity > space {
            return Err(ConfigError::PidSpace {
                capacity: self.table_capacity,
                space,
            });
        }
        Ok(())
    }

    /// Number of distinct pids the configured range can produce.
    #[inline]
    pub fn pid_space(&self) -> usize {
        (self.max_pid - self.min_pid) as usize + 1
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            frame_count: SYSTEM_FRAMES,
            table_capacity: PROCESS_TABLE_SIZE,
            pages_per_process: PAGES_PER_PROCESS,
            working_set_limit: WORKING_SET_LIMIT,
            min_pid: MIN_PID,
            max_pid: MAX_PID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_frames_rejected() {
        let config = SimConfig {
            frame_count: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FrameCount));
    }

    #[test]
    fn test_zero_pages_rejected() {
        let config = SimConfig {
            pages_per_process: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PageCount));
    }

    #[test]
    fn test_zero_working_set_rejected() {
        let config = SimConfig {
            working_set_limit: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::WorkingSetLimit));
    }

    #[test]
    fn test_empty_pid_range_rejected() {
        let config = SimConfig {
            min_pid: 500,
            max_pid: 400,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PidRange { min: 500, max: 400 })
        );
    }

    #[test]
    fn test_pid_space_smaller_than_table_rejected() {
        // 10 ids for a 20-slot table can never keep pids unique.
        let config = SimConfig {
            table_capacity: 20,
            min_pid: 1,
            max_pid: 10,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PidSpace {
                capacity: 20,
                space: 10
            })
        );
    }

    #[test]
    fn test_pid_space_counts_inclusive_bounds() {
        let config = SimConfig {
            min_pid: 1000,
            max_pid: 9999,
            ..SimConfig::default()
        };
        assert_eq!(config.pid_space(), 9000);
    }
}
