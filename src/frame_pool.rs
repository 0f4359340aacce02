use crate::error::SimError;
use crate::process::PageRef;

/// The fixed pool of physical frames. Each slot is free or records the
/// (process, logical page) pair occupying it; slot state is the single
/// source of truth for whether a frame is in use.
#[derive(Debug, Clone)]
pub struct FramePool {
    slots: Vec<Option<PageRef>>,
}

impl FramePool {
    pub fn new(capacity: usize) -> Self {
        FramePool {
            slots: vec![None; capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Who occupies the frame, if anyone. Inspection only.
    #[inline]
    pub fn occupant(&self, frame: usize) -> Option<PageRef> {
        self.slots[frame]
    }

    /// All slots in index order, for display.
    pub fn slots(&self) -> impl Iterator<Item = Option<PageRef>> + '_ {
        self.slots.iter().copied()
    }

    /// Claim the lowest-index free frame for `owner`. The scan is
    /// deterministic so identical request sequences place pages in
    /// identical frames.
    pub(crate) fn allocate(&mut self, owner: PageRef) -> Result<usize, SimError> {
        let frame = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(SimError::Exhausted)?;
        self.slots[frame] = Some(owner);
        Ok(frame)
    }

    /// Mark the frame free and return its former occupant. Releasing an
    /// already-free frame is a bookkeeping bug, not a runtime condition.
    pub(crate) fn release(&mut self, frame: usize) -> PageRef {
        match self.slots[frame].take() {
            Some(owner) => owner,
            None => panic!("double release of frame {frame}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Pid;

    fn page(pid: u32, page: usize) -> PageRef {
        PageRef::new(Pid(pid), page)
    }

    #[test]
    fn test_allocation_takes_lowest_free_frame_first() {
        let mut pool = FramePool::new(4);

        assert_eq!(pool.allocate(page(1000, 0)), Ok(0));
        assert_eq!(pool.allocate(page(1000, 1)), Ok(1));
        assert_eq!(pool.allocate(page(2000, 0)), Ok(2));
        assert_eq!(pool.free_count(), 1);
    }

    #[test]
    fn test_released_frame_is_reused_before_higher_ones() {
        let mut pool = FramePool::new(4);
        for i in 0..3 {
            pool.allocate(page(1000, i)).unwrap();
        }

        assert_eq!(pool.release(1), page(1000, 1));

        // Slot 1 is now the lowest free frame, below the untouched slot 3.
        assert_eq!(pool.allocate(page(2000, 0)), Ok(1));
        assert_eq!(pool.allocate(page(2000, 1)), Ok(3));
    }

    #[test]
    fn test_exhausted_when_no_frame_is_free() {
        let mut pool = FramePool::new(2);
        pool.allocate(page(1000, 0)).unwrap();
        pool.allocate(page(1000, 1)).unwrap();

        assert!(pool.is_full());
        assert_eq!(pool.allocate(page(1000, 2)), Err(SimError::Exhausted));
    }

    #[test]
    fn test_occupant_reflects_allocation_state() {
        let mut pool = FramePool::new(2);
        let frame = pool.allocate(page(1234, 5)).unwrap();

        assert_eq!(pool.occupant(frame), Some(page(1234, 5)));
        assert_eq!(pool.occupant(1), None);

        pool.release(frame);
        assert_eq!(pool.occupant(frame), None);
    }

    #[test]
    #[should_panic(expected = "double release of frame 0")]
    fn test_releasing_a_free_frame_panics() {
        let mut pool = FramePool::new(2);
        pool.release(0);
    }
}
