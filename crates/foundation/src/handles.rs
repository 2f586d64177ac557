/// Generational handle (index, generation).
///
/// Slots may be reused once released; the generation distinguishes a stale
/// handle from the current occupant of the same slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u32, u32);

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Handle(index, generation)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn generation(&self) -> u32 {
        self.1
    }
}

/// Hands out generational handles and validates them on release.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    generations: Vec<u32>,
    live: Vec<bool>,
    free: Vec<u32>,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> Handle {
        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.live[slot] = true;
            return Handle::new(index, self.generations[slot]);
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.live.push(true);
        Handle::new(index, 0)
    }

    pub fn is_live(&self, handle: Handle) -> bool {
        let slot = handle.index() as usize;
        self.live.get(slot).copied().unwrap_or(false)
            && self.generations[slot] == handle.generation()
    }

    /// Releases `handle`. Returns `false` for stale or unknown handles.
    pub fn release(&mut self, handle: Handle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        let slot = handle.index() as usize;
        self.live[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push(handle.index());
        true
    }

    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|l| **l).count()
    }
}

#[cfg(test)]
mod tests {
    use super::HandleAllocator;

    #[test]
    fn released_slots_are_reused_with_new_generation() {
        let mut alloc = HandleAllocator::new();
        let a = alloc.alloc();
        assert!(alloc.release(a));
        let b = alloc.alloc();
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(!alloc.is_live(a));
        assert!(alloc.is_live(b));
    }

    #[test]
    fn double_release_is_rejected() {
        let mut alloc = HandleAllocator::new();
        let a = alloc.alloc();
        assert!(alloc.release(a));
        assert!(!alloc.release(a));
        assert_eq!(alloc.live_count(), 0);
    }
}
