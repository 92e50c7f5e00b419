use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for linked nodes.
///
/// Every list node, hash chain node and tree node in the crate lives here and is referred to by
/// [`Handle`]. Released slots go on a free list and are handed out again before the slot vector
/// grows.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(element);
            return handle;
        }

        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX + 1
        );
        self.slots.push(Some(element));
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        arena.take(a);
        assert_eq!(arena.len(), 1);

        let c = arena.alloc("c");
        assert_eq!(c, a);
        assert_eq!(*arena.get(b), "b");
        assert_eq!(*arena.get(c), "c");
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn stale_handle_panics() {
        let mut arena = Arena::new();
        let handle = arena.alloc(1u8);
        arena.take(handle);
        let _ = arena.get(handle);
    }

    #[test]
    #[should_panic(expected = "`Arena::alloc()` - arena is at maximum capacity")]
    fn exhaustion_panics() {
        let mut arena = Arena::new();
        for _ in 0..=Handle::MAX + 1 {
            arena.alloc(());
        }
    }

    #[derive(Clone, Debug)]
    enum Step {
        Alloc(u32),
        Read(usize),
        Write(usize, u32),
        Take(usize),
        Clear,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            16 => any::<u32>().prop_map(Step::Alloc),
            4 => any::<usize>().prop_map(Step::Read),
            4 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Step::Write(which, value)),
            6 => any::<usize>().prop_map(Step::Take),
            1 => Just(Step::Clear),
        ]
    }

    proptest! {
        #[test]
        fn tracks_live_handles(steps in prop::collection::vec(step(), 0..256)) {
            let mut live: Vec<(Handle, u32)> = Vec::new();
            let mut arena = Arena::new();

            for step in steps {
                match step {
                    Step::Alloc(value) => live.push((arena.alloc(value), value)),
                    Step::Read(which) if !live.is_empty() => {
                        let (handle, value) = live[which % live.len()];
                        assert_eq!(*arena.get(handle), value);
                    }
                    Step::Write(which, value) if !live.is_empty() => {
                        let slot = which % live.len();
                        *arena.get_mut(live[slot].0) = value;
                        live[slot].1 = value;
                    }
                    Step::Take(which) if !live.is_empty() => {
                        let (handle, value) = live.swap_remove(which % live.len());
                        assert_eq!(arena.take(handle), value);
                    }
                    Step::Clear => {
                        arena.clear();
                        live.clear();
                    }
                    _ => {}
                }

                assert_eq!(arena.len(), live.len());
                assert_eq!(arena.is_empty(), live.is_empty());
            }
        }
    }
}
