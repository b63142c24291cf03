//! Fixed-capacity spark arena
//!
//! One backing buffer split into a dense active prefix and an inactive
//! suffix:
//!
//! ```text
//! [ active 0 .. active_len | inactive active_len .. capacity ]
//! ```
//!
//! Acquire activates the first inactive slot; release swaps a spark with the
//! last active one and shrinks the prefix. Both are O(1) and nothing is
//! allocated after construction.

use glam::Vec2;

use super::spark::{Spark, SparkLaunch};

/// Index of an active spark. Invalidated by any later `release`.
pub type SparkHandle = usize;

#[derive(Debug, Clone)]
pub struct SparkPool {
    slots: Vec<Spark>,
    active_len: usize,
}

impl SparkPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Spark::default(); capacity],
            active_len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_len
    }

    pub fn inactive_count(&self) -> usize {
        self.slots.len() - self.active_len
    }

    pub fn is_exhausted(&self) -> bool {
        self.active_len == self.slots.len()
    }

    /// Active sparks, read-only (render handoff)
    pub fn active(&self) -> &[Spark] {
        &self.slots[..self.active_len]
    }

    /// Activate one spark with the given kinematics.
    ///
    /// Returns `None` when the pool is exhausted; the request is dropped.
    pub fn acquire(&mut self, launch: &SparkLaunch) -> Option<SparkHandle> {
        if self.is_exhausted() {
            return None;
        }
        let handle = self.active_len;
        self.slots[handle].reset(launch);
        self.active_len += 1;
        Some(handle)
    }

    /// Return an active spark to the inactive set.
    ///
    /// The last active spark moves into `handle`, so iterate the active set
    /// from the back when releasing mid-pass. Out-of-range handles are ignored.
    pub fn release(&mut self, handle: SparkHandle) {
        if handle >= self.active_len {
            return;
        }
        let last = self.active_len - 1;
        self.slots.swap(handle, last);
        self.active_len = last;
    }

    /// Return every active spark at once
    pub fn release_all(&mut self) {
        self.active_len = 0;
    }

    /// Advance every active spark one tick, releasing the dead ones in the
    /// same pass. `impulse` supplies a per-spark turbulence kick.
    pub fn advance_all(&mut self, mut impulse: impl FnMut() -> Vec2) {
        let mut i = self.active_len;
        while i > 0 {
            i -= 1;
            self.slots[i].advance(impulse());
            if self.slots[i].is_dead() {
                self.release(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn launch(decay: f32) -> SparkLaunch {
        SparkLaunch::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, -2.0), 1.0, 0.5, decay)
    }

    #[test]
    fn test_exhaustion_drops_silently() {
        let mut pool = SparkPool::new(10);
        let granted = (0..15).filter_map(|_| pool.acquire(&launch(0.01))).count();
        assert_eq!(granted, 10);
        assert_eq!(pool.active_count(), 10);
        assert_eq!(pool.inactive_count(), 0);
        assert!(pool.acquire(&launch(0.01)).is_none());
    }

    #[test]
    fn test_release_swaps_last_into_hole() {
        let mut pool = SparkPool::new(4);
        for decay in [0.1, 0.2, 0.3] {
            pool.acquire(&launch(decay));
        }
        pool.release(0);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.active()[0].decay, 0.3);
        assert_eq!(pool.active()[1].decay, 0.2);

        // Stale handle past the active prefix is a no-op
        pool.release(3);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_advance_reclaims_dead_sparks_in_same_pass() {
        let mut pool = SparkPool::new(8);
        // Life 1.0; decay 0.6 dies on the second tick, 0.01 survives
        pool.acquire(&launch(0.6));
        pool.acquire(&launch(0.01));
        pool.acquire(&launch(0.6));

        pool.advance_all(|| Vec2::ZERO);
        assert_eq!(pool.active_count(), 3);
        pool.advance_all(|| Vec2::ZERO);
        assert_eq!(pool.active_count(), 1);
        assert!(pool.active().iter().all(|s| !s.is_dead()));
        assert_eq!(pool.active_count() + pool.inactive_count(), pool.capacity());
    }

    #[test]
    fn test_release_all_and_reuse() {
        let mut pool = SparkPool::new(3);
        for _ in 0..3 {
            pool.acquire(&launch(0.01));
        }
        pool.release_all();
        assert_eq!(pool.inactive_count(), 3);
        let handle = pool.acquire(&launch(0.05)).unwrap();
        assert_eq!(handle, 0);
        assert_eq!(pool.active()[0].life, 1.0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Acquire(f32),
        Release(usize),
        Advance,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.005f32..0.5).prop_map(Op::Acquire),
            (0usize..40).prop_map(Op::Release),
            Just(Op::Advance),
        ]
    }

    proptest! {
        #[test]
        fn prop_pool_conservation(ops in prop::collection::vec(op(), 0..200)) {
            let mut pool = SparkPool::new(32);
            for op in ops {
                match op {
                    Op::Acquire(decay) => { pool.acquire(&launch(decay)); }
                    Op::Release(h) => pool.release(h),
                    Op::Advance => pool.advance_all(|| Vec2::ZERO),
                }
                prop_assert_eq!(pool.active_count() + pool.inactive_count(), 32);
            }
        }

        #[test]
        fn prop_life_monotonic_and_dead_removed(decays in prop::collection::vec(0.005f32..0.5, 1..32)) {
            let mut pool = SparkPool::new(32);
            for d in &decays {
                pool.acquire(&launch(*d));
            }
            for _ in 0..250 {
                // Keyed by decay: each spark keeps its own rate across swaps
                let mut before: Vec<(f32, f32)> =
                    pool.active().iter().map(|s| (s.decay, s.life)).collect();
                pool.advance_all(|| Vec2::ZERO);
                for s in pool.active() {
                    prop_assert!(s.life > 0.0);
                    let pos = before.iter().position(|(d, l)| *d == s.decay && *l > s.life);
                    prop_assert!(pos.is_some());
                    before.swap_remove(pos.unwrap());
                }
            }
            prop_assert_eq!(pool.active_count(), 0);
        }
    }
}
