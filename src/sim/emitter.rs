//! Spark emitter: burst sizing, launch parameters and the advance pass

use glam::Vec2;
use rand::Rng;

use super::pool::SparkPool;
use super::spark::{Spark, SparkLaunch};
use crate::tuning::EmitterTuning;

#[derive(Debug, Clone)]
pub struct Emitter {
    pool: SparkPool,
    tuning: EmitterTuning,
}

impl Emitter {
    /// `tuning` must satisfy [`EmitterTuning::is_valid`]
    pub fn new(tuning: EmitterTuning) -> Self {
        if !tuning.is_valid() {
            log::warn!("Emitter tuning out of range: {tuning:?}");
        }
        Self {
            pool: SparkPool::new(tuning.capacity),
            tuning,
        }
    }

    pub fn pool(&self) -> &SparkPool {
        &self.pool
    }

    pub fn tuning(&self) -> &EmitterTuning {
        &self.tuning
    }

    /// Active sparks for rendering
    pub fn sparks(&self) -> &[Spark] {
        self.pool.active()
    }

    /// Number of sparks to spawn this tick: usually a handful, occasionally
    /// a large sputtering pop
    pub fn burst_size(&self, rng: &mut impl Rng) -> u32 {
        let t = &self.tuning;
        if rng.random_bool(t.big_burst_chance) {
            t.big_burst_min + rng.random_range(0..t.big_burst_spread.max(1))
        } else {
            rng.random_range(0..=t.max_small_burst)
        }
    }

    /// Randomised launch from `origin`, biased by the emitter's own
    /// displacement this tick so sparks trail a moving tip
    pub fn launch(&self, origin: Vec2, displacement: Vec2, rng: &mut impl Rng) -> SparkLaunch {
        let t = &self.tuning;
        let speed = rng.random_range(t.min_speed..t.max_speed);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let vel = Vec2::from_angle(angle) * speed + displacement * t.momentum_transfer;
        SparkLaunch {
            pos: origin,
            vel,
            size: rng.random_range(1.0..3.0),
            life: rng.random_range(0.3..1.3),
            decay: rng.random_range(0.005..0.015),
            gravity: t.gravity,
            friction: t.friction,
        }
    }

    /// Spawn up to `count` sparks. Returns how many the pool granted.
    pub fn emit(
        &mut self,
        count: u32,
        origin: Vec2,
        displacement: Vec2,
        rng: &mut impl Rng,
    ) -> u32 {
        let mut spawned = 0;
        for _ in 0..count {
            if self.pool.is_exhausted() {
                break;
            }
            let launch = self.launch(origin, displacement, rng);
            if self.pool.acquire(&launch).is_some() {
                spawned += 1;
            }
        }
        spawned
    }

    /// One random-sized burst at `origin`
    pub fn emit_burst(&mut self, origin: Vec2, displacement: Vec2, rng: &mut impl Rng) -> u32 {
        let count = self.burst_size(rng);
        self.emit(count, origin, displacement, rng)
    }

    /// Advance all sparks and reclaim the dead ones
    pub fn advance(&mut self, rng: &mut impl Rng) {
        let turbulence = self.tuning.turbulence;
        if turbulence > 0.0 {
            self.pool.advance_all(|| {
                Vec2::new(
                    rng.random_range(-turbulence..=turbulence),
                    rng.random_range(-turbulence..=turbulence),
                )
            });
        } else {
            self.pool.advance_all(|| Vec2::ZERO);
        }
    }

    /// Return every spark to the pool immediately
    pub fn reclaim_all(&mut self) {
        self.pool.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn emitter(capacity: usize) -> Emitter {
        Emitter::new(EmitterTuning {
            capacity,
            ..Default::default()
        })
    }

    #[test]
    fn test_burst_sizes_stay_in_range() {
        let e = emitter(10);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut saw_big = false;
        for _ in 0..2000 {
            let n = e.burst_size(&mut rng);
            assert!(n <= 4 || (20..40).contains(&n), "unexpected burst {n}");
            saw_big |= n >= 20;
        }
        assert!(saw_big);
    }

    #[test]
    fn test_emit_past_capacity() {
        let mut e = emitter(10);
        let mut rng = Pcg32::seed_from_u64(1);
        let spawned = e.emit(15, Vec2::ZERO, Vec2::ZERO, &mut rng);
        assert_eq!(spawned, 10);
        assert_eq!(e.pool().active_count(), 10);
        assert_eq!(e.pool().inactive_count(), 0);
    }

    #[test]
    fn test_launch_carries_displacement_bias() {
        let e = emitter(10);
        let mut rng = Pcg32::seed_from_u64(3);
        let displacement = Vec2::new(100.0, 0.0);
        // Radial speed is at most 8, so a 40 px/tick bias always wins
        for _ in 0..100 {
            let launch = e.launch(Vec2::ZERO, displacement, &mut rng);
            assert!(launch.vel.x > 30.0);
            assert!((0.005..0.015).contains(&launch.decay));
        }
    }

    #[test]
    fn test_turbulence_keeps_conservation() {
        let mut e = Emitter::new(EmitterTuning {
            capacity: 50,
            turbulence: 0.5,
            ..Default::default()
        });
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..300 {
            e.emit_burst(Vec2::ZERO, Vec2::ZERO, &mut rng);
            e.advance(&mut rng);
            let pool = e.pool();
            assert_eq!(pool.active_count() + pool.inactive_count(), 50);
        }
        e.reclaim_all();
        assert_eq!(e.sparks().len(), 0);
    }
}
