//! Data-driven simulation tuning
//!
//! Every constant the simulation reads at runtime is grouped here so presets
//! and tests can adjust it without touching `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Spark emission and kinematics
///
/// Preconditions, not checked on the hot path: `big_burst_chance` lies in
/// `0..=1` and `min_speed < max_speed`. The RNG panics otherwise. Use
/// [`EmitterTuning::is_valid`] on values loaded from outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterTuning {
    /// Fixed pool capacity (allocated once)
    pub capacity: usize,
    /// Small bursts draw `0..=max_small_burst` sparks
    pub max_small_burst: u32,
    /// Chance per tick of a sputtering pop
    pub big_burst_chance: f64,
    /// Big bursts draw `big_burst_min..big_burst_min + big_burst_spread`
    pub big_burst_min: u32,
    pub big_burst_spread: u32,
    /// Launch speed range (px/tick)
    pub min_speed: f32,
    pub max_speed: f32,
    /// Fraction of the emitter's own displacement added to each spark
    pub momentum_transfer: f32,
    pub gravity: f32,
    pub friction: f32,
    /// Max random impulse per tick (0 disables turbulence)
    pub turbulence: f32,
}

impl Default for EmitterTuning {
    fn default() -> Self {
        Self {
            capacity: SPARK_POOL_CAPACITY,
            max_small_burst: 4,
            big_burst_chance: 0.1,
            big_burst_min: 20,
            big_burst_spread: 20,
            min_speed: 2.0,
            max_speed: 8.0,
            momentum_transfer: 0.4,
            gravity: SPARK_GRAVITY,
            friction: SPARK_FRICTION,
            turbulence: 0.0,
        }
    }
}

impl EmitterTuning {
    /// Whether every range the emitter samples from is non-empty
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.big_burst_chance)
            && self.min_speed < self.max_speed
            && self.turbulence >= 0.0
    }
}

/// Sparkler geometry and burn timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklerTuning {
    pub length: f32,
    pub handle_length: f32,
    pub burn_rate: f32,
    pub base_angle: f32,
    pub drop_gravity: f32,
    pub pickup_step: f32,
    pub pickup_follow: f32,
}

impl Default for SparklerTuning {
    fn default() -> Self {
        Self {
            length: SPARKLER_LENGTH,
            handle_length: SPARKLER_HANDLE_LENGTH,
            burn_rate: SPARKLER_BURN_RATE,
            base_angle: SPARKLER_BASE_ANGLE,
            drop_gravity: DROP_GRAVITY,
            pickup_step: PICKUP_STEP,
            pickup_follow: PICKUP_FOLLOW,
        }
    }
}

impl SparklerTuning {
    /// Ticks needed to burn the full fuel length
    pub fn burn_ticks(&self) -> u32 {
        (self.length / self.burn_rate).ceil() as u32
    }
}

/// Street backdrop layout and lamplighter timings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetTuning {
    pub lamp_count: usize,
    pub glow_step: f32,
    pub walk_speed: f32,
    pub light_onset_ticks: u32,
    pub light_duration_ticks: u32,
    pub star_count: usize,
    pub snowflake_count: usize,
}

impl Default for StreetTuning {
    fn default() -> Self {
        Self {
            lamp_count: LAMP_COUNT,
            glow_step: LAMP_GLOW_STEP,
            walk_speed: LAMPLIGHTER_SPEED,
            light_onset_ticks: LIGHT_ONSET_TICKS,
            light_duration_ticks: LIGHT_DURATION_TICKS,
            star_count: STAR_COUNT,
            snowflake_count: SNOWFLAKE_COUNT,
        }
    }
}

/// All tuning groups together
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub emitter: EmitterTuning,
    pub sparkler: SparklerTuning,
    pub street: StreetTuning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_burn_takes_ten_seconds() {
        let t = SparklerTuning::default();
        assert_eq!(t.burn_ticks(), 600);
        assert!((t.burn_ticks() as f32 * SIM_DT - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_emitter_preconditions() {
        assert!(EmitterTuning::default().is_valid());
        let bad_chance = EmitterTuning {
            big_burst_chance: 1.5,
            ..Default::default()
        };
        assert!(!bad_chance.is_valid());
        let empty_speed = EmitterTuning {
            min_speed: 8.0,
            max_speed: 8.0,
            ..Default::default()
        };
        assert!(!empty_speed.is_valid());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning =
            serde_json::from_str(r#"{ "emitter": { "capacity": 10 } }"#).unwrap();
        assert_eq!(tuning.emitter.capacity, 10);
        assert_eq!(tuning.emitter.max_small_burst, 4);
        assert_eq!(tuning.sparkler, SparklerTuning::default());
    }
}
