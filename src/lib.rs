//! Sparkler Night - a hand-held sparkler over a lamplit street
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (sparks, sparkler, lamps, lamplighter, scene)
//! - `input`: Gesture classification and the latest-sample sensor slot
//! - `renderer`: Render surface contract and mesh building
//! - `tuning`: Data-driven simulation constants
//! - `settings`: Player-facing preferences and quality presets

pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{SensorError, SettingsError};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default spark pool capacity
    pub const SPARK_POOL_CAPACITY: usize = 1000;
    /// Spark kinematics
    pub const SPARK_GRAVITY: f32 = 0.15;
    pub const SPARK_FRICTION: f32 = 0.98;
    /// Sparks faster than this (px/tick) render as motion-blur streaks
    pub const SPARK_STREAK_SPEED: f32 = 4.0;

    /// Sparkler geometry (pixels)
    pub const SPARKLER_LENGTH: f32 = 150.0;
    pub const SPARKLER_HANDLE_LENGTH: f32 = 50.0;
    pub const SPARKLER_THICKNESS: f32 = 4.0;
    /// Burn rate in pixels per tick (150 / 0.25 / 60 = 10 seconds)
    pub const SPARKLER_BURN_RATE: f32 = 0.25;
    /// Resting tilt, 10 degrees to the left
    pub const SPARKLER_BASE_ANGLE: f32 = -10.0 * (std::f32::consts::PI / 180.0);

    /// Toss / fall physics
    pub const DROP_GRAVITY: f32 = 0.5;
    pub const TOSS_UP_SPEED: f32 = 10.0;
    pub const TOSS_SIDE_SPEED: f32 = 5.0;
    pub const TOSS_SPIN: f32 = 0.2;
    /// How far below the viewport a dropped sparkler falls before pickup
    pub const OFFSCREEN_MARGIN: f32 = 200.0;

    /// Pickup animation
    pub const PICKUP_STEP: f32 = 0.05;
    pub const PICKUP_FOLLOW: f32 = 0.1;

    /// Street layout
    pub const LAMP_COUNT: usize = 4;
    pub const LAMP_GROUND_OFFSET: f32 = 50.0;
    pub const LAMP_MIN_HEIGHT: f32 = 180.0;
    pub const LAMP_HEIGHT_JITTER: f32 = 20.0;
    pub const LAMP_GLOW_STEP: f32 = 0.05;
    pub const GROUND_HEIGHT: f32 = 60.0;

    /// Lamplighter timings (ticks) and motion
    pub const LAMPLIGHTER_SPEED: f32 = 3.0;
    pub const LAMPLIGHTER_START_X: f32 = -50.0;
    pub const LAMPLIGHTER_EDGE_MARGIN: f32 = 50.0;
    pub const LAMPLIGHTER_EXIT_MARGIN: f32 = 100.0;
    pub const LAMPLIGHTER_STAND_OFFSET: f32 = 20.0;
    pub const LIGHT_ONSET_TICKS: u32 = 30;
    pub const LIGHT_DURATION_TICKS: u32 = 60;

    /// Decorative layers
    pub const STAR_COUNT: usize = 50;
    pub const STAR_COUNT_MOBILE: usize = 30;
    pub const SNOWFLAKE_COUNT: usize = 150;
}

/// Cubic ease-out: fast start, gentle landing
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Rotate a local offset by `angle` radians (screen space, y down)
#[inline]
pub fn rotate_offset(offset: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_rotate_offset_matches_canvas_rotation() {
        // A point straight "up" the stick leans left when tilted negatively
        let up = Vec2::new(0.0, -100.0);
        let tilted = rotate_offset(up, consts::SPARKLER_BASE_ANGLE);
        assert!(tilted.x < 0.0);
        assert!((tilted.length() - 100.0).abs() < 0.001);

        let a = 0.3_f32;
        let r = rotate_offset(up, a);
        assert!((r.x - (-up.y * a.sin())).abs() < 0.001);
        assert!((r.y - (up.y * a.cos())).abs() < 0.001);
    }
}
