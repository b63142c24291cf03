//! Fixed-step simulation module
//!
//! All scene logic lives here:
//! - One `tick` per display refresh, no wall-clock time
//! - Randomness only through the scene's RNG
//! - No rendering or platform dependencies

pub mod emitter;
pub mod lamp;
pub mod lamplighter;
pub mod pool;
pub mod scene;
pub mod sky;
pub mod spark;
pub mod sparkler;
pub mod street;

pub use emitter::Emitter;
pub use lamp::Lamp;
pub use lamplighter::{Lamplighter, LamplighterState};
pub use pool::{SparkHandle, SparkPool};
pub use scene::{Prompt, Scene, SceneEvent, TickInput};
pub use sky::{Snowfall, Starfield};
pub use spark::{Spark, SparkLaunch};
pub use sparkler::{Sparkler, SparklerState, SparklerTick};
pub use street::Street;
