//! Input collaborators
//!
//! The simulation only sees a target position and a few boolean gestures.
//! Whether they come from a pointer or a camera is decided here.

pub mod gesture;
pub mod sensor;

pub use gesture::{EdgeTrigger, GestureSample, HandLandmarks, Pose};
pub use sensor::{HandTracker, ReplayTracker, SampleSink, SampleSlot};
