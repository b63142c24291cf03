//! Latest-sample handoff from a hand tracker
//!
//! Trackers deliver samples from their own callbacks whenever a camera frame
//! is processed. The simulation reads whatever arrived last and never waits.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use super::gesture::{GestureSample, HandLandmarks};
use crate::error::SensorError;

#[derive(Debug, Default)]
struct SlotInner {
    latest: Cell<Option<GestureSample>>,
    open: Cell<bool>,
}

/// Reader side: owned by the scene
#[derive(Debug, Clone, Default)]
pub struct SampleSlot {
    inner: Rc<SlotInner>,
}

/// Writer side: handed to the tracker's callback
#[derive(Debug, Clone)]
pub struct SampleSink {
    inner: Rc<SlotInner>,
}

impl SampleSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the slot and hand out a writer
    pub fn sink(&self) -> SampleSink {
        self.inner.open.set(true);
        SampleSink {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Stop accepting samples. Safe to call any number of times.
    pub fn close(&self) {
        self.inner.open.set(false);
        self.inner.latest.set(None);
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    /// Take the newest sample, if one arrived since the last call
    pub fn take(&self) -> Option<GestureSample> {
        self.inner.latest.take()
    }
}

impl SampleSink {
    /// Deliver a sample. Overwrites any unread one; ignored once closed.
    pub fn deliver(&self, sample: GestureSample) {
        if self.inner.open.get() {
            self.inner.latest.set(Some(sample));
        }
    }
}

/// A camera-backed hand tracker
pub trait HandTracker {
    /// Begin delivering samples into `sink`
    fn start(&mut self, sink: SampleSink) -> Result<(), SensorError>;
    /// Stop delivering. Must be idempotent.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Plays back recorded landmark frames, one per `pump`
#[derive(Debug, Clone)]
pub struct ReplayTracker {
    frames: Vec<Option<HandLandmarks>>,
    cursor: usize,
    viewport: Vec2,
    sink: Option<SampleSink>,
}

impl ReplayTracker {
    /// `None` frames stand for camera frames with no hand in view
    pub fn new(frames: Vec<Option<HandLandmarks>>, viewport: Vec2) -> Self {
        Self {
            frames,
            cursor: 0,
            viewport,
            sink: None,
        }
    }

    /// Process the next camera frame, looping at the end.
    /// Returns whether a hand was seen.
    pub fn pump(&mut self) -> bool {
        let Some(sink) = &self.sink else {
            return false;
        };
        if self.frames.is_empty() {
            return false;
        }
        let frame = self.frames[self.cursor % self.frames.len()];
        self.cursor += 1;
        match frame {
            Some(hand) => {
                sink.deliver(hand.classify(self.viewport));
                true
            }
            None => false,
        }
    }
}

impl HandTracker for ReplayTracker {
    fn start(&mut self, sink: SampleSink) -> Result<(), SensorError> {
        if self.sink.is_some() {
            return Err(SensorError::AlreadyRunning);
        }
        if self.frames.is_empty() {
            return Err(SensorError::CameraUnavailable(
                "no recorded frames".to_string(),
            ));
        }
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        self.sink = None;
    }

    fn is_running(&self) -> bool {
        self.sink.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gesture::tests::{fist, thumb_up};

    fn sample(x: f32) -> GestureSample {
        GestureSample {
            position: Vec2::new(x, 0.0),
            is_thumb_up: false,
            is_open_hand: false,
        }
    }

    #[test]
    fn test_latest_sample_wins() {
        let slot = SampleSlot::new();
        let sink = slot.sink();
        sink.deliver(sample(1.0));
        sink.deliver(sample(2.0));
        assert_eq!(slot.take().map(|s| s.position.x), Some(2.0));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_close_is_idempotent_and_drops_late_samples() {
        let slot = SampleSlot::new();
        let sink = slot.sink();
        sink.deliver(sample(1.0));
        slot.close();
        slot.close();
        assert!(!slot.is_open());
        assert_eq!(slot.take(), None);
        sink.deliver(sample(3.0));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_replay_tracker_lifecycle() {
        let slot = SampleSlot::new();
        let mut tracker = ReplayTracker::new(
            vec![Some(fist()), None, Some(thumb_up())],
            Vec2::new(800.0, 600.0),
        );
        assert!(!tracker.pump());
        tracker.start(slot.sink()).unwrap();
        assert_eq!(tracker.start(slot.sink()), Err(SensorError::AlreadyRunning));

        assert!(tracker.pump());
        assert!(!slot.take().unwrap().is_thumb_up);
        assert!(!tracker.pump());
        assert_eq!(slot.take(), None);
        assert!(tracker.pump());
        assert!(slot.take().unwrap().is_thumb_up);

        tracker.stop();
        tracker.stop();
        assert!(!tracker.is_running());
    }

    #[test]
    fn test_empty_replay_is_unavailable() {
        let slot = SampleSlot::new();
        let mut tracker = ReplayTracker::new(Vec::new(), Vec2::ONE);
        assert!(matches!(
            tracker.start(slot.sink()),
            Err(SensorError::CameraUnavailable(_))
        ));
    }
}
