//! Top-level scene coordinator
//!
//! Owns every subsystem plus the cross-cutting state (pointer target, AR
//! mode, hand presence, gesture edges) and advances them once per tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::sparkler::Sparkler;
use super::street::Street;
use crate::consts::OFFSCREEN_MARGIN;
use crate::error::SensorError;
use crate::input::{EdgeTrigger, HandTracker, SampleSlot};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Ticks without a sensor sample before the hand counts as gone
pub const HAND_TIMEOUT_TICKS: u64 = 30;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer/touch position
    pub target: Option<Vec2>,
    /// Click/tap position (lamp hit test, then ignite)
    pub click: Option<Vec2>,
    /// Ignite request from a key or button
    pub ignite: bool,
    /// Drop request from a key or button
    pub drop: bool,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Ignited,
    /// A fresh sparkler replaced a burnt-out one
    Relit,
    BurntOut,
    Dropped,
    PickupStarted,
    PickedUp,
    LampLit(usize),
    LampExtinguished(usize),
    HandFound,
    HandLost,
}

/// On-screen hint for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Ignite,
    NewSparkler,
}

impl Prompt {
    pub fn text(&self) -> &'static str {
        match self {
            Prompt::Ignite => "Touch / Click to Ignite",
            Prompt::NewSparkler => "Touch / Click for New Sparkler",
        }
    }
}

/// Camera-driven input state
#[derive(Debug, Default)]
struct ArInput {
    slot: SampleSlot,
    enabled: bool,
    last_sample_tick: Option<u64>,
    hand_present: bool,
    thumb_up: EdgeTrigger,
    open_hand: EdgeTrigger,
}

#[derive(Debug)]
pub struct Scene {
    pub viewport: Vec2,
    pub sparkler: Sparkler,
    pub street: Street,
    /// Last commanded target; held when no new input arrives
    target: Vec2,
    time_ticks: u64,
    rng: Pcg32,
    ar: ArInput,
    events: Vec<SceneEvent>,
}

impl Scene {
    /// New scene with entropy-seeded randomness
    pub fn new(viewport: Vec2, settings: &Settings) -> Self {
        Self::with_seed(viewport, settings.tuning(), settings.snow, rand::random())
    }

    /// New scene with a fixed seed (tests, demos)
    pub fn with_seed(viewport: Vec2, tuning: Tuning, snow: bool, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let target = Vec2::new(viewport.x / 2.0, viewport.y * 0.8);
        let street = Street::new(viewport.x, viewport.y, tuning.street, snow, &mut rng);
        Self {
            viewport,
            sparkler: Sparkler::new(target, tuning.sparkler, tuning.emitter),
            street,
            target,
            time_ticks: 0,
            rng,
            ar: ArInput::default(),
            events: Vec::with_capacity(8),
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn ar_enabled(&self) -> bool {
        self.ar.enabled
    }

    pub fn hand_present(&self) -> bool {
        self.ar.hand_present
    }

    /// Switch to camera input. On failure the scene keeps running on the
    /// pointer and the error goes back to the caller.
    pub fn enable_ar(&mut self, tracker: &mut impl HandTracker) -> Result<(), SensorError> {
        if self.ar.enabled {
            return Ok(());
        }
        if let Err(err) = tracker.start(self.ar.slot.sink()) {
            log::warn!("AR mode unavailable: {err}");
            self.ar.slot.close();
            return Err(err);
        }
        self.ar.enabled = true;
        log::info!("AR mode enabled");
        Ok(())
    }

    /// Back to pointer input. Idempotent.
    pub fn disable_ar(&mut self, tracker: &mut impl HandTracker) {
        tracker.stop();
        self.ar.slot.close();
        if self.ar.enabled {
            log::info!("AR mode disabled");
        }
        self.ar.enabled = false;
        self.ar.hand_present = false;
        self.ar.last_sample_tick = None;
        self.ar.thumb_up.reset();
        self.ar.open_hand.reset();
    }

    /// Viewport changed: re-derive layout. The spark pool is untouched.
    pub fn resize(&mut self, width: f32, height: f32) {
        log::info!("Resize to {width}x{height}");
        self.viewport = Vec2::new(width, height);
        self.street.resize(width, height, &mut self.rng);
    }

    pub fn prompt(&self) -> Option<Prompt> {
        if self.sparkler.is_fresh() {
            Some(Prompt::Ignite)
        } else if !self.sparkler.is_lit() && self.sparkler.is_burnt_out() {
            Some(Prompt::NewSparkler)
        } else {
            None
        }
    }

    /// Ignite, or start a new sparkler when the old one is spent
    fn light_request(&mut self) {
        let sparkler = &mut self.sparkler;
        if sparkler.is_lit() {
            return;
        }
        if sparkler.is_burnt_out() {
            if !sparkler.is_dropping() {
                sparkler.relight(self.target);
                self.events.push(SceneEvent::Relit);
            }
        } else {
            sparkler.ignite();
            self.events.push(SceneEvent::Ignited);
        }
    }

    fn drop_request(&mut self) {
        if !self.sparkler.is_dropping() {
            self.sparkler.drop(&mut self.rng);
            self.events.push(SceneEvent::Dropped);
        }
    }

    fn poll_sensor(&mut self) {
        if !self.ar.enabled {
            return;
        }
        if let Some(sample) = self.ar.slot.take() {
            self.ar.last_sample_tick = Some(self.time_ticks);
            if !self.ar.hand_present {
                self.ar.hand_present = true;
                self.events.push(SceneEvent::HandFound);
            }
            self.target = sample.position;
            if self.ar.thumb_up.rising(sample.is_thumb_up) {
                self.light_request();
            }
            if self.ar.open_hand.rising(sample.is_open_hand) {
                self.drop_request();
            }
        } else if self.ar.hand_present {
            let stale = self
                .ar
                .last_sample_tick
                .is_none_or(|t| self.time_ticks - t > HAND_TIMEOUT_TICKS);
            if stale {
                self.ar.hand_present = false;
                self.ar.thumb_up.reset();
                self.ar.open_hand.reset();
                self.events.push(SceneEvent::HandLost);
            }
        }
    }

    /// Advance the whole scene by one fixed tick
    pub fn tick(&mut self, input: &TickInput) -> &[SceneEvent] {
        self.events.clear();
        self.time_ticks += 1;

        if let Some(target) = input.target {
            self.target = target;
        }
        self.poll_sensor();

        if let Some(point) = input.click {
            match self.street.handle_click(point) {
                Some(index) => self.events.push(SceneEvent::LampExtinguished(index)),
                None => self.light_request(),
            }
        }
        if input.ignite {
            self.light_request();
        }
        if input.drop {
            self.drop_request();
        }

        // Fell off the bottom: hand up a fresh one from the bottom edge
        if self.sparkler.is_dropping()
            && self.sparkler.pos.y > self.viewport.y + OFFSCREEN_MARGIN
        {
            let from = Vec2::new(self.target.x, self.viewport.y);
            self.sparkler.pickup(from, self.target);
            self.events.push(SceneEvent::PickupStarted);
        }

        let outcome = self.sparkler.update(self.target, &mut self.rng);
        if outcome.burnt_out {
            self.events.push(SceneEvent::BurntOut);
        }
        if outcome.picked_up {
            self.events.push(SceneEvent::PickedUp);
        }

        if let Some(index) = self.street.update(&mut self.rng) {
            self.events.push(SceneEvent::LampLit(index));
        }

        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ReplayTracker;
    use crate::input::gesture::tests::{fist, open_hand, thumb_up};
    use crate::sim::SparklerState;
    use crate::tuning::EmitterTuning;

    fn scene() -> Scene {
        Scene::with_seed(Vec2::new(1000.0, 800.0), Tuning::default(), false, 42)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_starts_with_ignite_prompt_and_holds_target() {
        let mut s = scene();
        assert_eq!(s.prompt(), Some(Prompt::Ignite));
        s.tick(&idle());
        assert_eq!(s.sparkler.pos, Vec2::new(500.0, 640.0));

        s.tick(&TickInput {
            target: Some(Vec2::new(100.0, 200.0)),
            ..idle()
        });
        // No new target: the last one holds
        s.tick(&idle());
        assert_eq!(s.sparkler.pos, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_click_ignites_then_new_sparkler_after_burnout() {
        let mut s = scene();
        let click = TickInput {
            click: Some(Vec2::new(500.0, 100.0)),
            ..idle()
        };
        assert_eq!(s.tick(&click), &[SceneEvent::Ignited]);
        assert_eq!(s.prompt(), None);

        let mut burnt = false;
        for _ in 0..s.sparkler.tuning().burn_ticks() {
            burnt |= s.tick(&idle()).contains(&SceneEvent::BurntOut);
        }
        assert!(burnt);
        assert_eq!(s.prompt(), Some(Prompt::NewSparkler));

        assert!(s.tick(&click).contains(&SceneEvent::Relit));
        assert!(s.sparkler.is_lit());
        assert!(s.sparkler.burnt_length() <= s.sparkler.tuning().burn_rate);
    }

    #[test]
    fn test_drop_and_recover_through_scene() {
        let mut s = scene();
        s.tick(&TickInput {
            ignite: true,
            ..idle()
        });
        for _ in 0..20 {
            s.tick(&idle());
        }
        assert!(!s.sparkler.sparks().is_empty());

        s.tick(&TickInput {
            drop: true,
            ..idle()
        });
        let mut picked = false;
        for _ in 0..200 {
            let events = s.tick(&idle());
            if events.contains(&SceneEvent::PickupStarted) {
                picked = true;
                break;
            }
        }
        assert!(picked);
        assert_eq!(s.sparkler.burnt_length(), 0.0);
        assert!(!s.sparkler.is_lit());
        assert_eq!(s.sparkler.sparks().len(), 0);
        assert!(matches!(s.sparkler.state(), SparklerState::PickingUp { .. }));

        let mut landed = false;
        for _ in 0..30 {
            landed |= s.tick(&idle()).contains(&SceneEvent::PickedUp);
        }
        assert!(landed);
        assert_eq!(s.sparkler.state(), SparklerState::Holding);
        assert_eq!(s.sparkler.pos, s.target());
    }

    #[test]
    fn test_pool_exhaustion_in_scene() {
        let tuning = Tuning {
            emitter: EmitterTuning {
                capacity: 10,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut s = Scene::with_seed(Vec2::new(800.0, 600.0), tuning, false, 7);
        s.tick(&TickInput {
            ignite: true,
            ..idle()
        });
        for _ in 0..200 {
            s.tick(&idle());
            let pool = s.sparkler.emitter().pool();
            assert!(pool.active_count() <= 10);
            assert_eq!(pool.active_count() + pool.inactive_count(), 10);
        }
    }

    #[test]
    fn test_clicking_lit_lamp_does_not_ignite() {
        let mut s = scene();
        for _ in 0..3000 {
            s.tick(&idle());
        }
        assert!(s.street.all_lit());
        let head = s.street.lamps[0].head();
        let events = s.tick(&TickInput {
            click: Some(head),
            ..idle()
        });
        assert_eq!(events, &[SceneEvent::LampExtinguished(0)]);
        assert!(!s.sparkler.is_lit());
    }

    #[test]
    fn test_resize_keeps_pool() {
        let mut s = scene();
        s.tick(&TickInput {
            ignite: true,
            ..idle()
        });
        for _ in 0..10 {
            s.tick(&idle());
        }
        let capacity = s.sparkler.emitter().pool().capacity();
        let active = s.sparkler.sparks().len();
        s.resize(640.0, 480.0);
        assert_eq!(s.sparkler.emitter().pool().capacity(), capacity);
        assert_eq!(s.sparkler.sparks().len(), active);
        assert_eq!(s.street.lamps[0].base.x, 128.0);
    }

    #[test]
    fn test_gestures_are_edge_triggered() {
        let mut s = scene();
        let viewport = s.viewport;
        let mut tracker = ReplayTracker::new(
            vec![
                Some(thumb_up()),
                Some(thumb_up()),
                Some(fist()),
                Some(open_hand()),
                Some(open_hand()),
            ],
            viewport,
        );
        s.enable_ar(&mut tracker).unwrap();
        assert!(s.ar_enabled());

        tracker.pump();
        let events = s.tick(&idle()).to_vec();
        assert!(events.contains(&SceneEvent::HandFound));
        assert!(events.contains(&SceneEvent::Ignited));
        assert!(s.hand_present());

        tracker.pump();
        assert!(!s.tick(&idle()).contains(&SceneEvent::Ignited));
        tracker.pump();
        s.tick(&idle());
        tracker.pump();
        assert!(s.tick(&idle()).contains(&SceneEvent::Dropped));
        tracker.pump();
        assert!(!s.tick(&idle()).contains(&SceneEvent::Dropped));

        s.disable_ar(&mut tracker);
        s.disable_ar(&mut tracker);
        assert!(!s.ar_enabled());
        assert!(!tracker.is_running());
    }

    #[test]
    fn test_hand_lost_after_timeout() {
        let mut s = scene();
        let mut tracker = ReplayTracker::new(vec![Some(fist())], s.viewport);
        s.enable_ar(&mut tracker).unwrap();
        tracker.pump();
        s.tick(&idle());
        let target = s.target();

        let mut lost = false;
        for _ in 0..=HAND_TIMEOUT_TICKS {
            lost |= s.tick(&idle()).contains(&SceneEvent::HandLost);
        }
        assert!(lost);
        assert!(!s.hand_present());
        // Holds the last commanded target
        assert_eq!(s.target(), target);
    }

    #[test]
    fn test_sensor_failure_keeps_pointer_mode() {
        let mut s = scene();
        let mut tracker = ReplayTracker::new(Vec::new(), s.viewport);
        assert!(s.enable_ar(&mut tracker).is_err());
        assert!(!s.ar_enabled());
        s.tick(&TickInput {
            target: Some(Vec2::new(10.0, 10.0)),
            ..idle()
        });
        assert_eq!(s.sparkler.pos, Vec2::new(10.0, 10.0));
    }
}
