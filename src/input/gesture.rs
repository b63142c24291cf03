//! Hand gesture classification
//!
//! Works on the 21-point hand skeleton used by common hand trackers, with
//! coordinates normalised to 0..1 and y growing downward.

use glam::Vec2;

pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices used by the classifier
pub mod landmark {
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

/// How far (normalised) the thumb tip must clear every fingertip
pub const THUMB_UP_MARGIN: f32 = 0.05;

/// One tracked hand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks(pub [Vec2; LANDMARK_COUNT]);

/// Classifier output consumed by the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Index fingertip in viewport pixels, mirrored so the hand moves like
    /// a reflection
    pub position: Vec2,
    pub is_thumb_up: bool,
    pub is_open_hand: bool,
}

impl HandLandmarks {
    fn y(&self, i: usize) -> f32 {
        self.0[i].y
    }

    /// Thumb pointing up and strictly the highest point of the hand
    pub fn is_thumb_up(&self) -> bool {
        use landmark::*;
        let tip = self.y(THUMB_TIP);
        let rigid = tip < self.y(THUMB_IP);
        let highest = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP]
            .iter()
            .all(|&f| tip < self.y(f) - THUMB_UP_MARGIN);
        rigid && highest
    }

    /// All four fingers extended above their middle joints
    pub fn is_open_hand(&self) -> bool {
        use landmark::*;
        [
            (INDEX_TIP, INDEX_PIP),
            (MIDDLE_TIP, MIDDLE_PIP),
            (RING_TIP, RING_PIP),
            (PINKY_TIP, PINKY_PIP),
        ]
        .iter()
        .all(|&(tip, pip)| self.y(tip) < self.y(pip))
    }

    pub fn classify(&self, viewport: Vec2) -> GestureSample {
        let index = self.0[landmark::INDEX_TIP];
        GestureSample {
            position: Vec2::new((1.0 - index.x) * viewport.x, index.y * viewport.y),
            is_thumb_up: self.is_thumb_up(),
            is_open_hand: self.is_open_hand(),
        }
    }
}

/// Canned hand shapes for demos and recordings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Fist,
    ThumbUp,
    OpenHand,
}

impl HandLandmarks {
    /// Build a plausible skeleton for `pose` around the palm point `palm`
    pub fn pose(palm: Vec2, pose: Pose) -> Self {
        use landmark::*;
        let at = |dx: f32, dy: f32| palm + Vec2::new(dx, dy);
        let mut points = [palm; LANDMARK_COUNT];
        let (pip_y, tip_y) = match pose {
            Pose::OpenHand => (-0.15, -0.3),
            _ => (-0.05, 0.0),
        };
        for (tip, pip) in [
            (INDEX_TIP, INDEX_PIP),
            (MIDDLE_TIP, MIDDLE_PIP),
            (RING_TIP, RING_PIP),
            (PINKY_TIP, PINKY_PIP),
        ] {
            points[pip] = at(0.0, pip_y);
            points[tip] = at(0.0, tip_y);
        }
        let (ip_y, thumb_y) = match pose {
            Pose::ThumbUp => (-0.15, -0.25),
            _ => (-0.05, -0.02),
        };
        points[THUMB_IP] = at(-0.05, ip_y);
        points[THUMB_TIP] = at(-0.05, thumb_y);
        Self(points)
    }
}

/// Fires once on the rising edge of a boolean signal
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    held: bool,
}

impl EdgeTrigger {
    /// Feed the current level; true only on the tick it turns on
    pub fn rising(&mut self, level: bool) -> bool {
        let fired = level && !self.held;
        self.held = level;
        fired
    }

    pub fn reset(&mut self) {
        self.held = false;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const PALM: Vec2 = Vec2::new(0.5, 0.6);

    pub(crate) fn fist() -> HandLandmarks {
        HandLandmarks::pose(PALM, Pose::Fist)
    }

    pub(crate) fn thumb_up() -> HandLandmarks {
        HandLandmarks::pose(PALM, Pose::ThumbUp)
    }

    pub(crate) fn open_hand() -> HandLandmarks {
        HandLandmarks::pose(PALM, Pose::OpenHand)
    }

    #[test]
    fn test_fist_is_neither() {
        let hand = fist();
        assert!(!hand.is_thumb_up());
        assert!(!hand.is_open_hand());
    }

    #[test]
    fn test_thumb_up() {
        assert!(thumb_up().is_thumb_up());
        assert!(!thumb_up().is_open_hand());
    }

    #[test]
    fn test_thumb_must_clear_fingers_by_margin() {
        let mut hand = thumb_up();
        // Index fingertip just 0.03 below the thumb tip
        hand.0[8] = Vec2::new(0.5, 0.38);
        assert!(!hand.is_thumb_up());
    }

    #[test]
    fn test_open_hand_is_not_thumb_up() {
        let hand = open_hand();
        assert!(hand.is_open_hand());
        assert!(!hand.is_thumb_up());
    }

    #[test]
    fn test_position_is_mirrored() {
        let mut hand = fist();
        hand.0[8] = Vec2::new(0.25, 0.5);
        let sample = hand.classify(Vec2::new(800.0, 600.0));
        assert_eq!(sample.position, Vec2::new(600.0, 300.0));
    }

    #[test]
    fn test_edge_trigger_fires_once_per_onset() {
        let mut trigger = EdgeTrigger::default();
        let fired: Vec<bool> = [false, true, true, false, true]
            .into_iter()
            .map(|l| trigger.rising(l))
            .collect();
        assert_eq!(fired, vec![false, true, false, false, true]);
    }
}
