//! The lamplighter: walks to the first dark lamp, lights it, moves on, and
//! leaves once the street is lit

use super::lamp::Lamp;
use crate::consts::*;
use crate::tuning::StreetTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LamplighterState {
    Walking,
    /// Reaching up with the pole; `timer` counts ticks since arrival
    Lighting { timer: u32 },
    /// Heading off the right edge, or resting there
    Leaving,
}

#[derive(Debug, Clone)]
pub struct Lamplighter {
    pub x: f32,
    pub target_index: usize,
    pub state: LamplighterState,
    /// +1 facing right, -1 facing left
    pub direction: f32,
}

impl Default for Lamplighter {
    fn default() -> Self {
        Self {
            x: LAMPLIGHTER_START_X,
            target_index: 0,
            state: LamplighterState::Walking,
            direction: 1.0,
        }
    }
}

impl Lamplighter {
    /// Back to the left edge, about to walk in
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_lighting(&self) -> bool {
        matches!(self.state, LamplighterState::Lighting { .. })
    }

    /// Advance one tick. Returns the index of a lamp lit this tick.
    ///
    /// Lamp glow is ramped here too so lamps and agent share one pass.
    pub fn update(
        &mut self,
        lamps: &mut [Lamp],
        viewport_width: f32,
        tuning: &StreetTuning,
    ) -> Option<usize> {
        let mut first_unlit = None;
        for (index, lamp) in lamps.iter_mut().enumerate() {
            lamp.update_glow(tuning.glow_step);
            if !lamp.lit && first_unlit.is_none() {
                first_unlit = Some(index);
            }
        }

        match first_unlit {
            Some(index) => {
                self.target_index = index;
                if self.state == LamplighterState::Leaving {
                    self.state = LamplighterState::Walking;
                    // Come back in from whichever edge we left by
                    let right_edge = viewport_width + LAMPLIGHTER_EDGE_MARGIN;
                    let left_edge = -LAMPLIGHTER_EDGE_MARGIN;
                    if self.x > right_edge {
                        self.x = right_edge;
                    } else if self.x < left_edge {
                        self.x = left_edge;
                    }
                    log::debug!("Lamplighter returning for lamp {index}");
                }
            }
            None => {
                if !self.is_lighting() && self.state != LamplighterState::Leaving {
                    log::debug!("All lamps lit, lamplighter leaving");
                    self.state = LamplighterState::Leaving;
                }
            }
        }

        match self.state {
            LamplighterState::Walking | LamplighterState::Leaving => {
                let target_x = match self.state {
                    LamplighterState::Leaving => viewport_width + LAMPLIGHTER_EXIT_MARGIN,
                    _ => match lamps.get(self.target_index) {
                        Some(lamp) => lamp.base.x - LAMPLIGHTER_STAND_OFFSET,
                        None => viewport_width + LAMPLIGHTER_EXIT_MARGIN,
                    },
                };
                let dx = target_x - self.x;
                if dx.abs() < tuning.walk_speed {
                    self.x = target_x;
                    if self.state == LamplighterState::Walking {
                        self.state = LamplighterState::Lighting { timer: 0 };
                    }
                } else {
                    self.x += dx.signum() * tuning.walk_speed;
                    self.direction = dx.signum();
                }
                None
            }
            LamplighterState::Lighting { timer } => {
                let timer = timer + 1;
                let mut lit = None;
                if timer == tuning.light_onset_ticks {
                    if let Some(lamp) = lamps.get_mut(self.target_index) {
                        lamp.lit = true;
                        lit = Some(self.target_index);
                        log::debug!("Lamp {} lit", self.target_index);
                    }
                }
                self.state = if timer > tuning.light_duration_ticks {
                    LamplighterState::Walking
                } else {
                    LamplighterState::Lighting { timer }
                };
                lit
            }
        }
    }
}
