//! The hand-held sparkler
//!
//! Position is driven by the current [`SparklerState`]; burning and spark
//! emission run in every state.

use glam::Vec2;
use rand::Rng;

use super::emitter::Emitter;
use super::spark::Spark;
use crate::tuning::{EmitterTuning, SparklerTuning};
use crate::{consts::*, ease_out_cubic, rotate_offset};

/// How the sparkler's position is computed each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SparklerState {
    /// Held: position snaps to the target every tick
    Holding,
    /// Tossed away and falling under gravity, ignoring the target
    Dropping { vel: Vec2, spin: f32 },
    /// A fresh sparkler rising back into the hand
    PickingUp { progress: f32, start_y: f32 },
}

/// Outcome of a single `update`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SparklerTick {
    /// Fuel ran out this tick
    pub burnt_out: bool,
    /// Pickup animation finished this tick
    pub picked_up: bool,
    /// Sparks granted by the pool this tick
    pub spawned: u32,
}

#[derive(Debug, Clone)]
pub struct Sparkler {
    pub pos: Vec2,
    prev_pos: Vec2,
    pub angle: f32,
    burnt_length: f32,
    /// Ticks spent burning; burnt length is derived from it
    burn_ticks: u32,
    lit: bool,
    state: SparklerState,
    tuning: SparklerTuning,
    emitter: Emitter,
}

impl Sparkler {
    pub fn new(pos: Vec2, tuning: SparklerTuning, emitter: EmitterTuning) -> Self {
        Self {
            pos,
            prev_pos: pos,
            angle: tuning.base_angle,
            burnt_length: 0.0,
            burn_ticks: 0,
            lit: false,
            state: SparklerState::Holding,
            tuning,
            emitter: Emitter::new(emitter),
        }
    }

    pub fn state(&self) -> SparklerState {
        self.state
    }

    pub fn tuning(&self) -> &SparklerTuning {
        &self.tuning
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn burnt_length(&self) -> f32 {
        self.burnt_length
    }

    /// Fuel fully consumed
    pub fn is_burnt_out(&self) -> bool {
        self.burnt_length >= self.tuning.length
    }

    /// Untouched: never lit since the last reset
    pub fn is_fresh(&self) -> bool {
        !self.lit && self.burnt_length == 0.0
    }

    pub fn is_dropping(&self) -> bool {
        matches!(self.state, SparklerState::Dropping { .. })
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn sparks(&self) -> &[Spark] {
        self.emitter.sparks()
    }

    /// Light the fuel. No-op while lit or burnt out.
    pub fn ignite(&mut self) {
        if self.lit || self.is_burnt_out() {
            return;
        }
        log::debug!("Sparkler ignited at burnt length {}", self.burnt_length);
        self.lit = true;
    }

    /// Start a new sparkler, already burning, at `pos`
    pub fn relight(&mut self, pos: Vec2) {
        self.reset_fuel();
        self.pos = pos;
        self.prev_pos = pos;
        self.lit = true;
        log::debug!("New sparkler lit at ({:.0}, {:.0})", pos.x, pos.y);
    }

    /// Toss the sparkler up and away. No-op while already dropping.
    pub fn drop(&mut self, rng: &mut impl Rng) {
        if self.is_dropping() {
            return;
        }
        let vel = Vec2::new(
            rng.random_range(-TOSS_SIDE_SPEED..TOSS_SIDE_SPEED),
            -TOSS_UP_SPEED,
        );
        let spin = rng.random_range(-TOSS_SPIN..TOSS_SPIN);
        self.state = SparklerState::Dropping { vel, spin };
        log::debug!("Sparkler dropped (vx={:.2}, spin={:.3})", vel.x, spin);
    }

    /// Bring a fresh sparkler up from `from` toward `to`.
    ///
    /// Fuel resets and every spark returns to the pool immediately. The rise
    /// follows whatever target is passed to later `update` calls; `to` is
    /// only the target at the moment of pickup.
    pub fn pickup(&mut self, from: Vec2, to: Vec2) {
        self.reset_fuel();
        self.pos = from;
        self.prev_pos = from;
        self.angle = self.tuning.base_angle;
        self.state = SparklerState::PickingUp {
            progress: 0.0,
            start_y: from.y,
        };
        log::debug!(
            "Sparkler pickup from ({:.0}, {:.0}) toward ({:.0}, {:.0})",
            from.x,
            from.y,
            to.x,
            to.y
        );
    }

    fn reset_fuel(&mut self) {
        self.burnt_length = 0.0;
        self.burn_ticks = 0;
        self.lit = false;
        self.emitter.reclaim_all();
    }

    /// Tip of the unburnt fuel in screen space
    pub fn tip(&self) -> Vec2 {
        let t = &self.tuning;
        let local_tip_y = -(t.handle_length + t.length) + self.burnt_length;
        self.pos + rotate_offset(Vec2::new(0.0, local_tip_y), self.angle)
    }

    /// Advance one tick toward `target`
    pub fn update(&mut self, target: Vec2, rng: &mut impl Rng) -> SparklerTick {
        let mut result = SparklerTick::default();
        self.prev_pos = self.pos;

        match &mut self.state {
            SparklerState::Holding => {
                self.pos = target;
            }
            SparklerState::Dropping { vel, spin } => {
                vel.y += self.tuning.drop_gravity;
                self.pos += *vel;
                self.angle += *spin;
            }
            SparklerState::PickingUp { progress, start_y } => {
                *progress += self.tuning.pickup_step;
                let done = *progress >= 1.0;
                if done {
                    *progress = 1.0;
                }
                let eased = ease_out_cubic(*progress);
                self.pos.x += (target.x - self.pos.x) * self.tuning.pickup_follow;
                self.pos.y = *start_y + (target.y - *start_y) * eased;
                if done {
                    self.state = SparklerState::Holding;
                    result.picked_up = true;
                }
            }
        }

        let displacement = self.pos - self.prev_pos;

        if self.lit && self.burnt_length < self.tuning.length {
            // Multiply instead of accumulating so inexact rates still finish
            // on exactly burn_ticks()
            self.burn_ticks += 1;
            self.burnt_length = if self.burn_ticks >= self.tuning.burn_ticks() {
                self.tuning.length
            } else {
                (self.burn_ticks as f32 * self.tuning.burn_rate).min(self.tuning.length)
            };
        }
        if self.lit && self.is_burnt_out() {
            self.lit = false;
            result.burnt_out = true;
            log::debug!("Sparkler burnt out");
        }

        if self.lit {
            let tip = self.tip();
            result.spawned = self.emitter.emit_burst(tip, displacement, rng);
        }

        self.emitter.advance(rng);
        result
    }
}
