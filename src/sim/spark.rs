//! A single emitted spark

use glam::Vec2;

use crate::consts::{SPARK_FRICTION, SPARK_GRAVITY};

/// Launch parameters handed to the pool when a spark is activated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkLaunch {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Base radius before the visibility doubling
    pub size: f32,
    /// Base life before the visibility doubling
    pub life: f32,
    /// Life lost per tick
    pub decay: f32,
    pub gravity: f32,
    pub friction: f32,
}

impl SparkLaunch {
    /// Launch with default gravity and friction
    pub fn new(pos: Vec2, vel: Vec2, size: f32, life: f32, decay: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            life,
            decay,
            gravity: SPARK_GRAVITY,
            friction: SPARK_FRICTION,
        }
    }
}

/// A pooled spark. Only ever constructed when the pool is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    /// Position before the last advance (motion blur)
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
    pub decay: f32,
    pub gravity: f32,
    pub friction: f32,
}

impl Default for Spark {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 0.0,
            life: 0.0,
            max_life: 1.0,
            decay: 0.0,
            gravity: SPARK_GRAVITY,
            friction: SPARK_FRICTION,
        }
    }
}

impl Spark {
    /// Re-activate with fresh kinematics. Size and life are doubled so
    /// sparks read well at display scale.
    pub fn reset(&mut self, launch: &SparkLaunch) {
        self.pos = launch.pos;
        self.prev_pos = launch.pos;
        self.vel = launch.vel;
        self.size = launch.size * 2.0;
        self.life = launch.life * 2.0;
        self.max_life = self.life;
        self.decay = launch.decay;
        self.gravity = launch.gravity;
        self.friction = launch.friction;
    }

    /// Advance one tick with an optional extra impulse (turbulence)
    #[inline]
    pub fn advance(&mut self, impulse: Vec2) {
        self.prev_pos = self.pos;
        self.vel *= self.friction;
        self.vel.y += self.gravity;
        self.vel += impulse;
        self.pos += self.vel;
        self.life -= self.decay;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Remaining life as a fraction of max life (1 = just launched)
    #[inline]
    pub fn heat(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    /// Distance covered during the last advance
    #[inline]
    pub fn speed(&self) -> f32 {
        self.pos.distance(self.prev_pos)
    }
}
