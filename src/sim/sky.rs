//! Decorative sky layers: twinkling stars and optional snowfall

use glam::Vec2;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f32,
}

/// Stars scattered over the upper 60% of the sky
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Self::random_pos(width, height, rng),
                size: rng.random_range(0.0..2.0),
                alpha: rng.random_range(0.0..1.0),
            })
            .collect();
        Self { stars }
    }

    fn random_pos(width: f32, height: f32, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..1.0) * width,
            rng.random_range(0.0..1.0) * height * 0.6,
        )
    }

    /// Scatter existing stars over the new viewport
    pub fn relayout(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.pos = Self::random_pos(width, height, rng);
        }
    }

    pub fn twinkle(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.alpha = (star.alpha + rng.random_range(-0.025..0.025)).clamp(0.2, 0.8);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snowflake {
    pub pos: Vec2,
    pub fall_speed: f32,
    pub radius: f32,
    pub opacity: f32,
    sway_offset: f32,
    sway_speed: f32,
}

impl Snowflake {
    fn spawn(width: f32, height: f32, initial: bool, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..1.0) * width,
                if initial {
                    rng.random_range(0.0..1.0) * height
                } else {
                    -10.0
                },
            ),
            fall_speed: rng.random_range(0.5..2.0),
            radius: rng.random_range(0.5..2.5),
            opacity: rng.random_range(0.3..0.8),
            sway_offset: rng.random_range(0.0..100.0),
            sway_speed: rng.random_range(0.01..0.03),
        }
    }
}

/// Falling snow; frozen in place while disabled
#[derive(Debug, Clone)]
pub struct Snowfall {
    pub flakes: Vec<Snowflake>,
    pub enabled: bool,
    width: f32,
    height: f32,
}

impl Snowfall {
    pub fn new(count: usize, width: f32, height: f32, enabled: bool, rng: &mut impl Rng) -> Self {
        Self {
            flakes: (0..count)
                .map(|_| Snowflake::spawn(width, height, true, rng))
                .collect(),
            enabled,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        if !self.enabled {
            return;
        }
        for flake in &mut self.flakes {
            flake.pos.y += flake.fall_speed;
            flake.pos.x += ((flake.pos.y + flake.sway_offset) * flake.sway_speed).sin() * 0.5;

            if flake.pos.y > self.height {
                *flake = Snowflake::spawn(self.width, self.height, false, rng);
            }
            if flake.pos.x > self.width {
                flake.pos.x = 0.0;
            }
            if flake.pos.x < 0.0 {
                flake.pos.x = self.width;
            }
        }
    }
}
