//! Streetlamps

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Head hitbox extents around the top of the pole
const HIT_HALF_WIDTH: f32 = 30.0;
const HIT_ABOVE: f32 = 50.0;
const HIT_BELOW: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Lamp {
    /// Foot of the pole
    pub base: Vec2,
    pub pole_height: f32,
    pub lit: bool,
    /// 0 when dark, ramps toward 1 once lit
    pub glow: f32,
}

impl Lamp {
    pub fn new(base: Vec2, pole_height: f32) -> Self {
        Self {
            base,
            pole_height,
            lit: false,
            glow: 0.0,
        }
    }

    /// Top of the pole, where the lantern sits
    pub fn head(&self) -> Vec2 {
        Vec2::new(self.base.x, self.base.y - self.pole_height)
    }

    /// Ramp glow while lit
    pub fn update_glow(&mut self, step: f32) {
        if self.lit && self.glow < 1.0 {
            self.glow = (self.glow + step).min(1.0);
        }
    }

    pub fn head_contains(&self, point: Vec2) -> bool {
        let head = self.head();
        point.x > head.x - HIT_HALF_WIDTH
            && point.x < head.x + HIT_HALF_WIDTH
            && point.y > head.y - HIT_ABOVE
            && point.y < head.y + HIT_BELOW
    }
}

/// Lay out `count` unlit lamps evenly across the viewport
pub fn layout_lamps(width: f32, height: f32, count: usize, rng: &mut impl Rng) -> Vec<Lamp> {
    let spacing = width / (count + 1) as f32;
    (1..=count)
        .map(|i| {
            Lamp::new(
                Vec2::new(spacing * i as f32, height - LAMP_GROUND_OFFSET),
                LAMP_MIN_HEIGHT + rng.random_range(0.0..LAMP_HEIGHT_JITTER),
            )
        })
        .collect()
}

/// Turn off the first lit lamp whose head contains `point`
pub fn extinguish_at(lamps: &mut [Lamp], point: Vec2) -> Option<usize> {
    let (index, lamp) = lamps
        .iter_mut()
        .enumerate()
        .find(|(_, lamp)| lamp.lit && lamp.head_contains(point))?;
    lamp.lit = false;
    lamp.glow = 0.0;
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_layout_spacing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let lamps = layout_lamps(1000.0, 600.0, 4, &mut rng);
        let xs: Vec<f32> = lamps.iter().map(|l| l.base.x).collect();
        assert_eq!(xs, vec![200.0, 400.0, 600.0, 800.0]);
        for lamp in &lamps {
            assert_eq!(lamp.base.y, 550.0);
            assert!((180.0..200.0).contains(&lamp.pole_height));
            assert!(!lamp.lit);
            assert_eq!(lamp.glow, 0.0);
        }
    }

    #[test]
    fn test_glow_ramps_only_while_lit() {
        let mut lamp = Lamp::new(Vec2::new(0.0, 0.0), 180.0);
        lamp.update_glow(0.05);
        assert_eq!(lamp.glow, 0.0);
        lamp.lit = true;
        for _ in 0..30 {
            lamp.update_glow(0.05);
        }
        assert_eq!(lamp.glow, 1.0);
    }

    #[test]
    fn test_extinguish_hits_only_lit_heads() {
        let mut lamps = vec![
            Lamp::new(Vec2::new(100.0, 500.0), 180.0),
            Lamp::new(Vec2::new(300.0, 500.0), 180.0),
        ];
        lamps[1].lit = true;
        lamps[1].glow = 0.7;

        assert_eq!(extinguish_at(&mut lamps, Vec2::new(100.0, 310.0)), None);
        assert_eq!(extinguish_at(&mut lamps, Vec2::new(300.0, 500.0)), None);
        assert_eq!(extinguish_at(&mut lamps, Vec2::new(310.0, 300.0)), Some(1));
        assert!(!lamps[1].lit);
        assert_eq!(lamps[1].glow, 0.0);
    }
}
