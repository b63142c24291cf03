//! The street backdrop: lamps, lamplighter and sky
//!
//! Everything here depends on the viewport and is rebuilt from scratch on
//! resize. It never reads user input apart from lamp clicks.

use glam::Vec2;
use rand::Rng;

use super::lamp::{Lamp, extinguish_at, layout_lamps};
use super::lamplighter::Lamplighter;
use super::sky::{Snowfall, Starfield};
use crate::tuning::StreetTuning;

#[derive(Debug, Clone)]
pub struct Street {
    pub width: f32,
    pub height: f32,
    pub lamps: Vec<Lamp>,
    pub lamplighter: Lamplighter,
    pub stars: Starfield,
    pub snow: Snowfall,
    tuning: StreetTuning,
}

impl Street {
    pub fn new(
        width: f32,
        height: f32,
        tuning: StreetTuning,
        snow: bool,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            width,
            height,
            lamps: layout_lamps(width, height, tuning.lamp_count, rng),
            lamplighter: Lamplighter::default(),
            stars: Starfield::new(tuning.star_count, width, height, rng),
            snow: Snowfall::new(tuning.snowflake_count, width, height, snow, rng),
            tuning,
        }
    }

    pub fn tuning(&self) -> &StreetTuning {
        &self.tuning
    }

    /// Rebuild lamps for the new viewport (all dark) and send the
    /// lamplighter back to the left edge
    pub fn resize(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        self.width = width;
        self.height = height;
        self.lamps = layout_lamps(width, height, self.tuning.lamp_count, rng);
        self.lamplighter.reset();
        self.stars.relayout(width, height, rng);
        self.snow.resize(width, height);
    }

    /// Ground line the lamplighter walks on
    pub fn ground_y(&self) -> f32 {
        self.height - crate::consts::GROUND_HEIGHT
    }

    /// Returns the index of a lamp lit this tick
    pub fn update(&mut self, rng: &mut impl Rng) -> Option<usize> {
        let lit = self
            .lamplighter
            .update(&mut self.lamps, self.width, &self.tuning);
        self.stars.twinkle(rng);
        self.snow.update(rng);
        lit
    }

    /// Click on a lit lamp head to put it out
    pub fn handle_click(&mut self, point: Vec2) -> Option<usize> {
        let index = extinguish_at(&mut self.lamps, point)?;
        log::debug!("Lamp {index} extinguished by click");
        Some(index)
    }

    pub fn all_lit(&self) -> bool {
        self.lamps.iter().all(|l| l.lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LamplighterState;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn street(rng: &mut Pcg32) -> Street {
        Street::new(1000.0, 600.0, StreetTuning::default(), false, rng)
    }

    #[test]
    fn test_street_gets_fully_lit() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut s = street(&mut rng);
        for _ in 0..3000 {
            s.update(&mut rng);
        }
        assert!(s.all_lit());
        assert_eq!(s.lamplighter.state, LamplighterState::Leaving);
    }

    #[test]
    fn test_resize_rebuilds_layout() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut s = street(&mut rng);
        for _ in 0..3000 {
            s.update(&mut rng);
        }
        s.resize(500.0, 400.0, &mut rng);
        assert_eq!(s.lamps.len(), 4);
        assert!(s.lamps.iter().all(|l| !l.lit && l.base.y == 350.0));
        assert_eq!(s.lamps[0].base.x, 100.0);
        assert_eq!(s.lamplighter.state, LamplighterState::Walking);
        assert!(s.stars.stars.iter().all(|st| st.pos.x < 500.0 && st.pos.y < 240.0));
    }

    #[test]
    fn test_clicked_lamp_gets_relit() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut s = street(&mut rng);
        for _ in 0..3000 {
            s.update(&mut rng);
        }
        let head = s.lamps[2].head();
        assert_eq!(s.handle_click(head), Some(2));
        assert!(!s.all_lit());
        for _ in 0..3000 {
            s.update(&mut rng);
        }
        assert!(s.all_lit());
    }
}
