//! Obstacle generation
//!
//! Randomness goes through `RandomSource` so tests can script every draw.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{CreatureKind, Obstacle, SizeClass};
use crate::error::SimError;

/// Source of uniform draws in [0, 1)
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Uniform index into a slice of `len` items
    fn pick(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

impl RandomSource for Pcg32 {
    fn next_f32(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    index: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            index: 0,
        }
    }

    /// Always returns the same draw
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.index % self.values.len()];
        self.index = self.index.wrapping_add(1);
        v.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

/// Final obstacle size: base dimensions times scale, truncated to whole units
pub fn scaled_dimensions(base: (f32, f32), scale: f32) -> Result<(f32, f32), SimError> {
    let width = (base.0 * scale).floor();
    let height = (base.1 * scale).floor();
    if !(width >= 1.0 && height >= 1.0) {
        return Err(SimError::InvariantViolation(format!(
            "obstacle size {}x{} from base {:?} at scale {}",
            width, height, base, scale
        )));
    }
    Ok((width, height))
}

/// Builds randomized creatures at the top of the lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleFactory {
    /// Scale per size class, indexed like `SizeClass::ALL`
    scales: [f32; 3],
}

impl Default for ObstacleFactory {
    fn default() -> Self {
        Self {
            scales: SizeClass::ALL.map(|size| size.scale()),
        }
    }
}

impl ObstacleFactory {
    /// Factory with a custom small/medium/large scale table
    pub fn with_scales(scales: [f32; 3]) -> Self {
        Self { scales }
    }

    /// Draw kind, size class and color, then place the obstacle just above
    /// the visible lane with a random horizontal position that fits.
    pub fn create(
        &self,
        lane_width: f32,
        rng: &mut dyn RandomSource,
    ) -> Result<Obstacle, SimError> {
        let kind = CreatureKind::ALL[rng.pick(CreatureKind::ALL.len())];
        let size_index = rng.pick(SizeClass::ALL.len());
        let size = SizeClass::ALL[size_index];
        let palette = kind.palette();
        let color = palette[rng.pick(palette.len())];

        let (width, height) = scaled_dimensions(kind.base_size(), self.scales[size_index])?;
        let x = rng.next_f32() * (lane_width - width).max(0.0);

        Ok(Obstacle {
            pos: Vec2::new(x, -height),
            width,
            height,
            kind,
            size,
            color,
        })
    }
}

/// Per-tick spawn decision plus the random source feeding the factory
pub struct Spawner {
    factory: ObstacleFactory,
    rng: Box<dyn RandomSource>,
    /// Replaces the difficulty's spawn probability when set
    probability_override: Option<f32>,
}

impl Spawner {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self::with_factory(rng, ObstacleFactory::default())
    }

    pub fn with_factory(rng: Box<dyn RandomSource>, factory: ObstacleFactory) -> Self {
        Self {
            factory,
            rng,
            probability_override: None,
        }
    }

    /// Seeded PCG source
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(Box::new(Pcg32::seed_from_u64(seed)))
    }

    /// Non-finite values are ignored and leave the difficulty table in charge
    pub fn set_probability_override(&mut self, probability: Option<f32>) {
        self.probability_override = probability
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, 1.0));
    }

    /// One Bernoulli trial with `probability`; builds an obstacle on success
    pub fn maybe_spawn(
        &mut self,
        probability: f32,
        lane_width: f32,
    ) -> Result<Option<Obstacle>, SimError> {
        let p = self.probability_override.unwrap_or(probability);
        if self.rng.next_f32() >= p {
            return Ok(None);
        }
        self.factory.create(lane_width, &mut *self.rng).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_scripted_draws_pick_each_table() {
        // kind=Stegosaurus, size=Large, color=last, x at half the range
        let mut rng = SequenceSource::new(vec![0.99, 0.99, 0.99, 0.5]);
        let obstacle = ObstacleFactory::default().create(480.0, &mut rng).unwrap();
        assert_eq!(obstacle.kind, CreatureKind::Stegosaurus);
        assert_eq!(obstacle.size, SizeClass::Large);
        assert_eq!(obstacle.color, 0x228B22);
        assert_eq!(obstacle.color_hex(), "#228B22");
        // 65 * 1.4 = 91, 55 * 1.4 = 77
        assert_eq!((obstacle.width, obstacle.height), (91.0, 77.0));
        assert!((obstacle.pos.x - (480.0 - 91.0) * 0.5).abs() < 1e-3);
        assert_eq!(obstacle.pos.y, -77.0);
    }

    #[test]
    fn test_small_trex_truncates() {
        let mut rng = SequenceSource::constant(0.0);
        let obstacle = ObstacleFactory::default().create(480.0, &mut rng).unwrap();
        assert_eq!(obstacle.kind, CreatureKind::TRex);
        assert_eq!(obstacle.size, SizeClass::Small);
        // 50 * 0.7 = 35, 70 * 0.7 = 49
        assert_eq!((obstacle.width, obstacle.height), (35.0, 49.0));
        assert_eq!(obstacle.pos.x, 0.0);
    }

    #[test]
    fn test_zero_size_is_invariant_violation() {
        assert!(matches!(
            scaled_dimensions((50.0, 70.0), 0.0),
            Err(SimError::InvariantViolation(_))
        ));
        assert!(matches!(
            scaled_dimensions((0.5, 70.0), 1.0),
            Err(SimError::InvariantViolation(_))
        ));
        assert!(scaled_dimensions((f32::NAN, 1.0), 1.0).is_err());
    }

    #[test]
    fn test_narrow_lane_pins_to_left_edge() {
        let mut rng = SequenceSource::constant(0.9);
        let obstacle = ObstacleFactory::default().create(20.0, &mut rng).unwrap();
        assert_eq!(obstacle.pos.x, 0.0);
    }

    #[test]
    fn test_spawner_bernoulli_trial() {
        // Trial draw 0.5 against p = 0.4: no spawn
        let mut spawner = Spawner::new(Box::new(SequenceSource::constant(0.5)));
        assert_eq!(spawner.maybe_spawn(0.4, 480.0).unwrap(), None);
        // Same draw against p = 0.6: spawn
        assert!(spawner.maybe_spawn(0.6, 480.0).unwrap().is_some());
    }

    #[test]
    fn test_spawner_override() {
        let mut spawner = Spawner::seeded(7);
        spawner.set_probability_override(Some(0.0));
        for _ in 0..1000 {
            assert!(spawner.maybe_spawn(1.0, 480.0).unwrap().is_none());
        }
        spawner.set_probability_override(Some(1.0));
        assert!(spawner.maybe_spawn(0.0, 480.0).unwrap().is_some());
        spawner.set_probability_override(None);
        assert!(spawner.maybe_spawn(0.0, 480.0).unwrap().is_none());
    }

    #[test]
    fn test_non_finite_override_falls_back_to_table() {
        let mut spawner = Spawner::seeded(11);
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            spawner.set_probability_override(Some(bad));
            let spawned = (0..100)
                .filter(|_| spawner.maybe_spawn(0.0, 480.0).unwrap().is_some())
                .count();
            assert_eq!(spawned, 0, "override {} must not force spawns", bad);
        }
    }

    #[test]
    fn test_custom_scale_table() {
        let factory = ObstacleFactory::with_scales([0.5, 1.0, 2.0]);
        // T-Rex, large, first color, left edge
        let mut rng = SequenceSource::new(vec![0.0, 0.99, 0.0, 0.0]);
        let obstacle = factory.create(480.0, &mut rng).unwrap();
        assert_eq!(obstacle.size, SizeClass::Large);
        assert_eq!((obstacle.width, obstacle.height), (100.0, 140.0));

        let broken = ObstacleFactory::with_scales([0.0; 3]);
        assert!(matches!(
            broken.create(480.0, &mut SequenceSource::constant(0.0)),
            Err(SimError::InvariantViolation(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_dimensions_follow_tables(seed in any::<u64>(), lane_width in 100.0f32..2000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let obstacle = ObstacleFactory::default().create(lane_width, &mut rng).unwrap();
            let (bw, bh) = obstacle.kind.base_size();
            let scale = obstacle.size.scale();
            prop_assert!([0.7, 1.0, 1.4].contains(&scale));
            prop_assert_eq!(obstacle.width, (bw * scale).floor());
            prop_assert_eq!(obstacle.height, (bh * scale).floor());
            prop_assert!(obstacle.kind.palette().contains(&obstacle.color));
            prop_assert!(obstacle.pos.x >= 0.0);
            prop_assert!(obstacle.pos.x <= lane_width - obstacle.width);
            prop_assert_eq!(obstacle.pos.y, -obstacle.height);
        }
    }
}
