use rand::Rng;

use crate::color::css::HslColor;

/// Golden-ratio conjugate, `1/φ`.
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

const SATURATION: f64 = 80.0;
const LIGHTNESS: f64 = 60.0;

/// Session-local generator of well-separated hues.
///
/// Each call advances the running hue fraction by `1/φ` modulo 1, which
/// keeps consecutive colors far apart on the wheel for any sequence length.
/// Sequences from different sessions are independent.
#[derive(Clone, Debug)]
pub struct ColorSequencer {
    hue: f64,
}

impl ColorSequencer {
    /// Seed the running hue at a uniformly random fraction.
    pub fn new() -> Self {
        Self::from_rng(&mut rand::thread_rng())
    }

    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_seed(rng.gen_range(0.0..1.0))
    }

    /// Seed with an explicit fraction; values outside `[0,1)` are wrapped.
    pub fn with_seed(seed: f64) -> Self {
        let hue = if seed.is_finite() {
            seed.rem_euclid(1.0)
        } else {
            0.0
        };
        Self { hue }
    }

    /// Current hue fraction in `[0,1)`.
    pub fn hue_fraction(&self) -> f64 {
        self.hue
    }

    pub fn next_color(&mut self) -> HslColor {
        self.hue = (self.hue + GOLDEN_RATIO_CONJUGATE).rem_euclid(1.0);
        HslColor::new(self.hue * 360.0, SATURATION, LIGHTNESS)
    }
}

impl Default for ColorSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for ColorSequencer {
    type Item = HslColor;

    fn next(&mut self) -> Option<HslColor> {
        Some(self.next_color())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/sequencer.rs"]
mod tests;
