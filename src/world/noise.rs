//! Fractal Brownian motion over OpenSimplex2.
//!
//! Octaves of base noise are summed while the amplitude shrinks by `gain`
//! and the frequency grows by `lacunarity`; the sum is normalized by the
//! total amplitude so the output range does not depend on the octave count.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use glam::{Vec2, Vec3};

use crate::error::GenError;

fn base_noise() -> FastNoiseLite {
    let mut noise = FastNoiseLite::new();
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    // Frequency is applied per octave by the samplers below.
    noise.set_frequency(Some(1.0));
    noise
}

fn check_params(octaves: u32, gain: f32, lacunarity: f32) -> Result<(), GenError> {
    if octaves == 0 {
        return Err(GenError::InvalidOctaves);
    }
    if gain <= 0.0 || gain >= 1.0 {
        return Err(GenError::InvalidGain { gain });
    }
    if lacunarity <= 1.0 {
        return Err(GenError::InvalidLacunarity { lacunarity });
    }
    Ok(())
}

fn rescale(value: f32, old_min: f32, old_max: f32, new_min: f32, new_max: f32) -> f32 {
    (value - old_min) * (new_max - new_min) / (old_max - old_min) + new_min
}

/// 2D fBm sampler. Pure function of the seed offset and input coordinate.
pub struct Fbm2 {
    noise: FastNoiseLite,
    seed: Vec2,
    octaves: u32,
    amplitude: f32,
    frequency: f32,
    gain: f32,
    lacunarity: f32,
}

impl Fbm2 {
    pub fn new(
        seed: Vec2,
        octaves: u32,
        amplitude: f32,
        frequency: f32,
        gain: f32,
        lacunarity: f32,
    ) -> Result<Self, GenError> {
        check_params(octaves, gain, lacunarity)?;
        Ok(Fbm2 {
            noise: base_noise(),
            seed,
            octaves,
            amplitude,
            frequency,
            gain,
            lacunarity,
        })
    }

    pub fn sample(&self, p: Vec2) -> f32 {
        let mut value = 0.0;
        let mut amplitude = self.amplitude;
        let mut frequency = self.frequency;
        let mut total = 0.0;

        for _ in 0..self.octaves {
            let q = (p + self.seed) * frequency;
            value += amplitude * self.noise.get_noise_2d(q.x, q.y);
            total += amplitude;
            amplitude *= self.gain;
            frequency *= self.lacunarity;
        }

        value / total
    }

    /// Sample and linearly remap from a declared old range to a new one.
    pub fn sample_scaled(
        &self,
        p: Vec2,
        old_min: f32,
        old_max: f32,
        new_min: f32,
        new_max: f32,
    ) -> f32 {
        rescale(self.sample(p), old_min, old_max, new_min, new_max)
    }
}

/// 3D fBm sampler, used for cave carving.
pub struct Fbm3 {
    noise: FastNoiseLite,
    seed: Vec3,
    octaves: u32,
    amplitude: f32,
    frequency: f32,
    gain: f32,
    lacunarity: f32,
}

impl Fbm3 {
    pub fn new(
        seed: Vec3,
        octaves: u32,
        amplitude: f32,
        frequency: f32,
        gain: f32,
        lacunarity: f32,
    ) -> Result<Self, GenError> {
        check_params(octaves, gain, lacunarity)?;
        Ok(Fbm3 {
            noise: base_noise(),
            seed,
            octaves,
            amplitude,
            frequency,
            gain,
            lacunarity,
        })
    }

    pub fn sample(&self, p: Vec3) -> f32 {
        let mut value = 0.0;
        let mut amplitude = self.amplitude;
        let mut frequency = self.frequency;
        let mut total = 0.0;

        for _ in 0..self.octaves {
            let q = (p + self.seed) * frequency;
            value += amplitude * self.noise.get_noise_3d(q.x, q.y, q.z);
            total += amplitude;
            amplitude *= self.gain;
            frequency *= self.lacunarity;
        }

        value / total
    }

    /// Sample and linearly remap from a declared old range to a new one.
    pub fn sample_scaled(
        &self,
        p: Vec3,
        old_min: f32,
        old_max: f32,
        new_min: f32,
        new_max: f32,
    ) -> f32 {
        rescale(self.sample(p), old_min, old_max, new_min, new_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fbm2(seed: Vec2) -> Fbm2 {
        Fbm2::new(seed, 3, 1.0, 1.0 / 256.0, 0.5, 2.0).unwrap()
    }

    #[test]
    fn identical_parameters_give_identical_samples() {
        let a = fbm2(Vec2::new(412.0, 9034.0));
        let b = fbm2(Vec2::new(412.0, 9034.0));
        for i in -40..40 {
            let p = Vec2::new(i as f32 * 7.3, i as f32 * -3.1);
            assert_eq!(a.sample(p).to_bits(), b.sample(p).to_bits());
        }
    }

    #[test]
    fn different_seed_offsets_diverge() {
        let a = fbm2(Vec2::new(0.0, 0.0));
        let b = fbm2(Vec2::new(5000.0, 12000.0));
        let diverged = (-40..40).any(|i| {
            let p = Vec2::new(i as f32 * 7.3, i as f32 * 13.9);
            a.sample(p) != b.sample(p)
        });
        assert!(diverged);
    }

    #[test]
    fn normalization_bounds_output_regardless_of_octaves() {
        for octaves in [1, 3, 8] {
            let fbm = Fbm2::new(Vec2::ZERO, octaves, 1.0, 1.0 / 64.0, 0.5, 2.0).unwrap();
            for i in -100..100 {
                let v = fbm.sample(Vec2::new(i as f32 * 3.7, i as f32 * -11.3));
                assert!(v.abs() <= 1.0, "octaves={octaves} produced {v}");
            }
        }
    }

    #[test]
    fn rescaling_is_linear_in_the_sample() {
        let fbm = fbm2(Vec2::new(77.0, 77.0));
        let p = Vec2::new(123.0, -456.0);
        let raw = fbm.sample(p);
        let scaled = fbm.sample_scaled(p, -1.0, 1.0, 0.0, 10.0);
        assert!((scaled - (raw + 1.0) * 5.0).abs() < 1e-4);
    }

    #[test]
    fn malformed_parameters_are_rejected_at_construction() {
        let seed = Vec2::ZERO;
        assert!(matches!(
            Fbm2::new(seed, 0, 1.0, 1.0, 0.5, 2.0),
            Err(GenError::InvalidOctaves)
        ));
        assert!(matches!(
            Fbm2::new(seed, 3, 1.0, 1.0, 0.0, 2.0),
            Err(GenError::InvalidGain { .. })
        ));
        assert!(matches!(
            Fbm2::new(seed, 3, 1.0, 1.0, 1.0, 2.0),
            Err(GenError::InvalidGain { .. })
        ));
        assert!(matches!(
            Fbm2::new(seed, 3, 1.0, 1.0, 0.5, 1.0),
            Err(GenError::InvalidLacunarity { .. })
        ));
        assert!(matches!(
            Fbm3::new(Vec3::ZERO, 3, 1.0, 1.0, 0.5, 0.25),
            Err(GenError::InvalidLacunarity { .. })
        ));
    }

    #[test]
    fn three_dimensional_sampler_is_deterministic() {
        let a = Fbm3::new(Vec3::new(1.0, 2.0, 3.0), 3, 1.0, 1.0 / 64.0, 0.5, 2.0).unwrap();
        let b = Fbm3::new(Vec3::new(1.0, 2.0, 3.0), 3, 1.0, 1.0 / 64.0, 0.5, 2.0).unwrap();
        for i in 0..60 {
            let p = Vec3::new(i as f32, i as f32 * 2.0, i as f32 * -3.0);
            assert_eq!(a.sample(p).to_bits(), b.sample(p).to_bits());
        }
    }
}
