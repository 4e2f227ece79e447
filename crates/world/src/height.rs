//! Terrain height sources.
//!
//! Height maps sample a [`HeightFunction`] at chunk-scaled offsets
//! `(origin + local) / extent - 0.5`, so one unit of input spans one chunk.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Pure 2D terrain height function.
///
/// Must be deterministic: the same offsets always give the same height. It is
/// shared with generation workers, hence `Send + Sync`.
pub trait HeightFunction: Send + Sync {
    /// Surface height for the column at the given chunk-scaled offsets.
    fn height_at(&self, offset_x: f64, offset_z: f64) -> i32;
}

impl<F> HeightFunction for F
where
    F: Fn(f64, f64) -> i32 + Send + Sync,
{
    fn height_at(&self, offset_x: f64, offset_z: f64) -> i32 {
        self(offset_x, offset_z)
    }
}

/// Same height everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatHeight(pub i32);

impl HeightFunction for FlatHeight {
    fn height_at(&self, _offset_x: f64, _offset_z: f64) -> i32 {
        self.0
    }
}

/// Configuration for multi-octave noise terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Seed for deterministic generation
    pub seed: u32,
    /// Number of octaves (layers of detail)
    pub octaves: u32,
    /// Base frequency, in cycles per chunk
    pub frequency: f64,
    /// Amplitude multiplier between octaves
    pub persistence: f64,
    /// Frequency multiplier between octaves
    pub lacunarity: f64,
    /// Height at noise value zero
    pub base: i32,
    /// Height swing for noise values of +-1
    pub amplitude: f64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 3,
            frequency: 0.35,
            persistence: 0.5,
            lacunarity: 2.0,
            base: 8,
            amplitude: 6.0,
        }
    }
}

/// Perlin terrain: `base + round(noise * amplitude)`.
pub struct NoiseHeight {
    perlin: Perlin,
    settings: NoiseSettings,
}

impl NoiseHeight {
    /// Create a generator from settings.
    pub fn new(settings: NoiseSettings) -> Self {
        Self {
            perlin: Perlin::new(settings.seed),
            settings,
        }
    }

    /// Settings in use.
    pub fn settings(&self) -> &NoiseSettings {
        &self.settings
    }

    /// Multi-octave sample normalized to [-1.0, 1.0].
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.settings.frequency;
        let mut max_value = 0.0;

        for _ in 0..self.settings.octaves.max(1) {
            value += self.perlin.get([x * frequency, z * frequency]) * amplitude;
            max_value += amplitude;

            amplitude *= self.settings.persistence;
            frequency *= self.settings.lacunarity;
        }

        value / max_value
    }
}

impl HeightFunction for NoiseHeight {
    fn height_at(&self, offset_x: f64, offset_z: f64) -> i32 {
        let noise = self.sample(offset_x, offset_z);
        self.settings.base + (noise * self.settings.amplitude).round() as i32
    }
}
