use serde::{Deserialize, Serialize};

use crate::geom::EPS;
use crate::geom::ray::Ray;

/// One arrival at the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirSample {
    /// Propagation delay (path length over speed).
    pub delay: f64,
    /// Amplitude from the inverse-distance model `k / length`.
    pub amplitude: f64,
    /// Number of reflections along the path.
    pub order: usize,
}

impl CirSample {
    /// Sample for a complete path. `None` for zero-length paths and non-positive speed.
    pub fn from_ray(ray: &Ray, speed: f64, amplitude_constant: f64) -> Option<Self> {
        let length = ray.length();
        if length < EPS || speed <= 0.0 {
            return None;
        }
        // Inverse-distance path loss
        Some(Self {
            delay: length / speed,
            amplitude: amplitude_constant / length,
            order: ray.order(),
        })
    }
}

/// Channel impulse response: arrivals sorted by delay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpulseResponse {
    samples: Vec<CirSample>,
}

impl ImpulseResponse {
    pub fn new(mut samples: Vec<CirSample>) -> Self {
        samples.sort_by(|a, b| a.delay.total_cmp(&b.delay));
        Self { samples }
    }

    /// Collects the arrivals of every receiver-bound ray whose front has
    /// traveled past its full length.
    pub fn from_rays(rays: &[Ray], head: f64, speed: f64, amplitude_constant: f64) -> Self {
        let samples = rays
            .iter()
            .filter(|ray| ray.arrives() && head > ray.length())
            .filter_map(|ray| CirSample::from_ray(ray, speed, amplitude_constant))
            .collect();
        Self::new(samples)
    }

    /// Arrivals of all receiver-bound rays, regardless of the animation clock.
    pub fn complete(rays: &[Ray], speed: f64, amplitude_constant: f64) -> Self {
        Self::from_rays(rays, f64::INFINITY, speed, amplitude_constant)
    }

    pub fn samples(&self) -> &[CirSample] {
        &self.samples
    }

    /// Number of arrivals.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_arrival(&self) -> Option<&CirSample> {
        self.samples.first()
    }

    /// Sum of squared amplitudes.
    pub fn total_energy(&self) -> f64 {
        self.samples.iter().map(|s| s.amplitude * s.amplitude).sum()
    }

    /// Sums amplitudes into delay bins of width `resolution` covering `[0, max_delay)`.
    ///
    /// Arrivals later than `max_delay` are dropped.
    pub fn histogram(&self, resolution: f64, max_delay: f64) -> Vec<f64> {
        if resolution <= 0.0 || max_delay <= 0.0 {
            return Vec::new();
        }
        let num_bins = (max_delay / resolution).ceil() as usize;
        let mut bins = vec![0.0; num_bins];
        for s in &self.samples {
            let bin = (s.delay / resolution) as usize;
            if bin < num_bins {
                bins[bin] += s.amplitude;
            }
        }
        bins
    }
}
