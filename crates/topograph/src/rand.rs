//! Random star-shaped polygons (radial jitter + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler of simple, generally non-convex
//!   polygons for property tests, benchmarks and the CLI.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, and connect the vertices in angle order. Angular jitter
//!   stays below half the spacing, so the angles stay strictly increasing and
//!   the ring is simple (star-shaped about `center`).
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::geom::{Coordinate, Geometry, LinearRing, Polygon};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Star polygon sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`; clamped to [0, 0.95].
    pub radial_jitter: f64,
    pub radius: f64,
    pub center: (f64, f64),
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.4,
            radius: 1.0,
            center: (0.0, 0.0),
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Vertices of a random star polygon in counter-clockwise order (ring not closed).
pub fn star_vertices(cfg: StarCfg, tok: ReplayToken) -> Vec<Coordinate> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.radius.max(1e-9);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * 2.0 * std::f64::consts::PI
    } else {
        0.0
    };
    (0..n)
        .map(|k| {
            let th = phase + (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            Coordinate::new(cfg.center.0 + th.cos() * r, cfg.center.1 + th.sin() * r)
        })
        .collect()
}

/// Draw a random simple star-shaped polygon.
pub fn draw_star_polygon(cfg: StarCfg, tok: ReplayToken) -> Result<Geometry> {
    let mut ring = star_vertices(cfg, tok);
    ring.push(ring[0]);
    Ok(Geometry::Polygon(Polygon::new(LinearRing::new(ring)?, Vec::new())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::is_ccw;

    #[test]
    fn reproducible_draw() {
        let cfg = StarCfg {
            vertex_count: VertexCount::Uniform { min: 5, max: 20 },
            ..StarCfg::default()
        };
        let tok = ReplayToken { seed: 42, index: 7 };
        let p1 = draw_star_polygon(cfg, tok).unwrap();
        let p2 = draw_star_polygon(cfg, tok).unwrap();
        assert_eq!(p1, p2);
        let p3 = draw_star_polygon(cfg, ReplayToken { seed: 42, index: 8 }).unwrap();
        assert_ne!(p1, p3);
    }

    #[test]
    fn star_polygon_is_ccw_and_bounded() {
        let cfg = StarCfg {
            vertex_count: VertexCount::Fixed(16),
            radius: 2.0,
            center: (10.0, -3.0),
            ..StarCfg::default()
        };
        let g = draw_star_polygon(cfg, ReplayToken { seed: 3, index: 0 }).unwrap();
        let coords = g.coordinates();
        assert_eq!(coords.len(), 17);
        assert!(is_ccw(&coords));
        for c in &coords {
            let r = ((c.x - 10.0).powi(2) + (c.y + 3.0).powi(2)).sqrt();
            assert!(r > 2.0 * 0.6 - 1e-12 && r < 2.0 * 1.4 + 1e-12);
        }
        assert!(g.area() > 0.0);
    }
}
