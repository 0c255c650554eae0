//! Ressources used by the sphere simulator.

use glam::DVec2;
use rand::Rng;
use serde::Serialize;
use std::ops::Range;
use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Simulation world size. Spheres are kept within `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorldSize {
    pub width: f64,
    pub height: f64,
}

impl WorldSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for WorldSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl From<PhysicalSize<u32>> for WorldSize {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width as f64, size.height as f64)
    }
}

impl From<PhysicalSize<f64>> for WorldSize {
    fn from(size: PhysicalSize<f64>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// A pointer location in world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorPosition(pub DVec2);

impl CursorPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }
}

impl From<PhysicalPosition<f64>> for CursorPosition {
    fn from(position: PhysicalPosition<f64>) -> Self {
        Self::new(position.x, position.y)
    }
}

impl From<DVec2> for CursorPosition {
    fn from(position: DVec2) -> Self {
        Self(position)
    }
}

/// How freshly spawned spheres are sampled.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnParams {
    /// Radius range. Mass is derived as `radius / 10`.
    pub radius: Range<f64>,
    /// Each velocity component is drawn from `[-max_speed, max_speed]`.
    pub max_speed: f64,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            radius: 20.0..50.0,
            max_speed: 1.0,
        }
    }
}

/// Rest length policy for generated connections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RestLength {
    /// Rest length equals the distance measured at generation time.
    Measured,
    /// Rest length is the measured distance scaled by a factor drawn from
    /// `[0, max_factor)`.
    RandomScale { max_factor: f64 },
}

impl Default for RestLength {
    fn default() -> Self {
        Self::RandomScale { max_factor: 2.0 }
    }
}

/// How connections are generated from the initial sphere layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionParams {
    /// Upper bound of neighbors per sphere. Each sphere picks between
    /// `1` and `max(max_neighbors, 1)` of its nearest neighbors.
    pub max_neighbors: usize,
    pub spring_constant: Range<f64>,
    pub damping_constant: Range<f64>,
    pub rest_length: RestLength,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            max_neighbors: 2,
            spring_constant: 0.0001..0.0011,
            damping_constant: 0.001..0.002,
            rest_length: RestLength::default(),
        }
    }
}

/// Below this distance a spring has no defined direction and contributes
/// no spring force.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinDistance(pub f64);

impl Default for MinDistance {
    fn default() -> Self {
        Self(1e-9)
    }
}

/// Draws uniformly from `range`, or returns its start if the range is empty.
pub(crate) fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f64>) -> f64 {
    if range.end > range.start {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}
