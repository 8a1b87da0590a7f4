//! Electrostatics of charged point particles in 2D.
//!
//! Two independent engines share the vector helpers in [`library`]:
//! [`ParticleParticle`] sums Coulomb forces over every pair and integrates
//! motion, [`ParticleMesh`] samples the superposed field of static charges on
//! a regular grid.

pub mod config;
pub mod grid;
pub mod items;
pub mod params;
pub mod pm;
pub mod pp;

pub use grid::FieldGrid;
pub use items::{Particle, Source};
pub use params::{Constants, Singularity};
pub use pm::ParticleMesh;
pub use pp::ParticleParticle;

pub mod library {
    pub type Vec2 = [f32; 2];

    pub const ZERO: Vec2 = [0.0, 0.0];

    pub fn add(a: Vec2, b: Vec2) -> Vec2 {
        [a[0] + b[0], a[1] + b[1]]
    }

    pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
        [a[0] - b[0], a[1] - b[1]]
    }

    pub fn scale(vec: Vec2, k: f32) -> Vec2 {
        [vec[0] * k, vec[1] * k]
    }

    /// In-place `target += delta`, the accumulator used for force and field sums.
    pub fn accumulate(target: &mut Vec2, delta: Vec2) {
        target[0] += delta[0];
        target[1] += delta[1];
    }

    pub fn dot(vec1: Vec2, vec2: Vec2) -> f32 {
        vec1[0] * vec2[0] + vec1[1] * vec2[1]
    }

    pub fn get_magnitude_squared(vec: Vec2) -> f32 {
        vec[0] * vec[0] + vec[1] * vec[1]
    }

    pub fn get_magnitude(vec: Vec2) -> f32 {
        get_magnitude_squared(vec).sqrt()
    }

    /// Unit vector along `vec`. The zero vector normalizes to itself.
    pub fn normalize(vec: Vec2) -> Vec2 {
        let mag = get_magnitude(vec);
        if mag == 0.0 {
            return ZERO;
        }
        [vec[0] / mag, vec[1] / mag]
    }

}
