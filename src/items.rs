use crate::library::*;
use crate::params::Singularity;

/// A moving charge of the particle-particle model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub force: Vec2,
    pub charge: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Option<Vec2>, charge: f32) -> Particle {
        Particle {
            position,
            velocity: velocity.unwrap_or(ZERO),
            force: ZERO,
            charge,
        }
    }

    /// Drift with the current velocity.
    pub fn move_particle(&mut self, dt: f32) {
        accumulate(&mut self.position, scale(self.velocity, dt));
    }

    /// Kick the velocity with the accumulated force.
    pub fn apply_force(&mut self, inverse_mass: f32, dt: f32) {
        accumulate(&mut self.velocity, scale(self.force, inverse_mass * dt));
    }
}

/// A static point charge of the particle-mesh model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Source {
    pub position: Vec2,
    pub charge: f32,
}

impl Source {
    pub fn new(position: Vec2, charge: f32) -> Source {
        Source { position, charge }
    }

    /// Field of this charge at `point`, `ke * q / |r|^2` along `r = point - position`.
    /// Zero when `singularity` rejects the coefficient.
    pub fn field_at(&self, point: Vec2, coulomb: f32, singularity: Singularity) -> Vec2 {
        let r = sub(point, self.position);
        let c = coulomb * self.charge / get_magnitude_squared(r);
        if singularity.skips(c) {
            return ZERO;
        }
        scale(normalize(r), c)
    }
}
