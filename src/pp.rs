//! Direct particle-particle model.
//!
//! Every step sums the Coulomb interaction of each unordered pair once
//! (Newton's third law gives the partner its negation) and then advances
//! the bodies with explicit Euler.
//!
//! The pair coefficient is `ke * q_i * q_j / |r|`, one power of distance
//! short of Coulomb's law, while the mesh model uses `1 / |r|^2`. Keep the
//! two laws independent; each engine is tested against its own.

use anyhow::ensure;
use log::{debug, trace};
use rand::Rng;

use crate::items::Particle;
use crate::library::*;
use crate::params::{Constants, Singularity};

pub struct ParticleParticle {
    time: f32,
    capacity: usize,
    particles: Vec<Particle>,
    constants: Constants,
    singularity: Singularity,
}

impl ParticleParticle {
    /// Empty engine holding at most `capacity` particles.
    pub fn new(capacity: usize) -> anyhow::Result<ParticleParticle> {
        ensure!(capacity > 0, "particle capacity must be positive");
        Ok(ParticleParticle {
            time: 0.0,
            capacity,
            particles: Vec::with_capacity(capacity),
            constants: Constants::default(),
            singularity: Singularity::default(),
        })
    }

    pub fn with_constants(mut self, constants: Constants) -> ParticleParticle {
        self.constants = constants;
        self
    }

    pub fn with_singularity(mut self, singularity: Singularity) -> ParticleParticle {
        self.singularity = singularity;
        self
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Live particles. Forces are only meaningful right after [`step`](Self::step).
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Appends a particle. A full engine drops the request and returns `false`.
    pub fn add(&mut self, position: Vec2, velocity: Vec2, charge: f32) -> bool {
        if self.is_full() {
            debug!("pp engine full ({}), dropping particle at {:?}", self.capacity, position);
            return false;
        }
        self.particles.push(Particle::new(position, Some(velocity), charge));
        true
    }

    pub fn reset(&mut self) {
        debug!("pp reset, dropping {} particles", self.particles.len());
        self.particles.clear();
        self.time = 0.0;
    }

    /// Replaces the population with `capacity` particles at rest, uniform over
    /// the `w x h` domain and carrying `+charge` or `-charge` with equal odds.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, domain: Vec2, charge: f32) {
        self.particles.clear();
        for _ in 0..self.capacity {
            let position = [
                rng.random::<f32>() * domain[0],
                rng.random::<f32>() * domain[1],
            ];
            let q = if rng.random_bool(0.5) { charge } else { -charge };
            self.particles.push(Particle::new(position, None, q));
        }
        debug!("pp randomized {} particles over {:?}", self.capacity, domain);
    }

    /// [`randomize`](Self::randomize) with the thread rng and the configured charge.
    pub fn randomize_default(&mut self, domain: Vec2) {
        let charge = self.constants.charge;
        self.randomize(&mut rand::rng(), domain, charge);
    }

    pub fn step(&mut self, dt: f32) {
        self.accumulate_forces();
        self.integrate(dt);
        self.time += dt;
        trace!("pp step dt={} t={} n={}", dt, self.time, self.particles.len());
    }

    /// Sum of all force accumulators; zero up to rounding for a closed system.
    pub fn net_force(&self) -> Vec2 {
        self.particles.iter().fold(ZERO, |net, p| add(net, p.force))
    }

    fn accumulate_forces(&mut self) {
        for p in self.particles.iter_mut() {
            p.force = ZERO;
        }

        let n = self.particles.len();
        let ke = self.constants.coulomb;
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.particles.split_at_mut(j);
                let (pi, pj) = (&mut head[i], &mut tail[0]);

                let dx = sub(pi.position, pj.position);
                let c = ke * (pi.charge * pj.charge) / get_magnitude(dx);
                if self.singularity.skips(c) {
                    continue;
                }
                let u = normalize(dx);
                accumulate(&mut pi.force, scale(u, c));
                accumulate(&mut pj.force, scale(u, -c));
            }
        }
    }

    // Position moves with the pre-step velocity.
    fn integrate(&mut self, dt: f32) {
        let inverse_mass = self.constants.inverse_mass();
        for p in self.particles.iter_mut() {
            p.move_particle(dt);
            p.apply_force(inverse_mass, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(ParticleParticle::new(0).is_err());
    }

    #[test]
    fn add_reports_drops() {
        let mut pp = ParticleParticle::new(1).unwrap();
        assert!(pp.add([0.0, 0.0], ZERO, 1.0));
        assert!(!pp.add([1.0, 0.0], ZERO, 1.0));
        assert_eq!(pp.count(), 1);
    }

    #[test]
    fn step_advances_time_and_reset_rewinds_it() {
        let mut pp = ParticleParticle::new(2).unwrap();
        pp.add([0.0, 0.0], ZERO, 1e-5);
        pp.step(0.25);
        pp.step(0.25);
        assert_eq!(pp.time(), 0.5);
        pp.reset();
        assert_eq!(pp.time(), 0.0);
        assert_eq!(pp.count(), 0);
    }

    #[test]
    fn force_scales_with_inverse_distance() {
        let force_at = |d: f32| {
            let mut pp = ParticleParticle::new(2).unwrap();
            pp.add([0.0, 0.0], ZERO, 1e-5);
            pp.add([d, 0.0], ZERO, 1e-5);
            pp.step(0.0);
            get_magnitude(pp.particles()[0].force)
        };
        let ratio = force_at(1.0) / force_at(2.0);
        assert!((ratio - 2.0).abs() < 1e-4, "expected 1/r scaling, got ratio {}", ratio);
    }

    #[test]
    fn opposite_charges_attract() {
        let mut pp = ParticleParticle::new(2).unwrap();
        pp.add([0.0, 0.0], ZERO, 1e-5);
        pp.add([0.0, 2.0], ZERO, -1e-5);
        pp.step(0.01);
        assert!(pp.particles()[0].velocity[1] > 0.0);
        assert!(pp.particles()[1].velocity[1] < 0.0);
    }

    #[test]
    fn randomize_fills_domain_at_rest() {
        let mut pp = ParticleParticle::new(64).unwrap();
        pp.add([-5.0, -5.0], [1.0, 1.0], 3.0);
        pp.randomize(&mut StdRng::seed_from_u64(7), [800.0, 600.0], 1e-5);
        assert_eq!(pp.count(), 64);
        for p in pp.particles() {
            assert!((0.0..=800.0).contains(&p.position[0]));
            assert!((0.0..=600.0).contains(&p.position[1]));
            assert_eq!(p.velocity, ZERO);
            assert!(p.charge == 1e-5 || p.charge == -1e-5);
        }
        assert!(pp.particles().iter().any(|p| p.charge > 0.0));
        assert!(pp.particles().iter().any(|p| p.charge < 0.0));
    }

    #[test]
    fn randomize_default_uses_configured_charge() {
        let constants = Constants { charge: 2.0, ..Constants::default() };
        let mut pp = ParticleParticle::new(8).unwrap().with_constants(constants);
        pp.randomize_default([10.0, 10.0]);
        assert!(pp.particles().iter().all(|p| p.charge.abs() == 2.0));
    }
}
