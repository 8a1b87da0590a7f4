//! Particle-mesh model: static point charges sampled onto a regular grid.

use anyhow::ensure;
use log::{debug, trace};

use crate::grid::FieldGrid;
use crate::items::Source;
use crate::library::*;
use crate::params::{Constants, Singularity};

pub struct ParticleMesh {
    time: f32,
    capacity: usize,
    sources: Vec<Source>,
    field: FieldGrid,
    constants: Constants,
    singularity: Singularity,
}

impl ParticleMesh {
    /// Empty engine with a zeroed `width x height` field, cells `spacing` apart.
    pub fn new(width: usize, height: usize, spacing: f32, capacity: usize) -> anyhow::Result<ParticleMesh> {
        ensure!(width > 0 && height > 0, "field must be at least 1x1, got {}x{}", width, height);
        ensure!(spacing.is_finite() && spacing > 0.0, "grid spacing must be positive, got {}", spacing);
        ensure!(capacity > 0, "particle capacity must be positive");
        let cells = width.checked_mul(height);
        ensure!(
            cells.and_then(|n| n.checked_mul(size_of::<Vec2>())).is_some_and(|bytes| bytes <= isize::MAX as usize),
            "field of {}x{} cells is too large to allocate",
            width,
            height
        );
        Ok(ParticleMesh {
            time: 0.0,
            capacity,
            sources: Vec::with_capacity(capacity),
            field: FieldGrid::new(width, height, spacing),
            constants: Constants::default(),
            singularity: Singularity::default(),
        })
    }

    pub fn with_constants(mut self, constants: Constants) -> ParticleMesh {
        self.constants = constants;
        self
    }

    pub fn with_singularity(mut self, singularity: Singularity) -> ParticleMesh {
        self.singularity = singularity;
        self
    }

    /// Sum of the `dt` passed to [`step`](Self::step); not cleared by [`reset`](Self::reset).
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn count(&self) -> usize {
        self.sources.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.sources.len() >= self.capacity
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn field(&self) -> &FieldGrid {
        &self.field
    }

    pub fn field_at(&self, col: usize, row: usize) -> Option<Vec2> {
        self.field.get(col, row).copied()
    }

    pub fn position_of(&self, col: usize, row: usize) -> Vec2 {
        self.field.position(col, row)
    }

    /// Appends a charge. A full engine drops the request and returns `false`.
    pub fn add(&mut self, position: Vec2, charge: f32) -> bool {
        if self.is_full() {
            debug!("pm engine full ({}), dropping charge at {:?}", self.capacity, position);
            return false;
        }
        self.sources.push(Source::new(position, charge));
        true
    }

    pub fn reset(&mut self) {
        debug!("pm reset, dropping {} charges", self.sources.len());
        self.field.clear();
        self.sources.clear();
    }

    /// Recomputes every sample from scratch. The charges never move, so `dt`
    /// only advances the clock.
    pub fn step(&mut self, dt: f32) {
        let ke = self.constants.coulomb;
        let singularity = self.singularity;
        let sources = &self.sources;

        for (point, sample) in self.field.cells_mut() {
            *sample = ZERO;
            for source in sources {
                accumulate(sample, source.field_at(point, ke, singularity));
            }
        }

        self.time += dt;
        trace!("pm step over {} cells, {} charges", self.field.len(), self.sources.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bad_construction_fails_fast() {
        assert!(ParticleMesh::new(0, 4, 1.0, 1).is_err());
        assert!(ParticleMesh::new(4, 0, 1.0, 1).is_err());
        assert!(ParticleMesh::new(4, 4, 0.0, 1).is_err());
        assert!(ParticleMesh::new(4, 4, -1.0, 1).is_err());
        assert!(ParticleMesh::new(4, 4, f32::NAN, 1).is_err());
        assert!(ParticleMesh::new(4, 4, 1.0, 0).is_err());
        assert!(ParticleMesh::new(usize::MAX, 2, 1.0, 1).is_err());
        assert!(ParticleMesh::new(usize::MAX, usize::MAX, 1.0, 1).is_err());
        assert!(ParticleMesh::new(usize::MAX / 2, 1, 1.0, 1).is_err());
    }

    #[test]
    fn skip_drops_overflowing_near_coincident_charge() {
        let mut pm = ParticleMesh::new(2, 2, 1.0, 1)
            .unwrap()
            .with_singularity(Singularity::Skip);
        pm.add([1e-20, 0.0], 1e-5);
        pm.step(0.0);
        assert_eq!(pm.field_at(0, 0), Some(ZERO));
        let far = pm.field_at(1, 1).unwrap();
        assert!(far[0] > 0.0 && far[1] > 0.0);

        let mut open = ParticleMesh::new(2, 2, 1.0, 1).unwrap();
        open.add([1e-20, 0.0], 1e-5);
        open.step(0.0);
        assert!(!open.field_at(0, 0).unwrap()[0].is_finite());
    }

    #[test]
    fn fresh_field_is_zero() {
        let pm = ParticleMesh::new(3, 2, 1.0, 4).unwrap();
        assert_eq!(pm.field().len(), 6);
        assert!(pm.field().samples().iter().all(|s| *s == ZERO));
    }

    #[test]
    fn step_without_charges_is_zero() {
        let mut pm = ParticleMesh::new(3, 3, 1.0, 4).unwrap();
        pm.step(0.1);
        assert!(pm.field().samples().iter().all(|s| *s == ZERO));
    }

    #[test]
    fn dt_only_moves_the_clock() {
        let mut a = ParticleMesh::new(4, 4, 2.0, 2).unwrap();
        let mut b = ParticleMesh::new(4, 4, 2.0, 2).unwrap();
        a.add([0.5, 0.5], 1e-5);
        b.add([0.5, 0.5], 1e-5);
        a.step(0.0);
        b.step(10.0);
        assert_eq!(a.field(), b.field());
        assert_eq!(b.time(), 10.0);
    }

    #[test]
    fn reset_keeps_time() {
        let mut pm = ParticleMesh::new(2, 2, 1.0, 2).unwrap();
        pm.add([0.5, 0.5], 1e-5);
        pm.step(0.5);
        pm.reset();
        assert_eq!(pm.time(), 0.5);
        assert_eq!(pm.count(), 0);
    }

    #[test]
    fn removed_charge_leaves_no_trace() {
        let mut pm = ParticleMesh::new(4, 4, 1.0, 2).unwrap();
        pm.add([0.5, 0.5], 1e-5);
        pm.step(0.0);
        pm.reset();
        pm.add([2.5, 2.5], -1e-5);
        pm.step(0.0);

        let mut fresh = ParticleMesh::new(4, 4, 1.0, 2).unwrap();
        fresh.add([2.5, 2.5], -1e-5);
        fresh.step(0.0);
        assert_eq!(pm.field(), fresh.field());
    }

    #[test]
    fn field_is_inverse_square() {
        let mut pm = ParticleMesh::new(5, 1, 1.0, 1).unwrap();
        pm.add([0.0, 0.0], 1e-5);
        pm.step(0.0);
        let near = get_magnitude(pm.field_at(1, 0).unwrap());
        let far = get_magnitude(pm.field_at(2, 0).unwrap());
        assert_relative_eq!(near / far, 4.0, max_relative = 1e-5);
    }
}
