use crate::library::*;

/// Regular mesh of field samples, stored row-major.
///
/// Cell `(col, row)` sits at world position `(col * spacing, row * spacing)`
/// and lives at linear index `row * width + col`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldGrid {
    width: usize,
    height: usize,
    spacing: f32,
    samples: Vec<Vec2>,
}

impl FieldGrid {
    pub fn new(width: usize, height: usize, spacing: f32) -> FieldGrid {
        FieldGrid {
            width,
            height,
            spacing,
            samples: vec![ZERO; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Linear index of a cell, `None` outside the mesh.
    pub fn index(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(row * self.width + col)
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Vec2> {
        self.index(col, row).map(|idx| &self.samples[idx])
    }

    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Vec2> {
        self.index(col, row).map(move |idx| &mut self.samples[idx])
    }

    pub fn position(&self, col: usize, row: usize) -> Vec2 {
        [col as f32 * self.spacing, row as f32 * self.spacing]
    }

    pub fn clear(&mut self) {
        self.samples.fill(ZERO);
    }

    pub fn samples(&self) -> &[Vec2] {
        &self.samples
    }

    /// Every cell as `(col, row, sample)`, rows outermost.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Vec2)> + '_ {
        let width = self.width;
        self.samples
            .iter()
            .enumerate()
            .map(move |(idx, sample)| (idx % width, idx / width, *sample))
    }

    /// Every cell as `(world position, &mut sample)`, rows outermost.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = (Vec2, &mut Vec2)> + '_ {
        let width = self.width;
        let spacing = self.spacing;
        self.samples.iter_mut().enumerate().map(move |(idx, sample)| {
            let (col, row) = (idx % width, idx / width);
            ([col as f32 * spacing, row as f32 * spacing], sample)
        })
    }
}
