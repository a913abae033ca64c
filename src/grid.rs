use std::ops::{Index, IndexMut};

use crate::error::FluidError;

/// Smallest grid that still has an interior cell.
pub const MIN_SIZE: usize = 3;

/// Convert 2D coordinates to the linear offset `x + y * n`.
#[inline(always)]
pub const fn ix(x: usize, y: usize, n: usize) -> usize {
    x + y * n
}

/// Square N x N buffer of cell values, addressed column-fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    n: usize,
    data: Vec<f32>,
}

impl Grid {
    /// Allocate a zero-filled grid. Fails instead of aborting when the
    /// allocator cannot satisfy the request.
    pub fn zeroed(n: usize) -> Result<Self, FluidError> {
        if n < MIN_SIZE {
            return Err(FluidError::InvalidSize { size: n });
        }
        let cells = n
            .checked_mul(n)
            .ok_or(FluidError::OutOfMemory { cells: usize::MAX })?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| FluidError::OutOfMemory { cells })?;
        data.resize(cells, 0.0);
        Ok(Self { n, data })
    }

    /// Side length N.
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.n && y < self.n
    }

    /// Linear offset of `(x, y)`. Panics when either coordinate is out of range.
    #[inline(always)]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "cell ({}, {}) outside {}x{} grid",
            x,
            y,
            self.n,
            self.n
        );
        ix(x, y, self.n)
    }

    /// Inverse of [`Grid::idx`].
    pub fn coords(&self, i: usize) -> (usize, usize) {
        assert!(i < self.data.len(), "offset {} outside grid of {} cells", i, self.data.len());
        (i % self.n, i / self.n)
    }

    /// Checked linear offset.
    pub fn checked_idx(&self, x: usize, y: usize) -> Result<usize, FluidError> {
        if self.contains(x, y) {
            Ok(ix(x, y, self.n))
        } else {
            Err(FluidError::InvalidIndex { x, y, size: self.n })
        }
    }

    pub fn try_get(&self, x: usize, y: usize) -> Result<f32, FluidError> {
        self.checked_idx(x, y).map(|i| self.data[i])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw cell storage for the solver's interior loops, addressed with [`ix`].
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.data.iter()
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = f32;

    #[inline(always)]
    fn index(&self, (x, y): (usize, usize)) -> &f32 {
        let i = self.idx(x, y);
        &self.data[i]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    #[inline(always)]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut f32 {
        let i = self.idx(x, y);
        &mut self.data[i]
    }
}
