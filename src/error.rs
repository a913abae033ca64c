use thiserror::Error;

/// Errors reported by field construction and checked cell access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FluidError {
    #[error("grid size {size} is too small (need at least 3 to have an interior)")]
    InvalidSize { size: usize },

    #[error("out of memory allocating a grid of {cells} cells")]
    OutOfMemory { cells: usize },

    #[error("cell ({x}, {y}) is outside the {size}x{size} grid")]
    InvalidIndex { x: usize, y: usize, size: usize },

    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("unknown boundary kind {0} (expected 0, 1 or 2)")]
    InvalidBoundaryKind(u8),
}
