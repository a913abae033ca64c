use crate::error::FluidError;
use crate::grid::Grid;

/// Field type for boundary condition dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Density and pressure: copy the interior neighbour.
    Scalar,
    /// Horizontal velocity: negated on the left/right walls.
    Vx,
    /// Vertical velocity: negated on the top/bottom walls.
    Vy,
}

impl FieldType {
    /// Numeric boundary kind: 0 = scalar, 1 = horizontal, 2 = vertical velocity.
    pub fn tag(self) -> u8 {
        match self {
            FieldType::Scalar => 0,
            FieldType::Vx => 1,
            FieldType::Vy => 2,
        }
    }
}

impl TryFrom<u8> for FieldType {
    type Error = FluidError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(FieldType::Scalar),
            1 => Ok(FieldType::Vx),
            2 => Ok(FieldType::Vy),
            other => Err(FluidError::InvalidBoundaryKind(other)),
        }
    }
}

/// Rewrite the outer ring of `x` from its interior neighbours.
///   - top/bottom rows copy row 1 / row N-2, negated for `FieldType::Vy`
///   - left/right columns copy column 1 / column N-2, negated for `FieldType::Vx`
///   - corners average their two adjacent edge cells
pub fn set_bnd(field_type: FieldType, x: &mut Grid) {
    let n = x.n();
    let flip_y = field_type == FieldType::Vy;
    let flip_x = field_type == FieldType::Vx;

    for i in 1..(n - 1) {
        let top = x[(i, 1)];
        let bottom = x[(i, n - 2)];
        x[(i, 0)] = if flip_y { -top } else { top };
        x[(i, n - 1)] = if flip_y { -bottom } else { bottom };
    }
    for j in 1..(n - 1) {
        let left = x[(1, j)];
        let right = x[(n - 2, j)];
        x[(0, j)] = if flip_x { -left } else { left };
        x[(n - 1, j)] = if flip_x { -right } else { right };
    }

    x[(0, 0)] = 0.5 * (x[(1, 0)] + x[(0, 1)]);
    x[(0, n - 1)] = 0.5 * (x[(1, n - 1)] + x[(0, n - 2)]);
    x[(n - 1, 0)] = 0.5 * (x[(n - 2, 0)] + x[(n - 1, 1)]);
    x[(n - 1, n - 1)] = 0.5 * (x[(n - 2, n - 1)] + x[(n - 1, n - 2)]);
}
