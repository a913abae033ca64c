use crate::grid::Grid;

/// Sum of a scalar field over interior cells.
pub fn total_density(density: &Grid) -> f64 {
    let n = density.n();
    let mut sum = 0.0;
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            sum += density[(i, j)] as f64;
        }
    }
    sum
}

/// Compute volume-averaged kinetic energy: KE = 0.5 * <vx² + vy²>.
pub fn kinetic_energy(vx: &Grid, vy: &Grid) -> f64 {
    let n = vx.n();
    let mut sum = 0.0;
    let mut count = 0usize;
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            let u = vx[(i, j)] as f64;
            let v = vy[(i, j)] as f64;
            sum += u * u + v * v;
            count += 1;
        }
    }
    if count > 0 { 0.5 * sum / count as f64 } else { 0.0 }
}

/// Summed absolute central-difference divergence over interior cells,
/// in grid units.
pub fn divergence_l1(vx: &Grid, vy: &Grid) -> f64 {
    let n = vx.n();
    let mut sum = 0.0;
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            let d = 0.5
                * ((vx[(i + 1, j)] - vx[(i - 1, j)]) + (vy[(i, j + 1)] - vy[(i, j - 1)]));
            sum += (d as f64).abs();
        }
    }
    sum
}

pub fn max_abs(field: &Grid) -> f32 {
    field.iter().map(|v| v.abs()).fold(0.0_f32, f32::max)
}

/// False once any cell has gone NaN or infinite.
pub fn all_finite(field: &Grid) -> bool {
    field.iter().all(|v| v.is_finite())
}
