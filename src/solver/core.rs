use crate::grid::{ix, Grid};
use super::boundary::{set_bnd, FieldType};

// Interior loops index raw slices with `ix`; every grid passed to one call
// shares the same `n`, so offsets stay in bounds for 1 <= i, j <= n-2.

/// Off-diagonal weight `a = dt * rate * (N-2)^2` of the implicit diffusion
/// solve on an N x N grid.
pub fn diffusion_coefficient(dt: f32, rate: f32, n: usize) -> f32 {
    let inner = (n - 2) as f32;
    dt * rate * inner * inner
}

/// Gauss-Seidel iterative linear solver.
/// Solves: x[i,j] = (x0[i,j] + a * (neighbors)) / c
///
/// Sweeps run row-major and read already-updated neighbours, so the result
/// depends on visiting order. Needs `c != 0`; converges only when `c >= 4a`.
pub fn lin_solve(field_type: FieldType, x: &mut Grid, x0: &Grid, a: f32, c: f32, iter: usize) {
    assert_eq!(x.n(), x0.n(), "lin_solve grids differ in size");
    debug_assert!(c != 0.0, "lin_solve requires c != 0");
    let n = x.n();
    let c_inv = 1.0 / c;
    for _ in 0..iter {
        let xs = x.as_mut_slice();
        let x0s = x0.as_slice();
        for j in 1..(n - 1) {
            for i in 1..(n - 1) {
                let neighbors = xs[ix(i + 1, j, n)]
                    + xs[ix(i - 1, j, n)]
                    + xs[ix(i, j + 1, n)]
                    + xs[ix(i, j - 1, n)];
                xs[ix(i, j, n)] = (x0s[ix(i, j, n)] + a * neighbors) * c_inv;
            }
        }
        set_bnd(field_type, x);
    }
}

/// Diffusion step: spreads the field over time.
/// a = dt * diff * (N-2)^2, c = 1 + 4a
pub fn diffuse(field_type: FieldType, x: &mut Grid, x0: &Grid, diff: f32, dt: f32, iter: usize) {
    let a = diffusion_coefficient(dt, diff, x.n());
    lin_solve(field_type, x, x0, a, 1.0 + 4.0 * a, iter);
}

/// Semi-Lagrangian advection: traces each cell backwards through the velocity
/// field and bilinearly samples `d0` where it came from.
pub fn advect(field_type: FieldType, d: &mut Grid, d0: &Grid, vx: &Grid, vy: &Grid, dt: f32) {
    let n = d.n();
    assert!(
        d0.n() == n && vx.n() == n && vy.n() == n,
        "advect grids differ in size"
    );
    let dt0 = dt * (n - 2) as f32;
    // Keeps floor(x) + 1 inside the buffer.
    let hi = n as f32 - 1.5;

    let ds = d.as_mut_slice();
    let (d0s, us, vs) = (d0.as_slice(), vx.as_slice(), vy.as_slice());
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            let ii = ix(i, j, n);
            let x = (i as f32 - dt0 * us[ii]).clamp(0.5, hi);
            let y = (j as f32 - dt0 * vs[ii]).clamp(0.5, hi);

            let i0 = x.floor() as usize;
            let i1 = i0 + 1;
            let j0 = y.floor() as usize;
            let j1 = j0 + 1;

            let s1 = x - i0 as f32;
            let s0 = 1.0 - s1;
            let t1 = y - j0 as f32;
            let t0 = 1.0 - t1;

            ds[ii] = s0 * (t0 * d0s[ix(i0, j0, n)] + t1 * d0s[ix(i0, j1, n)])
                + s1 * (t0 * d0s[ix(i1, j0, n)] + t1 * d0s[ix(i1, j1, n)]);
        }
    }
    set_bnd(field_type, d);
}

/// Pressure projection: enforces incompressibility (divergence-free velocity field).
/// `p` and `div` are scratch; their previous contents are discarded.
pub fn project(vx: &mut Grid, vy: &mut Grid, p: &mut Grid, div: &mut Grid, iter: usize) {
    let n = vx.n();
    assert!(
        vy.n() == n && p.n() == n && div.n() == n,
        "project grids differ in size"
    );
    let n_f = n as f32;

    // Calculate divergence
    {
        let (us, vs) = (vx.as_slice(), vy.as_slice());
        let (ps, divs) = (p.as_mut_slice(), div.as_mut_slice());
        for j in 1..(n - 1) {
            for i in 1..(n - 1) {
                let ii = ix(i, j, n);
                divs[ii] = -0.5
                    * (us[ix(i + 1, j, n)] - us[ix(i - 1, j, n)] + vs[ix(i, j + 1, n)]
                        - vs[ix(i, j - 1, n)])
                    / n_f;
                ps[ii] = 0.0;
            }
        }
    }
    set_bnd(FieldType::Scalar, div);
    set_bnd(FieldType::Scalar, p);

    // Solve for pressure
    lin_solve(FieldType::Scalar, p, div, 1.0, 4.0, iter);

    // Subtract pressure gradient from velocity
    {
        let ps = p.as_slice();
        let (us, vs) = (vx.as_mut_slice(), vy.as_mut_slice());
        for j in 1..(n - 1) {
            for i in 1..(n - 1) {
                let ii = ix(i, j, n);
                us[ii] -= 0.5 * (ps[ix(i + 1, j, n)] - ps[ix(i - 1, j, n)]) * n_f;
                vs[ii] -= 0.5 * (ps[ix(i, j + 1, n)] - ps[ix(i, j - 1, n)]) * n_f;
            }
        }
    }
    set_bnd(FieldType::Vx, vx);
    set_bnd(FieldType::Vy, vy);
}
