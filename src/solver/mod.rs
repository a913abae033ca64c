mod boundary;
mod core;
pub mod diagnostics;
mod params;

// Re-export public API
pub use self::boundary::{set_bnd, FieldType};
pub use self::core::{advect, diffuse, diffusion_coefficient, lin_solve, project};
pub use self::params::{SolverParams, ITER};

use crate::state::FluidField;

/// Full fluid simulation step.
///
/// Velocity: diffuse into (vx0, vy0), project, self-advect back into (vx, vy),
/// project again. Density: diffuse into `s`, advect back into `density`
/// along the projected velocity.
pub fn fluid_step(field: &mut FluidField) {
    let SolverParams { dt, diff, visc, iter } = *field.params();

    // Diffuse velocity
    diffuse(FieldType::Vx, &mut field.vx0, &field.vx, visc, dt, iter);
    diffuse(FieldType::Vy, &mut field.vy0, &field.vy, visc, dt, iter);

    // Project to make diffused velocity divergence-free; (vx, vy) are scratch here
    project(&mut field.vx0, &mut field.vy0, &mut field.vx, &mut field.vy, iter);

    // Advect velocity along itself
    advect(FieldType::Vx, &mut field.vx, &field.vx0, &field.vx0, &field.vy0, dt);
    advect(FieldType::Vy, &mut field.vy, &field.vy0, &field.vx0, &field.vy0, dt);

    // Project again; (vx0, vy0) are scratch now
    project(&mut field.vx, &mut field.vy, &mut field.vx0, &mut field.vy0, iter);

    // Diffuse + advect density
    diffuse(FieldType::Scalar, &mut field.s, &field.density, diff, dt, iter);
    advect(FieldType::Scalar, &mut field.density, &field.s, &field.vx, &field.vy, dt);

    log::trace!("fluid_step n={} dt={}", field.size(), dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::diagnostics::{all_finite, max_abs, total_density};

    #[test]
    fn test_zero_field_stays_zero() {
        let mut f = FluidField::new(16, 0.001, 0.001, 0.2).unwrap();
        for _ in 0..50 {
            f.step();
        }
        assert!(f.density().iter().all(|&v| v == 0.0));
        assert!(f.velocity_x().iter().all(|&v| v == 0.0));
        assert!(f.velocity_y().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_no_diffusion_no_flow_is_identity_on_density() {
        let mut f = FluidField::new(16, 0.0, 0.0, 0.2).unwrap();
        f.add_density(8, 8, 100.0).unwrap();
        f.step();
        assert_eq!(f.density()[(8, 8)], 100.0);
        assert_eq!(f.density()[(7, 8)], 0.0);
    }

    #[test]
    fn test_single_source_spreads() {
        let mut f = FluidField::new(16, 0.0001, 0.0, 0.2).unwrap();
        f.add_density(8, 8, 100.0).unwrap();
        f.step();

        let d = f.density();
        assert!(d[(8, 8)] < 100.0, "source cell should lose mass, got {}", d[(8, 8)]);
        let neighbors = d[(7, 8)] + d[(9, 8)] + d[(8, 7)] + d[(8, 9)];
        assert!(neighbors > 0.0, "neighbours should gain mass, got {}", neighbors);
        for (i, &v) in d.iter().enumerate() {
            assert!(v >= -1e-6, "density went negative at {:?}: {}", d.coords(i), v);
        }
    }

    #[test]
    fn test_velocity_carries_density() {
        let mut f = FluidField::new(32, 0.0, 0.0, 0.2).unwrap();
        for j in 12..20 {
            for i in 8..12 {
                f.add_density(i, j, 10.0).unwrap();
            }
        }
        for j in 4..28 {
            for i in 4..28 {
                f.add_velocity(i, j, 0.05, 0.0).unwrap();
            }
        }
        f.step();

        // Mass should have moved right of the original block.
        let d = f.density();
        let right: f32 = (12..20).map(|j| d[(12, j)] + d[(13, j)]).sum();
        assert!(right > 0.0, "expected density downstream, got {}", right);
    }

    #[test]
    fn test_step_keeps_density_non_negative_with_flow() {
        let mut f = FluidField::new(24, 0.0, 0.0, 0.2).unwrap();
        f.add_density(12, 12, 200.0).unwrap();
        f.add_velocity(12, 12, 1.0, -0.5).unwrap();
        f.add_velocity(11, 12, -0.3, 0.8).unwrap();
        for _ in 0..20 {
            f.step();
        }
        let min = f.density().iter().fold(f32::INFINITY, |m, &v| m.min(v));
        assert!(min >= -1e-4, "density should stay non-negative, min={}", min);
    }

    #[test]
    fn test_long_run_stays_bounded() {
        let mut f = FluidField::new(32, 0.0, 0.0, 0.2).unwrap();
        for step in 0..1000 {
            f.add_density(10, 16, 10.0).unwrap();
            f.add_velocity(10, 16, 0.1, 0.0).unwrap();
            f.add_density(22, 16, 10.0).unwrap();
            f.add_velocity(22, 16, -0.1, 0.0).unwrap();
            if step % 7 == 0 {
                f.add_velocity(16, 8, 0.0, 0.2).unwrap();
            }
            f.step();
        }
        for (name, g) in [
            ("density", f.density()),
            ("vx", f.velocity_x()),
            ("vy", f.velocity_y()),
        ] {
            assert!(all_finite(g), "{} went non-finite", name);
            assert!(max_abs(g) < 1.0e6, "{} blew up: max |v| = {}", name, max_abs(g));
        }
        assert!(total_density(f.density()) > 0.0);
    }

    #[test]
    fn test_step_leaves_velocity_boundaries_reflected() {
        let mut f = FluidField::new(16, 0.0, 0.0, 0.2).unwrap();
        f.add_velocity(3, 5, 0.5, 0.5).unwrap();
        f.step();
        let n = f.size();
        let (vx, vy) = (f.velocity_x(), f.velocity_y());
        for j in 1..(n - 1) {
            assert_eq!(vx[(0, j)], -vx[(1, j)]);
            assert_eq!(vx[(n - 1, j)], -vx[(n - 2, j)]);
        }
        for i in 1..(n - 1) {
            assert_eq!(vy[(i, 0)], -vy[(i, 1)]);
            assert_eq!(vy[(i, n - 1)], -vy[(i, n - 2)]);
        }
    }
}
