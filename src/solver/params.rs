use crate::error::FluidError;
use super::core;

/// Gauss-Seidel sweeps per linear solve.
pub const ITER: usize = 4;

/// Solver parameters for the fluid simulation. Fixed for the lifetime of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverParams {
    pub dt: f32,
    /// Diffusion rate of the density scalar.
    pub diff: f32,
    /// Kinematic viscosity of the velocity field.
    pub visc: f32,
    /// Relaxation sweeps used by diffusion and projection.
    pub iter: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            dt: 0.2,
            diff: 0.0,
            visc: 0.0,
            iter: ITER,
        }
    }
}

impl SolverParams {
    pub fn new(diff: f32, visc: f32, dt: f32) -> Self {
        Self {
            dt,
            diff,
            visc,
            iter: ITER,
        }
    }

    /// Reject values that would break diagonal dominance of the diffusion
    /// system (`c = 1 + 4a` needs `a >= 0`) or poison the buffers with NaN.
    ///
    /// Large but valid values are accepted unchanged; see
    /// [`SolverParams::diffusion_coefficient`].
    pub fn validate(&self) -> Result<(), FluidError> {
        for (name, value) in [("dt", self.dt), ("diffusion", self.diff), ("viscosity", self.visc)] {
            if !value.is_finite() || value < 0.0 {
                return Err(FluidError::InvalidParameter {
                    name,
                    value: value as f64,
                });
            }
        }
        if self.iter == 0 {
            return Err(FluidError::InvalidParameter {
                name: "iter",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Off-diagonal weight `a = dt * rate * (N-2)^2` of the implicit diffusion
    /// solve on an N x N grid. Keeping it moderate keeps the few-sweep solve
    /// visually close to the converged answer.
    pub fn diffusion_coefficient(&self, rate: f32, n: usize) -> f32 {
        core::diffusion_coefficient(self.dt, rate, n)
    }
}
