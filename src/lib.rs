//! Real-time 2D "stable fluids" solver on a fixed N x N grid.
//!
//! A [`FluidField`] owns density and velocity buffers. Callers inject sources
//! with [`FluidField::add_density`] / [`FluidField::add_velocity`], advance with
//! [`FluidField::step`] once per frame, and read back [`FluidField::density`]
//! and the velocity grids for display.
//!
//! Stability: every stage is unconditionally stable for non-negative
//! `dt`, diffusion and viscosity (enforced at construction). Very large values
//! of `dt * rate * (N-2)^2` stay finite but smear the field heavily, since the
//! relaxation uses only a few sweeps.

pub mod config;
pub mod error;
pub mod grid;
pub mod solver;
pub mod source;
pub mod state;

pub use error::FluidError;
pub use grid::{ix, Grid};
pub use solver::{FieldType, SolverParams};
pub use state::FluidField;
