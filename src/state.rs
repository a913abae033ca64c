use crate::error::FluidError;
use crate::grid::Grid;
use crate::solver::{self, SolverParams};

/// Complete simulation state: parameters plus the six N x N buffers.
///
/// `density`, `vx`, `vy` hold the current frame after [`FluidField::step`].
/// `s`, `vx0`, `vy0` are scratch for the pipeline and carry no meaning
/// between steps.
pub struct FluidField {
    params: SolverParams,
    pub(crate) s: Grid,
    pub(crate) density: Grid,
    pub(crate) vx: Grid,
    pub(crate) vy: Grid,
    pub(crate) vx0: Grid,
    pub(crate) vy0: Grid,
}

impl FluidField {
    /// Allocate a zeroed `size` x `size` field.
    pub fn new(size: usize, diffusion: f32, viscosity: f32, dt: f32) -> Result<Self, FluidError> {
        Self::with_params(size, SolverParams::new(diffusion, viscosity, dt))
    }

    pub fn with_params(size: usize, params: SolverParams) -> Result<Self, FluidError> {
        params.validate()?;
        let field = Self {
            params,
            s: Grid::zeroed(size)?,
            density: Grid::zeroed(size)?,
            vx: Grid::zeroed(size)?,
            vy: Grid::zeroed(size)?,
            vx0: Grid::zeroed(size)?,
            vy0: Grid::zeroed(size)?,
        };
        log::debug!(
            "created {}x{} field (dt={}, diff={}, visc={}, iter={})",
            size,
            size,
            params.dt,
            params.diff,
            params.visc,
            params.iter
        );
        Ok(field)
    }

    pub fn size(&self) -> usize {
        self.density.n()
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        solver::fluid_step(self);
    }

    /// Zero every buffer, keeping the parameters.
    pub fn reset(&mut self) {
        for g in [
            &mut self.s,
            &mut self.density,
            &mut self.vx,
            &mut self.vy,
            &mut self.vx0,
            &mut self.vy0,
        ] {
            g.fill(0.0);
        }
        log::debug!("field reset");
    }

    /// Add `amount` of density at cell (x, y).
    pub fn add_density(&mut self, x: usize, y: usize, amount: f32) -> Result<(), FluidError> {
        self.density.checked_idx(x, y)?;
        self.density[(x, y)] += amount;
        Ok(())
    }

    /// Add a velocity impulse at cell (x, y).
    pub fn add_velocity(
        &mut self,
        x: usize,
        y: usize,
        amount_x: f32,
        amount_y: f32,
    ) -> Result<(), FluidError> {
        self.vx.checked_idx(x, y)?;
        self.vx[(x, y)] += amount_x;
        self.vy[(x, y)] += amount_y;
        Ok(())
    }

    pub fn density(&self) -> &Grid {
        &self.density
    }

    pub fn velocity_x(&self) -> &Grid {
        &self.vx
    }

    pub fn velocity_y(&self) -> &Grid {
        &self.vy
    }

    pub fn density_at(&self, x: usize, y: usize) -> Result<f32, FluidError> {
        self.density.try_get(x, y)
    }

    pub fn velocity_at(&self, x: usize, y: usize) -> Result<(f32, f32), FluidError> {
        Ok((self.vx.try_get(x, y)?, self.vy.try_get(x, y)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let f = FluidField::new(16, 0.0, 0.0, 0.2).unwrap();
        assert_eq!(f.size(), 16);
        for g in [&f.s, &f.density, &f.vx, &f.vy, &f.vx0, &f.vy0] {
            assert_eq!(g.len(), 16 * 16);
            assert!(g.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_new_rejects_small_grid() {
        assert_eq!(
            FluidField::new(2, 0.0, 0.0, 0.2).err(),
            Some(FluidError::InvalidSize { size: 2 })
        );
    }

    #[test]
    fn test_new_rejects_bad_params() {
        assert!(matches!(
            FluidField::new(8, 0.0, -1.0, 0.2),
            Err(FluidError::InvalidParameter { name: "viscosity", .. })
        ));
    }

    #[test]
    fn test_new_out_of_memory() {
        assert!(matches!(
            FluidField::new(usize::MAX, 0.0, 0.0, 0.2),
            Err(FluidError::OutOfMemory { .. })
        ));
    }

    #[test]
    fn test_add_density_additive_and_local() {
        let mut f = FluidField::new(16, 0.0, 0.0, 0.2).unwrap();
        f.add_density(5, 5, 10.0).unwrap();
        f.add_density(5, 5, 10.0).unwrap();
        for (i, &v) in f.density().iter().enumerate() {
            let expected = if f.density().coords(i) == (5, 5) { 20.0 } else { 0.0 };
            assert_eq!(v, expected, "cell {:?}", f.density().coords(i));
        }
    }

    #[test]
    fn test_add_velocity_additive_and_local() {
        let mut f = FluidField::new(8, 0.0, 0.0, 0.2).unwrap();
        f.add_velocity(0, 7, 1.0, -2.0).unwrap();
        f.add_velocity(0, 7, 0.5, 0.5).unwrap();
        assert_eq!(f.velocity_at(0, 7), Ok((1.5, -1.5)));
        assert_eq!(f.velocity_x().iter().filter(|&&v| v != 0.0).count(), 1);
        assert_eq!(f.velocity_y().iter().filter(|&&v| v != 0.0).count(), 1);
        assert!(f.density().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_out_of_range_injection_rejected() {
        let mut f = FluidField::new(8, 0.0, 0.0, 0.2).unwrap();
        assert_eq!(
            f.add_density(8, 0, 1.0),
            Err(FluidError::InvalidIndex { x: 8, y: 0, size: 8 })
        );
        assert_eq!(
            f.add_velocity(3, 9, 1.0, 1.0),
            Err(FluidError::InvalidIndex { x: 3, y: 9, size: 8 })
        );
        assert!(f.density_at(0, 8).is_err());
        assert!(f.velocity_at(100, 0).is_err());
        assert!(f.density().iter().all(|&v| v == 0.0));
        assert!(f.velocity_x().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut f = FluidField::new(12, 0.0001, 0.0001, 0.2).unwrap();
        f.add_density(6, 6, 50.0).unwrap();
        f.add_velocity(6, 6, 1.0, 0.5).unwrap();
        f.step();
        f.reset();
        for g in [&f.s, &f.density, &f.vx, &f.vy, &f.vx0, &f.vy0] {
            assert!(g.iter().all(|&v| v == 0.0));
        }
        assert_eq!(f.params().diff, 0.0001);
    }
}
