use rand::Rng;
use serde::Deserialize;

use crate::error::FluidError;
use crate::state::FluidField;

/// Square stamp around a centre cell. Covers offsets `-half_extent..half_extent`
/// on both axes; cells falling outside the grid are skipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub half_extent: i32,
}

impl Default for Brush {
    fn default() -> Self {
        Self { half_extent: 3 }
    }
}

impl Brush {
    /// In-grid cells covered by the brush centred at (cx, cy).
    pub fn cells(&self, cx: i32, cy: i32, n: usize) -> impl Iterator<Item = (usize, usize)> {
        let h = self.half_extent.max(0);
        let n = n as i64;
        (-h..h)
            .flat_map(move |dj| {
                (-h..h).map(move |di| {
                    let x = cx as i64 + di as i64;
                    let y = cy as i64 + dj as i64;
                    (x, y)
                })
            })
            .filter(move |&(x, y)| x >= 0 && y >= 0 && x < n && y < n)
            .map(|(x, y)| (x as usize, y as usize))
    }
}

pub fn splat_density(
    field: &mut FluidField,
    brush: &Brush,
    cx: i32,
    cy: i32,
    amount: f32,
) -> Result<(), FluidError> {
    let n = field.size();
    for (x, y) in brush.cells(cx, cy, n) {
        field.add_density(x, y, amount)?;
    }
    Ok(())
}

pub fn splat_velocity(
    field: &mut FluidField,
    brush: &Brush,
    cx: i32,
    cy: i32,
    amount_x: f32,
    amount_y: f32,
) -> Result<(), FluidError> {
    let n = field.size();
    for (x, y) in brush.cells(cx, cy, n) {
        field.add_velocity(x, y, amount_x, amount_y)?;
    }
    Ok(())
}

/// Push the brush area along the direction of a drag `(dx, dy)`. Only the
/// direction is kept; a zero drag adds nothing.
pub fn splat_force(
    field: &mut FluidField,
    brush: &Brush,
    cx: i32,
    cy: i32,
    dx: f32,
    dy: f32,
) -> Result<(), FluidError> {
    if dx == 0.0 && dy == 0.0 {
        return Ok(());
    }
    let len = dx.hypot(dy);
    splat_velocity(field, brush, cx, cy, dx / len, dy / len)
}

/// Random velocity pair in [-0.5, 0.5) per component.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R) -> (f32, f32) {
    (rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)
}

/// Fixed source fed into the field every frame.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Emitter {
    pub x: usize,
    pub y: usize,
    #[serde(default)]
    pub density: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
}

impl Emitter {
    pub fn apply(&self, field: &mut FluidField) -> Result<(), FluidError> {
        field.add_density(self.x, self.y, self.density)?;
        field.add_velocity(self.x, self.y, self.vx, self.vy)
    }
}
