use std::path::Path;

use serde::Deserialize;

use crate::solver::{SolverParams, ITER};
use crate::source::{Brush, Emitter};

pub const DEFAULT_PATH: &str = "fluidsquare.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub run: RunConfig,
    pub emitters: Vec<Emitter>,
    pub brush: Option<BrushConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub size: usize,
    pub diff: f32,
    pub visc: f32,
    pub dt: f32,
    pub iter: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub steps: u64,
    pub report_interval: u64,
    pub seed: u64,
}

/// Stamp applied every step, standing in for a held mouse button.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub x: i32,
    pub y: i32,
    pub half_extent: i32,
    pub density: f32,
    /// Drag direction pushed through the brush each step, like a right-button drag.
    pub force: Option<ForceConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    pub dx: f32,
    pub dy: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            run: RunConfig::default(),
            emitters: vec![
                Emitter { x: 80, y: 128, density: 500.0, vx: 0.1, vy: 0.0 },
                Emitter { x: 176, y: 128, density: 500.0, vx: -0.1, vy: 0.0 },
            ],
            brush: None,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            size: 256,
            diff: 0.0,
            visc: 0.0,
            dt: 0.2,
            iter: ITER,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 600,
            report_interval: 60,
            seed: 42,
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            x: 128,
            y: 128,
            half_extent: 3,
            density: 50.0,
            force: None,
        }
    }
}

impl PhysicsConfig {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            dt: self.dt,
            diff: self.diff,
            visc: self.visc,
            iter: self.iter,
        }
    }
}

impl BrushConfig {
    pub fn brush(&self) -> Brush {
        Brush { half_extent: self.half_extent }
    }
}

/// Load `fluidsquare.yaml` from the working directory, or defaults.
pub fn load() -> Config {
    load_from(Path::new(DEFAULT_PATH))
}

pub fn load_from(path: &Path) -> Config {
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("failed to parse {}: {e}; using defaults", path.display());
                    Config::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {e}; using defaults", path.display());
                Config::default()
            }
        }
    } else {
        Config::default()
    }
}
