use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use fluidsquare::config::{self, Config};
use fluidsquare::solver::diagnostics;
use fluidsquare::source::{jitter, splat_density, splat_force, splat_velocity};
use fluidsquare::{FluidError, FluidField};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => config::load_from(Path::new(&path)),
        None => config::load(),
    };

    if let Err(e) = run(&cfg) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cfg: &Config) -> Result<(), FluidError> {
    let params = cfg.physics.solver_params();
    let mut field = FluidField::with_params(cfg.physics.size, params)?;
    let mut rng = StdRng::seed_from_u64(cfg.run.seed);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || r.store(false, Ordering::SeqCst)) {
        log::warn!("could not install Ctrl+C handler: {e}");
    }

    log::info!(
        "running {} steps on a {}x{} grid ({} emitters, brush {})",
        cfg.run.steps,
        field.size(),
        field.size(),
        cfg.emitters.len(),
        if cfg.brush.is_some() { "on" } else { "off" }
    );

    let interval = cfg.run.report_interval.max(1);
    let mut step_count: u64 = 0;
    while step_count < cfg.run.steps && running.load(Ordering::SeqCst) {
        if let Some(b) = &cfg.brush {
            let brush = b.brush();
            splat_density(&mut field, &brush, b.x, b.y, b.density)?;
            let (jx, jy) = jitter(&mut rng);
            splat_velocity(&mut field, &brush, b.x, b.y, jx, jy)?;
            if let Some(force) = &b.force {
                splat_force(&mut field, &brush, b.x, b.y, force.dx, force.dy)?;
            }
        }
        for emitter in &cfg.emitters {
            emitter.apply(&mut field)?;
        }

        field.step();
        step_count += 1;

        if step_count % interval == 0 || step_count == cfg.run.steps {
            let finite = diagnostics::all_finite(field.density())
                && diagnostics::all_finite(field.velocity_x())
                && diagnostics::all_finite(field.velocity_y());
            if !finite {
                log::warn!("non-finite values at step {step_count}; stopping");
                break;
            }
            let mass = diagnostics::total_density(field.density());
            let ke = diagnostics::kinetic_energy(field.velocity_x(), field.velocity_y());
            let div = diagnostics::divergence_l1(field.velocity_x(), field.velocity_y());
            let time = step_count as f64 * params.dt as f64;
            log::info!(
                "step={} t={:.3} mass={:.4e} KE={:.6e} |div|={:.3e} max_density={:.3}",
                step_count,
                time,
                mass,
                ke,
                div,
                diagnostics::max_abs(field.density())
            );
        }
    }

    if !running.load(Ordering::SeqCst) {
        log::info!("interrupted after {step_count} steps");
    }
    Ok(())
}
