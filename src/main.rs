use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rayprop::io::{Scenario, read_scenario, write_scenario};
use rayprop::sim::acoustics::ImpulseResponse;
use rayprop::{Simulation, TracerKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TracerArg {
    Sbr,
    ImageSource,
}

impl From<TracerArg> for TracerKind {
    fn from(arg: TracerArg) -> Self {
        match arg {
            TracerArg::Sbr => TracerKind::Sbr,
            TracerArg::ImageSource => TracerKind::ImageSource,
        }
    }
}

/// Traces 2D ray paths between a source and a receiver and prints the impulse response.
#[derive(Debug, Parser)]
#[command(name = "rayprop", version)]
struct Args {
    /// Scenario JSON file. A built-in demo room is used if omitted.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Path construction algorithm (overrides the scenario).
    #[arg(short, long, value_enum)]
    tracer: Option<TracerArg>,

    /// Maximum number of reflections per path (overrides the scenario).
    #[arg(short, long)]
    bounces: Option<usize>,

    /// Number of animation frames to step through.
    #[arg(short, long, default_value_t = 500)]
    frames: usize,

    /// Write the effective scenario to this file.
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut scenario = match &args.scenario {
        Some(path) => read_scenario(path)?,
        None => Scenario::demo()?,
    };
    if let Some(tracer) = args.tracer {
        scenario.config.tracer = tracer.into();
    }
    if let Some(bounces) = args.bounces {
        scenario.config.max_bounces = bounces;
    }
    scenario.validate()?;

    if let Some(path) = &args.dump {
        write_scenario(path, &scenario)?;
        info!(path = %path.display(), "Scenario written");
    }

    let speed = scenario.config.ray_speed;
    let k = scenario.config.amplitude_constant;
    let mut sim: Simulation = scenario.into_simulation()?;
    info!(
        tracer = ?sim.config().tracer,
        rays = sim.rays().len(),
        obstacles = sim.scene().obstacles().len(),
        "Rays launched"
    );

    let mut arrivals = 0;
    let frames = sim.run(args.frames, |frame| {
        let n = frame.impulse_response.len();
        if n > arrivals {
            info!(time = frame.time, arrivals = n, "New arrivals");
            arrivals = n;
        }
    });
    let last = sim.frame();
    info!(
        frames,
        time = sim.time(),
        raylets = last.raylets.len(),
        "Animation finished"
    );

    let ir = ImpulseResponse::complete(sim.rays(), speed, k);
    println!("{} arrivals", ir.len());
    println!("{:>12} {:>12} {:>6}", "delay", "amplitude", "order");
    for s in ir.samples() {
        println!("{:>12.3} {:>12.6} {:>6}", s.delay, s.amplitude, s.order);
    }
    println!("Total energy: {:.6e}", ir.total_energy());

    Ok(())
}
