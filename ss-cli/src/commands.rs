//! CLI command implementations.

use ss_core::events::TracingSink;
use ss_core::presets::PresetLoader;
use ss_core::types::{Environment, ImpactOutcome, Launch, StoneProperties};
use ss_core::Simulation;

use crate::RunArgs;

/// Throw a stone and print its trajectory.
pub fn run(args: &RunArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let loader = PresetLoader::new(&args.presets);

    let stone = match &args.stone {
        Some(name) => loader.load_stone(name)?,
        None => StoneProperties::new("custom", args.area, args.mass, args.size),
    };
    let launch = match &args.launch {
        Some(name) => loader.load_launch(name)?,
        None => Launch::new(args.velocity, args.angle, args.height),
    };
    let env = match &args.environment {
        Some(name) => loader.load_environment(name)?,
        None => Environment::default(),
    };

    println!("Skipstone");
    println!("─────────");
    println!(
        "Stone: {} (A = {} m², m = {} kg, size = {} m)",
        stone.name, stone.area, stone.mass, stone.size
    );
    println!(
        "Launch: {} m/s at {}° from {} m",
        launch.speed, launch.angle_of_attack, launch.height
    );
    println!("Water: {} (ρ = {} kg/m³)", env.name, env.water_density);
    println!();

    let mut sim = Simulation::new(stone, launch, env)?;
    if verbose {
        sim.add_sink(Box::new(TracingSink));
    }

    if !args.quiet {
        println!("{:>5} {:>10} {:>10} {:>10} {:>10}", "tick", "x", "y", "vx", "vy");
        print_row(&sim);
    }

    while sim.ticks() < args.max_ticks && !sim.is_sunk() {
        let report = sim.tick();
        if !args.quiet {
            print_row(&sim);
        }
        if let Some(outcome) = report.impact {
            print_impact(report.tick, outcome, sim.penetration_depth());
        }
    }

    println!();
    println!(
        "{} after {} ticks, {} skip(s)",
        if sim.is_sunk() { "Sunk" } else { "Still skipping" },
        sim.ticks(),
        sim.skips()
    );
    Ok(())
}

fn print_row(sim: &Simulation) {
    let pos = sim.position();
    let vel = sim.velocity();
    println!(
        "{:>5} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
        sim.ticks(),
        pos.x,
        pos.y,
        vel.x,
        vel.y
    );
}

fn print_impact(tick: u64, outcome: ImpactOutcome, depth: f64) {
    match outcome {
        ImpactOutcome::SkipSuccess { velocity } => println!(
            "  tick {tick}: success, depth {depth:.3} m, rebound ({:.3}, {:.3}) m/s",
            velocity.x, velocity.y
        ),
        ImpactOutcome::SkipFailure { cause } => {
            println!("  tick {tick}: failure ({cause:?})")
        }
    }
}

/// List the available presets.
pub fn list(presets_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let loader = PresetLoader::new(presets_path);

    println!("Stones:       {}", loader.list_stones()?.join(", "));
    println!("Launches:     {}", loader.list_launches()?.join(", "));
    println!("Environments: {}", loader.list_environments()?.join(", "));
    Ok(())
}
