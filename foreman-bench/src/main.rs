use clap::Parser;
use log::*;
use std::path::PathBuf;
use terran_foreman::simulation::*;
use terran_foreman::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Runs a build plan against the simulated world", long_about = None)]
struct Args {
    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 3000)]
    ticks: u32,

    /// Build plan JSON (list of unit_type/increment steps), defaults to the standard opening
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Foreman config JSON with overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); falls back to RUST_LOG when absent
    #[arg(long)]
    log_level: Option<log::LevelFilter>,

    /// Print the final state as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    match args.log_level {
        Some(level) => terran_foreman::logging::setup_logging(level),
        None => env_logger::init(),
    }

    let plan = match &args.plan {
        Some(path) => BuildPlan::load(path).map_err(|err| format!("Failed to load plan {}: {}", path.display(), err))?,
        None => BuildPlan::standard_opening(),
    };

    let config = match &args.config {
        Some(path) => ForemanConfig::load(path).map_err(|err| format!("Failed to load config {}: {}", path.display(), err))?,
        None => ForemanConfig::default(),
    };

    info!("Running {} goals for {} ticks", plan.len(), args.ticks);

    let mut world = SimWorldBuilder::standard().build();
    let mut supervisor = ConstructionSupervisor::new(config);

    let mut issued = 0;
    let mut failures = 0;
    let mut completed_at = None;

    for _ in 0..args.ticks {
        let report = terran_foreman::tick(&plan, &mut supervisor, &mut world);

        issued += report.issued();
        failures += report.failures.len();

        if completed_at.is_none() && plan.active_goal(&world).is_none() {
            completed_at = Some(world.tick());
        }

        world.step();
    }

    let summary = Summary::collect(&plan, &supervisor, &world, issued, failures, completed_at);

    if args.json {
        let output = serde_json::to_string_pretty(&summary.to_json()).map_err(|err| format!("Failed to serialize summary: {}", err))?;

        println!("{}", output);
    } else {
        summary.print();
    }

    Ok(())
}

struct KindSummary {
    unit_type: UnitType,
    planned: u32,
    built: u32,
    ready: u32,
    estimated: u32,
}

struct Summary {
    ticks: u64,
    issued: usize,
    failures: usize,
    completed_at: Option<u64>,
    minerals: u32,
    vespene: u32,
    kinds: Vec<KindSummary>,
}

impl Summary {
    fn collect(
        plan: &BuildPlan,
        supervisor: &ConstructionSupervisor,
        world: &SimWorld,
        issued: usize,
        failures: usize,
        completed_at: Option<u64>,
    ) -> Summary {
        let kinds = supervisor
            .builders()
            .map(|builder| {
                let unit_type = builder.unit_type();

                KindSummary {
                    unit_type,
                    planned: plan.final_target(unit_type),
                    built: world.count_of(unit_type.counted_as()),
                    ready: world.ready_of(unit_type.counted_as()).len() as u32,
                    estimated: builder.estimated_total(),
                }
            })
            .collect();

        Summary {
            ticks: world.tick(),
            issued,
            failures,
            completed_at,
            minerals: world.minerals(),
            vespene: world.vespene(),
            kinds,
        }
    }

    fn print(&self) {
        match self.completed_at {
            Some(tick) => println!("Plan complete at tick {}", tick),
            None => println!("Plan incomplete after {} ticks", self.ticks),
        }

        println!("Commands issued: {} (rejected: {})", self.issued, self.failures);
        println!("Bank: {} minerals, {} vespene", self.minerals, self.vespene);
        println!();
        println!("{:<16} {:>8} {:>8} {:>8} {:>10}", "Kind", "Planned", "Built", "Ready", "Estimated");

        for kind in self.kinds.iter() {
            println!(
                "{:<16} {:>8} {:>8} {:>8} {:>10}",
                kind.unit_type.name(),
                kind.planned,
                kind.built,
                kind.ready,
                kind.estimated
            );
        }
    }

    fn to_json(&self) -> serde_json::Value {
        let kinds: Vec<serde_json::Value> = self
            .kinds
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "unit_type": kind.unit_type,
                    "planned": kind.planned,
                    "built": kind.built,
                    "ready": kind.ready,
                    "estimated": kind.estimated,
                })
            })
            .collect();

        serde_json::json!({
            "ticks": self.ticks,
            "completed_at": self.completed_at,
            "issued": self.issued,
            "failures": self.failures,
            "minerals": self.minerals,
            "vespene": self.vespene,
            "kinds": kinds,
        })
    }
}
