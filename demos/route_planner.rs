use std::error::Error;
use std::sync::atomic::AtomicBool;
use tourga::{PointSet, Settings, StopCondition, TourGa};
use tracing::Level;

// Approximate planar positions in kilometres, relative to the depot.
const TOWNS: &[(&str, f64, f64)] = &[
    ("Canoas", -2.1, 13.4),
    ("Gravataí", 21.6, 9.8),
    ("Novo Hamburgo", 2.9, 38.2),
    ("São Leopoldo", -1.4, 30.1),
    ("Viamão", 24.3, -6.2),
    ("Guaíba", -15.8, -14.7),
    ("Montenegro", -38.5, 42.6),
    ("Taquara", 48.1, 51.9),
    ("Santo Antônio da Patrulha", 67.3, 12.5),
    ("Camaquã", -42.7, -98.4),
    ("Caxias do Sul", 12.4, 104.8),
    ("Lajeado", -83.1, 66.2),
    ("Santa Cruz do Sul", -122.6, 28.3),
    ("Osório", 92.4, -5.1),
    ("Tramandaí", 111.8, -9.4),
];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let mut args = std::env::args().skip(1);
    let generations: usize = args.next().map(|raw| raw.parse()).transpose()?.unwrap_or(500);
    let seed: Option<u64> = args.next().map(|raw| raw.parse()).transpose()?;

    let points = PointSet::from_records("Porto Alegre", (0.0, 0.0), TOWNS.iter().copied())?;
    let mut settings = Settings::default();
    settings.seed = seed;
    let mut rng = settings.rng();
    let mut engine = TourGa::builder(points).settings(settings).build(&mut rng)?;

    let stop = StopCondition::max_generations(generations).or(StopCondition::stagnation(150));
    let cancel = AtomicBool::new(false);
    let summary = engine.run_observed(&mut rng, &stop, &cancel, |report| {
        if report.generation == 1 || report.generation % 25 == 0 {
            tracing::info!(
                generation = report.generation,
                best_km = %format!("{:.2}", report.best_cost),
                mean_km = %format!("{:.2}", report.mean_cost),
                "progress"
            );
        }
    });

    if let Some(best) = summary.best() {
        let route = engine.points().names_of(best).join(" -> ");
        println!("--------------------------------------------------------");
        println!("Generation {}", summary.generations);
        println!("Best distance: {:.2} km", summary.best_cost().unwrap_or_default());
        println!("Route: {route}");
    }
    if let Some(runner_up) = engine.second_best() {
        println!("Runner-up: {}", engine.points().names_of(runner_up).join(" -> "));
    }
    let history = engine.history().best_costs();
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        println!("Improved from {first:.2} km to {last:.2} km over {} generations", history.len());
    }
    Ok(())
}
