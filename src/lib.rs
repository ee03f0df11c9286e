#![warn(missing_docs)]

/*! This is a crate for planning short closed tours with a genetic algorithm.

Every tour starts and ends at a fixed anchor point ("home") and visits all
other points exactly once. The engine keeps a population of candidate
tours and improves it generation after generation through tournament
selection, order crossover, swap mutation and elitism.

```
use std::sync::atomic::AtomicBool;
use tourga::{instances, StopCondition, TourGa};

let settings = tourga::Settings::default()
    .with_population_size(20)
    .with_elite_count(4)
    .with_seed(42);
let mut rng = settings.rng();
let mut ga = TourGa::builder(instances::unit_square())
    .settings(settings)
    .build(&mut rng)
    .unwrap();
let summary = ga.run(
    &mut rng,
    &StopCondition::max_generations(50),
    &AtomicBool::new(false),
);
assert!((summary.best_cost().unwrap() - 4.0).abs() < 1e-9);
```
!*/

pub mod core;
pub mod engine;
pub mod error;
pub mod instances;
pub mod ops;
pub mod settings;

pub use crate::core::distance::{distance, tour_cost};
pub use crate::core::history::{GenerationReport, RunHistory};
pub use crate::core::{Genome, Point, PointSet, Population, ANCHOR};
pub use engine::{EngineState, RunSummary, StopCondition, StopReason, TourGa, TourGaBuilder};
pub use error::{GenomeError, TourError, TourResult};
pub use settings::Settings;
