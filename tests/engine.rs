use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::AtomicBool;
use tourga::ops::{CrossoverOperator, MutationOperator, OrderCrossover};
use tourga::{instances, Genome, Population, Settings, StopCondition, StopReason, TourGa};

#[test]
fn unit_square_converges_to_perimeter() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut engine = TourGa::builder(instances::unit_square())
        .population_size(20)
        .elite_count(4)
        .build(&mut rng)
        .unwrap();
    let summary = engine.run(
        &mut rng,
        &StopCondition::max_generations(200),
        &AtomicBool::new(false),
    );
    assert_eq!(summary.stop_reason, StopReason::Condition);
    assert_eq!(summary.generations, 200);
    let best_cost = summary.best_cost().unwrap();
    assert!((best_cost - 4.0).abs() < 1e-9, "best cost {best_cost}");
    let names = engine.points().names_of(summary.best().unwrap());
    assert_eq!(names.first(), Some(&"A"));
    assert_eq!(names.last(), Some(&"A"));
}

#[test]
fn best_cost_never_gets_worse() {
    let mut rng = StdRng::seed_from_u64(77);
    let points = instances::random_uniform(25, 100.0, &mut rng);
    let mut engine = TourGa::builder(points)
        .population_size(30)
        .elite_count(1)
        .mutation_rate(0.3)
        .build(&mut rng)
        .unwrap();
    engine.run(
        &mut rng,
        &StopCondition::max_generations(150),
        &AtomicBool::new(false),
    );
    let costs = engine.history().best_costs();
    assert_eq!(costs.len(), 150);
    for pair in costs.windows(2) {
        assert!(pair[1] <= pair[0], "best cost rose from {} to {}", pair[0], pair[1]);
    }
}

#[test]
fn decagon_gets_close_to_its_perimeter() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut engine = TourGa::builder(instances::regular_polygon(10, 1.0))
        .population_size(60)
        .build(&mut rng)
        .unwrap();
    let initial = engine.step(&mut rng).best_cost;
    let summary = engine.run(
        &mut rng,
        &StopCondition::max_generations(400).or(StopCondition::target_cost_below(
            instances::polygon_perimeter(10, 1.0) + 1e-9,
        )),
        &AtomicBool::new(false),
    );
    let best = summary.best_cost().unwrap();
    assert!(best < initial);
    assert!(best <= 1.25 * instances::polygon_perimeter(10, 1.0), "best cost {best}");
}

#[test]
fn elite_only_population_is_static() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut engine = TourGa::builder(instances::regular_polygon(7, 2.0))
        .population_size(5)
        .elite_count(5)
        .mutation_rate(1.0)
        .build(&mut rng)
        .unwrap();
    let first = engine.step(&mut rng);
    let sorted = engine.population().clone();
    for _ in 0..10 {
        let report = engine.step(&mut rng);
        assert_eq!(report.best, first.best);
        assert_eq!(report.best_cost, first.best_cost);
        assert_eq!(engine.population(), &sorted);
    }
}

#[test]
fn zero_mutation_rate_keeps_children_as_crossover_output() {
    // Order crossover of two identical parents returns that parent, so without
    // mutation a uniform population can never change.
    let mut rng = StdRng::seed_from_u64(31);
    let tour = Genome::random(12, &mut rng);
    let seed = Population::from_genomes(vec![tour.clone(); 8]);
    let mut engine = TourGa::builder(instances::regular_polygon(12, 1.0))
        .population_size(8)
        .elite_count(2)
        .mutation_rate(0.0)
        .initial_population(seed)
        .build(&mut rng)
        .unwrap();
    for _ in 0..25 {
        engine.step(&mut rng);
        assert!(engine.population().iter().all(|genome| genome == &tour));
    }
}

#[test]
fn full_mutation_rate_breaks_a_uniform_population() {
    let mut rng = StdRng::seed_from_u64(31);
    let tour = Genome::random(12, &mut rng);
    let seed = Population::from_genomes(vec![tour.clone(); 8]);
    let mut engine = TourGa::builder(instances::regular_polygon(12, 1.0))
        .population_size(8)
        .elite_count(2)
        .mutation_rate(1.0)
        .initial_population(seed)
        .build(&mut rng)
        .unwrap();
    engine.step(&mut rng);
    let changed = engine
        .population()
        .iter()
        .skip(2)
        .filter(|genome| *genome != &tour)
        .count();
    assert_eq!(changed, 6);
}

#[test]
fn same_seed_same_run() {
    let run = |seed: u64| {
        let settings = Settings::default().with_population_size(24).with_seed(seed);
        let mut rng = settings.rng();
        let points = instances::random_uniform(18, 10.0, &mut rng);
        let mut engine = TourGa::builder(points)
            .settings(settings)
            .build(&mut rng)
            .unwrap();
        engine.run(
            &mut rng,
            &StopCondition::max_generations(40),
            &AtomicBool::new(false),
        );
        engine.history().clone()
    };
    assert_eq!(run(123), run(123));
    assert_ne!(run(123).best_tours(), run(124).best_tours());
}

#[test]
fn custom_operators_are_used() {
    struct FirstParent;

    impl CrossoverOperator for FirstParent {
        fn crossover(&self, a: &Genome, _b: &Genome, _rng: &mut dyn rand::RngCore) -> Genome {
            a.clone()
        }
    }

    struct Frozen;

    impl MutationOperator for Frozen {
        fn mutate_in_place(&self, _genome: &mut Genome, _rng: &mut dyn rand::RngCore) -> bool {
            false
        }
    }

    let mut rng = StdRng::seed_from_u64(4);
    let seed = Population::random(10, 9, &mut rng);
    let originals = seed.clone();
    let mut engine = TourGa::builder(instances::regular_polygon(9, 1.0))
        .population_size(10)
        .elite_count(0)
        .crossover(FirstParent)
        .mutation(Frozen)
        .initial_population(seed)
        .build(&mut rng)
        .unwrap();
    for _ in 0..5 {
        engine.step(&mut rng);
        assert!(engine
            .population()
            .iter()
            .all(|genome| originals.genomes().contains(genome)));
    }

    let reference = OrderCrossover::new();
    let a = &originals.genomes()[0];
    assert_eq!(reference.crossover(a, a, &mut rng), *a);
}

#[test]
fn stagnation_ends_a_solved_run() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut engine = TourGa::builder(instances::unit_square())
        .population_size(10)
        .elite_count(2)
        .build(&mut rng)
        .unwrap();
    let summary = engine.run(
        &mut rng,
        &StopCondition::stagnation(15).or(StopCondition::max_generations(1_000)),
        &AtomicBool::new(false),
    );
    assert_eq!(summary.stop_reason, StopReason::Condition);
    assert!(summary.generations < 1_000);
    assert_eq!(engine.history().generations_without_improvement(), 15);
}
