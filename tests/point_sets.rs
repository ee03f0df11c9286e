use rand::SeedableRng;
use std::sync::atomic::AtomicBool;
use tourga::{tour_cost, Genome, PointSet, StopCondition, TourError, TourGa};

fn coastal_towns() -> PointSet {
    PointSet::from_records(
        "Harbor",
        (0.0, 0.0),
        vec![
            ("Lighthouse", 12.0, 3.0),
            ("Marsh", 4.0, 9.5),
            ("Quarry", -6.0, 14.0),
            ("Mill", -11.0, 2.0),
            ("Ferry", -3.0, -8.0),
            ("Orchard", 9.0, -6.5),
        ],
    )
    .unwrap()
}

#[test]
fn best_route_resolves_to_names() {
    let points = coastal_towns();
    let mut rng = rand::rngs::StdRng::seed_from_u64(8);
    let mut engine = TourGa::builder(points)
        .population_size(30)
        .elite_count(5)
        .build(&mut rng)
        .unwrap();
    let summary = engine.run(
        &mut rng,
        &StopCondition::max_generations(60),
        &AtomicBool::new(false),
    );
    let best = summary.best().unwrap();
    let names = engine.points().names_of(best);
    assert_eq!(names.len(), 8);
    assert_eq!(names[0], "Harbor");
    assert_eq!(names[7], "Harbor");
    let mut visited: Vec<&str> = names[1..7].to_vec();
    visited.sort_unstable();
    assert_eq!(
        visited,
        vec!["Ferry", "Lighthouse", "Marsh", "Mill", "Orchard", "Quarry"]
    );
    let reported = summary.best_cost().unwrap();
    assert!((tour_cost(best, engine.points()) - reported).abs() < 1e-12);
}

#[test]
fn runner_up_is_exposed() {
    let points = coastal_towns();
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    let mut engine = TourGa::builder(points)
        .population_size(12)
        .elite_count(2)
        .build(&mut rng)
        .unwrap();
    let report = engine.step(&mut rng);
    let runner_up = engine.second_best().unwrap();
    assert!(tour_cost(runner_up, engine.points()) >= report.best_cost);
}

#[test]
fn single_point_is_rejected() {
    let err = PointSet::from_records("Harbor", (0.0, 0.0), Vec::<(&str, f64, f64)>::new())
        .unwrap_err();
    assert_eq!(err, TourError::EmptyPointSet { found: 1 });
}

#[test]
fn two_points_make_a_trivial_tour() {
    let points = PointSet::from_records("Harbor", (0.0, 0.0), vec![("Buoy", 3.0, 4.0)]).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let mut engine = TourGa::builder(points)
        .population_size(4)
        .elite_count(1)
        .mutation_rate(1.0)
        .build(&mut rng)
        .unwrap();
    for _ in 0..5 {
        let report = engine.step(&mut rng);
        assert_eq!(report.best, Genome::new(vec![0, 1, 0], 2).unwrap());
        assert!((report.best_cost - 10.0).abs() < 1e-12);
    }
}

#[test]
fn extreme_coordinates_are_plain_arithmetic() {
    let points = PointSet::from_records(
        "Origin",
        (-51_206_533.0, -30_031_771.0),
        vec![("Far", 1.0e12, -1.0e12), ("Near", -51_206_500.0, -30_031_700.0)],
    )
    .unwrap();
    let tour = Genome::identity(points.len());
    assert!(tour_cost(&tour, &points).is_finite());
}

#[cfg(feature = "serde")]
#[test]
fn summaries_serialize_for_reporting() {
    let points = coastal_towns();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    let mut engine = TourGa::builder(points)
        .population_size(6)
        .elite_count(1)
        .build(&mut rng)
        .unwrap();
    let summary = engine.run(
        &mut rng,
        &StopCondition::max_generations(3),
        &AtomicBool::new(false),
    );
    let json = serde_json::to_string(&summary).unwrap();
    let back: tourga::RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back.generations, 3);
    assert_eq!(back.best(), summary.best());
}
