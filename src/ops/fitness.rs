//! Fitness evaluation: mapping tours to costs.

use crate::core::distance::tour_cost;
use crate::core::{Genome, PointSet};
use std::sync::Arc;

/// Scores tours; lower is better.
///
/// [`PointSet`] implements this trait with the Euclidean length of the closed
/// tour, which is what the engine uses.
///
/// # Examples
/// ```
/// use tourga::ops::FitnessEvaluator;
/// use tourga::{instances, Genome};
///
/// struct Hops;
///
/// impl FitnessEvaluator for Hops {
///     fn cost(&self, genome: &Genome) -> f64 {
///         (genome.len() - 1) as f64
///     }
/// }
///
/// let tour = Genome::new(vec![0, 1, 2, 0], 3).unwrap();
/// assert_eq!(Hops.cost(&tour), 3.0);
/// let points = instances::unit_square();
/// let square = Genome::new(vec![0, 1, 2, 3, 0], 4).unwrap();
/// assert_eq!(points.evaluate(&[square]), vec![4.0]);
/// ```
pub trait FitnessEvaluator: Send + Sync {
    /// Returns the cost of a single tour.
    fn cost(&self, genome: &Genome) -> f64;

    /// Returns one cost per tour, in the same order as `population`.
    fn evaluate(&self, population: &[Genome]) -> Vec<f64> {
        population.iter().map(|genome| self.cost(genome)).collect()
    }
}

impl FitnessEvaluator for PointSet {
    fn cost(&self, genome: &Genome) -> f64 {
        debug_assert!(genome.validate(self.len()).is_ok());
        tour_cost(genome, self)
    }
}

impl<T: FitnessEvaluator + ?Sized> FitnessEvaluator for &T {
    fn cost(&self, genome: &Genome) -> f64 {
        (**self).cost(genome)
    }
}

impl<T: FitnessEvaluator + ?Sized> FitnessEvaluator for &mut T {
    fn cost(&self, genome: &Genome) -> f64 {
        (**self).cost(genome)
    }
}

impl<T: FitnessEvaluator + ?Sized> FitnessEvaluator for Box<T> {
    fn cost(&self, genome: &Genome) -> f64 {
        (**self).cost(genome)
    }
}

impl<T: FitnessEvaluator + ?Sized> FitnessEvaluator for Arc<T> {
    fn cost(&self, genome: &Genome) -> f64 {
        (**self).cost(genome)
    }
}

/// Euclidean cost of every tour in `population`, order preserved.
#[must_use]
pub fn evaluate(population: &[Genome], points: &PointSet) -> Vec<f64> {
    points.evaluate(population)
}

/// Returns the tours reordered by ascending cost.
///
/// The sort is stable, so tours with equal cost keep their relative order.
///
/// # Examples
/// ```
/// use tourga::ops::sort_by_fitness;
/// use tourga::Genome;
/// let a = Genome::new(vec![0, 1, 2, 0], 3).unwrap();
/// let b = Genome::new(vec![0, 2, 1, 0], 3).unwrap();
/// let sorted = sort_by_fitness(&[a.clone(), b.clone()], &[2.0, 1.0]);
/// assert_eq!(sorted, vec![b, a]);
/// ```
#[must_use]
pub fn sort_by_fitness(population: &[Genome], fitness: &[f64]) -> Vec<Genome> {
    debug_assert_eq!(population.len(), fitness.len());
    let mut order: Vec<usize> = (0..population.len().min(fitness.len())).collect();
    order.sort_by(|&lhs, &rhs| fitness[lhs].total_cmp(&fitness[rhs]));
    order.into_iter().map(|idx| population[idx].clone()).collect()
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let len = values.len() as f64;
    values.iter().sum::<f64>() / len
}
