//! Parent selection.

use crate::core::Genome;
use crate::error::{TourError, TourResult};
use crate::ops::FitnessEvaluator;
use rand::seq::index;
use rand::RngCore;
use std::sync::Arc;

/// Picks parents out of a population.
///
/// Implementations score candidates themselves through the evaluator they are
/// given; they must not assume the population is sorted.
///
/// # Examples
/// ```
/// use tourga::ops::{FitnessEvaluator, SelectionOperator};
/// use tourga::{instances, Genome};
/// use rand::SeedableRng;
///
/// struct FirstOnly;
///
/// impl SelectionOperator for FirstOnly {
///     fn select_index(
///         &self,
///         population: &[Genome],
///         _evaluator: &dyn FitnessEvaluator,
///         _rng: &mut dyn rand::RngCore,
///     ) -> Option<usize> {
///         (!population.is_empty()).then_some(0)
///     }
/// }
///
/// let points = instances::unit_square();
/// let population = vec![Genome::new(vec![0, 3, 2, 1, 0], 4).unwrap()];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let parent = FirstOnly.select(&population, &points, &mut rng).unwrap();
/// assert_eq!(parent.interior(), &[3, 2, 1]);
/// ```
pub trait SelectionOperator: Send + Sync {
    /// Returns the index of the genome to use as a parent, or `None` when the
    /// population is empty.
    fn select_index(
        &self,
        population: &[Genome],
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Option<usize>;

    /// Selects a [`Genome`] directly from the provided population.
    fn select<'a>(
        &self,
        population: &'a [Genome],
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Option<&'a Genome> {
        let idx = self.select_index(population, evaluator, rng)?;
        population.get(idx)
    }

    /// Convenience helper that samples two parents independently.
    fn select_pair<'a>(
        &self,
        population: &'a [Genome],
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Option<(&'a Genome, &'a Genome)> {
        let first = self.select(population, evaluator, rng)?;
        let second = self.select(population, evaluator, rng)?;
        Some((first, second))
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for &T {
    fn select_index(
        &self,
        population: &[Genome],
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        (**self).select_index(population, evaluator, rng)
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for &mut T {
    fn select_index(
        &self,
        population: &[Genome],
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        (**self).select_index(population, evaluator, rng)
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for Box<T> {
    fn select_index(
        &self,
        population: &[Genome],
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        (**self).select_index(population, evaluator, rng)
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for Arc<T> {
    fn select_index(
        &self,
        population: &[Genome],
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        (**self).select_index(population, evaluator, rng)
    }
}

/// Tournament selection: draws `size` distinct genomes and keeps the cheapest.
///
/// When the population is smaller than the tournament every genome competes.
/// Ties go to the contestant drawn first.
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    size: usize,
}

impl TournamentSelection {
    /// Creates a tournament selector of the provided size.
    ///
    /// # Errors
    /// Returns [`TourError::InvalidTournamentSize`] when `size` is zero.
    pub fn new(size: usize) -> TourResult<Self> {
        if size == 0 {
            return Err(TourError::InvalidTournamentSize(size));
        }
        Ok(Self { size })
    }

    /// Number of contestants per tournament.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl SelectionOperator for TournamentSelection {
    fn select_index(
        &self,
        population: &[Genome],
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        if population.is_empty() {
            return None;
        }
        let contestants = self.size.min(population.len());
        index::sample(rng, population.len(), contestants)
            .into_iter()
            .map(|idx| (idx, evaluator.cost(&population[idx])))
            .min_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs))
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PointSet;
    use crate::instances;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square_population() -> (PointSet, Vec<Genome>) {
        let points = instances::unit_square();
        let population = vec![
            Genome::new(vec![0, 2, 1, 3, 0], 4).unwrap(),
            Genome::new(vec![0, 1, 3, 2, 0], 4).unwrap(),
            Genome::new(vec![0, 1, 2, 3, 0], 4).unwrap(),
        ];
        (points, population)
    }

    #[test]
    fn rejects_empty_tournament() {
        assert_eq!(
            TournamentSelection::new(0).unwrap_err(),
            TourError::InvalidTournamentSize(0)
        );
    }

    #[test]
    fn full_tournament_returns_cheapest() {
        let (points, population) = square_population();
        let operator = TournamentSelection::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            assert_eq!(operator.select_index(&population, &points, &mut rng), Some(2));
        }
    }

    #[test]
    fn oversized_tournament_is_clamped() {
        let (points, population) = square_population();
        let operator = TournamentSelection::new(10).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let parent = operator.select(&population, &points, &mut rng).unwrap();
        assert_eq!(parent, &population[2]);
    }

    #[test]
    fn single_contestant_reaches_every_genome() {
        let (points, population) = square_population();
        let operator = TournamentSelection::new(1).unwrap();
        let mut rng = StdRng::seed_from_u64(15);
        let mut hits = [false; 3];
        for _ in 0..200 {
            let idx = operator.select_index(&population, &points, &mut rng).unwrap();
            hits[idx] = true;
        }
        assert!(hits.iter().all(|hit| *hit));
    }

    #[test]
    fn empty_population_selects_nothing() {
        let points = instances::unit_square();
        let operator = TournamentSelection::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(operator.select_pair(&[], &points, &mut rng).is_none());
    }
}
