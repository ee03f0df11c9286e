//! Mutation operators for perturbing tours.

use crate::core::Genome;
use crate::error::{TourError, TourResult};
use rand::seq::index;
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Perturbs a tour in place.
///
/// # Examples
/// ```
/// use tourga::ops::MutationOperator;
/// use tourga::Genome;
/// use rand::SeedableRng;
///
/// struct Never;
///
/// impl MutationOperator for Never {
///     fn mutate_in_place(&self, _genome: &mut Genome, _rng: &mut dyn rand::RngCore) -> bool {
///         false
///     }
/// }
///
/// let genome = Genome::new(vec![0, 1, 2, 0], 3).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// assert_eq!(Never.mutate(genome.clone(), &mut rng), genome);
/// ```
pub trait MutationOperator: Send + Sync {
    /// Possibly changes `genome`; returns whether it was changed.
    fn mutate_in_place(&self, genome: &mut Genome, rng: &mut dyn RngCore) -> bool;

    /// Helper that takes ownership of a genome and hands it back mutated.
    fn mutate(&self, mut genome: Genome, rng: &mut dyn RngCore) -> Genome {
        self.mutate_in_place(&mut genome, rng);
        genome
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for &T {
    fn mutate_in_place(&self, genome: &mut Genome, rng: &mut dyn RngCore) -> bool {
        (**self).mutate_in_place(genome, rng)
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for &mut T {
    fn mutate_in_place(&self, genome: &mut Genome, rng: &mut dyn RngCore) -> bool {
        (**self).mutate_in_place(genome, rng)
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for Box<T> {
    fn mutate_in_place(&self, genome: &mut Genome, rng: &mut dyn RngCore) -> bool {
        (**self).mutate_in_place(genome, rng)
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for Arc<T> {
    fn mutate_in_place(&self, genome: &mut Genome, rng: &mut dyn RngCore) -> bool {
        (**self).mutate_in_place(genome, rng)
    }
}

/// Swap mutation: with probability `rate`, exchanges two distinct interior
/// positions.
#[derive(Debug, Clone)]
pub struct SwapMutation {
    rate: f64,
}

impl SwapMutation {
    /// Creates a swap mutation operator.
    ///
    /// # Errors
    /// Returns [`TourError::InvalidMutationRate`] when `rate` is outside
    /// `[0, 1]` or NaN.
    pub fn new(rate: f64) -> TourResult<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(TourError::InvalidMutationRate(rate));
        }
        Ok(Self { rate })
    }

    /// Probability of a swap per call.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl MutationOperator for SwapMutation {
    fn mutate_in_place(&self, genome: &mut Genome, rng: &mut dyn RngCore) -> bool {
        if rng.gen::<f64>() >= self.rate {
            return false;
        }
        let interior = genome.interior().len();
        if interior < 2 {
            return false;
        }
        let picks = index::sample(rng, interior, 2);
        let (i, j) = (picks.index(0) + 1, picks.index(1) + 1);
        tracing::trace!(i, j, "swap mutation");
        genome.indices_mut().swap(i, j);
        true
    }
}
